//! Tests for the editor graph model.
mod common;
use common::*;
use serde_json::json;
use wireflow::graph::{ConditionData, NodeData};
use wireflow::prelude::*;

#[test]
fn test_add_node_assigns_kind_prefixed_ids() {
    let mut graph = GraphModel::new();
    let t = graph.add_node(NodeKind::Trigger);
    let a1 = graph.add_node(NodeKind::Action);
    let a2 = graph.add_node(NodeKind::Action);
    let c = graph.add_node(NodeKind::Condition);

    assert_eq!(t.id, "trigger-1");
    assert_eq!(a1.id, "action-1");
    assert_eq!(a2.id, "action-2");
    assert_eq!(c.id, "condition-1");
    assert_eq!(graph.len(), 4);
    assert_eq!(t.label(), "Trigger");
    assert_eq!(t.trigger_type(), None);
}

#[test]
fn test_add_node_skips_ids_already_taken() {
    let mut graph = GraphModel::new();
    graph.add_node(NodeKind::Action);
    graph.add_node(NodeKind::Action);
    graph.remove_node("action-1");

    // One action left, but "action-2" is still in use.
    let next = graph.add_node(NodeKind::Action);
    assert_eq!(next.id, "action-3");
}

#[test]
fn test_connect_generates_unique_edge_ids() {
    let mut graph = GraphModel::new();
    let t = graph.add_node(NodeKind::Trigger);
    let a = graph.add_node(NodeKind::Action);

    let first = graph.connect(&t.id, &a.id);
    let second = graph.connect(&t.id, &a.id);

    assert_eq!(first.id, "e-trigger-1-action-1");
    assert_eq!(second.id, "e-trigger-1-action-1-2");
    assert_eq!(graph.edges.len(), 2);
}

#[test]
fn test_connect_accepts_dangling_endpoints() {
    let mut graph = GraphModel::new();
    let t = graph.add_node(NodeKind::Trigger);
    let edge = graph.connect(&t.id, "missing");
    assert_eq!(edge.target, "missing");
    assert_eq!(graph.edges.len(), 1);
}

#[test]
fn test_remove_node_drops_incident_edges() {
    let mut draft = create_onboarding_draft();
    let graph = &mut draft.graph;
    assert_eq!(graph.edges.len(), 2);

    let removed = graph.remove_node("action-1").unwrap();
    assert_eq!(removed.action_type(), Some("SEND_EMAIL"));
    assert!(graph.edges.is_empty());
    assert!(graph.remove_node("action-1").is_none());
}

#[test]
fn test_disconnect_removes_single_edge() {
    let mut draft = create_onboarding_draft();
    let graph = &mut draft.graph;
    let edge_id = graph.edges[0].id.clone();

    assert!(graph.disconnect(&edge_id).is_some());
    assert_eq!(graph.edges.len(), 1);
    assert!(graph.disconnect(&edge_id).is_none());
}

#[test]
fn test_update_node_data_applies_all_patches() {
    let mut graph = GraphModel::new();
    let a = graph.add_node(NodeKind::Action);
    graph
        .update_node_data(
            &a.id,
            [
                NodePatch::Label("Notify owner".to_string()),
                NodePatch::ActionType(Some("CREATE_NOTIFICATION".to_string())),
                NodePatch::Config(config(json!({ "message": "New lead" }))),
            ],
        )
        .unwrap();

    let node = graph.node(&a.id).unwrap();
    assert_eq!(node.label(), "Notify owner");
    assert_eq!(node.action_type(), Some("CREATE_NOTIFICATION"));
    match &node.data {
        NodeData::Action(d) => assert_eq!(d.config["message"], "New lead"),
        other => panic!("Expected action data, got {:?}", other),
    }
}

#[test]
fn test_update_node_data_is_all_or_nothing() {
    let mut graph = GraphModel::new();
    let t = graph.add_node(NodeKind::Trigger);
    let before = graph.node(&t.id).unwrap().clone();

    let result = graph.update_node_data(
        &t.id,
        [
            NodePatch::Label("Renamed".to_string()),
            NodePatch::ActionType(Some("SEND_EMAIL".to_string())),
        ],
    );

    match result {
        Err(GraphError::PatchMismatch { node_id, kind, field }) => {
            assert_eq!(node_id, "trigger-1");
            assert_eq!(kind, NodeKind::Trigger);
            assert_eq!(field, "actionType");
        }
        other => panic!("Expected PatchMismatch, got {:?}", other),
    }
    assert_eq!(graph.node(&t.id).unwrap(), &before);
}

#[test]
fn test_update_node_data_unknown_node() {
    let mut graph = GraphModel::new();
    let err = graph
        .update_node_data("nope", [NodePatch::Label("x".to_string())])
        .unwrap_err();
    assert_eq!(
        err,
        GraphError::NodeNotFound {
            node_id: "nope".to_string()
        }
    );
}

#[test]
fn test_empty_type_patch_clears_type() {
    let mut graph = GraphModel::new();
    let id = add_trigger(&mut graph, "MANUAL", json!({}));
    graph
        .update_node_data(&id, [NodePatch::TriggerType(Some(String::new()))])
        .unwrap();
    assert_eq!(graph.node(&id).unwrap().trigger_type(), None);
}

#[test]
fn test_move_node_updates_position() {
    let mut graph = GraphModel::new();
    let t = graph.add_node(NodeKind::Trigger);
    graph
        .move_node(&t.id, Position { x: 10.0, y: 20.0 })
        .unwrap();
    assert_eq!(graph.node(&t.id).unwrap().position, Position { x: 10.0, y: 20.0 });
    assert!(graph.move_node("ghost", Position::default()).is_err());
}

#[test]
fn test_nodes_of_kind_keeps_array_order() {
    let draft = create_onboarding_draft();
    let ids: Vec<&str> = draft
        .graph
        .nodes_of_kind(NodeKind::Action)
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(ids, vec!["action-1", "action-2"]);
}

#[test]
fn test_condition_type_reads_type_key() {
    let data = ConditionData {
        label: "Only VIPs".to_string(),
        condition: Some(config(json!({ "type": "HAS_TAG", "tagId": "vip" }))),
    };
    assert_eq!(data.condition_type(), Some("HAS_TAG"));
    assert_eq!(ConditionData::default().condition_type(), None);
}

#[test]
fn test_graph_parses_editor_json() {
    let graph: GraphModel = serde_json::from_value(json!({
        "nodes": [
            {
                "id": "trigger-1",
                "type": "trigger",
                "position": { "x": 250, "y": 50 },
                "data": { "label": "When a form arrives", "triggerType": "FORM_SUBMITTED", "config": { "formId": "f-1" } }
            },
            {
                "id": "condition-1",
                "type": "condition",
                "position": { "x": 250, "y": 200 },
                "data": { "label": "VIP only", "condition": { "type": "HAS_TAG", "tagId": "vip" } }
            },
            {
                "id": "action-1",
                "type": "action",
                "position": { "x": 250, "y": 350 },
                "data": { "label": "Tag", "actionType": "" }
            }
        ],
        "edges": [
            { "id": "e1", "source": "trigger-1", "target": "condition-1" }
        ]
    }))
    .unwrap();

    assert_eq!(graph.len(), 3);
    assert_eq!(graph.nodes[0].trigger_type(), Some("FORM_SUBMITTED"));
    assert_eq!(graph.nodes[1].kind(), NodeKind::Condition);
    // An empty type string is the same as no type.
    assert_eq!(graph.nodes[2].action_type(), None);
    match &graph.nodes[2].data {
        NodeData::Action(d) => assert!(d.config.is_empty()),
        other => panic!("Expected action data, got {:?}", other),
    }
}

#[test]
fn test_graph_rejects_unknown_node_type() {
    let result: serde_json::Result<GraphModel> = serde_json::from_value(json!({
        "nodes": [{ "id": "x", "type": "loop", "data": {} }],
        "edges": []
    }));
    let err = result.unwrap_err().to_string();
    assert!(err.contains("Unknown node type 'loop'"), "{}", err);
}

#[test]
fn test_graph_serializes_to_editor_json() {
    let draft = create_onboarding_draft();
    let value = serde_json::to_value(&draft.graph).unwrap();

    assert_eq!(value["nodes"][0]["type"], "trigger");
    assert_eq!(value["nodes"][0]["data"]["triggerType"], "CLIENT_CREATED");
    assert!(value["nodes"][0]["data"].get("actionType").is_none());
    assert_eq!(value["nodes"][1]["data"]["actionType"], "SEND_EMAIL");
    assert_eq!(value["edges"][0]["source"], "trigger-1");

    let parsed: GraphModel = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, draft.graph);
}
