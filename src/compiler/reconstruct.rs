use crate::definition::WorkflowDefinition;
use crate::graph::{ActionData, GraphModel, Node, NodeData, Position, TriggerData};
use tracing::warn;

const ANCHOR: Position = Position { x: 250.0, y: 50.0 };
const ROW_SPACING: f64 = 150.0;

/// Rebuilds an editor graph from a flat definition.
///
/// The result is one trigger at a fixed anchor with the actions stacked below
/// it, chained `trigger -> action 1 -> ... -> action n`. Each action's
/// description becomes its label verbatim, even when empty, so compiling the
/// result gives back the same trigger and action list. Conditions have no
/// graph position to return to and are dropped.
///
/// The graph is always structurally valid. Config completeness is still
/// checked against the schema catalogue, so a stored config that lacks a
/// required field is reported like any other incomplete node.
pub fn reconstruct(definition: &WorkflowDefinition) -> GraphModel {
    if !definition.conditions.is_empty() {
        warn!(
            workflow = %definition.name,
            keys = definition.conditions.len(),
            "conditions cannot be reconstructed from a flat definition and were dropped"
        );
    }

    let mut graph = GraphModel::new();
    let trigger_id = "trigger-1".to_string();
    graph.insert_node(Node::new(
        trigger_id.clone(),
        ANCHOR,
        NodeData::Trigger(TriggerData {
            label: "Trigger".to_string(),
            trigger_type: Some(definition.trigger_type.clone()),
            config: definition.trigger_config.clone(),
        }),
    ));

    let mut previous = trigger_id;
    for (i, step) in definition.actions.iter().enumerate() {
        let id = format!("action-{}", i + 1);
        let position = Position {
            x: ANCHOR.x,
            y: ANCHOR.y + ROW_SPACING * (i + 1) as f64,
        };
        graph.insert_node(Node::new(
            id.clone(),
            position,
            NodeData::Action(ActionData {
                label: step.description.clone(),
                action_type: Some(step.action_type.clone()),
                config: step.config.clone(),
            }),
        ));
        graph.connect(&previous, &id);
        previous = id;
    }

    graph
}
