//! Graph to definition compilation, and the lossy reverse direction.
//!
//! [`compile`] turns an editor graph into a [`WorkflowDefinition`]. It is pure
//! and deterministic: the same graph always yields byte-identical JSON.
//! [`reconstruct`] rebuilds a linear graph from a definition that was saved
//! without one. Conditions cannot be recovered in that direction.
use crate::definition::{ActionStep, WorkflowDefinition, WorkflowDraft};
use crate::error::CompileError;
use crate::graph::{GraphModel, NodeData, NodeKind};
use serde_json::{Map, Value};
use tracing::{debug, warn};

mod order;
mod reconstruct;

pub use order::edge_chain_order;
pub use reconstruct::reconstruct;

/// Compiles a draft into its canonical definition.
///
/// Expects a graph that passed validation. Actions are emitted in node-array
/// order, not in the order the edges between them suggest.
pub fn compile(draft: &WorkflowDraft) -> Result<WorkflowDefinition, CompileError> {
    let graph = &draft.graph;

    let (trigger_id, trigger) = graph
        .nodes
        .iter()
        .find_map(|n| match &n.data {
            NodeData::Trigger(d) => Some((n.id.as_str(), d)),
            _ => None,
        })
        .ok_or(CompileError::MissingTrigger)?;

    let trigger_type =
        trigger
            .trigger_type
            .clone()
            .ok_or_else(|| CompileError::UntypedTrigger {
                node_id: trigger_id.to_string(),
            })?;

    let actions = graph
        .nodes
        .iter()
        .filter_map(|n| match &n.data {
            NodeData::Action(d) => Some((n.id.as_str(), d)),
            _ => None,
        })
        .map(|(id, d)| {
            d.action_type
                .clone()
                .ok_or_else(|| CompileError::UntypedAction {
                    node_id: id.to_string(),
                })
                .map(|action_type| ActionStep {
                    action_type,
                    config: d.config.clone(),
                    description: d.label.clone(),
                })
        })
        .collect::<Result<Vec<_>, CompileError>>()?;

    warn_on_edge_order_mismatch(graph);

    let conditions = merge_conditions(graph);
    debug!(
        workflow = %draft.name,
        actions = actions.len(),
        condition_keys = conditions.len(),
        "compiled workflow graph"
    );

    Ok(WorkflowDefinition {
        name: draft.name.clone(),
        description: draft.description.clone(),
        trigger_type,
        trigger_config: trigger.config.clone(),
        conditions,
        actions,
        version: None,
    })
}

/// Shallow-merges every condition node's object in node-array order. On a key
/// collision the later node wins.
fn merge_conditions(graph: &GraphModel) -> Map<String, Value> {
    let mut merged = Map::new();
    for node in graph.nodes_of_kind(NodeKind::Condition) {
        let NodeData::Condition(data) = &node.data else {
            continue;
        };
        let Some(condition) = &data.condition else {
            continue;
        };
        for (key, value) in condition {
            if let Some(previous) = merged.insert(key.clone(), value.clone()) {
                if &previous != value {
                    debug!(node = %node.id, key = %key, "condition key overwritten by later node");
                }
            }
        }
    }
    merged
}

fn warn_on_edge_order_mismatch(graph: &GraphModel) {
    let Some(chain) = edge_chain_order(graph) else {
        return;
    };
    let array_order: Vec<&str> = graph
        .nodes_of_kind(NodeKind::Action)
        .map(|n| n.id.as_str())
        .collect();
    if chain.iter().map(String::as_str).ne(array_order.iter().copied()) {
        warn!(
            edge_order = ?chain,
            node_order = ?array_order,
            "actions are wired in a different order than they were added; node order is used"
        );
    }
}
