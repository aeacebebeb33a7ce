use super::nullable_string;
use crate::compiler;
use crate::error::CompileError;
use crate::graph::GraphModel;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The canonical, backend-persisted form of a workflow: one trigger, a merged
/// condition object, and an ordered list of actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    pub trigger_type: String,
    #[serde(default)]
    pub trigger_config: Map<String, Value>,
    #[serde(default)]
    pub conditions: Map<String, Value>,
    #[serde(default)]
    pub actions: Vec<ActionStep>,
    /// Assigned by the backend and bumped on every update; never sent.
    #[serde(default, skip_serializing)]
    pub version: Option<i64>,
}

/// One step of a workflow's action list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionStep {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
}

/// A workflow as it exists in the editor: metadata plus the visual graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowDraft {
    pub name: String,
    pub description: String,
    pub graph: GraphModel,
}

impl WorkflowDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Rebuilds a draft from a definition that has no stored graph.
    pub fn from_definition(definition: &WorkflowDefinition) -> Self {
        Self {
            name: definition.name.clone(),
            description: definition.description.clone(),
            graph: compiler::reconstruct(definition),
        }
    }

    pub fn compile(&self) -> Result<WorkflowDefinition, CompileError> {
        compiler::compile(self)
    }
}
