use super::string_or_number;
use super::workflow::WorkflowDefinition;
use crate::error::GraphError;
use crate::graph::GraphModel;
use crate::ui::{UiEdge, UiGraph, UiNode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored workflow as returned by `GET /workflows/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(flatten)]
    pub definition: WorkflowDefinition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<UiNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<UiEdge>>,
}

impl WorkflowRecord {
    /// The graph saved with the definition, if the backend returned one.
    ///
    /// Returns `None` for definitions saved before the visual editor existed.
    pub fn stored_graph(&self) -> Option<Result<GraphModel, GraphError>> {
        let nodes = self.nodes.as_ref().filter(|n| !n.is_empty())?;
        let raw = UiGraph {
            nodes: nodes.clone(),
            edges: self.edges.clone().unwrap_or_default(),
        };
        Some(GraphModel::try_from(raw))
    }
}

/// Body of `POST /workflows` and `PUT /workflows/:id`: the compiled
/// definition with the source graph stored next to it.
#[derive(Debug, Serialize)]
pub struct SaveRequest<'a> {
    #[serde(flatten)]
    pub definition: &'a WorkflowDefinition,
    #[serde(flatten)]
    pub graph: &'a GraphModel,
}

/// Backend acknowledgement of a save.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedWorkflow {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub version: Option<i64>,
}

/// Body of `POST /workflows/import`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub workflow_data: Value,
    pub as_template: bool,
}

impl ImportRequest {
    /// Builds an import body. Templates are always imported inactive,
    /// whatever the uploaded file says.
    pub fn new(mut workflow_data: Value, as_template: bool) -> Self {
        if as_template {
            if let Some(object) = workflow_data.as_object_mut() {
                object.insert("isActive".to_string(), Value::Bool(false));
            }
        }
        Self {
            workflow_data,
            as_template,
        }
    }
}
