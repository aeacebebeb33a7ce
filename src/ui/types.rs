use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canvas position of a node. Carried through for persistence only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UiPosition {
    pub x: f64,
    pub y: f64,
}

/// Node data as the editor sends it: every kind's fields, all optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiNodeData {
    #[serde(default)]
    pub label: String,
    #[serde(
        default,
        alias = "trigger_type",
        rename = "triggerType",
        skip_serializing_if = "Option::is_none"
    )]
    pub trigger_type: Option<String>,
    #[serde(
        default,
        alias = "action_type",
        rename = "actionType",
        skip_serializing_if = "Option::is_none"
    )]
    pub action_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Map<String, Value>>,
}

/// UI node with ID, kind tag and data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub position: UiPosition,
    #[serde(default)]
    pub data: UiNodeData,
}

/// UI edge connecting nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Complete UI graph structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiGraph {
    #[serde(default)]
    pub nodes: Vec<UiNode>,
    #[serde(default)]
    pub edges: Vec<UiEdge>,
}
