use crate::error::GraphError;
use crate::ui::{UiNode, UiNodeData, UiPosition};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Canvas position of a node.
pub type Position = UiPosition;

/// The three node kinds an automation graph is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Trigger,
    Condition,
    Action,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Trigger => "trigger",
            NodeKind::Condition => "condition",
            NodeKind::Action => "action",
        }
    }

    pub fn parse(name: &str) -> Result<Self, GraphError> {
        match name {
            "trigger" => Ok(NodeKind::Trigger),
            "condition" => Ok(NodeKind::Condition),
            "action" => Ok(NodeKind::Action),
            other => Err(GraphError::UnknownNodeKind(other.to_string())),
        }
    }

    fn default_label(&self) -> &'static str {
        match self {
            NodeKind::Trigger => "Trigger",
            NodeKind::Condition => "Condition",
            NodeKind::Action => "Action",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerData {
    pub label: String,
    pub trigger_type: Option<String>,
    pub config: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionData {
    pub label: String,
    /// The condition object, `{ "type": ..., ...params }`.
    pub condition: Option<Map<String, Value>>,
}

impl ConditionData {
    pub fn condition_type(&self) -> Option<&str> {
        self.condition
            .as_ref()
            .and_then(|c| c.get("type"))
            .and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionData {
    pub label: String,
    pub action_type: Option<String>,
    pub config: Map<String, Value>,
}

/// Kind-specific node payload. A trigger can never carry a condition, and an
/// action can never carry a trigger type.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    Trigger(TriggerData),
    Condition(ConditionData),
    Action(ActionData),
}

impl NodeData {
    pub fn empty(kind: NodeKind) -> Self {
        let label = kind.default_label().to_string();
        match kind {
            NodeKind::Trigger => NodeData::Trigger(TriggerData {
                label,
                ..Default::default()
            }),
            NodeKind::Condition => NodeData::Condition(ConditionData {
                label,
                ..Default::default()
            }),
            NodeKind::Action => NodeData::Action(ActionData {
                label,
                ..Default::default()
            }),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Trigger(_) => NodeKind::Trigger,
            NodeData::Condition(_) => NodeKind::Condition,
            NodeData::Action(_) => NodeKind::Action,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            NodeData::Trigger(d) => &d.label,
            NodeData::Condition(d) => &d.label,
            NodeData::Action(d) => &d.label,
        }
    }
}

/// A single edit to a node's data.
#[derive(Debug, Clone, PartialEq)]
pub enum NodePatch {
    Label(String),
    TriggerType(Option<String>),
    ActionType(Option<String>),
    Config(Map<String, Value>),
    Condition(Option<Map<String, Value>>),
}

impl NodePatch {
    fn field(&self) -> &'static str {
        match self {
            NodePatch::Label(_) => "label",
            NodePatch::TriggerType(_) => "triggerType",
            NodePatch::ActionType(_) => "actionType",
            NodePatch::Config(_) => "config",
            NodePatch::Condition(_) => "condition",
        }
    }

    /// Applies the patch, returning the offending field name if it does not
    /// belong to this kind of node.
    pub(crate) fn apply(self, data: &mut NodeData) -> Result<(), &'static str> {
        let field = self.field();
        match (self, data) {
            (NodePatch::Label(label), NodeData::Trigger(d)) => d.label = label,
            (NodePatch::Label(label), NodeData::Condition(d)) => d.label = label,
            (NodePatch::Label(label), NodeData::Action(d)) => d.label = label,
            (NodePatch::TriggerType(t), NodeData::Trigger(d)) => {
                d.trigger_type = t.filter(|s| !s.is_empty())
            }
            (NodePatch::ActionType(t), NodeData::Action(d)) => {
                d.action_type = t.filter(|s| !s.is_empty())
            }
            (NodePatch::Config(config), NodeData::Trigger(d)) => d.config = config,
            (NodePatch::Config(config), NodeData::Action(d)) => d.config = config,
            (NodePatch::Condition(c), NodeData::Condition(d)) => d.condition = c,
            _ => return Err(field),
        }
        Ok(())
    }
}

/// A node in the automation graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UiNode", into = "UiNode")]
pub struct Node {
    pub id: String,
    pub position: Position,
    pub data: NodeData,
}

impl Node {
    pub fn new(id: impl Into<String>, position: Position, data: NodeData) -> Self {
        Self {
            id: id.into(),
            position,
            data,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }

    pub fn label(&self) -> &str {
        self.data.label()
    }

    /// The label, or the node's type (then its kind) when the label is blank.
    /// Only for messages; the stored label is left untouched.
    pub fn display_name(&self) -> &str {
        let label = self.label();
        if !label.trim().is_empty() {
            return label;
        }
        self.trigger_type()
            .or_else(|| self.action_type())
            .unwrap_or_else(|| self.kind().default_label())
    }

    pub fn trigger_type(&self) -> Option<&str> {
        match &self.data {
            NodeData::Trigger(d) => d.trigger_type.as_deref(),
            _ => None,
        }
    }

    pub fn action_type(&self) -> Option<&str> {
        match &self.data {
            NodeData::Action(d) => d.action_type.as_deref(),
            _ => None,
        }
    }
}

impl TryFrom<UiNode> for Node {
    type Error = GraphError;

    fn try_from(raw: UiNode) -> Result<Self, Self::Error> {
        let kind = NodeKind::parse(&raw.node_type)?;
        let UiNodeData {
            label,
            trigger_type,
            action_type,
            config,
            condition,
        } = raw.data;

        let data = match kind {
            NodeKind::Trigger => NodeData::Trigger(TriggerData {
                label,
                trigger_type: trigger_type.filter(|t| !t.is_empty()),
                config: config.unwrap_or_default(),
            }),
            NodeKind::Condition => NodeData::Condition(ConditionData { label, condition }),
            NodeKind::Action => NodeData::Action(ActionData {
                label,
                action_type: action_type.filter(|t| !t.is_empty()),
                config: config.unwrap_or_default(),
            }),
        };

        Ok(Node {
            id: raw.id,
            position: raw.position,
            data,
        })
    }
}

impl From<Node> for UiNode {
    fn from(node: Node) -> Self {
        let node_type = node.kind().as_str().to_string();
        let data = match node.data {
            NodeData::Trigger(d) => UiNodeData {
                label: d.label,
                trigger_type: d.trigger_type,
                config: Some(d.config),
                ..Default::default()
            },
            NodeData::Condition(d) => UiNodeData {
                label: d.label,
                condition: d.condition,
                ..Default::default()
            },
            NodeData::Action(d) => UiNodeData {
                label: d.label,
                action_type: d.action_type,
                config: Some(d.config),
                ..Default::default()
            },
        };

        UiNode {
            id: node.id,
            node_type,
            position: node.position,
            data,
        }
    }
}
