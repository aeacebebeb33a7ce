use crate::execution::{ExecutionAction, ExecutionStatus};
use crate::graph::NodeKind;
use crate::validator::ValidationReport;
use thiserror::Error;

/// Errors raised by editor-side graph mutations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node '{node_id}' does not exist in the graph")]
    NodeNotFound { node_id: String },

    #[error("Field '{field}' cannot be set on {kind} node '{node_id}'")]
    PatchMismatch {
        node_id: String,
        kind: NodeKind,
        field: &'static str,
    },

    #[error("Unknown node type '{0}', expected trigger, condition or action")]
    UnknownNodeKind(String),
}

/// Errors that can occur when compiling a graph that skipped validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Cannot compile a workflow without a trigger node")]
    MissingTrigger,

    #[error("Trigger node '{node_id}' has no trigger type")]
    UntypedTrigger { node_id: String },

    #[error("Action node '{node_id}' has no action type")]
    UntypedAction { node_id: String },
}

/// Errors from talking to the workflow REST backend.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request to the workflow backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Workflow backend rejected the request with HTTP {status}{}", .message.as_ref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Rejected { status: u16, message: Option<String> },

    #[error("Could not decode backend response: {0}")]
    Decode(String),

    #[error("Could not serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ClientError {
    /// The message to surface to the user: the backend's own message when it
    /// sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Errors from requesting an execution state transition.
#[derive(Error, Debug)]
pub enum TransitionError {
    #[error("Cannot {action} an execution that is {status}")]
    NotAllowed {
        action: ExecutionAction,
        status: ExecutionStatus,
    },

    #[error(transparent)]
    Backend(#[from] ClientError),
}

/// Errors surfaced by the workflow editor's save and execute flows.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Workflow is invalid: {}", .0.errors().join("; "))]
    Invalid(ValidationReport),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Workflow must be saved before it can be executed")]
    NotSaved,
}

/// Errors loading the client configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Could not parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}
