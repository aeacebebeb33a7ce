//! # Wireflow - Workflow Automation Graphs
//!
//! **Wireflow** takes the node/edge diagram a user draws in a workflow editor
//! (one trigger, optional conditions, a sequence of actions), checks that it
//! is structurally sound, compiles it into the canonical definition the
//! backend executes, and follows the resulting executions through their
//! lifecycle.
//!
//! ## Core Workflow
//!
//! 1.  **Edit**: Build a [`GraphModel`](graph::GraphModel) with `add_node`, `connect`
//!     and `update_node_data`. Any shape is allowed while editing.
//! 2.  **Validate**: Run [`GraphValidator`](validator::GraphValidator) against a
//!     [`SchemaRegistry`](schema::SchemaRegistry). All problems are reported at once.
//! 3.  **Compile**: [`compiler::compile`] produces a deterministic
//!     [`WorkflowDefinition`](definition::WorkflowDefinition). Definitions saved
//!     without a graph can be opened again with [`compiler::reconstruct`].
//! 4.  **Run**: Save and execute through a [`WorkflowBackend`](backend::WorkflowBackend),
//!     then follow the run with an [`ExecutionTracker`](execution::ExecutionTracker).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wireflow::prelude::*;
//! use serde_json::json;
//!
//! let mut draft = WorkflowDraft::new("Welcome new clients");
//! let trigger = draft.graph.add_node(NodeKind::Trigger);
//! let email = draft.graph.add_node(NodeKind::Action);
//! draft.graph.connect(&trigger.id, &email.id);
//!
//! draft
//!     .graph
//!     .update_node_data(&trigger.id, [NodePatch::TriggerType(Some("CLIENT_CREATED".into()))])
//!     .unwrap();
//! let config = json!({ "subject": "Welcome!", "body": "Glad to have you." });
//! draft
//!     .graph
//!     .update_node_data(
//!         &email.id,
//!         [
//!             NodePatch::ActionType(Some("SEND_EMAIL".into())),
//!             NodePatch::Config(config.as_object().cloned().unwrap_or_default()),
//!         ],
//!     )
//!     .unwrap();
//!
//! let schemas = SchemaRegistry::new();
//! let report = GraphValidator::new(&schemas).validate(&draft.name, &draft.graph);
//! assert!(report.is_valid(), "{:?}", report.errors());
//!
//! let definition = compile(&draft).unwrap();
//! assert_eq!(definition.actions[0].action_type, "SEND_EMAIL");
//! ```

pub mod backend;
pub mod client;
pub mod compiler;
pub mod config;
pub mod definition;
pub mod editor;
pub mod error;
pub mod execution;
pub mod graph;
pub mod prelude;
pub mod schema;
pub mod ui;
pub mod validator;
