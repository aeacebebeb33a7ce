//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the
//! wireflow crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use wireflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let graph: GraphModel = serde_json::from_str(&std::fs::read_to_string("graph.json")?)?;
//! let draft = WorkflowDraft { name: "Follow up".to_string(), description: String::new(), graph };
//!
//! let report = validate(&draft.name, &draft.graph);
//! if report.is_valid() {
//!     let definition = compile(&draft)?;
//!     println!("{}", serde_json::to_string_pretty(&definition)?);
//! }
//! # Ok(())
//! # }
//! ```

// Graph editing
pub use crate::graph::{Edge, GraphModel, Node, NodeData, NodeKind, NodePatch, Position};

// Schemas and validation
pub use crate::schema::{FieldType, NodeSchema, SchemaRegistry};
pub use crate::validator::{GraphValidator, ValidationReport, Violation, validate};

// Compilation
pub use crate::compiler::{compile, reconstruct};
pub use crate::definition::{ActionStep, WorkflowDefinition, WorkflowDraft, WorkflowRecord};

// Execution lifecycle
pub use crate::execution::{Execution, ExecutionAction, ExecutionStatus, ExecutionTracker};

// Backend access
pub use crate::backend::WorkflowBackend;
pub use crate::client::{ExecutionFilter, HttpBackend};
pub use crate::config::ClientConfig;
pub use crate::editor::WorkflowEditor;

// Error types
pub use crate::error::{
    ClientError, CompileError, ConfigError, EditorError, GraphError, TransitionError,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
