//! The workflow editor's wire format.
//!
//! These structs mirror the JSON the visual editor produces and the backend
//! stores next to a compiled definition. Every data field is optional; the
//! [`graph`](crate::graph) module converts them into the tagged node model.
mod types;

pub use types::*;
