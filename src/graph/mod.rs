//! The in-memory node/edge model behind the visual editor.
mod adjacency;
mod model;
mod node;

pub use adjacency::Adjacency;
pub use model::{Edge, GraphModel};
pub use node::{
    ActionData, ConditionData, Node, NodeData, NodeKind, NodePatch, Position, TriggerData,
};
