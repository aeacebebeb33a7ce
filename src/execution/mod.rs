//! The execution state machine as seen from the client.
//!
//! ```text
//! PENDING --dequeue--> RUNNING --pause--> PAUSED
//!    |                  |  ^                |
//!    |                  |  +----resume------+
//!    +--cancel--+       +--> COMPLETED | FAILED | CANCELLED
//!               v
//!           CANCELLED
//! ```
mod model;
mod status;
mod tracker;

pub use model::{Execution, StepLog};
pub use status::{ExecutionAction, ExecutionStatus, StepStatus};
pub use tracker::ExecutionTracker;
