use crate::error::TransitionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a workflow execution, as owned by the backend state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    Pending,
    Running,
    Paused,
    Completed,
    Failed,
    Cancelled,
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::Pending => "PENDING",
            ExecutionStatus::Running => "RUNNING",
            ExecutionStatus::Paused => "PAUSED",
            ExecutionStatus::Completed => "COMPLETED",
            ExecutionStatus::Failed => "FAILED",
            ExecutionStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExecutionStatus::Completed | ExecutionStatus::Failed | ExecutionStatus::Cancelled
        )
    }

    /// Whether the backend may move an execution from `self` to `next`.
    pub fn can_transition_to(&self, next: ExecutionStatus) -> bool {
        use ExecutionStatus::*;
        matches!(
            (self, next),
            (Pending, Running)
                | (Running, Paused)
                | (Paused, Running)
                | (Running, Completed)
                | (Running, Failed)
                | (Pending, Cancelled)
                | (Running, Cancelled)
        )
    }

    /// The user actions shown for this status.
    pub fn available_actions(&self) -> Vec<ExecutionAction> {
        ExecutionAction::ALL
            .into_iter()
            .filter(|action| action.is_allowed_from(*self))
            .collect()
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Status of a single step inside an execution's log. Step statuses do not
/// drive the execution-level state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepStatus {
    Success,
    Failure,
    Skipped,
}

/// A transition the user can ask the backend for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionAction {
    Pause,
    Resume,
    Cancel,
}

impl ExecutionAction {
    pub const ALL: [ExecutionAction; 3] = [
        ExecutionAction::Pause,
        ExecutionAction::Resume,
        ExecutionAction::Cancel,
    ];

    pub fn is_allowed_from(&self, status: ExecutionStatus) -> bool {
        match self {
            ExecutionAction::Pause => status == ExecutionStatus::Running,
            ExecutionAction::Resume => status == ExecutionStatus::Paused,
            ExecutionAction::Cancel => {
                matches!(status, ExecutionStatus::Pending | ExecutionStatus::Running)
            }
        }
    }

    /// The status the backend is expected to confirm once it honours the request.
    pub fn target(&self) -> ExecutionStatus {
        match self {
            ExecutionAction::Pause => ExecutionStatus::Paused,
            ExecutionAction::Resume => ExecutionStatus::Running,
            ExecutionAction::Cancel => ExecutionStatus::Cancelled,
        }
    }

    /// Checks a request against the current status without performing it.
    pub fn check(&self, status: ExecutionStatus) -> Result<ExecutionStatus, TransitionError> {
        if self.is_allowed_from(status) {
            Ok(self.target())
        } else {
            Err(TransitionError::NotAllowed {
                action: *self,
                status,
            })
        }
    }
}

impl fmt::Display for ExecutionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ExecutionAction::Pause => "pause",
            ExecutionAction::Resume => "resume",
            ExecutionAction::Cancel => "cancel",
        })
    }
}
