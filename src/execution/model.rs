use super::status::{ExecutionStatus, StepStatus};
use crate::definition::string_or_number;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One run of a workflow, as recorded by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub workflow_id: String,
    pub status: ExecutionStatus,
    #[serde(default)]
    pub current_step: u32,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub logs: Vec<StepLog>,
}

impl Execution {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn failed_steps(&self) -> impl Iterator<Item = &StepLog> {
        self.logs
            .iter()
            .filter(|log| log.status == StepStatus::Failure)
    }

    /// Wall-clock time from start to completion, or `None` while still open.
    pub fn duration(&self) -> Option<Duration> {
        self.completed_at.map(|done| done - self.started_at)
    }
}

/// The backend's record of one executed step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepLog {
    pub step_index: u32,
    pub action_type: String,
    pub status: StepStatus,
    #[serde(default)]
    pub input_data: Value,
    #[serde(default)]
    pub output_data: Value,
    #[serde(default)]
    pub error_message: Option<String>,
    pub executed_at: DateTime<Utc>,
}
