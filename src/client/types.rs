use crate::definition::string_or_number;
use crate::execution::{Execution, ExecutionStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query parameters for `GET /workflow-executions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ExecutionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ExecutionFilter {
    pub fn for_workflow(workflow_id: impl Into<String>) -> Self {
        Self {
            workflow_id: Some(workflow_id.into()),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: ExecutionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }
}

/// One page of executions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExecutionPage {
    #[serde(alias = "data", alias = "items")]
    pub executions: Vec<Execution>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct IdResponse {
    #[serde(alias = "workflowId", deserialize_with = "string_or_number")]
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct ToggleResponse {
    #[serde(alias = "is_active", rename = "isActive")]
    pub is_active: bool,
}

/// `{ executionId }` on success, `{ message }` when the backend refused.
#[derive(Debug, Deserialize)]
pub(super) struct ExecuteResponse {
    #[serde(default, rename = "executionId", alias = "execution_id")]
    pub execution_id: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}
