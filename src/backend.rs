use crate::client::{ExecutionFilter, ExecutionPage};
use crate::definition::{ImportRequest, SaveRequest, SavedWorkflow, WorkflowRecord};
use crate::error::ClientError;
use crate::execution::{Execution, ExecutionAction};
use async_trait::async_trait;
use serde_json::Value;

/// The workflow backend's REST contract.
///
/// Persistence, versioning and the execution engine all live server-side;
/// this trait is the only way the crate reaches them. [`HttpBackend`](crate::client::HttpBackend)
/// is the production implementation.
#[async_trait]
pub trait WorkflowBackend: Send + Sync {
    /// `POST /workflows`
    async fn create_workflow(&self, request: &SaveRequest<'_>)
    -> Result<SavedWorkflow, ClientError>;

    /// `PUT /workflows/:id`
    async fn update_workflow(
        &self,
        id: &str,
        request: &SaveRequest<'_>,
    ) -> Result<SavedWorkflow, ClientError>;

    /// `GET /workflows/:id`
    async fn get_workflow(&self, id: &str) -> Result<WorkflowRecord, ClientError>;

    /// `PATCH /workflows/:id/toggle`, returning the new `isActive`.
    async fn toggle_workflow(&self, id: &str) -> Result<bool, ClientError>;

    /// `POST /workflows/:id/clone`, returning the copy's id.
    async fn clone_workflow(&self, id: &str) -> Result<String, ClientError>;

    /// `GET /workflows/:id/export`
    async fn export_workflow(&self, id: &str) -> Result<Value, ClientError>;

    /// `POST /workflows/import`, returning the new workflow's id.
    async fn import_workflow(&self, request: &ImportRequest) -> Result<String, ClientError>;

    /// `POST /workflows/:id/execute`, returning the execution id.
    async fn execute_workflow(&self, id: &str) -> Result<String, ClientError>;

    /// `GET /workflow-executions`
    async fn list_executions(&self, filter: &ExecutionFilter)
    -> Result<ExecutionPage, ClientError>;

    /// `GET /workflow-executions/:id`
    async fn get_execution(&self, id: &str) -> Result<Execution, ClientError>;

    async fn cancel_execution(&self, id: &str) -> Result<(), ClientError>;

    async fn pause_execution(&self, id: &str) -> Result<(), ClientError>;

    async fn resume_execution(&self, id: &str) -> Result<(), ClientError>;

    /// Sends the request matching `action`.
    async fn request_transition(
        &self,
        id: &str,
        action: ExecutionAction,
    ) -> Result<(), ClientError> {
        match action {
            ExecutionAction::Pause => self.pause_execution(id).await,
            ExecutionAction::Resume => self.resume_execution(id).await,
            ExecutionAction::Cancel => self.cancel_execution(id).await,
        }
    }
}
