use super::model::Execution;
use super::status::{ExecutionAction, ExecutionStatus};
use crate::backend::WorkflowBackend;
use crate::error::{ClientError, TransitionError};
use std::time::Duration;
use tracing::{info, warn};

/// Client-side view of one execution.
///
/// The tracker never moves an execution between states itself. Requests are
/// checked against the current status, sent, and the displayed record is only
/// replaced by what the backend returns on the following fetch.
pub struct ExecutionTracker<'a, B: WorkflowBackend + ?Sized> {
    backend: &'a B,
    execution: Execution,
}

impl<'a, B: WorkflowBackend + ?Sized> ExecutionTracker<'a, B> {
    pub fn new(backend: &'a B, execution: Execution) -> Self {
        Self { backend, execution }
    }

    /// Fetches the execution and starts tracking it.
    pub async fn load(backend: &'a B, id: &str) -> Result<Self, ClientError> {
        let execution = backend.get_execution(id).await?;
        Ok(Self::new(backend, execution))
    }

    pub fn execution(&self) -> &Execution {
        &self.execution
    }

    pub fn status(&self) -> ExecutionStatus {
        self.execution.status
    }

    pub fn available_actions(&self) -> Vec<ExecutionAction> {
        self.execution.status.available_actions()
    }

    /// Refetches the execution and adopts the backend's record.
    pub async fn refresh(&mut self) -> Result<ExecutionStatus, ClientError> {
        let latest = self.backend.get_execution(&self.execution.id).await?;
        let previous = self.execution.status;
        if latest.status != previous && !previous.can_transition_to(latest.status) {
            warn!(
                execution = %latest.id,
                from = %previous,
                to = %latest.status,
                "backend reported an unexpected status change"
            );
        }
        self.execution = latest;
        Ok(self.execution.status)
    }

    /// Asks the backend to pause, resume or cancel.
    ///
    /// Requests the current status does not allow are rejected here without
    /// reaching the network. Cancellation takes effect at the backend's next
    /// step boundary, so the confirmed status may still be `RUNNING`.
    pub async fn request(
        &mut self,
        action: ExecutionAction,
    ) -> Result<ExecutionStatus, TransitionError> {
        let expected = action.check(self.execution.status)?;
        info!(
            execution = %self.execution.id,
            %action,
            from = %self.execution.status,
            %expected,
            "requesting execution transition"
        );
        self.backend
            .request_transition(&self.execution.id, action)
            .await?;
        Ok(self.refresh().await?)
    }

    /// Polls until the execution reaches a terminal status.
    ///
    /// There is no overall timeout.
    pub async fn wait_until_terminal(
        &mut self,
        interval: Duration,
    ) -> Result<ExecutionStatus, ClientError> {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let status = self.refresh().await?;
            if status.is_terminal() {
                return Ok(status);
            }
        }
    }
}
