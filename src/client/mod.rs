//! REST client for the workflow backend.
mod types;

pub use types::{ExecutionFilter, ExecutionPage};

use crate::backend::WorkflowBackend;
use crate::config::ClientConfig;
use crate::definition::{ImportRequest, SaveRequest, SavedWorkflow, WorkflowRecord};
use crate::error::ClientError;
use crate::execution::Execution;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info};
use types::{ErrorBody, ExecuteResponse, IdResponse, ToggleResponse};

/// [`WorkflowBackend`] over HTTP.
///
/// Requests are sent once. Failures are returned to the caller, who decides
/// whether to ask the user to try again.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let backend = Self::new(&config.api.base_url);
        match &config.api.token {
            Some(token) => backend.with_token(token),
            None => backend,
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "workflow backend request");
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message);
        error!(status = status.as_u16(), message = ?message, "workflow backend rejected request");
        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ClientError> {
        self.send(builder).await.map(|_| ())
    }
}

#[async_trait]
impl WorkflowBackend for HttpBackend {
    async fn create_workflow(
        &self,
        request: &SaveRequest<'_>,
    ) -> Result<SavedWorkflow, ClientError> {
        let body = serde_json::to_value(request)?;
        self.send_json(self.request(Method::POST, "/workflows").json(&body))
            .await
    }

    async fn update_workflow(
        &self,
        id: &str,
        request: &SaveRequest<'_>,
    ) -> Result<SavedWorkflow, ClientError> {
        let body = serde_json::to_value(request)?;
        let path = format!("/workflows/{}", id);
        self.send_json(self.request(Method::PUT, &path).json(&body))
            .await
    }

    async fn get_workflow(&self, id: &str) -> Result<WorkflowRecord, ClientError> {
        let path = format!("/workflows/{}", id);
        self.send_json(self.request(Method::GET, &path)).await
    }

    async fn toggle_workflow(&self, id: &str) -> Result<bool, ClientError> {
        let path = format!("/workflows/{}/toggle", id);
        let response: ToggleResponse = self.send_json(self.request(Method::PATCH, &path)).await?;
        info!(workflow = %id, active = response.is_active, "workflow toggled");
        Ok(response.is_active)
    }

    async fn clone_workflow(&self, id: &str) -> Result<String, ClientError> {
        let path = format!("/workflows/{}/clone", id);
        let response: IdResponse = self.send_json(self.request(Method::POST, &path)).await?;
        info!(source = %id, clone = %response.id, "workflow cloned");
        Ok(response.id)
    }

    async fn export_workflow(&self, id: &str) -> Result<Value, ClientError> {
        let path = format!("/workflows/{}/export", id);
        self.send_json(self.request(Method::GET, &path)).await
    }

    async fn import_workflow(&self, request: &ImportRequest) -> Result<String, ClientError> {
        let response: IdResponse = self
            .send_json(
                self.request(Method::POST, "/workflows/import")
                    .json(request),
            )
            .await?;
        info!(workflow = %response.id, template = request.as_template, "workflow imported");
        Ok(response.id)
    }

    async fn execute_workflow(&self, id: &str) -> Result<String, ClientError> {
        let path = format!("/workflows/{}/execute", id);
        let response = self.send(self.request(Method::POST, &path)).await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body: ExecuteResponse =
            serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))?;

        match body.execution_id {
            Some(Value::String(execution_id)) => Ok(execution_id),
            Some(Value::Number(n)) => Ok(n.to_string()),
            _ => Err(ClientError::Rejected {
                status,
                message: body.message,
            }),
        }
    }

    async fn list_executions(
        &self,
        filter: &ExecutionFilter,
    ) -> Result<ExecutionPage, ClientError> {
        self.send_json(
            self.request(Method::GET, "/workflow-executions")
                .query(filter),
        )
        .await
    }

    async fn get_execution(&self, id: &str) -> Result<Execution, ClientError> {
        let path = format!("/workflow-executions/{}", id);
        self.send_json(self.request(Method::GET, &path)).await
    }

    async fn cancel_execution(&self, id: &str) -> Result<(), ClientError> {
        let path = format!("/workflow-executions/{}/cancel", id);
        self.send_empty(self.request(Method::POST, &path)).await
    }

    async fn pause_execution(&self, id: &str) -> Result<(), ClientError> {
        let path = format!("/workflows/executions/{}/pause", id);
        self.send_empty(self.request(Method::POST, &path)).await
    }

    async fn resume_execution(&self, id: &str) -> Result<(), ClientError> {
        let path = format!("/workflows/executions/{}/resume", id);
        self.send_empty(self.request(Method::POST, &path)).await
    }
}
