use crate::backend::WorkflowBackend;
use crate::compiler;
use crate::definition::{SaveRequest, SavedWorkflow, WorkflowDefinition, WorkflowDraft};
use crate::error::{ClientError, EditorError};
use crate::graph::GraphModel;
use crate::schema::SchemaRegistry;
use crate::validator::{GraphValidator, ValidationReport};
use tracing::{info, warn};

/// Ties a draft to its backend record: open, validate, save, execute.
pub struct WorkflowEditor<'a, B: WorkflowBackend + ?Sized> {
    backend: &'a B,
    schemas: SchemaRegistry,
    draft: WorkflowDraft,
    workflow_id: Option<String>,
    version: Option<i64>,
}

impl<'a, B: WorkflowBackend + ?Sized> WorkflowEditor<'a, B> {
    /// Starts a new, unsaved workflow.
    pub fn new(backend: &'a B, name: &str) -> Self {
        Self {
            backend,
            schemas: SchemaRegistry::new(),
            draft: WorkflowDraft::new(name),
            workflow_id: None,
            version: None,
        }
    }

    /// Opens a stored workflow.
    ///
    /// The graph saved alongside the definition is used when there is one.
    /// Otherwise the graph is rebuilt from the definition's linear form.
    pub async fn open(backend: &'a B, id: &str) -> Result<Self, ClientError> {
        let record = backend.get_workflow(id).await?;
        let graph = match record.stored_graph() {
            Some(Ok(graph)) => graph,
            Some(Err(e)) => {
                warn!(workflow = %id, error = %e, "stored graph is unreadable, rebuilding from definition");
                compiler::reconstruct(&record.definition)
            }
            None => compiler::reconstruct(&record.definition),
        };

        Ok(Self {
            backend,
            schemas: SchemaRegistry::new(),
            draft: WorkflowDraft {
                name: record.definition.name.clone(),
                description: record.definition.description.clone(),
                graph,
            },
            workflow_id: Some(record.id),
            version: record.definition.version,
        })
    }

    pub fn with_schemas(mut self, schemas: SchemaRegistry) -> Self {
        self.schemas = schemas;
        self
    }

    pub fn draft(&self) -> &WorkflowDraft {
        &self.draft
    }

    pub fn graph(&self) -> &GraphModel {
        &self.draft.graph
    }

    pub fn graph_mut(&mut self) -> &mut GraphModel {
        &mut self.draft.graph
    }

    pub fn set_name(&mut self, name: &str) {
        self.draft.name = name.to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        self.draft.description = description.to_string();
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn workflow_id(&self) -> Option<&str> {
        self.workflow_id.as_deref()
    }

    pub fn version(&self) -> Option<i64> {
        self.version
    }

    pub fn validate(&self) -> ValidationReport {
        GraphValidator::new(&self.schemas).validate(&self.draft.name, &self.draft.graph)
    }

    /// Validates and compiles the current graph without saving it.
    pub fn compile(&self) -> Result<WorkflowDefinition, EditorError> {
        let report = self.validate();
        if !report.is_valid() {
            return Err(EditorError::Invalid(report));
        }
        Ok(compiler::compile(&self.draft)?)
    }

    /// Validates, compiles and saves the workflow with its graph.
    ///
    /// What is sent is a snapshot of the graph at the time of the call. An
    /// invalid graph is never sent. Concurrent saves from other editors are
    /// not detected; the last write wins.
    pub async fn save(&mut self) -> Result<SavedWorkflow, EditorError> {
        let definition = self.compile()?;
        let snapshot = self.draft.graph.clone();
        let request = SaveRequest {
            definition: &definition,
            graph: &snapshot,
        };

        let saved = match &self.workflow_id {
            Some(id) => self.backend.update_workflow(id, &request).await?,
            None => self.backend.create_workflow(&request).await?,
        };
        info!(workflow = %saved.id, version = ?saved.version, "workflow saved");

        self.workflow_id = Some(saved.id.clone());
        self.version = saved.version;
        Ok(saved)
    }

    /// Starts an execution of the saved workflow, returning its id.
    pub async fn execute(&self) -> Result<String, EditorError> {
        let id = self.workflow_id.as_deref().ok_or(EditorError::NotSaved)?;
        let execution_id = self.backend.execute_workflow(id).await?;
        info!(workflow = %id, execution = %execution_id, "workflow execution started");
        Ok(execution_id)
    }
}
