//! Common test utilities: graph builders and an in-memory backend.
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value, json};
use std::collections::{HashMap, VecDeque};
use std::result::Result;
use std::sync::Mutex;
use wireflow::client::{ExecutionFilter, ExecutionPage};
use wireflow::definition::{ImportRequest, SaveRequest, SavedWorkflow};
use wireflow::prelude::*;

/// Converts a `json!` object literal into a config map.
#[allow(dead_code)]
pub fn config(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

/// Adds a trigger node with the given type and config.
#[allow(dead_code)]
pub fn add_trigger(graph: &mut GraphModel, trigger_type: &str, cfg: Value) -> String {
    let node = graph.add_node(NodeKind::Trigger);
    graph
        .update_node_data(
            &node.id,
            [
                NodePatch::TriggerType(Some(trigger_type.to_string())),
                NodePatch::Config(config(cfg)),
            ],
        )
        .unwrap();
    node.id
}

/// Adds an action node with the given type, config and label.
#[allow(dead_code)]
pub fn add_action(graph: &mut GraphModel, action_type: &str, cfg: Value, label: &str) -> String {
    let node = graph.add_node(NodeKind::Action);
    graph
        .update_node_data(
            &node.id,
            [
                NodePatch::Label(label.to_string()),
                NodePatch::ActionType(Some(action_type.to_string())),
                NodePatch::Config(config(cfg)),
            ],
        )
        .unwrap();
    node.id
}

/// Adds a condition node carrying `condition`.
#[allow(dead_code)]
pub fn add_condition(graph: &mut GraphModel, condition: Value) -> String {
    let node = graph.add_node(NodeKind::Condition);
    graph
        .update_node_data(&node.id, [NodePatch::Condition(Some(config(condition)))])
        .unwrap();
    node.id
}

/// `CLIENT_CREATED -> SEND_EMAIL -> CREATE_TASK`, fully configured and wired.
#[allow(dead_code)]
pub fn create_onboarding_draft() -> WorkflowDraft {
    let mut draft = WorkflowDraft::new("Welcome new clients");
    draft.description = "Greets every new client and books a follow-up".to_string();

    let graph = &mut draft.graph;
    let trigger = add_trigger(graph, "CLIENT_CREATED", json!({}));
    let email = add_action(
        graph,
        "SEND_EMAIL",
        json!({ "subject": "Welcome!", "body": "Glad to have you on board." }),
        "Send welcome email",
    );
    let task = add_action(
        graph,
        "CREATE_TASK",
        json!({ "title": "Schedule intro call", "priority": "HIGH", "dueInDays": 2 }),
        "Create follow-up task",
    );
    graph.connect(&trigger, &email);
    graph.connect(&email, &task);
    draft
}

/// A definition with three actions and a trigger config, as the backend
/// would return it for a workflow saved without a graph.
#[allow(dead_code)]
pub fn create_legacy_definition() -> WorkflowDefinition {
    serde_json::from_value(json!({
        "name": "Status follow-up",
        "description": null,
        "triggerType": "CLIENT_STATUS_CHANGED",
        "triggerConfig": { "toStatus": "ACTIVE" },
        "conditions": {},
        "actions": [
            { "type": "ADD_TAG", "config": { "tagId": "tag-7" }, "description": "Tag as active" },
            { "type": "WAIT", "config": { "duration": 1, "unit": "DAYS" }, "description": "" },
            { "type": "SEND_SMS", "config": { "message": "Thanks!" }, "description": "Thank them" }
        ],
        "version": 4
    }))
    .unwrap()
}

#[allow(dead_code)]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
}

#[allow(dead_code)]
pub fn execution(id: &str, status: ExecutionStatus) -> Execution {
    Execution {
        id: id.to_string(),
        workflow_id: "wf-1".to_string(),
        status,
        current_step: 0,
        started_at: fixed_time(),
        completed_at: None,
        error_message: None,
        logs: Vec::new(),
    }
}

/// State behind [`FakeBackend`].
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeState {
    /// Every call made, as `"<operation> <id>"`.
    pub calls: Vec<String>,
    /// Every save body, as sent.
    pub saved_bodies: Vec<Value>,
    pub records: HashMap<String, Value>,
    pub executions: HashMap<String, Execution>,
    /// Statuses handed out by successive `get_execution` calls before the
    /// stored status is used.
    pub scripted_statuses: VecDeque<ExecutionStatus>,
    pub imports: Vec<Value>,
    next_id: u32,
}

/// In-memory [`WorkflowBackend`] that enforces the execution state machine
/// the way the real server does.
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeBackend {
    pub state: Mutex<FakeState>,
}

#[allow(dead_code)]
impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(self, id: &str, record: Value) -> Self {
        self.state.lock().unwrap().records.insert(id.to_string(), record);
        self
    }

    pub fn with_execution(self, execution: Execution) -> Self {
        self.state
            .lock()
            .unwrap()
            .executions
            .insert(execution.id.clone(), execution);
        self
    }

    pub fn with_scripted_statuses(self, statuses: &[ExecutionStatus]) -> Self {
        self.state
            .lock()
            .unwrap()
            .scripted_statuses
            .extend(statuses.iter().copied());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn saved_bodies(&self) -> Vec<Value> {
        self.state.lock().unwrap().saved_bodies.clone()
    }

    fn not_found() -> ClientError {
        ClientError::Rejected {
            status: 404,
            message: Some("Not found".to_string()),
        }
    }

    fn transition(&self, id: &str, action: ExecutionAction) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("{} {}", action, id));
        let execution = state.executions.get_mut(id).ok_or_else(Self::not_found)?;
        if !action.is_allowed_from(execution.status) {
            return Err(ClientError::Rejected {
                status: 409,
                message: Some(format!("Cannot {} a {} execution", action, execution.status)),
            });
        }
        execution.status = action.target();
        Ok(())
    }

    fn store(&self, id: String, request: &SaveRequest<'_>, version: i64) -> SavedWorkflow {
        let body = serde_json::to_value(request).unwrap();
        let mut record = body.clone();
        record["id"] = json!(id);
        record["version"] = json!(version);
        let mut state = self.state.lock().unwrap();
        state.saved_bodies.push(body);
        state.records.insert(id.clone(), record);
        SavedWorkflow {
            id,
            version: Some(version),
        }
    }
}

#[async_trait]
impl WorkflowBackend for FakeBackend {
    async fn create_workflow(
        &self,
        request: &SaveRequest<'_>,
    ) -> Result<SavedWorkflow, ClientError> {
        let id = {
            let mut state = self.state.lock().unwrap();
            state.next_id += 1;
            let id = format!("wf-{}", state.next_id);
            state.calls.push(format!("create {}", id));
            id
        };
        Ok(self.store(id, request, 1))
    }

    async fn update_workflow(
        &self,
        id: &str,
        request: &SaveRequest<'_>,
    ) -> Result<SavedWorkflow, ClientError> {
        let version = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(format!("update {}", id));
            let current = state.records.get(id).ok_or_else(Self::not_found)?;
            current["version"].as_i64().unwrap_or(0) + 1
        };
        Ok(self.store(id.to_string(), request, version))
    }

    async fn get_workflow(&self, id: &str) -> Result<WorkflowRecord, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("get {}", id));
        let record = state.records.get(id).ok_or_else(Self::not_found)?;
        serde_json::from_value(record.clone()).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn toggle_workflow(&self, id: &str) -> Result<bool, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("toggle {}", id));
        let record = state.records.get_mut(id).ok_or_else(Self::not_found)?;
        let active = !record["isActive"].as_bool().unwrap_or(false);
        record["isActive"] = json!(active);
        Ok(active)
    }

    async fn clone_workflow(&self, id: &str) -> Result<String, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("clone {}", id));
        let mut copy = state.records.get(id).ok_or_else(Self::not_found)?.clone();
        state.next_id += 1;
        let new_id = format!("wf-{}", state.next_id);
        copy["id"] = json!(new_id);
        state.records.insert(new_id.clone(), copy);
        Ok(new_id)
    }

    async fn export_workflow(&self, id: &str) -> Result<Value, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("export {}", id));
        state.records.get(id).cloned().ok_or_else(Self::not_found)
    }

    async fn import_workflow(&self, request: &ImportRequest) -> Result<String, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = format!("wf-{}", state.next_id);
        state.calls.push(format!("import {}", id));
        state.imports.push(request.workflow_data.clone());
        Ok(id)
    }

    async fn execute_workflow(&self, id: &str) -> Result<String, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("execute {}", id));
        if !state.records.contains_key(id) {
            return Err(Self::not_found());
        }
        let execution_id = format!("exec-{}", state.executions.len() + 1);
        let mut run = execution(&execution_id, ExecutionStatus::Pending);
        run.workflow_id = id.to_string();
        state.executions.insert(execution_id.clone(), run);
        Ok(execution_id)
    }

    async fn list_executions(
        &self,
        filter: &ExecutionFilter,
    ) -> Result<ExecutionPage, ClientError> {
        let state = self.state.lock().unwrap();
        let mut executions: Vec<Execution> = state
            .executions
            .values()
            .filter(|e| filter.workflow_id.as_ref().is_none_or(|w| &e.workflow_id == w))
            .filter(|e| filter.status.is_none_or(|s| e.status == s))
            .cloned()
            .collect();
        executions.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(ExecutionPage {
            total: Some(executions.len() as u64),
            executions,
            page: filter.page,
            limit: filter.limit,
        })
    }

    async fn get_execution(&self, id: &str) -> Result<Execution, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("get-execution {}", id));
        let scripted = state.scripted_statuses.pop_front();
        let execution = state.executions.get_mut(id).ok_or_else(Self::not_found)?;
        if let Some(status) = scripted {
            execution.status = status;
        }
        Ok(execution.clone())
    }

    async fn cancel_execution(&self, id: &str) -> Result<(), ClientError> {
        self.transition(id, ExecutionAction::Cancel)
    }

    async fn pause_execution(&self, id: &str) -> Result<(), ClientError> {
        self.transition(id, ExecutionAction::Pause)
    }

    async fn resume_execution(&self, id: &str) -> Result<(), ClientError> {
        self.transition(id, ExecutionAction::Resume)
    }
}
