//! Unit tests for configuration, persisted shapes and error messages.
mod common;
use common::*;
use serde_json::json;
use std::time::Duration;
use wireflow::definition::{ImportRequest, SavedWorkflow};
use wireflow::prelude::*;

#[test]
fn test_config_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.api.base_url, "http://localhost:3000/api");
    assert_eq!(config.api.token, None);
    assert_eq!(config.poll_interval(), Duration::from_secs(2));
}

#[test]
fn test_config_from_partial_toml() {
    let config = ClientConfig::from_toml(
        r#"
        [api]
        token = "abc"

        [poll]
        interval_ms = 500
        "#,
    )
    .unwrap();
    assert_eq!(config.api.base_url, "http://localhost:3000/api");
    assert_eq!(config.api.token.as_deref(), Some("abc"));
    assert_eq!(config.poll_interval(), Duration::from_millis(500));

    assert_eq!(ClientConfig::from_toml("").unwrap(), ClientConfig::default());
}

#[test]
fn test_config_file_errors() {
    let missing = std::env::temp_dir().join("wireflow-test-missing/config.toml");
    match ClientConfig::from_file(&missing) {
        Err(ConfigError::Read { path, .. }) => assert!(path.ends_with("config.toml")),
        other => panic!("Expected a read error, got {:?}", other),
    }

    let broken = std::env::temp_dir().join(format!("wireflow-test-{}.toml", std::process::id()));
    std::fs::write(&broken, "[api\nbase_url = 1").unwrap();
    let result = ClientConfig::from_file(&broken);
    std::fs::remove_file(&broken).unwrap();
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn test_default_config_file_is_optional_but_must_parse() {
    let missing = std::env::temp_dir().join("wireflow-test-absent/config.toml");
    assert!(ClientConfig::from_file_or_default(&missing).is_ok());

    let broken = std::env::temp_dir().join(format!("wireflow-default-{}.toml", std::process::id()));
    std::fs::write(&broken, "[poll]\ninterval_ms = \"soon\"").unwrap();
    let result = ClientConfig::from_file_or_default(&broken);
    std::fs::remove_file(&broken).unwrap();
    match result {
        Err(ConfigError::Parse { path, .. }) => assert!(path.ends_with(".toml")),
        other => panic!("Expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_http_backend_from_config() {
    let mut config = ClientConfig::default();
    config.api.base_url = "https://crm.example.com/api/".to_string();
    config.api.token = Some("t".to_string());
    let backend = HttpBackend::from_config(&config);
    assert_eq!(backend.base_url(), "https://crm.example.com/api");
}

#[test]
fn test_import_request_forces_inactive_templates() {
    let data = json!({ "name": "Shared", "isActive": true });

    let template = ImportRequest::new(data.clone(), true);
    assert_eq!(template.workflow_data["isActive"], json!(false));
    assert_eq!(
        serde_json::to_value(&template).unwrap()["asTemplate"],
        json!(true)
    );

    let plain = ImportRequest::new(data, false);
    assert_eq!(plain.workflow_data["isActive"], json!(true));
}

#[test]
fn test_record_without_graph() {
    let record: WorkflowRecord = serde_json::from_value(json!({
        "id": 3,
        "name": "Old",
        "triggerType": "MANUAL",
        "nodes": []
    }))
    .unwrap();
    assert_eq!(record.id, "3");
    assert!(!record.is_active);
    assert!(record.stored_graph().is_none());
}

#[test]
fn test_saved_workflow_accepts_numeric_ids() {
    let saved: SavedWorkflow = serde_json::from_value(json!({ "id": 8 })).unwrap();
    assert_eq!(saved.id, "8");
    assert_eq!(saved.version, None);

    let invalid: serde_json::Result<SavedWorkflow> = serde_json::from_value(json!({ "id": [1] }));
    assert!(invalid.is_err());
}

#[test]
fn test_error_messages() {
    assert_eq!(
        GraphError::UnknownNodeKind("loop".to_string()).to_string(),
        "Unknown node type 'loop', expected trigger, condition or action"
    );
    assert_eq!(
        GraphError::PatchMismatch {
            node_id: "condition-1".to_string(),
            kind: NodeKind::Condition,
            field: "config",
        }
        .to_string(),
        "Field 'config' cannot be set on condition node 'condition-1'"
    );
    assert_eq!(
        ClientError::Rejected {
            status: 404,
            message: Some("Workflow not found".to_string())
        }
        .to_string(),
        "Workflow backend rejected the request with HTTP 404: Workflow not found"
    );
    assert_eq!(
        ClientError::Rejected {
            status: 400,
            message: Some("  ".to_string())
        }
        .user_message("Failed to save workflow"),
        "Failed to save workflow"
    );
    assert_eq!(
        EditorError::NotSaved.to_string(),
        "Workflow must be saved before it can be executed"
    );
}

#[test]
fn test_invalid_editor_error_lists_problems() {
    let mut graph = GraphModel::new();
    graph.add_node(NodeKind::Trigger);
    let err = EditorError::Invalid(validate("", &graph));
    assert_eq!(
        err.to_string(),
        "Workflow is invalid: Workflow name is required; Trigger type must be selected"
    );
}

#[test]
fn test_status_and_action_display() {
    let run = execution("exec-1", ExecutionStatus::Pending);
    assert_eq!(run.started_at, fixed_time());
    assert_eq!(run.status.to_string(), "PENDING");
    assert_eq!(ExecutionAction::Cancel.to_string(), "cancel");
}
