use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use wireflow::definition::ImportRequest;
use wireflow::prelude::*;

/// Validate, compile and run workflow automation graphs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to ~/.config/wireflow/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate an editor graph JSON file
    Validate {
        graph_path: PathBuf,
        /// Workflow name to validate with
        #[arg(short, long)]
        name: String,
    },
    /// Compile an editor graph JSON file into a workflow definition
    Compile {
        graph_path: PathBuf,
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Rebuild an editor graph from a workflow definition JSON file
    Reconstruct { definition_path: PathBuf },
    /// List the known trigger and action types
    Schemas,
    /// Start an execution of a stored workflow
    Execute { workflow_id: String },
    /// Show an execution and its step log
    Status { execution_id: String },
    /// Pause a running execution
    Pause { execution_id: String },
    /// Resume a paused execution
    Resume { execution_id: String },
    /// Cancel a pending or running execution
    Cancel { execution_id: String },
    /// Poll an execution until it finishes
    Watch { execution_id: String },
    /// List executions
    Executions {
        #[arg(short, long)]
        workflow: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Export a stored workflow to a JSON file
    Export {
        workflow_id: String,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Import a workflow JSON file
    Import {
        path: PathBuf,
        /// Import as an inactive template
        #[arg(long)]
        as_template: bool,
    },
    /// Flip a workflow's active flag
    Toggle { workflow_id: String },
    /// Copy a stored workflow
    #[command(name = "clone")]
    Duplicate { workflow_id: String },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wireflow=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ClientConfig::from_file(path),
        None => ClientConfig::load(),
    }
    .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e)));

    match cli.command {
        Command::Validate { graph_path, name } => run_validate(&graph_path, &name),
        Command::Compile {
            graph_path,
            name,
            description,
        } => run_compile(&graph_path, name, description),
        Command::Reconstruct { definition_path } => run_reconstruct(&definition_path),
        Command::Schemas => run_schemas(),
        remote => run_remote(remote, &config).await,
    }
}

fn run_validate(graph_path: &PathBuf, name: &str) {
    let graph = load_graph(graph_path);
    let report = validate(name, &graph);
    print_json(&report);
    if !report.is_valid() {
        std::process::exit(2);
    }
}

fn run_compile(graph_path: &PathBuf, name: String, description: String) {
    let draft = WorkflowDraft {
        name,
        description,
        graph: load_graph(graph_path),
    };

    let report = validate(&draft.name, &draft.graph);
    if !report.is_valid() {
        eprintln!("Graph is invalid:");
        for error in report.errors() {
            eprintln!("  - {}", error);
        }
        std::process::exit(2);
    }

    let definition = compile(&draft)
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));
    print_json(&definition);
}

fn run_reconstruct(definition_path: &PathBuf) {
    let content = read_file(definition_path);
    let definition: WorkflowDefinition = serde_json::from_str(&content)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse definition JSON: {}", e)));
    print_json(&reconstruct(&definition));
}

fn run_schemas() {
    let registry = SchemaRegistry::new();
    for kind in [NodeKind::Trigger, NodeKind::Action] {
        println!("{}s:", kind);
        for schema in registry.schemas(kind) {
            let fields = schema
                .fields
                .iter()
                .map(|f| {
                    if f.required {
                        format!("{}*", f.key)
                    } else {
                        f.key.clone()
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            println!("  {:<24} {:<24} {}", schema.type_name, schema.label, fields);
        }
    }
}

async fn run_remote(command: Command, config: &ClientConfig) {
    let backend = HttpBackend::from_config(config);

    match command {
        Command::Execute { workflow_id } => {
            let execution_id = backend
                .execute_workflow(&workflow_id)
                .await
                .unwrap_or_else(|e| exit_with_error(&e.user_message("Failed to start workflow")));
            println!("{}", execution_id);
        }
        Command::Status { execution_id } => {
            let execution = backend
                .get_execution(&execution_id)
                .await
                .unwrap_or_else(|e| exit_with_error(&e.user_message("Failed to load execution")));
            print_execution(&execution);
        }
        Command::Pause { execution_id } => {
            transition(&backend, &execution_id, ExecutionAction::Pause).await
        }
        Command::Resume { execution_id } => {
            transition(&backend, &execution_id, ExecutionAction::Resume).await
        }
        Command::Cancel { execution_id } => {
            transition(&backend, &execution_id, ExecutionAction::Cancel).await
        }
        Command::Watch { execution_id } => {
            let mut tracker = ExecutionTracker::load(&backend, &execution_id)
                .await
                .unwrap_or_else(|e| exit_with_error(&e.user_message("Failed to load execution")));
            let status = tracker
                .wait_until_terminal(config.poll_interval())
                .await
                .unwrap_or_else(|e| exit_with_error(&e.user_message("Failed to poll execution")));
            println!("Execution {} finished: {}", execution_id, status);
            print_execution(tracker.execution());
        }
        Command::Executions {
            workflow,
            page,
            limit,
        } => {
            let filter = ExecutionFilter {
                workflow_id: workflow,
                ..Default::default()
            }
            .with_page(page, limit);
            let listing = backend
                .list_executions(&filter)
                .await
                .unwrap_or_else(|e| exit_with_error(&e.user_message("Failed to list executions")));
            for execution in &listing.executions {
                println!(
                    "{:<12} {:<12} {:<10} {}",
                    execution.id, execution.workflow_id, execution.status, execution.started_at
                );
            }
        }
        Command::Export {
            workflow_id,
            output,
        } => {
            let exported = backend
                .export_workflow(&workflow_id)
                .await
                .unwrap_or_else(|e| exit_with_error(&e.user_message("Failed to export workflow")));
            let content = serde_json::to_string_pretty(&exported)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode export: {}", e)));
            fs::write(&output, content).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", output.display(), e))
            });
            println!("Exported workflow {} to '{}'", workflow_id, output.display());
        }
        Command::Import { path, as_template } => {
            let content = read_file(&path);
            let data: serde_json::Value = serde_json::from_str(&content)
                .unwrap_or_else(|e| exit_with_error(&format!("Import failed: {}", e)));
            let request = ImportRequest::new(data, as_template);
            let id = backend
                .import_workflow(&request)
                .await
                .unwrap_or_else(|e| exit_with_error(&e.user_message("Failed to import workflow")));
            println!("{}", id);
        }
        Command::Toggle { workflow_id } => {
            let active = backend
                .toggle_workflow(&workflow_id)
                .await
                .unwrap_or_else(|e| exit_with_error(&e.user_message("Failed to toggle workflow")));
            println!(
                "Workflow {} is now {}",
                workflow_id,
                if active { "active" } else { "inactive" }
            );
        }
        Command::Duplicate { workflow_id } => {
            let id = backend
                .clone_workflow(&workflow_id)
                .await
                .unwrap_or_else(|e| exit_with_error(&e.user_message("Failed to clone workflow")));
            println!("{}", id);
        }
        Command::Validate { .. }
        | Command::Compile { .. }
        | Command::Reconstruct { .. }
        | Command::Schemas => unreachable!("local commands are handled in main"),
    }
}

async fn transition(backend: &HttpBackend, execution_id: &str, action: ExecutionAction) {
    let mut tracker = ExecutionTracker::load(backend, execution_id)
        .await
        .unwrap_or_else(|e| exit_with_error(&e.user_message("Failed to load execution")));
    match tracker.request(action).await {
        Ok(status) => println!("Execution {} is {}", execution_id, status),
        Err(TransitionError::Backend(e)) => {
            exit_with_error(&e.user_message(&format!("Failed to {} execution", action)))
        }
        Err(e) => exit_with_error(&e.to_string()),
    }
}

fn print_execution(execution: &Execution) {
    println!("Execution {} ({})", execution.id, execution.status);
    println!("  Workflow:     {}", execution.workflow_id);
    println!("  Current step: {}", execution.current_step);
    println!("  Started:      {}", execution.started_at);
    if let Some(duration) = execution.duration() {
        println!("  Duration:     {}s", duration.num_seconds());
    }
    if let Some(error) = &execution.error_message {
        println!("  Error:        {}", error);
    }
    for log in &execution.logs {
        println!(
            "  [{}] {:<20} {:?}{}",
            log.step_index,
            log.action_type,
            log.status,
            log.error_message
                .as_ref()
                .map(|e| format!(" - {}", e))
                .unwrap_or_default()
        );
    }
}

fn load_graph(path: &PathBuf) -> GraphModel {
    let content = read_file(path);
    serde_json::from_str(&content)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse graph JSON: {}", e)))
}

fn read_file(path: &PathBuf) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read file '{}': {}", path.display(), e))
    })
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with_error(&format!("Failed to encode output: {}", e)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
