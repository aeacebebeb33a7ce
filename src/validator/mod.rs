//! Structural validation of an automation graph.
//!
//! Every check runs and every problem is collected, so the editor can show
//! the user the whole list at once. A graph that fails validation is never
//! compiled or sent to the backend.
use crate::graph::{Adjacency, GraphModel, Node, NodeData, NodeKind};
use crate::schema::{ConfigIssue, SchemaRegistry};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// One reason a graph cannot be saved.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    #[error("Workflow name is required")]
    MissingName,

    #[error("Workflow must have at least one node")]
    Empty,

    #[error("Workflow must have at least one trigger")]
    NoTrigger,

    #[error("Workflow can only have one trigger (found {count})")]
    MultipleTriggers { count: usize },

    #[error("Trigger type must be selected")]
    UntypedTrigger { node_id: String },

    #[error("Action {position} must have an action type selected")]
    UntypedAction { position: usize, node_id: String },

    #[error("{node_label}: {issue}")]
    IncompleteConfig {
        node_id: String,
        node_label: String,
        issue: ConfigIssue,
    },

    #[error("Node '{node_label}' is not connected to any other node")]
    OrphanNode { node_id: String, node_label: String },

    #[error("Workflow has disconnected components: only {reachable} of {total} nodes are connected")]
    Disconnected { reachable: usize, total: usize },
}

/// Outcome of [`GraphValidator::validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The user-facing messages, in check order.
    pub fn errors(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.to_string()).collect()
    }

    fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Repr {
            is_valid: bool,
            errors: Vec<String>,
        }

        Repr {
            is_valid: self.is_valid(),
            errors: self.errors(),
        }
        .serialize(serializer)
    }
}

/// Checks a graph against the structural rules and the schema registry.
pub struct GraphValidator<'a> {
    schemas: &'a SchemaRegistry,
}

impl<'a> GraphValidator<'a> {
    pub fn new(schemas: &'a SchemaRegistry) -> Self {
        Self { schemas }
    }

    pub fn validate(&self, name: &str, graph: &GraphModel) -> ValidationReport {
        let mut report = ValidationReport::default();

        if name.trim().is_empty() {
            report.push(Violation::MissingName);
        }

        if graph.is_empty() {
            report.push(Violation::Empty);
            return report;
        }

        let triggers: Vec<&Node> = graph.nodes_of_kind(NodeKind::Trigger).collect();
        match triggers.len() {
            0 => report.push(Violation::NoTrigger),
            1 => {}
            count => report.push(Violation::MultipleTriggers { count }),
        }

        if let Some(trigger) = triggers.first() {
            if trigger.trigger_type().is_none() {
                report.push(Violation::UntypedTrigger {
                    node_id: trigger.id.clone(),
                });
            }
        }

        for (i, action) in graph.nodes_of_kind(NodeKind::Action).enumerate() {
            if action.action_type().is_none() {
                report.push(Violation::UntypedAction {
                    position: i + 1,
                    node_id: action.id.clone(),
                });
            }
        }

        self.check_configs(graph, &mut report);
        Self::check_connectivity(graph, &mut report);

        report
    }

    fn check_configs(&self, graph: &GraphModel, report: &mut ValidationReport) {
        for node in &graph.nodes {
            let (kind, type_name, config) = match &node.data {
                NodeData::Trigger(d) => (NodeKind::Trigger, d.trigger_type.as_deref(), &d.config),
                NodeData::Action(d) => (NodeKind::Action, d.action_type.as_deref(), &d.config),
                NodeData::Condition(_) => continue,
            };
            let Some(type_name) = type_name else {
                continue;
            };

            for issue in self.schemas.check_config(kind, type_name, config) {
                report.push(Violation::IncompleteConfig {
                    node_id: node.id.clone(),
                    node_label: node.display_name().to_string(),
                    issue,
                });
            }
        }
    }

    fn check_connectivity(graph: &GraphModel, report: &mut ValidationReport) {
        // A lone node (usually a trigger-only draft) is complete on its own.
        if graph.len() <= 1 {
            return;
        }

        let adjacency = Adjacency::undirected(graph);

        for (idx, node) in graph.nodes.iter().enumerate() {
            if !adjacency.is_incident(idx) {
                report.push(Violation::OrphanNode {
                    node_id: node.id.clone(),
                    node_label: node.display_name().to_string(),
                });
            }
        }

        let reachable = adjacency.reachable_from(0).iter().filter(|&&v| v).count();
        if reachable < graph.len() {
            report.push(Violation::Disconnected {
                reachable,
                total: graph.len(),
            });
        }
    }
}

/// Validates with the built-in schema catalogue.
pub fn validate(name: &str, graph: &GraphModel) -> ValidationReport {
    GraphValidator::new(&SchemaRegistry::new()).validate(name, graph)
}
