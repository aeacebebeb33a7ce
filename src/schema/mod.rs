//! Configuration schemas for trigger and action types.
//!
//! A [`SchemaRegistry`] maps each `triggerType` / `actionType` string to the
//! fields its configuration form shows and the validator checks. Types the
//! registry does not know are treated as configured: the server may define
//! types this client has never heard of.
use crate::graph::NodeKind;
use ahash::AHashMap;
use itertools::Itertools;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

mod catalogue;

use catalogue::register_default_schemas;

/// Primitive type of a configuration field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldType {
    String,
    Number,
    Enum { options: Vec<String> },
    /// Identifier of another record (user, template, tag...).
    ReferenceId { entity: String },
}

impl FieldType {
    pub fn one_of(options: &[&str]) -> Self {
        FieldType::Enum {
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    pub fn reference(entity: &str) -> Self {
        FieldType::ReferenceId {
            entity: entity.to_string(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            FieldType::String => "text",
            FieldType::Number => "a number",
            FieldType::Enum { .. } => "one of the listed options",
            FieldType::ReferenceId { .. } => "a record reference",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Number => match value {
                Value::Number(_) => true,
                Value::String(s) => s.trim().parse::<f64>().is_ok(),
                _ => false,
            },
            FieldType::Enum { .. } => value.is_string(),
            FieldType::ReferenceId { .. } => value.is_string() || value.is_u64() || value.is_i64(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    /// Key of another field that, when filled in, makes this one optional.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unless: Option<String>,
}

impl FieldSpec {
    fn is_required(&self, config: &Map<String, Value>) -> bool {
        self.required
            && self
                .unless
                .as_ref()
                .is_none_or(|other| filled(config, other).is_none())
    }
}

/// The configuration form of one trigger or action type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSchema {
    pub type_name: String,
    pub kind: NodeKind,
    pub label: String,
    pub fields: Vec<FieldSpec>,
}

impl NodeSchema {
    pub fn trigger(type_name: &str, label: &str) -> Self {
        Self::new(NodeKind::Trigger, type_name, label)
    }

    pub fn action(type_name: &str, label: &str) -> Self {
        Self::new(NodeKind::Action, type_name, label)
    }

    fn new(kind: NodeKind, type_name: &str, label: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            kind,
            label: label.to_string(),
            fields: Vec::new(),
        }
    }

    pub fn required(self, key: &str, label: &str, field_type: FieldType) -> Self {
        self.field(key, label, field_type, true)
    }

    pub fn optional(self, key: &str, label: &str, field_type: FieldType) -> Self {
        self.field(key, label, field_type, false)
    }

    /// A field that is required only while `other` is left empty.
    pub fn required_unless(
        mut self,
        key: &str,
        label: &str,
        field_type: FieldType,
        other: &str,
    ) -> Self {
        self = self.field(key, label, field_type, true);
        if let Some(field) = self.fields.last_mut() {
            field.unless = Some(other.to_string());
        }
        self
    }

    fn field(mut self, key: &str, label: &str, field_type: FieldType, required: bool) -> Self {
        self.fields.push(FieldSpec {
            key: key.to_string(),
            label: label.to_string(),
            field_type,
            required,
            unless: None,
        });
        self
    }

    /// Checks a node's config against this schema, one issue per field.
    pub fn check(&self, config: &Map<String, Value>) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for field in &self.fields {
            match filled(config, &field.key) {
                None if field.is_required(config) => issues.push(ConfigIssue::Missing {
                    field: field.label.clone(),
                }),
                None => {}
                Some(v) if !field.field_type.accepts(v) => issues.push(ConfigIssue::WrongType {
                    field: field.label.clone(),
                    expected: field.field_type.name(),
                }),
                Some(v) => {
                    if let (FieldType::Enum { options }, Some(s)) = (&field.field_type, v.as_str()) {
                        if !options.iter().any(|o| o == s) {
                            issues.push(ConfigIssue::NotAnOption {
                                field: field.label.clone(),
                                value: s.to_string(),
                            });
                        }
                    }
                }
            }
        }
        issues
    }
}

fn filled<'a>(config: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    config.get(key).filter(|v| !is_blank(v))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// A single problem with a node's configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigIssue {
    #[error("'{field}' is required")]
    Missing { field: String },

    #[error("'{field}' must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("'{value}' is not a valid option for '{field}'")]
    NotAnOption { field: String, value: String },
}

/// Registry of known trigger and action schemas.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    triggers: AHashMap<String, NodeSchema>,
    actions: AHashMap<String, NodeSchema>,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    /// A registry holding the built-in catalogue.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        register_default_schemas(&mut registry);
        registry
    }

    pub fn empty() -> Self {
        Self {
            triggers: AHashMap::new(),
            actions: AHashMap::new(),
        }
    }

    /// Registers (or replaces) a schema. Condition schemas are ignored.
    pub fn with_schema(mut self, schema: NodeSchema) -> Self {
        self.register(schema);
        self
    }

    pub fn register(&mut self, schema: NodeSchema) {
        match schema.kind {
            NodeKind::Trigger => {
                self.triggers.insert(schema.type_name.clone(), schema);
            }
            NodeKind::Action => {
                self.actions.insert(schema.type_name.clone(), schema);
            }
            NodeKind::Condition => {}
        }
    }

    pub fn get(&self, kind: NodeKind, type_name: &str) -> Option<&NodeSchema> {
        match kind {
            NodeKind::Trigger => self.triggers.get(type_name),
            NodeKind::Action => self.actions.get(type_name),
            NodeKind::Condition => None,
        }
    }

    /// All schemas of a kind, sorted by type name.
    pub fn schemas(&self, kind: NodeKind) -> Vec<&NodeSchema> {
        let map = match kind {
            NodeKind::Trigger => &self.triggers,
            NodeKind::Action => &self.actions,
            NodeKind::Condition => return Vec::new(),
        };
        map.values()
            .sorted_by(|a, b| a.type_name.cmp(&b.type_name))
            .collect()
    }

    /// Checks `config` for the given type. Unknown types yield no issues.
    pub fn check_config(
        &self,
        kind: NodeKind,
        type_name: &str,
        config: &Map<String, Value>,
    ) -> Vec<ConfigIssue> {
        self.get(kind, type_name)
            .map(|schema| schema.check(config))
            .unwrap_or_default()
    }
}
