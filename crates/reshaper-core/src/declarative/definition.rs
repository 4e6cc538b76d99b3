//! Serializable plan definitions
//!
//! A [`PlanDefinition`] describes a plan as data so it can live in a JSON or YAML file.
//! Compiling it against a [`TransformRegistry`] resolves every transform name and yields an
//! ordinary [`Plan`].
//!
//! Copyright (c) 2025 Reshaper Team
//! Licensed under the Apache-2.0 license

use super::registry::TransformRegistry;
use crate::plan::{Operation, Plan, PlanBuilder, ValueFn};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

static NO_ARGS: Value = Value::Null;

/// A plan described as data
///
/// Unknown fields are rejected, so a misspelled key fails to parse instead of silently
/// dropping part of an operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanDefinition {
    #[serde(default)]
    pub operations: Vec<OperationDefinition>,
}

/// One operation in a plan definition, tagged by `op`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum OperationDefinition {
    Rename {
        from: String,
        to: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transform: Option<TransformDefinition>,
    },
    Map {
        key: String,
        // Optional here so a missing transform is reported as a configuration error
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transform: Option<TransformDefinition>,
    },
    Reject {
        key: String,
    },
    Reshape {
        key: String,
        operations: Vec<OperationDefinition>,
    },
    MapCollection {
        key: String,
        operations: Vec<OperationDefinition>,
    },
}

/// Reference to a registered transform, either bare or with arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransformDefinition {
    Named(String),
    Configured {
        name: String,
        #[serde(default)]
        args: Value,
    },
}

impl TransformDefinition {
    pub fn name(&self) -> &str {
        match self {
            TransformDefinition::Named(name) | TransformDefinition::Configured { name, .. } => name,
        }
    }

    /// Arguments handed to the transform factory (`null` when none were given)
    pub fn args(&self) -> &Value {
        match self {
            TransformDefinition::Named(_) => &NO_ARGS,
            TransformDefinition::Configured { args, .. } => args,
        }
    }
}

impl OperationDefinition {
    /// Short label such as `map(age)`, used in error messages
    pub fn label(&self) -> String {
        match self {
            OperationDefinition::Rename { from, to, .. } => format!("rename({} -> {})", from, to),
            OperationDefinition::Map { key, .. } => format!("map({})", key),
            OperationDefinition::Reject { key } => format!("reject({})", key),
            OperationDefinition::Reshape { key, .. } => format!("reshape({})", key),
            OperationDefinition::MapCollection { key, .. } => format!("map_collection({})", key),
        }
    }
}

impl PlanDefinition {
    /// Parse a definition from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a definition from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a definition from a `.json`, `.yaml` or `.yml` file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            _ => {
                return Err(Error::Configuration {
                    message: format!(
                        "Unsupported plan file format: {} (expected .json, .yaml or .yml)",
                        path.display()
                    ),
                    operation: None,
                })
            }
        };

        let contents = std::fs::read_to_string(path)?;
        log::debug!("loaded plan definition from {}", path.display());
        parse(&contents)
    }

    /// Render the definition as pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolve every transform and build the plan
    ///
    /// Fails with [`Error::Configuration`] when a `map` has no transform, a transform name is
    /// not registered, or its arguments are invalid. The error names the offending operation,
    /// including its enclosing operations.
    pub fn compile(&self, registry: &TransformRegistry) -> Result<Plan> {
        let plan = compile_operations(&self.operations, registry, None)?;
        log::debug!("compiled plan with {} top-level operations", plan.len());
        Ok(plan)
    }
}

fn compile_operations(
    definitions: &[OperationDefinition],
    registry: &TransformRegistry,
    scope: Option<&str>,
) -> Result<Plan> {
    let mut builder = PlanBuilder::new();

    for definition in definitions {
        let location = match scope {
            Some(scope) => format!("{} > {}", scope, definition.label()),
            None => definition.label(),
        };

        let operation = match definition {
            OperationDefinition::Rename { from, to, transform } => Operation::Rename {
                source: from.clone(),
                target: to.clone(),
                transform: transform
                    .as_ref()
                    .map(|transform| resolve(transform, registry, &location))
                    .transpose()?,
            },
            OperationDefinition::Map { key, transform } => {
                let transform = transform
                    .as_ref()
                    .ok_or_else(|| Error::configuration("map requires a transform", &location))?;
                Operation::MapValue {
                    key: key.clone(),
                    transform: resolve(transform, registry, &location)?,
                }
            }
            OperationDefinition::Reject { key } => Operation::Remove { key: key.clone() },
            OperationDefinition::Reshape { key, operations } => Operation::Reshape {
                key: key.clone(),
                plan: compile_operations(operations, registry, Some(location.as_str()))?,
            },
            OperationDefinition::MapCollection { key, operations } => Operation::MapCollection {
                key: key.clone(),
                plan: compile_operations(operations, registry, Some(location.as_str()))?,
            },
        };

        builder = builder.push(operation);
    }

    Ok(builder.build())
}

fn resolve(
    transform: &TransformDefinition,
    registry: &TransformRegistry,
    location: &str,
) -> Result<ValueFn> {
    registry
        .create(transform.name(), transform.args())
        .map_err(|err| match err {
            Error::Configuration { message, .. } => Error::configuration(message, location),
            other => other,
        })
}
