//! Named transform registry
//!
//! Declarative plans refer to transforms by name. The registry maps each name to a factory
//! that turns the (optional) arguments from the plan definition into a [`ValueFn`].
//!
//! Copyright (c) 2025 Reshaper Team
//! Licensed under the Apache-2.0 license

use crate::plan::{built_in, ValueFn};
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Creates a transform from its definition arguments
pub type TransformFactory = Arc<dyn Fn(&Value) -> Result<ValueFn> + Send + Sync>;

/// Registry of transforms available to declarative plans
#[derive(Clone, Default)]
pub struct TransformRegistry {
    factories: HashMap<String, TransformFactory>,
}

#[derive(Deserialize)]
struct DefaultArgs {
    value: Value,
}

#[derive(Deserialize)]
struct EnumMappingArgs {
    mappings: HashMap<String, String>,
    #[serde(default)]
    default: Option<String>,
}

#[derive(Deserialize)]
struct LinearArgs {
    scale: f64,
    #[serde(default)]
    offset: f64,
}

#[derive(Deserialize)]
struct RegexReplaceArgs {
    pattern: String,
    #[serde(default)]
    replacement: String,
}

impl TransformRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every transform from [`built_in`]
    pub fn with_built_ins() -> Self {
        Self::new()
            .register("string_to_number", |_| Ok(Box::new(built_in::string_to_number())))
            .register("number_to_string", |_| Ok(Box::new(built_in::number_to_string())))
            .register("string_to_boolean", |_| Ok(Box::new(built_in::string_to_boolean())))
            .register("boolean_to_string", |_| Ok(Box::new(built_in::boolean_to_string())))
            .register("lowercase", |_| Ok(Box::new(built_in::lowercase())))
            .register("uppercase", |_| Ok(Box::new(built_in::uppercase())))
            .register("trim", |_| Ok(Box::new(built_in::trim())))
            .register("default_value", |args| {
                let args: DefaultArgs = parse_args("default_value", args)?;
                Ok(Box::new(built_in::default_value(args.value)))
            })
            .register("enum_mapping", |args| {
                let args: EnumMappingArgs = parse_args("enum_mapping", args)?;
                Ok(Box::new(built_in::enum_mapping(args.mappings, args.default)))
            })
            .register("linear", |args| {
                let args: LinearArgs = parse_args("linear", args)?;
                Ok(Box::new(built_in::linear(args.scale, args.offset)))
            })
            .register("regex_replace", |args| {
                let args: RegexReplaceArgs = parse_args("regex_replace", args)?;
                Ok(Box::new(built_in::regex_replace(&args.pattern, args.replacement)?))
            })
            .register("unix_to_rfc3339", |_| Ok(Box::new(built_in::unix_to_rfc3339())))
            .register("rfc3339_to_unix", |_| Ok(Box::new(built_in::rfc3339_to_unix())))
    }

    /// Register (or replace) a transform under `name`
    pub fn register<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Value) -> Result<ValueFn> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.factories.insert(name.clone(), Arc::new(factory)).is_some() {
            log::debug!("transform '{}' replaced in registry", name);
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Instantiate the transform registered under `name`
    pub fn create(&self, name: &str, args: &Value) -> Result<ValueFn> {
        let factory = self.factories.get(name).ok_or_else(|| Error::Configuration {
            message: format!(
                "Unknown transform '{}' (available: {})",
                name,
                self.names().join(", ")
            ),
            operation: None,
        })?;
        factory(args)
    }
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformRegistry")
            .field("transforms", &self.names())
            .finish()
    }
}

fn parse_args<T: DeserializeOwned>(transform: &str, args: &Value) -> Result<T> {
    serde_json::from_value(args.clone()).map_err(|e| Error::Configuration {
        message: format!("Invalid arguments for transform '{}': {}", transform, e),
        operation: None,
    })
}
