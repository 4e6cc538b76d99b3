//! Built-in transforms for common operations
//!
//! This module provides ready-made value functions for type conversions, string
//! normalization, lookup tables, unit scaling and timestamp formatting. Each function
//! returns a closure that can be handed straight to `PlanBuilder::map` or
//! `PlanBuilder::rename_with`, and each is also reachable by name through
//! `TransformRegistry::with_built_ins`.
//!
//! Copyright (c) 2025 Reshaper Team
//! Licensed under the Apache-2.0 license

use super::types::ValueKind;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::{Number, Value};
use std::collections::HashMap;

/// Parse a string into a JSON number
///
/// Integers that fit `i64` or `u64` stay exact; anything else goes through `f64`. Numbers
/// pass through.
pub fn string_to_number() -> impl Fn(Value) -> Result<Value> + Send + Sync + 'static {
    |value: Value| match value {
        Value::String(ref s) => {
            parse_number(s.trim()).ok_or_else(|| Error::conversion("string", "number", &value))
        }
        Value::Number(_) => Ok(value),
        other => Err(Error::conversion(ValueKind::of(&other).to_string(), "number", &other)),
    }
}

/// Render a number as a string
pub fn number_to_string() -> impl Fn(Value) -> Result<Value> + Send + Sync + 'static {
    |value: Value| match value {
        Value::Number(n) => Ok(Value::String(n.to_string())),
        other => Err(Error::conversion(ValueKind::of(&other).to_string(), "string", &other)),
    }
}

/// Parse common truthy/falsy spellings into a boolean
pub fn string_to_boolean() -> impl Fn(Value) -> Result<Value> + Send + Sync + 'static {
    |value: Value| match value {
        Value::String(ref s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(Value::Bool(true)),
            "false" | "no" | "0" | "off" => Ok(Value::Bool(false)),
            _ => Err(Error::conversion("string", "boolean", &value)),
        },
        Value::Bool(_) => Ok(value),
        other => Err(Error::conversion(ValueKind::of(&other).to_string(), "boolean", &other)),
    }
}

/// Render a boolean as `"true"`/`"false"`
pub fn boolean_to_string() -> impl Fn(Value) -> Result<Value> + Send + Sync + 'static {
    |value: Value| match value {
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        other => Err(Error::conversion(ValueKind::of(&other).to_string(), "string", &other)),
    }
}

pub fn lowercase() -> impl Fn(Value) -> Result<Value> + Send + Sync + 'static {
    |value: Value| map_string(value, |s| s.to_lowercase())
}

pub fn uppercase() -> impl Fn(Value) -> Result<Value> + Send + Sync + 'static {
    |value: Value| map_string(value, |s| s.to_uppercase())
}

pub fn trim() -> impl Fn(Value) -> Result<Value> + Send + Sync + 'static {
    |value: Value| map_string(value, |s| s.trim().to_string())
}

/// Replace `null` with `default`; other values pass through
pub fn default_value(default: Value) -> impl Fn(Value) -> Result<Value> + Send + Sync + 'static {
    move |value: Value| {
        if value.is_null() {
            Ok(default.clone())
        } else {
            Ok(value)
        }
    }
}

/// Map string values through a lookup table
///
/// Values missing from the table map to `default` when one is given and fail otherwise.
pub fn enum_mapping(
    mappings: HashMap<String, String>,
    default: Option<String>,
) -> impl Fn(Value) -> Result<Value> + Send + Sync + 'static {
    move |value: Value| {
        let Some(key) = value.as_str() else {
            return Err(Error::EnumMapping {
                value: value.to_string(),
                available_mappings: sorted_keys(&mappings),
            });
        };

        match mappings.get(key).or(default.as_ref()) {
            Some(mapped) => Ok(Value::String(mapped.clone())),
            None => Err(Error::EnumMapping {
                value: key.to_string(),
                available_mappings: sorted_keys(&mappings),
            }),
        }
    }
}

/// Linear unit conversion: `output = input * scale + offset`
pub fn linear(scale: f64, offset: f64) -> impl Fn(Value) -> Result<Value> + Send + Sync + 'static {
    move |value: Value| {
        let input = value
            .as_f64()
            .ok_or_else(|| Error::conversion(ValueKind::of(&value).to_string(), "number", &value))?;
        Number::from_f64(input * scale + offset)
            .map(Value::Number)
            .ok_or_else(|| Error::InvalidValue {
                message: "conversion result is not a finite number".to_string(),
                value: value.to_string(),
            })
    }
}

/// Replace every match of `pattern` in a string value
///
/// Fails with a configuration error when the pattern does not compile.
pub fn regex_replace(
    pattern: &str,
    replacement: impl Into<String>,
) -> Result<impl Fn(Value) -> Result<Value> + Send + Sync + 'static> {
    let regex = Regex::new(pattern).map_err(|e| Error::Configuration {
        message: format!("Invalid regex pattern '{}': {}", pattern, e),
        operation: None,
    })?;
    let replacement = replacement.into();

    Ok(move |value: Value| {
        map_string(value, |s| regex.replace_all(s, replacement.as_str()).into_owned())
    })
}

/// Format integer Unix seconds as an RFC 3339 UTC timestamp
pub fn unix_to_rfc3339() -> impl Fn(Value) -> Result<Value> + Send + Sync + 'static {
    |value: Value| {
        let seconds = value.as_i64().ok_or_else(|| {
            Error::conversion(ValueKind::of(&value).to_string(), "timestamp", &value)
        })?;
        let timestamp: DateTime<Utc> =
            DateTime::from_timestamp(seconds, 0).ok_or_else(|| Error::InvalidValue {
                message: "timestamp out of range".to_string(),
                value: value.to_string(),
            })?;
        Ok(Value::String(timestamp.to_rfc3339()))
    }
}

/// Parse an RFC 3339 timestamp into integer Unix seconds
pub fn rfc3339_to_unix() -> impl Fn(Value) -> Result<Value> + Send + Sync + 'static {
    |value: Value| {
        let Some(text) = value.as_str() else {
            return Err(Error::conversion(
                ValueKind::of(&value).to_string(),
                "unix seconds",
                &value,
            ));
        };
        DateTime::parse_from_rfc3339(text)
            .map(|timestamp| Value::from(timestamp.timestamp()))
            .map_err(|e| Error::InvalidValue {
                message: format!("not an RFC 3339 timestamp: {}", e),
                value: value.to_string(),
            })
    }
}

fn parse_number(s: &str) -> Option<Value> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Value::from(i));
    }
    if let Ok(u) = s.parse::<u64>() {
        return Some(Value::from(u));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number)
}

fn map_string(value: Value, f: impl FnOnce(&str) -> String) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(f(&s))),
        other => Err(Error::conversion(ValueKind::of(&other).to_string(), "string", &other)),
    }
}

fn sorted_keys(mappings: &HashMap<String, String>) -> Vec<String> {
    let mut keys: Vec<String> = mappings.keys().cloned().collect();
    keys.sort();
    keys
}
