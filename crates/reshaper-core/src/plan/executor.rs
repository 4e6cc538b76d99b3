//! Plan execution
//!
//! This module applies a built plan to JSON objects. Operations run strictly in the order
//! they were recorded, each one observing the results of the ones before it. Absent keys and
//! values of the wrong shape are skipped; the first transform failure ends the call.
//!
//! Copyright (c) 2025 Reshaper Team
//! Licensed under the Apache-2.0 license

use super::types::{Operation, Plan, ValueKind};
use serde_json::{Map, Value};

impl<E> Plan<E> {
    /// Apply the plan to `input`, returning a new object
    ///
    /// `input` is left untouched. If any transform fails, its error is returned unchanged and
    /// no output is produced.
    pub fn apply(&self, input: &Map<String, Value>) -> Result<Map<String, Value>, E> {
        self.apply_owned(input.clone())
    }

    /// Apply the plan to an object the caller no longer needs
    pub fn apply_owned(&self, mut working: Map<String, Value>) -> Result<Map<String, Value>, E> {
        for operation in &self.operations {
            log::trace!("applying {} on '{}'", operation.kind(), operation.key());
            apply_operation(operation, &mut working)?;
        }
        Ok(working)
    }

    /// Apply the plan to an arbitrary JSON value
    ///
    /// Objects are transformed as by [`Plan::apply`]; any other value is returned as-is.
    pub fn apply_value(&self, input: &Value) -> Result<Value, E> {
        match input {
            Value::Object(map) => self.apply(map).map(Value::Object),
            other => {
                log::debug!("plan input is a {}, returning it unchanged", ValueKind::of(other));
                Ok(other.clone())
            }
        }
    }

    fn apply_value_owned(&self, value: Value) -> Result<Value, E> {
        match value {
            Value::Object(map) => self.apply_owned(map).map(Value::Object),
            other => Ok(other),
        }
    }
}

fn apply_operation<E>(operation: &Operation<E>, working: &mut Map<String, Value>) -> Result<(), E> {
    // The working copy is discarded on error, so values may be taken out before a transform runs
    match operation {
        Operation::Rename {
            source,
            target,
            transform,
        } => {
            if let Some(value) = working.remove(source) {
                let value = match transform {
                    Some(transform) => transform(value)?,
                    None => value,
                };
                working.insert(target.clone(), value);
            }
        }
        Operation::MapValue { key, transform } => {
            if let Some(slot) = working.get_mut(key) {
                *slot = transform(slot.take())?;
            }
        }
        Operation::Remove { key } => {
            working.remove(key);
        }
        Operation::Reshape { key, plan } => match working.get_mut(key) {
            Some(Value::Object(nested)) => {
                let input = std::mem::take(nested);
                *nested = plan.apply_owned(input)?;
            }
            Some(other) => {
                log::debug!(
                    "reshape target '{}' is a {}, leaving it untouched",
                    key,
                    ValueKind::of(other)
                );
            }
            None => {}
        },
        Operation::MapCollection { key, plan } => match working.get_mut(key) {
            Some(Value::Array(items)) => {
                let elements = std::mem::take(items);
                *items = elements
                    .into_iter()
                    .map(|element| plan.apply_value_owned(element))
                    .collect::<Result<Vec<_>, E>>()?;
            }
            Some(other) => {
                log::debug!(
                    "map_collection target '{}' is a {}, leaving it untouched",
                    key,
                    ValueKind::of(other)
                );
            }
            None => {}
        },
    }
    Ok(())
}
