//! Builder for assembling transformation plans
//!
//! This module provides a fluent builder API that records operations in call order.
//! Nested operations build their sub-plan by handing a fresh builder to a configuration
//! closure.
//!
//! Copyright (c) 2025 Reshaper Team
//! Licensed under the Apache-2.0 license

use super::types::{Operation, Plan};
use crate::Error;
use serde_json::Value;

/// Builder for creating transformation plans
///
/// ```
/// use reshaper_core::{Plan, PlanBuilder};
/// use serde_json::json;
///
/// let plan: Plan = PlanBuilder::new()
///     .rename("user_name", "name")
///     .map("age", |v| Ok(v.as_str().map(|s| json!(s.len())).unwrap_or(v)))
///     .reshape("address", |a| a.reject("internal_id"))
///     .build();
/// assert_eq!(plan.len(), 3);
/// ```
pub struct PlanBuilder<E = Error> {
    operations: Vec<Operation<E>>,
}

impl<E> PlanBuilder<E> {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            operations: Vec::new(),
        }
    }

    /// Move the value at `source` to `target`
    pub fn rename(self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.push(Operation::Rename {
            source: source.into(),
            target: target.into(),
            transform: None,
        })
    }

    /// Move the value at `source` to `target`, passing it through `transform`
    pub fn rename_with<F>(
        self,
        source: impl Into<String>,
        target: impl Into<String>,
        transform: F,
    ) -> Self
    where
        F: Fn(Value) -> std::result::Result<Value, E> + Send + Sync + 'static,
    {
        self.push(Operation::Rename {
            source: source.into(),
            target: target.into(),
            transform: Some(Box::new(transform)),
        })
    }

    /// Replace the value at `key` with `transform(value)`
    pub fn map<F>(self, key: impl Into<String>, transform: F) -> Self
    where
        F: Fn(Value) -> std::result::Result<Value, E> + Send + Sync + 'static,
    {
        self.push(Operation::MapValue {
            key: key.into(),
            transform: Box::new(transform),
        })
    }

    /// Drop `key`
    pub fn reject(self, key: impl Into<String>) -> Self {
        self.push(Operation::Remove { key: key.into() })
    }

    /// Transform the object at `key` with the plan built by `configure`
    pub fn reshape<C>(self, key: impl Into<String>, configure: C) -> Self
    where
        C: FnOnce(PlanBuilder<E>) -> PlanBuilder<E>,
    {
        let plan = Plan::define(configure);
        self.push(Operation::Reshape {
            key: key.into(),
            plan,
        })
    }

    /// Transform every element of the array at `key` with the plan built by `configure`
    pub fn map_collection<C>(self, key: impl Into<String>, configure: C) -> Self
    where
        C: FnOnce(PlanBuilder<E>) -> PlanBuilder<E>,
    {
        let plan = Plan::define(configure);
        self.push(Operation::MapCollection {
            key: key.into(),
            plan,
        })
    }

    /// Append an already assembled operation
    pub fn push(mut self, operation: Operation<E>) -> Self {
        self.operations.push(operation);
        self
    }

    /// Number of operations recorded so far
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Freeze the recorded operations into a plan
    pub fn build(self) -> Plan<E> {
        Plan {
            operations: self.operations,
        }
    }
}

impl<E> Default for PlanBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
