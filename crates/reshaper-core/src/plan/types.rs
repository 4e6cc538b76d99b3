//! Core types for transformation plans
//!
//! This module defines the plan data model: the operation descriptors a plan is made of,
//! the boxed transform functions they carry, and the value classification the executor
//! dispatches on.
//!
//! Copyright (c) 2025 Reshaper Team
//! Licensed under the Apache-2.0 license

use super::builder::PlanBuilder;
use crate::Error;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// A caller-supplied transform applied to a single field value
///
/// The engine calls it with the current value and either stores the returned value or
/// hands the error back to the caller of `apply` as-is.
pub type ValueFn<E = Error> = Box<dyn Fn(Value) -> std::result::Result<Value, E> + Send + Sync>;

/// Shape of a JSON value as seen by the executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// JSON object
    Mapping,
    /// JSON array
    Sequence,
    /// String, number or boolean
    Scalar,
    /// JSON null
    Null,
}

impl ValueKind {
    /// Classify a value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => ValueKind::Mapping,
            Value::Array(_) => ValueKind::Sequence,
            Value::Null => ValueKind::Null,
            Value::String(_) | Value::Number(_) | Value::Bool(_) => ValueKind::Scalar,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Mapping => write!(f, "mapping"),
            ValueKind::Sequence => write!(f, "sequence"),
            ValueKind::Scalar => write!(f, "scalar"),
            ValueKind::Null => write!(f, "null"),
        }
    }
}

/// Discriminant of an [`Operation`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Rename,
    MapValue,
    Remove,
    Reshape,
    MapCollection,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Rename => write!(f, "rename"),
            OperationKind::MapValue => write!(f, "map"),
            OperationKind::Remove => write!(f, "reject"),
            OperationKind::Reshape => write!(f, "reshape"),
            OperationKind::MapCollection => write!(f, "map_collection"),
        }
    }
}

/// One recorded transformation step
pub enum Operation<E = Error> {
    /// Move the value at `source` to `target`, optionally transforming it
    Rename {
        source: String,
        target: String,
        transform: Option<ValueFn<E>>,
    },
    /// Replace the value at `key` with `transform(value)`
    MapValue { key: String, transform: ValueFn<E> },
    /// Delete `key`
    Remove { key: String },
    /// Apply `plan` to the object stored at `key`
    Reshape { key: String, plan: Plan<E> },
    /// Apply `plan` to every element of the array stored at `key`
    MapCollection { key: String, plan: Plan<E> },
}

impl<E> Operation<E> {
    /// The kind of this operation
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Rename { .. } => OperationKind::Rename,
            Operation::MapValue { .. } => OperationKind::MapValue,
            Operation::Remove { .. } => OperationKind::Remove,
            Operation::Reshape { .. } => OperationKind::Reshape,
            Operation::MapCollection { .. } => OperationKind::MapCollection,
        }
    }

    /// The key this operation reads (the source key for renames)
    pub fn key(&self) -> &str {
        match self {
            Operation::Rename { source, .. } => source,
            Operation::MapValue { key, .. }
            | Operation::Remove { key }
            | Operation::Reshape { key, .. }
            | Operation::MapCollection { key, .. } => key,
        }
    }

    /// The nested plan, for reshape and map_collection
    pub fn sub_plan(&self) -> Option<&Plan<E>> {
        match self {
            Operation::Reshape { plan, .. } | Operation::MapCollection { plan, .. } => Some(plan),
            _ => None,
        }
    }
}

impl<E> fmt::Debug for Operation<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Transforms are opaque, so only their presence is shown
        match self {
            Operation::Rename {
                source,
                target,
                transform,
            } => f
                .debug_struct("Rename")
                .field("source", source)
                .field("target", target)
                .field("transform", &transform.as_ref().map(|_| "<fn>"))
                .finish(),
            Operation::MapValue { key, .. } => f
                .debug_struct("MapValue")
                .field("key", key)
                .field("transform", &"<fn>")
                .finish(),
            Operation::Remove { key } => f.debug_struct("Remove").field("key", key).finish(),
            Operation::Reshape { key, plan } => f
                .debug_struct("Reshape")
                .field("key", key)
                .field("plan", plan)
                .finish(),
            Operation::MapCollection { key, plan } => f
                .debug_struct("MapCollection")
                .field("key", key)
                .field("plan", plan)
                .finish(),
        }
    }
}

/// An immutable, ordered list of operations
///
/// Plans are produced by [`PlanBuilder::build`] (or [`Plan::define`]) and never change
/// afterwards. Applying a plan does not touch any state held by the plan, so one plan can
/// be applied to any number of inputs, from any number of threads.
pub struct Plan<E = Error> {
    pub(crate) operations: Vec<Operation<E>>,
}

impl<E> Plan<E> {
    /// Build a plan by running `configure` against a fresh builder
    ///
    /// ```
    /// use reshaper_core::Plan;
    ///
    /// let plan: Plan = Plan::define(|p| p.rename("full_name", "name").reject("password"));
    /// assert_eq!(plan.len(), 2);
    /// ```
    pub fn define<F>(configure: F) -> Self
    where
        F: FnOnce(PlanBuilder<E>) -> PlanBuilder<E>,
    {
        configure(PlanBuilder::new()).build()
    }

    /// Start an empty builder
    pub fn builder() -> PlanBuilder<E> {
        PlanBuilder::new()
    }

    /// Operations in application order
    pub fn operations(&self) -> &[Operation<E>] {
        &self.operations
    }

    /// Number of top-level operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Every key mentioned by this plan or any nested plan
    ///
    /// Renames contribute both their source and target key.
    pub fn referenced_keys(&self) -> BTreeSet<&str> {
        let mut keys = BTreeSet::new();
        self.collect_keys(&mut keys);
        keys
    }

    fn collect_keys<'a>(&'a self, keys: &mut BTreeSet<&'a str>) {
        for operation in &self.operations {
            keys.insert(operation.key());
            match operation {
                Operation::Rename { target, .. } => {
                    keys.insert(target);
                }
                Operation::Reshape { plan, .. } | Operation::MapCollection { plan, .. } => {
                    plan.collect_keys(keys);
                }
                _ => {}
            }
        }
    }
}

impl<E> Default for Plan<E> {
    fn default() -> Self {
        Self {
            operations: Vec::new(),
        }
    }
}

impl<E> fmt::Debug for Plan<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plan")
            .field("operations", &self.operations)
            .finish()
    }
}
