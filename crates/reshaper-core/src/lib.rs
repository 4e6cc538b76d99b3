//! Reshaper Core - declarative transformation plans for nested JSON data
//!
//! This crate lets you describe how a JSON object should be reshaped once, as a plan, and
//! then apply that plan to as many objects as you like. Inputs are never modified; each
//! application returns a fresh object.
//!
//! # Main Components
//!
//! - **Plans**: ordered operations (rename, map, reject, reshape, map_collection) recorded
//!   with a fluent builder and applied with [`Plan::apply`]
//! - **Built-in transforms**: ready-made value functions for common conversions
//! - **Declarative plans**: plans written as JSON or YAML and compiled against a registry of
//!   named transforms
//! - **Error Handling**: a `thiserror` error type for configuration problems and built-in
//!   transform failures; plans can also carry any caller-defined error type
//!
//! # Example
//!
//! ```
//! use reshaper_core::{Plan, Result};
//! use serde_json::{json, Value};
//!
//! fn split_name(value: Value) -> Result<Value> {
//!     let full = value.as_str().unwrap_or_default();
//!     let (first, last) = full.split_once(' ').unwrap_or((full, ""));
//!     Ok(json!({ "first": first, "last": last }))
//! }
//!
//! let plan: Plan = Plan::define(|p| p.rename_with("full_name", "name", split_name));
//! let output = plan.apply_value(&json!({ "full_name": "Dave Cooper" })).unwrap();
//!
//! assert_eq!(output, json!({ "name": { "first": "Dave", "last": "Cooper" } }));
//! ```

pub mod declarative;
pub mod error;
pub mod plan;

// Re-export main types for convenience
pub use declarative::{PlanDefinition, TransformRegistry};
pub use error::{Error, Result};
pub use plan::{Operation, OperationKind, Plan, PlanBuilder, ValueFn, ValueKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
