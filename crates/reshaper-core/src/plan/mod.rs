//! Transformation plans for nested JSON objects
//!
//! A plan is an ordered list of operations recorded through [`PlanBuilder`]. Once built it
//! can be applied to any number of JSON objects; each application works on its own copy and
//! leaves the input untouched.
//!
//! # Module Organization
//!
//! - [`types`] - Operation descriptors, plans and value classification
//! - [`builder`] - Fluent builder API for recording operations
//! - [`executor`] - Application of a plan to JSON objects
//! - [`built_in`] - Ready-made transforms for common conversions
//!
//! # Examples
//!
//! ```
//! use reshaper_core::Plan;
//! use reshaper_core::plan::built_in;
//! use serde_json::json;
//!
//! let plan: Plan = Plan::define(|p| {
//!     p.rename("user_name", "name")
//!         .map("age", built_in::string_to_number())
//!         .reject("password")
//!         .map_collection("tags", |t| t.map("label", built_in::lowercase()))
//! });
//!
//! let input = json!({
//!     "user_name": "dave",
//!     "age": "42",
//!     "password": "hunter2",
//!     "tags": [{ "label": "Admin" }]
//! });
//!
//! let output = plan.apply_value(&input).unwrap();
//! assert_eq!(output, json!({
//!     "name": "dave",
//!     "age": 42,
//!     "tags": [{ "label": "admin" }]
//! }));
//! ```
//!
//! Copyright (c) 2025 Reshaper Team
//! Licensed under the Apache-2.0 license

// Plan data model
pub mod types;

// Builder API
pub mod builder;

// Plan application
pub mod executor;

// Pre-configured transforms
pub mod built_in;


pub use builder::PlanBuilder;
pub use types::{Operation, OperationKind, Plan, ValueFn, ValueKind};
