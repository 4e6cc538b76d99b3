//! Declarative plans loaded from JSON or YAML
//!
//! Plans can be written as data instead of code. Transforms are referenced by name and
//! resolved through a [`TransformRegistry`], which comes preloaded with the built-in
//! transforms and accepts custom ones.
//!
//! ```
//! use reshaper_core::declarative::{PlanDefinition, TransformRegistry};
//! use serde_json::json;
//!
//! let definition = PlanDefinition::from_yaml_str(r#"
//! operations:
//!   - op: rename
//!     from: user_name
//!     to: name
//!     transform: trim
//!   - op: map
//!     key: age
//!     transform: string_to_number
//! "#).unwrap();
//!
//! let plan = definition.compile(&TransformRegistry::with_built_ins()).unwrap();
//! let output = plan.apply_value(&json!({ "user_name": " dave ", "age": "42" })).unwrap();
//! assert_eq!(output, json!({ "name": "dave", "age": 42 }));
//! ```
//!
//! Copyright (c) 2025 Reshaper Team
//! Licensed under the Apache-2.0 license

pub mod definition;
pub mod registry;

pub use definition::{OperationDefinition, PlanDefinition, TransformDefinition};
pub use registry::{TransformFactory, TransformRegistry};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::OperationKind;
    use crate::Error;
    use serde_json::{json, Value};

    const USERS_YAML: &str = r#"
operations:
  - op: reject
    key: password
  - op: reshape
    key: profile
    operations:
      - op: rename
        from: dob
        to: born_at
        transform: rfc3339_to_unix
  - op: map_collection
    key: roles
    operations:
      - op: map
        key: name
        transform:
          name: enum_mapping
          args:
            mappings: { adm: admin, usr: user }
            default: guest
"#;

    #[test]
    fn test_yaml_definition_compiles() {
        let definition = PlanDefinition::from_yaml_str(USERS_YAML).unwrap();
        assert_eq!(definition.operations.len(), 3);

        let plan = definition.compile(&TransformRegistry::with_built_ins()).unwrap();
        let kinds: Vec<OperationKind> = plan.operations().iter().map(|op| op.kind()).collect();
        assert_eq!(
            kinds,
            vec![OperationKind::Remove, OperationKind::Reshape, OperationKind::MapCollection]
        );

        let output = plan
            .apply_value(&json!({
                "password": "hunter2",
                "profile": { "dob": "1970-01-02T00:00:00Z" },
                "roles": [{ "name": "adm" }, { "name": "x" }]
            }))
            .unwrap();
        assert_eq!(
            output,
            json!({
                "profile": { "born_at": 86400 },
                "roles": [{ "name": "admin" }, { "name": "guest" }]
            })
        );
    }

    #[test]
    fn test_json_definition_matches_yaml() {
        let from_yaml = PlanDefinition::from_yaml_str(USERS_YAML).unwrap();
        let json = from_yaml.to_json_string().unwrap();
        let from_json = PlanDefinition::from_json_str(&json).unwrap();

        assert_eq!(from_yaml, from_json);
    }

    #[test]
    fn test_transform_definition_forms() {
        let named: TransformDefinition = serde_json::from_value(json!("trim")).unwrap();
        assert_eq!(named.name(), "trim");
        assert_eq!(named.args(), &Value::Null);

        let configured: TransformDefinition =
            serde_json::from_value(json!({ "name": "linear", "args": { "scale": 2 } })).unwrap();
        assert_eq!(configured.name(), "linear");
        assert_eq!(configured.args(), &json!({ "scale": 2 }));
    }

    #[test]
    fn test_map_without_transform_is_configuration_error() {
        let definition = PlanDefinition::from_json_str(
            r#"{ "operations": [ { "op": "map_collection", "key": "items", "operations": [ { "op": "map", "key": "qty" } ] } ] }"#,
        )
        .unwrap();

        let err = definition.compile(&TransformRegistry::with_built_ins()).err().unwrap();
        assert_eq!(
            err.to_string(),
            "Configuration error: map requires a transform (at map_collection(items) > map(qty))"
        );
        match err {
            Error::Configuration { message, operation } => {
                assert_eq!(message, "map requires a transform");
                assert_eq!(operation.as_deref(), Some("map_collection(items) > map(qty)"));
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_transform_names_operation() {
        let definition = PlanDefinition::from_json_str(
            r#"{ "operations": [ { "op": "rename", "from": "a", "to": "b", "transform": "explode" } ] }"#,
        )
        .unwrap();

        match definition.compile(&TransformRegistry::with_built_ins()) {
            Err(Error::Configuration { message, operation }) => {
                assert!(message.contains("Unknown transform 'explode'"));
                assert_eq!(operation.as_deref(), Some("rename(a -> b)"));
            }
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_op_is_parse_error() {
        let result = PlanDefinition::from_json_str(
            r#"{ "operations": [ { "op": "explode", "key": "a" } ] }"#,
        );
        assert!(matches!(result, Err(Error::Json { .. })));
    }

    #[test]
    fn test_misspelled_field_is_rejected() {
        let result = PlanDefinition::from_yaml_str(
            r#"
operations:
  - op: reshape
    key: a
    operation:
      - { op: reject, key: secret }
"#,
        );
        match result {
            Err(Error::Yaml { message, .. }) => assert!(message.contains("operation")),
            other => panic!("expected YAML error, got {:?}", other),
        }

        let result = PlanDefinition::from_json_str(
            r#"{ "operations": [ { "op": "rename", "from": "a", "to": "b", "transfrom": "trim" } ] }"#,
        );
        assert!(matches!(result, Err(Error::Json { .. })));

        let result = PlanDefinition::from_yaml_str("operatons: []");
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_nested_operations_are_required() {
        let result = PlanDefinition::from_json_str(
            r#"{ "operations": [ { "op": "map_collection", "key": "items" } ] }"#,
        );
        assert!(matches!(result, Err(Error::Json { .. })));
    }

    #[test]
    fn test_empty_definition() {
        let definition = PlanDefinition::from_yaml_str("operations: []").unwrap();
        let plan = definition.compile(&TransformRegistry::new()).unwrap();
        assert!(plan.is_empty());
    }
}
