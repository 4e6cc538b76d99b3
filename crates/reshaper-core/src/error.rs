//! Error types for the reshaper core library
//!
//! Plans are generic over the error type their transforms return, so a failure raised by a
//! caller-supplied transform reaches the caller of `apply` untouched. The [`Error`] defined
//! here is the default for that parameter and is what the built-in transforms and the
//! declarative plan loader produce.

use thiserror::Error;

/// Main error type for reshaper operations
#[derive(Error, Debug)]
pub enum Error {
    /// A plan could not be assembled from its description
    #[error("Configuration error: {message}{}", located(.operation))]
    Configuration {
        message: String,
        /// Operation (and key) the problem was found on, when known
        operation: Option<String>,
    },

    /// A built-in transform received a value of the wrong kind
    #[error("Type conversion failed: cannot convert {from} to {to} for value: {value}")]
    TypeConversion {
        from: String,
        to: String,
        value: String,
    },

    /// Lookup table had no entry for the value and no default
    #[error("Enum mapping not found for value: {value}")]
    EnumMapping {
        value: String,
        available_mappings: Vec<String>,
    },

    /// A value had the right kind but unusable content
    #[error("Invalid value {value}: {message}")]
    InvalidValue { message: String, value: String },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAML parsing errors
    #[error("YAML error: {message}")]
    Yaml {
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

fn located(operation: &Option<String>) -> String {
    operation
        .as_ref()
        .map(|operation| format!(" (at {})", operation))
        .unwrap_or_default()
}

impl Error {
    /// Shorthand for a configuration error tied to an operation
    pub(crate) fn configuration(message: impl Into<String>, operation: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            operation: Some(operation.into()),
        }
    }

    /// Shorthand for a type conversion error
    pub(crate) fn conversion(
        from: impl Into<String>,
        to: impl Into<String>,
        value: &serde_json::Value,
    ) -> Self {
        Error::TypeConversion {
            from: from.into(),
            to: to.into(),
            value: value.to_string(),
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        let err = Error::Configuration {
            message: "transform is required".to_string(),
            operation: Some("map(age)".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Configuration error: transform is required (at map(age))"
        );

        let err = Error::Configuration {
            message: "unsupported format".to_string(),
            operation: None,
        };
        assert_eq!(err.to_string(), "Configuration error: unsupported format");
    }

    #[test]
    fn test_conversion_error_display() {
        let err = Error::conversion("string", "number", &json!("abc"));
        assert_eq!(
            err.to_string(),
            "Type conversion failed: cannot convert string to number for value: \"abc\""
        );
    }

    #[test]
    fn test_from_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Json { .. }));
    }

    #[test]
    fn test_from_anyhow() {
        let err: Error = anyhow::anyhow!("boom").into();
        assert!(err.to_string().contains("boom"));
    }
}
