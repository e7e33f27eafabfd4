//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the attendance clock, the payroll engine and the
//! configuration loader can surface to a caller.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type. Failures surface
/// directly to the caller; nothing is retried internally.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::NotFound {
///     entity: "employee".to_string(),
///     key: "42".to_string(),
/// };
/// assert_eq!(error.to_string(), "employee not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An employee, time entry, pay stub or rate record does not exist.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// The kind of record that was looked up.
        entity: String,
        /// The key used for the lookup.
        key: String,
    },

    /// The operation would violate a uniqueness rule (e.g. a second open session).
    #[error("Conflict: {message}")]
    Conflict {
        /// A description of the conflict.
        message: String,
    },

    /// An input value was rejected.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An action was attempted outside the states that permit it.
    #[error("Invalid state: {message}")]
    InvalidState {
        /// A description of the rejected transition.
        message: String,
    },

    /// A backing store could not be accessed.
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the store failure.
        message: String,
    },

    /// A persisted pay stub could not be rendered to its artifact.
    #[error("Failed to render '{path}': {message}")]
    Rendering {
        /// The artifact path that was being written.
        path: String,
        /// A description of the rendering failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::NotFound`] error.
    pub fn not_found(entity: impl Into<String>, key: impl ToString) -> Self {
        EngineError::NotFound {
            entity: entity.into(),
            key: key.to_string(),
        }
    }

    /// Shorthand for a [`EngineError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_not_found_helper_displays_entity_and_key() {
        let error = EngineError::not_found("pay stub", "7/2025-03");
        assert_eq!(error.to_string(), "pay stub not found: 7/2025-03");
    }

    #[test]
    fn test_validation_helper_displays_field_and_message() {
        let error = EngineError::validation("amount", "must be positive");
        assert_eq!(
            error.to_string(),
            "Invalid field 'amount': must be positive"
        );
    }

    #[test]
    fn test_conflict_displays_message() {
        let error = EngineError::Conflict {
            message: "session already open".to_string(),
        };
        assert_eq!(error.to_string(), "Conflict: session already open");
    }

    #[test]
    fn test_invalid_state_displays_message() {
        let error = EngineError::InvalidState {
            message: "salary advance 3 is APPROVED".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid state: salary advance 3 is APPROVED"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::not_found("employee", 1))
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::NotFound { .. })
        ));
    }
}
