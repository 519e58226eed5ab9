//! Error types for FLINT.
//!
//! Strongly-typed errors with stable codes and enough context (path, type
//! identifier, failure reason) to diagnose a failed registration or run
//! without inspecting internals.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for FLINT operations.
#[derive(Error, Debug)]
pub enum FlintError {
    // =========================================================================
    // Definition errors (E001-E099)
    // =========================================================================
    /// The pipeline definition path does not resolve to a file.
    #[error("E001: Pipeline definition not found: {path}")]
    PipelineNotFound {
        /// The path that did not resolve.
        path: PathBuf,
    },

    /// The definition file is not valid YAML.
    #[error("E002: Failed to parse definition at {path}: {cause}")]
    DefinitionParse {
        /// The path of the definition file.
        path: PathBuf,
        /// Reason for the parse failure.
        cause: String,
    },

    /// The definition matches none of the recognized activation shapes.
    #[error("E003: Invalid definition at {path}: {cause}")]
    InvalidDefinition {
        /// The path of the definition file.
        path: PathBuf,
        /// Description of what is missing or malformed.
        cause: String,
    },

    // =========================================================================
    // Registry errors (E101-E199)
    // =========================================================================
    /// An `event` block names a trigger type with no registry entry.
    #[error("E101: Event trigger '{type_name}' is not registered")]
    UnknownTrigger {
        /// The unregistered trigger identifier.
        type_name: String,
    },

    /// A `scheduler` block names a scheduler type with no registry entry.
    #[error("E102: Scheduler '{type_name}' is not registered")]
    UnknownScheduler {
        /// The unregistered scheduler identifier.
        type_name: String,
    },

    /// A capability rejected one of its configuration parameters.
    #[error("E103: Invalid configuration '{field}': {cause}")]
    ConfigValue {
        /// The configuration field with the invalid value.
        field: String,
        /// Description of why the value is invalid.
        cause: String,
    },

    // =========================================================================
    // Execution errors (E201-E299)
    // =========================================================================
    /// A pipeline step failed during execution.
    #[error("E201: Step '{step}' failed: {cause}")]
    ExecutionFailed {
        /// The identifier of the failed step.
        step: String,
        /// Reason for the failure.
        cause: String,
    },

    // =========================================================================
    // Trigger runtime errors (E301-E399)
    // =========================================================================
    /// A trigger's watch on an external source failed.
    #[error("E301: Watch failed at {path}: {cause}")]
    Watch {
        /// The watched path.
        path: PathBuf,
        /// Description of the watch failure.
        cause: String,
    },

    // =========================================================================
    // I/O errors (E901-E999)
    // =========================================================================
    /// File I/O error.
    #[error("E901: I/O error at {path}: {cause}")]
    Io {
        /// The path where the I/O error occurred.
        path: PathBuf,
        /// Description of the I/O error.
        cause: String,
    },
}

impl FlintError {
    /// Get the error code (e.g., "E001").
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::PipelineNotFound { .. } => "E001",
            Self::DefinitionParse { .. } => "E002",
            Self::InvalidDefinition { .. } => "E003",
            Self::UnknownTrigger { .. } => "E101",
            Self::UnknownScheduler { .. } => "E102",
            Self::ConfigValue { .. } => "E103",
            Self::ExecutionFailed { .. } => "E201",
            Self::Watch { .. } => "E301",
            Self::Io { .. } => "E901",
        }
    }

    /// Check if this error is a configuration/validation error.
    ///
    /// Configuration errors are detected synchronously at registration time
    /// and are fatal to that registration call only.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::DefinitionParse { .. }
                | Self::InvalidDefinition { .. }
                | Self::UnknownTrigger { .. }
                | Self::UnknownScheduler { .. }
                | Self::ConfigValue { .. }
        )
    }
}

/// Result type alias using `FlintError`.
pub type Result<T> = std::result::Result<T, FlintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_correct() {
        let err = FlintError::PipelineNotFound {
            path: PathBuf::from("missing.yaml"),
        };
        assert_eq!(err.code(), "E001");

        let err = FlintError::UnknownTrigger {
            type_name: "file_watch".to_string(),
        };
        assert_eq!(err.code(), "E101");

        let err = FlintError::ExecutionFailed {
            step: "fetch".to_string(),
            cause: "exit status 1".to_string(),
        };
        assert_eq!(err.code(), "E201");
    }

    #[test]
    fn error_display() {
        let err = FlintError::UnknownScheduler {
            type_name: "interval".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("E102"));
        assert!(msg.contains("interval"));
    }

    #[test]
    fn config_errors() {
        assert!(
            FlintError::InvalidDefinition {
                path: PathBuf::from("p.yaml"),
                cause: "no recognized keys".to_string()
            }
            .is_config_error()
        );

        assert!(
            !FlintError::ExecutionFailed {
                step: "deploy".to_string(),
                cause: "failed".to_string()
            }
            .is_config_error()
        );

        assert!(
            !FlintError::PipelineNotFound {
                path: PathBuf::from("p.yaml")
            }
            .is_config_error()
        );
    }
}
