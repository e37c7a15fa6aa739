//! Error types for pnlsim.
//!
//! All fallible operations return `Result<T, PnlError>` instead of panicking.
//! Degenerate revenue is not an error: the evaluator guards every ratio and
//! reports 0 instead.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for pnlsim operations.
pub type PnlResult<T> = Result<T, PnlError>;

/// Unified error type for all pnlsim operations.
#[derive(Debug, Error)]
pub enum PnlError {
    // ===== Input Errors =====
    /// Malformed scenario input (non-finite value, unknown variable id).
    #[error("Invalid input at '{field}': {reason}")]
    InvalidInput {
        /// Path of the offending field, e.g. `var_values.price_increase`.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    // ===== Export Errors =====
    /// Spreadsheet artifact could not be produced or persisted.
    #[error("Export failed for {}: {reason}", path.display())]
    ExportFailed {
        /// Destination of the artifact.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },

    // ===== Configuration Errors =====
    /// Invalid run configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Schema validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PnlError {
    /// Create an invalid-input error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an export failure.
    #[must_use]
    pub fn export_failed(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::ExportFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Prefix the field of an [`PnlError::InvalidInput`] with a scenario name.
    ///
    /// Other variants pass through unchanged.
    #[must_use]
    pub fn in_scenario(self, scenario: &str) -> Self {
        match self {
            Self::InvalidInput { field, reason } => Self::InvalidInput {
                field: format!("{scenario}.{field}"),
                reason,
            },
            other => other,
        }
    }

    /// Check if this error was caused by caller-supplied data.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::Config { .. }
                | Self::YamlParse(_)
                | Self::Json(_)
                | Self::Validation(_)
        )
    }
}
