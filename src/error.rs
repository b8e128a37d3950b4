//! Typed failure model for the generation engine.
//!
//! Every failure of a generation call maps to exactly one [`GenerateError`]
//! variant. Failures are isolated to the call that produced them; batch
//! scaffolding does not roll back files written before the failure.

use std::path::{Path, PathBuf};

/// Errors produced by the generation core.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// A required input is missing or an enumeration value is outside its
    /// closed set. Nothing is written for the affected artifact.
    #[error("invalid input: {message}")]
    InputContractViolation { message: String },

    /// The service or module referenced by the caller does not exist on disk.
    #[error("{target} does not exist. {suggestion}")]
    TargetNotFound { target: String, suggestion: String },

    /// Directory creation or file write failed at the storage layer.
    #[error("i/o failure at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template failed to render.
    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),

    /// A JSON export could not be serialized.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result alias used across the generator.
pub type GenerateResult<T> = Result<T, GenerateError>;

impl GenerateError {
    /// Build an [`GenerateError::InputContractViolation`].
    pub fn contract(message: impl Into<String>) -> Self {
        GenerateError::InputContractViolation {
            message: message.into(),
        }
    }

    /// Build a [`GenerateError::TargetNotFound`] with a corrective hint.
    pub fn not_found(target: impl Into<String>, suggestion: impl Into<String>) -> Self {
        GenerateError::TargetNotFound {
            target: target.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Wrap an I/O error with the path it happened at.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        GenerateError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
