//! Construction error taxonomy
//!
//! Every failure is detected and reported (via `tracing::warn!`) at the
//! point it occurs, then propagated upward as a single failed `Result`.
//! There are no retries and no partially-built shapes: anything allocated
//! before the failure is dropped on the error path.

use fermion_core::InputError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// A required field is absent or has the wrong arity/type.
    #[error("invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// A `shape name` reference does not resolve to any registered shape.
    #[error("no shape named '{name}' exists")]
    UnresolvedReference { name: String },

    /// An inline `shape` block was present but could not be resolved.
    #[error("inline shape construction failed: {reason}")]
    ShapeConstructionFailed { reason: String },

    /// The `library` selector names no registered shape family.
    #[error("no shape library '{library}' is registered")]
    UnknownLibrary { library: String },
}

impl ShapeError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<InputError> for ShapeError {
    fn from(err: InputError) -> Self {
        match err {
            InputError::NotFound { key } => Self::invalid(key, "required input missing"),
            InputError::Malformed { key, reason } => Self::invalid(key, reason),
            InputError::Syntax { line, reason } => {
                Self::invalid("input", format!("syntax error at line {line}: {reason}"))
            }
        }
    }
}
