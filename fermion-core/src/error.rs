//! Input extraction and parse errors
//!
//! A missing key is a recoverable absence: callers routinely probe for
//! optional fields and fall back. A key that exists but holds the wrong
//! kind or count of values is a hard configuration error. The two must
//! never be conflated, so they are separate variants.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum InputError {
    /// The requested key is not present in this block.
    #[error("no input named '{key}'")]
    NotFound { key: String },

    /// The key exists but its value cannot be read as requested.
    #[error("malformed input '{key}': {reason}")]
    Malformed { key: String, reason: String },

    /// The block text itself does not parse.
    #[error("syntax error at line {line}: {reason}")]
    Syntax { line: usize, reason: String },
}

impl InputError {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// True for the recoverable-absence case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
