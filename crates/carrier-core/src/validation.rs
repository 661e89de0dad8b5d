//! Validation Entries
//!
//! Field-level validation failures, meant to be corrected by the caller.

use serde::{Deserialize, Serialize};

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationEntry {
    key: String,
    message: String,
}

impl ValidationEntry {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

impl<K, M> From<(K, M)> for ValidationEntry
where
    K: Into<String>,
    M: Into<String>,
{
    fn from((key, message): (K, M)) -> Self {
        Self::new(key, message)
    }
}
