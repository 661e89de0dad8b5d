//! Outcome Errors
//!
//! Error types produced when an outcome leaves the carrier, plus the
//! `Fault` wrapper used to hold a captured exception as inert data.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::code::ResultCode;
use crate::validation::ValidationEntry;

/// A captured runtime fault held as data.
///
/// Clones share the same underlying error, and equality is identity of
/// that shared error: a fault equals the fault it was cloned from.
#[derive(Clone)]
pub struct Fault(Arc<anyhow::Error>);

impl Fault {
    pub fn new(cause: impl Into<anyhow::Error>) -> Self {
        Self(Arc::new(cause.into()))
    }

    /// The wrapped error.
    pub fn error(&self) -> &anyhow::Error {
        &self.0
    }

    /// Downcast the wrapped error to a concrete type.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.0.downcast_ref::<E>()
    }

    /// Root cause of the wrapped error chain.
    pub fn root_cause(&self) -> &(dyn std::error::Error + 'static) {
        self.0.root_cause()
    }
}

impl PartialEq for Fault {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Fault").field(&format_args!("{:#}", self.0)).finish()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.0)
    }
}

/// Error form of a failed outcome, for callers that want `?` at a layer edge.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OutcomeError {
    #[error("[{code}] {message}")]
    Plain { message: String, code: ResultCode },

    #[error("[{code}] validation failed for {} field(s)", .entries.len())]
    Validation {
        entries: Vec<ValidationEntry>,
        code: ResultCode,
    },

    #[error("[{code}] exception: {cause}")]
    Exception { cause: Fault, code: ResultCode },

    #[error("validation failure requires at least one entry")]
    EmptyValidation,
}

impl OutcomeError {
    /// Result code of the failure. `EmptyValidation` reports `Unknown`.
    pub fn code(&self) -> ResultCode {
        match self {
            Self::Plain { code, .. } => *code,
            Self::Validation { code, .. } => *code,
            Self::Exception { code, .. } => *code,
            Self::EmptyValidation => ResultCode::Unknown,
        }
    }
}

/// Returned by `Outcome::retag` when called on a success.
///
/// Retagging only forwards failures; the success value is handed back so
/// the caller can map it instead.
pub struct RetagError<T> {
    value: T,
}

impl<T> RetagError<T> {
    pub(crate) fn new(value: T) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for RetagError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetagError").field("value", &self.value).finish()
    }
}

impl<T> fmt::Display for RetagError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cannot retag a successful outcome without mapping its value")
    }
}

impl<T: fmt::Debug> std::error::Error for RetagError<T> {}

/// A panic captured by `Outcome::catching`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("panic captured: {message}")]
pub struct PanicFault {
    message: String,
}

impl PanicFault {
    pub(crate) fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
