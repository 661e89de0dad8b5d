//! Outcome Type
//!
//! A sealed result type carried between layers. An outcome is either a
//! success value or exactly one of three failure categories:
//!
//! - plain error: free-form message and code, optionally with a fallback value
//! - validation error: one or more field-level entries for the caller to fix
//! - exception error: a captured runtime fault, kept as data and never re-raised
//!
//! The category is decided by the factory that builds the outcome and never
//! changes afterwards.

use std::panic::UnwindSafe;

use tracing::{debug, warn};

use crate::code::ResultCode;
use crate::error::{Fault, OutcomeError, PanicFault, RetagError};
use crate::validation::ValidationEntry;

/// Message used when a validation failure is requested without entries.
pub const EMPTY_VALIDATION_MESSAGE: &str = "validation failed without entries";

/// Plain failure with a message, a code and an optional fallback value.
#[derive(Debug, Clone, PartialEq)]
pub struct PlainFailure<T> {
    message: String,
    code: ResultCode,
    fallback: Option<T>,
}

impl<T> PlainFailure<T> {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> ResultCode {
        self.code
    }

    /// Partial or default data the producer attached to the failure.
    pub fn fallback(&self) -> Option<&T> {
        self.fallback.as_ref()
    }

    fn without_fallback<U>(self) -> PlainFailure<U> {
        PlainFailure {
            message: self.message,
            code: self.code,
            fallback: None,
        }
    }
}

/// Validation failure holding at least one entry, in the order supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    entries: Vec<ValidationEntry>,
    code: ResultCode,
}

impl ValidationFailure {
    /// Build a validation failure, rejecting an empty entry collection.
    pub fn new<I>(entries: I, code: ResultCode) -> Result<Self, OutcomeError>
    where
        I: IntoIterator<Item = ValidationEntry>,
    {
        let entries: Vec<ValidationEntry> = entries.into_iter().collect();
        if entries.is_empty() {
            return Err(OutcomeError::EmptyValidation);
        }
        Ok(Self { entries, code })
    }

    pub fn entries(&self) -> &[ValidationEntry] {
        &self.entries
    }

    pub fn code(&self) -> ResultCode {
        self.code
    }
}

/// Exception failure wrapping a captured fault.
#[derive(Debug, Clone, PartialEq)]
pub struct ExceptionFailure {
    cause: Fault,
    code: ResultCode,
}

impl ExceptionFailure {
    pub fn cause(&self) -> &Fault {
        &self.cause
    }

    pub fn code(&self) -> ResultCode {
        self.code
    }
}

/// Result carried between application layers.
///
/// Build outcomes with the factory functions; match on the variants to
/// handle every category.
///
/// ```
/// use carrier_core::{Outcome, ResultCode};
///
/// let found: Outcome<u32> = Outcome::ok(7);
/// assert!(found.is_success());
///
/// let missing: Outcome<u32> = Outcome::error_with_code("not found", ResultCode::custom(404));
/// assert_eq!(missing.code(), ResultCode::custom(404));
/// assert_eq!(missing.map(|n| n * 2).message(), "not found");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Successful result containing the value.
    Success(T),
    /// Plain failure.
    Error(PlainFailure<T>),
    /// Field-level validation failure.
    Validation(ValidationFailure),
    /// Captured exception.
    Exception(ExceptionFailure),
}

impl<T> Outcome<T> {
    /// Create a success outcome.
    pub fn ok(value: T) -> Self {
        Self::Success(value)
    }

    /// Create a plain failure with the `Unknown` code.
    pub fn error(message: impl Into<String>) -> Self {
        Self::error_with_code(message, ResultCode::Unknown)
    }

    /// Create a plain failure with a specific code.
    pub fn error_with_code(message: impl Into<String>, code: ResultCode) -> Self {
        Self::Error(PlainFailure {
            message: message.into(),
            code,
            fallback: None,
        })
    }

    /// Create a plain failure that still carries a fallback value.
    pub fn error_with_fallback(message: impl Into<String>, code: ResultCode, fallback: T) -> Self {
        Self::Error(PlainFailure {
            message: message.into(),
            code,
            fallback: Some(fallback),
        })
    }

    /// Create a validation failure for a single field, code 199.
    pub fn validation_error(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::validation_error_with_code(key, message, ResultCode::ProcessingFailed)
    }

    /// Create a validation failure for a single field with a specific code.
    pub fn validation_error_with_code(
        key: impl Into<String>,
        message: impl Into<String>,
        code: ResultCode,
    ) -> Self {
        Self::Validation(ValidationFailure {
            entries: vec![ValidationEntry::new(key, message)],
            code,
        })
    }

    /// Create a validation failure from several entries, code 199.
    pub fn validation_errors<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ValidationEntry>,
    {
        Self::validation_errors_with_code(entries, ResultCode::ProcessingFailed)
    }

    /// Create a validation failure from several entries with a specific code.
    ///
    /// An empty collection cannot form a validation failure; it becomes a
    /// plain failure with [`EMPTY_VALIDATION_MESSAGE`] and the same code.
    pub fn validation_errors_with_code<I>(entries: I, code: ResultCode) -> Self
    where
        I: IntoIterator<Item = ValidationEntry>,
    {
        match ValidationFailure::new(entries, code) {
            Ok(failure) => Self::Validation(failure),
            Err(_) => {
                warn!(code = %code, "Validation failure built without entries, reporting plain error");
                Self::error_with_code(EMPTY_VALIDATION_MESSAGE, code)
            }
        }
    }

    /// Capture an error as an exception failure, code 199.
    pub fn exception(cause: impl Into<anyhow::Error>) -> Self {
        Self::exception_with_code(cause, ResultCode::ProcessingFailed)
    }

    /// Capture an error as an exception failure with a specific code.
    pub fn exception_with_code(cause: impl Into<anyhow::Error>, code: ResultCode) -> Self {
        let cause = Fault::new(cause);
        debug!(code = %code, cause = %cause, "Captured exception as outcome");
        Self::Exception(ExceptionFailure { cause, code })
    }

    /// Convert a standard result, capturing `Err` as an exception failure.
    pub fn from_result<E>(result: Result<T, E>) -> Self
    where
        E: Into<anyhow::Error>,
    {
        match result {
            Ok(value) => Self::Success(value),
            Err(e) => Self::exception(e),
        }
    }

    /// Run `f`, capturing a panic as an exception failure.
    pub fn catching<F>(f: F) -> Self
    where
        F: FnOnce() -> T + UnwindSafe,
    {
        match std::panic::catch_unwind(f) {
            Ok(value) => Self::Success(value),
            Err(payload) => Self::exception(PanicFault::from_payload(payload.as_ref())),
        }
    }

    /// Check if this is a success outcome.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Alias for [`Outcome::is_success`].
    pub fn is_ok(&self) -> bool {
        self.is_success()
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn is_plain_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_exception_error(&self) -> bool {
        matches!(self, Self::Exception(_))
    }

    /// Success value, or the fallback of a plain failure.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(v) => Some(v),
            Self::Error(e) => e.fallback(),
            Self::Validation(_) | Self::Exception(_) => None,
        }
    }

    /// Consume the outcome, returning the success value or plain-failure fallback.
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Success(v) => Some(v),
            Self::Error(e) => e.fallback,
            Self::Validation(_) | Self::Exception(_) => None,
        }
    }

    /// Like [`Outcome::into_value`], falling back to `T::default()`.
    pub fn value_or_default(self) -> T
    where
        T: Default,
    {
        self.into_value().unwrap_or_default()
    }

    /// Failure message. Empty for successes, validation and exception failures.
    pub fn message(&self) -> &str {
        match self {
            Self::Error(e) => e.message(),
            Self::Success(_) | Self::Validation(_) | Self::Exception(_) => "",
        }
    }

    pub fn code(&self) -> ResultCode {
        match self {
            Self::Success(_) => ResultCode::Success,
            Self::Error(e) => e.code(),
            Self::Validation(v) => v.code(),
            Self::Exception(e) => e.code(),
        }
    }

    /// Validation entries. Empty unless this is a validation failure.
    pub fn entries(&self) -> &[ValidationEntry] {
        match self {
            Self::Validation(v) => v.entries(),
            _ => &[],
        }
    }

    /// Captured fault of an exception failure.
    pub fn cause(&self) -> Option<&Fault> {
        match self {
            Self::Exception(e) => Some(e.cause()),
            _ => None,
        }
    }

    /// Map the success value.
    ///
    /// `f` runs only on success. Failures keep their category, message,
    /// code, entries and cause; a plain failure's fallback is dropped since
    /// it has no `U` form.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self.split() {
            Ok(value) => Outcome::Success(f(value)),
            Err(failure) => failure,
        }
    }

    /// Chain another fallible step onto a success.
    pub fn and_then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self.split() {
            Ok(value) => f(value),
            Err(failure) => failure,
        }
    }

    /// Forward a failure as an outcome of another type.
    ///
    /// Fails on a success, returning the value in the error so it can be
    /// mapped instead.
    pub fn retag<U>(self) -> Result<Outcome<U>, RetagError<T>> {
        match self.split() {
            Ok(value) => Err(RetagError::new(value)),
            Err(failure) => Ok(failure),
        }
    }

    /// Convert to a standard result. A plain failure's fallback is dropped.
    pub fn into_result(self) -> Result<T, OutcomeError> {
        match self {
            Self::Success(v) => Ok(v),
            Self::Error(e) => Err(OutcomeError::Plain {
                message: e.message,
                code: e.code,
            }),
            Self::Validation(v) => Err(OutcomeError::Validation {
                entries: v.entries,
                code: v.code,
            }),
            Self::Exception(e) => Err(OutcomeError::Exception {
                cause: e.cause,
                code: e.code,
            }),
        }
    }

    fn split<U>(self) -> Result<T, Outcome<U>> {
        match self {
            Self::Success(v) => Ok(v),
            Self::Error(e) => Err(Outcome::Error(e.without_fallback())),
            Self::Validation(v) => Err(Outcome::Validation(v)),
            Self::Exception(e) => Err(Outcome::Exception(e)),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, OutcomeError> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T>
where
    E: Into<anyhow::Error>,
{
    fn from(result: Result<T, E>) -> Self {
        Self::from_result(result)
    }
}
