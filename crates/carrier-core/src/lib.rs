//! Carrier Core
//!
//! Result carrier and client envelope shared across application layers:
//! - `Outcome<T>` - sealed result type: success, plain error, validation error or exception
//! - `ValidationEntry` - a single field-level validation failure
//! - `ResultCode` - named result codes carried by outcomes and envelopes
//! - `ApiResult<T>` - client-facing envelope narrowed from an outcome
//! - `EnvelopeAdapter` - boundary adapter that logs withheld diagnostics and stamps envelopes

pub mod boundary;
pub mod code;
pub mod envelope;
pub mod error;
pub mod outcome;
pub mod validation;

pub use boundary::{CorrelationSource, EnvelopeAdapter, EnvelopeConfig, IntegritySigner, SignError, StampInput};
pub use code::{CustomCode, ResultCode};
pub use envelope::ApiResult;
pub use error::{Fault, OutcomeError, PanicFault, RetagError};
pub use outcome::{ExceptionFailure, Outcome, PlainFailure, ValidationFailure};
pub use validation::ValidationEntry;
