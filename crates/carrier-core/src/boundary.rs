//! Boundary Adapter
//!
//! Turns outcomes into envelopes at the edge of the process. The adapter
//! logs the diagnostics an envelope drops (validation entries, captured
//! exceptions) so they stay server-side, then asks the correlation and
//! integrity collaborators to stamp the envelope.
//!
//! The collaborators are traits; this crate never generates task ids or
//! check values itself.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::code::ResultCode;
use crate::envelope::ApiResult;
use crate::outcome::Outcome;

/// Envelope adapter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// Log validation entries withheld from the envelope.
    pub log_validation_failures: bool,
    /// Log captured exceptions withheld from the envelope.
    pub log_exception_failures: bool,
    /// Replace the envelope with an error when no check value can be signed.
    pub require_check_value: bool,
    /// Message of the replacement envelope.
    pub check_value_failure_message: String,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            log_validation_failures: true,
            log_exception_failures: true,
            require_check_value: false,
            check_value_failure_message: "Integrity check value unavailable".to_string(),
        }
    }
}

/// Supplies correlation ids for outgoing envelopes.
pub trait CorrelationSource: Send + Sync {
    fn next_task_id(&self) -> String;
}

/// Envelope fields an integrity signer covers.
///
/// `payload` is the envelope value as canonical JSON (object keys sorted),
/// so two envelopes that differ only in their value sign differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampInput {
    pub valid: bool,
    pub result_code: ResultCode,
    pub result_message: String,
    pub payload: Option<String>,
    pub task_id: Option<String>,
}

impl StampInput {
    pub fn from_envelope<T: Serialize>(envelope: &ApiResult<T>) -> Result<Self, SignError> {
        let payload = envelope
            .value()
            .map(canonical_json)
            .transpose()
            .map_err(|e| SignError::new(format!("payload not serializable: {e}")))?;

        Ok(Self {
            valid: envelope.is_success(),
            result_code: envelope.result_code(),
            result_message: envelope.result_message().to_string(),
            payload,
            task_id: envelope.task_id().map(str::to_string),
        })
    }
}

fn canonical_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    // Going through `Value` sorts map keys.
    serde_json::to_value(value).and_then(|v| serde_json::to_string(&v))
}

/// Signing failure reported by an [`IntegritySigner`].
#[derive(Debug, Clone, Error)]
#[error("check value signing failed: {message}")]
pub struct SignError {
    message: String,
}

impl SignError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Produces the client-verifiable check value for an envelope.
pub trait IntegritySigner: Send + Sync {
    fn check_value(&self, input: &StampInput) -> Result<String, SignError>;
}

/// Adapts outcomes into stamped envelopes.
#[derive(Clone, Default)]
pub struct EnvelopeAdapter {
    config: EnvelopeConfig,
    correlation: Option<Arc<dyn CorrelationSource>>,
    signer: Option<Arc<dyn IntegritySigner>>,
}

impl EnvelopeAdapter {
    pub fn new(config: EnvelopeConfig) -> Self {
        Self {
            config,
            correlation: None,
            signer: None,
        }
    }

    pub fn with_correlation(mut self, source: Arc<dyn CorrelationSource>) -> Self {
        self.correlation = Some(source);
        self
    }

    pub fn with_signer(mut self, signer: Arc<dyn IntegritySigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn config(&self) -> &EnvelopeConfig {
        &self.config
    }

    /// Record withheld diagnostics, narrow the outcome and stamp the envelope.
    pub fn adapt<T: Serialize>(&self, outcome: Outcome<T>) -> ApiResult<T> {
        self.record_diagnostics(&outcome);
        self.stamp(ApiResult::adapt(outcome))
    }

    /// Fill the task id and check value slots of an envelope.
    pub fn stamp<T: Serialize>(&self, envelope: ApiResult<T>) -> ApiResult<T> {
        let envelope = match &self.correlation {
            Some(source) => envelope.with_task_id(source.next_task_id()),
            None => envelope,
        };

        let Some(signer) = &self.signer else {
            return envelope;
        };

        let signed = StampInput::from_envelope(&envelope).and_then(|input| signer.check_value(&input));
        match signed {
            Ok(check_value) => envelope.with_cypher_check_value(check_value),
            Err(e) if self.config.require_check_value => {
                error!(
                    task_id = ?envelope.task_id(),
                    result_code = %envelope.result_code(),
                    error = %e,
                    "Check value required but signing failed, replacing envelope"
                );
                let replacement = ApiResult::error(self.config.check_value_failure_message.clone());
                match envelope.task_id() {
                    Some(task_id) => replacement.with_task_id(task_id),
                    None => replacement,
                }
            }
            Err(e) => {
                warn!(
                    task_id = ?envelope.task_id(),
                    error = %e,
                    "Check value signing failed, sending envelope without it"
                );
                envelope
            }
        }
    }

    fn record_diagnostics<T>(&self, outcome: &Outcome<T>) {
        match outcome {
            Outcome::Validation(failure) if self.config.log_validation_failures => {
                let fields: Vec<String> = failure.entries().iter().map(ToString::to_string).collect();
                info!(
                    result_code = %failure.code(),
                    entry_count = fields.len(),
                    entries = %fields.join("; "),
                    "Validation failure withheld from envelope"
                );
            }
            Outcome::Exception(failure) if self.config.log_exception_failures => {
                error!(
                    result_code = %failure.code(),
                    cause = %failure.cause(),
                    "Exception failure withheld from envelope"
                );
            }
            _ => {}
        }
    }
}

impl std::fmt::Debug for EnvelopeAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvelopeAdapter")
            .field("config", &self.config)
            .field("has_correlation", &self.correlation.is_some())
            .field("has_signer", &self.signer.is_some())
            .finish()
    }
}
