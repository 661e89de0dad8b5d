//! Client Envelope
//!
//! `ApiResult<T>` is the client-facing projection of an outcome. It keeps
//! validity, value, message and code, and reserves two slots filled by
//! collaborators outside this crate: a correlation task id and an integrity
//! check value. Validation entries and captured exceptions never reach it.

use serde::{Deserialize, Deserializer, Serialize};

use crate::code::ResultCode;
use crate::outcome::Outcome;

/// Client-facing result envelope.
///
/// Deserialization is for clients reading an envelope back. It rejects a
/// `valid` flag that contradicts `resultCode`, so only code `0` parses as
/// valid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult<T> {
    valid: bool,
    value: Option<T>,
    result_message: String,
    result_code: ResultCode,
    task_id: Option<String>,
    cypher_check_value: Option<String>,
}

impl<T> ApiResult<T> {
    /// Successful envelope with result code `0`.
    pub fn ok(value: T) -> Self {
        Self {
            valid: true,
            value: Some(value),
            result_message: String::new(),
            result_code: ResultCode::Success,
            task_id: None,
            cypher_check_value: None,
        }
    }

    /// Failed envelope with the `Unknown` code.
    pub fn error(message: impl Into<String>) -> Self {
        Self::error_with_code(message, ResultCode::Unknown)
    }

    pub fn error_with_code(message: impl Into<String>, code: ResultCode) -> Self {
        Self {
            valid: false,
            value: None,
            result_message: message.into(),
            result_code: code,
            task_id: None,
            cypher_check_value: None,
        }
    }

    /// Failed envelope that still carries a placeholder payload.
    pub fn error_with_placeholder(message: impl Into<String>, placeholder: T, code: ResultCode) -> Self {
        Self {
            value: Some(placeholder),
            ..Self::error_with_code(message, code)
        }
    }

    /// Narrow an outcome into an envelope.
    ///
    /// Copies validity, code, message and value (a plain failure's fallback
    /// included). Validation entries and exception causes are not copied.
    pub fn adapt(outcome: Outcome<T>) -> Self {
        let valid = outcome.is_success();
        let result_code = outcome.code();
        let result_message = outcome.message().to_string();
        Self {
            valid,
            value: outcome.into_value(),
            result_message,
            result_code,
            task_id: None,
            cypher_check_value: None,
        }
    }

    /// Attach the correlation id.
    pub fn with_task_id(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    /// Attach the integrity check value.
    pub fn with_cypher_check_value(mut self, check_value: impl Into<String>) -> Self {
        self.cypher_check_value = Some(check_value.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.valid
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn result_message(&self) -> &str {
        &self.result_message
    }

    pub fn result_code(&self) -> ResultCode {
        self.result_code
    }

    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    pub fn cypher_check_value(&self) -> Option<&str> {
        self.cypher_check_value.as_deref()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawApiResult<T> {
    valid: bool,
    value: Option<T>,
    result_message: String,
    result_code: ResultCode,
    task_id: Option<String>,
    cypher_check_value: Option<String>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ApiResult<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawApiResult::<T>::deserialize(deserializer)?;
        if raw.valid != (raw.result_code == ResultCode::Success) {
            return Err(serde::de::Error::custom(format!(
                "valid={} contradicts resultCode {}",
                raw.valid, raw.result_code
            )));
        }
        Ok(Self {
            valid: raw.valid,
            value: raw.value,
            result_message: raw.result_message,
            result_code: raw.result_code,
            task_id: raw.task_id,
            cypher_check_value: raw.cypher_check_value,
        })
    }
}

impl<T> From<Outcome<T>> for ApiResult<T> {
    fn from(outcome: Outcome<T>) -> Self {
        Self::adapt(outcome)
    }
}
