//! Outcome and Envelope Integration Tests
//!
//! Tests for:
//! - Outcome factories and category predicates
//! - Adapting outcomes into client envelopes
//! - Withholding validation entries and exception causes from envelopes
//! - Stamping envelopes through the boundary adapter

use std::sync::Arc;

use carrier_core::{
    ApiResult, CorrelationSource, EnvelopeAdapter, EnvelopeConfig, IntegritySigner, Outcome,
    ResultCode, SignError, StampInput, ValidationEntry,
};

#[derive(Debug, thiserror::Error)]
#[error("ledger unavailable: {0}")]
struct LedgerUnavailable(String);

fn sample_outcomes() -> Vec<Outcome<String>> {
    vec![
        Outcome::ok("value".to_string()),
        Outcome::error("plain"),
        Outcome::error_with_code("coded", ResultCode::custom(501)),
        Outcome::error_with_fallback("fallback", ResultCode::custom(502), "partial".to_string()),
        Outcome::validation_error("email", "required"),
        Outcome::validation_errors(vec![
            ValidationEntry::new("email", "required"),
            ValidationEntry::new("age", "must be positive"),
        ]),
        Outcome::exception(LedgerUnavailable("db-secret-host:5432".to_string())),
    ]
}

mod outcome_tests {
    use super::*;

    #[test]
    fn test_outcome_codes() {
        let codes: Vec<i32> = sample_outcomes().iter().map(|o| o.code().as_i32()).collect();
        assert_eq!(codes, vec![0, -1, 501, 502, 199, 199, 199]);
    }

    #[test]
    fn test_only_success_is_valid() {
        for outcome in sample_outcomes() {
            assert_eq!(outcome.is_success(), outcome.code() == ResultCode::Success);
            assert_eq!(outcome.is_success(), !outcome.is_failure());
        }
    }

    #[test]
    fn test_categories_are_exclusive() {
        for outcome in sample_outcomes() {
            let flags = [
                outcome.is_success(),
                outcome.is_plain_error(),
                outcome.is_validation_error(),
                outcome.is_exception_error(),
            ];
            assert_eq!(flags.iter().filter(|f| **f).count(), 1, "{outcome:?}");
        }
    }

    #[test]
    fn test_forwarding_failure_across_types() {
        fn load_user(id: u32) -> Outcome<String> {
            if id == 0 {
                return Outcome::validation_error("id", "must not be zero");
            }
            Outcome::ok(format!("user-{id}"))
        }

        fn load_profile(id: u32) -> Outcome<usize> {
            match load_user(id) {
                Outcome::Success(name) => Outcome::ok(name.len()),
                failure => match failure.retag() {
                    Ok(forwarded) => forwarded,
                    Err(e) => Outcome::ok(e.into_value().len()),
                },
            }
        }

        assert_eq!(load_profile(12), Outcome::ok(7));
        let failed = load_profile(0);
        assert!(failed.is_validation_error());
        assert_eq!(failed.entries()[0].message(), "must not be zero");
    }

    #[test]
    fn test_question_mark_at_layer_edge() {
        fn handler() -> Result<u32, carrier_core::OutcomeError> {
            let count = Outcome::ok(2).into_result()?;
            let denied: Outcome<u32> = Outcome::error_with_code("denied", ResultCode::custom(403));
            let _ = denied.into_result()?;
            Ok(count)
        }

        let err = handler().unwrap_err();
        assert_eq!(err.code(), ResultCode::custom(403));
    }
}

mod envelope_tests {
    use super::*;

    #[test]
    fn test_adapt_ok() {
        let envelope = ApiResult::adapt(Outcome::ok(10_u64));
        assert!(envelope.is_success());
        assert_eq!(envelope.value(), Some(&10));
        assert_eq!(envelope.result_code().as_i32(), 0);
    }

    #[test]
    fn test_adapt_error() {
        let envelope: ApiResult<u64> =
            ApiResult::adapt(Outcome::error_with_code("quota exceeded", ResultCode::custom(429)));
        assert!(!envelope.is_success());
        assert_eq!(envelope.result_message(), "quota exceeded");
        assert_eq!(envelope.result_code(), ResultCode::custom(429));
        assert!(envelope.value().is_none());
    }

    #[test]
    fn test_envelope_validity_matches_outcome() {
        for outcome in sample_outcomes() {
            let valid = outcome.is_success();
            let code = outcome.code();
            let envelope = ApiResult::adapt(outcome);
            assert_eq!(envelope.is_success(), valid);
            assert_eq!(envelope.result_code(), code);
        }
    }

    #[test]
    fn test_envelope_never_leaks_diagnostics() {
        let allowed = [
            "valid",
            "value",
            "resultMessage",
            "resultCode",
            "taskId",
            "cypherCheckValue",
        ];

        for outcome in sample_outcomes() {
            let json = serde_json::to_value(ApiResult::adapt(outcome)).unwrap();
            let object = json.as_object().unwrap();
            for key in object.keys() {
                assert!(allowed.contains(&key.as_str()), "unexpected field {key}");
            }

            let text = json.to_string();
            assert!(!text.contains("must be positive"));
            assert!(!text.contains("db-secret-host"));
        }
    }

    #[test]
    fn test_two_entry_validation_scenario() {
        let outcome: Outcome<String> = Outcome::validation_errors(vec![
            ValidationEntry::new("email", "required"),
            ValidationEntry::new("age", "must be positive"),
        ]);
        assert!(outcome.is_validation_error());
        assert_eq!(
            outcome.entries(),
            &[
                ValidationEntry::new("email", "required"),
                ValidationEntry::new("age", "must be positive"),
            ]
        );

        let envelope = ApiResult::adapt(outcome);
        assert_eq!(envelope.result_code().as_i32(), 199);
        assert_eq!(envelope.result_message(), "");
        assert!(envelope.value().is_none());
    }

    #[test]
    fn test_envelope_roundtrips_for_clients() {
        let envelope = ApiResult::ok(vec!["a".to_string()]).with_task_id("task-7");
        let text = serde_json::to_string(&envelope).unwrap();
        let parsed: ApiResult<Vec<String>> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, envelope);
    }
}

mod adapter_tests {
    use super::*;

    struct FixedTask;

    impl CorrelationSource for FixedTask {
        fn next_task_id(&self) -> String {
            "task-42".to_string()
        }
    }

    /// Signs by echoing the covered fields so tests can inspect them.
    struct EchoSigner;

    impl IntegritySigner for EchoSigner {
        fn check_value(&self, input: &StampInput) -> Result<String, SignError> {
            let task_id = input
                .task_id
                .as_deref()
                .ok_or_else(|| SignError::new("task id missing"))?;
            Ok(format!(
                "{}|{}|{}|{}|{}",
                input.valid,
                input.result_code,
                input.result_message,
                input.payload.as_deref().unwrap_or("-"),
                task_id
            ))
        }
    }

    #[test]
    fn test_adapter_stamps_task_id_then_signs() {
        let adapter = EnvelopeAdapter::new(EnvelopeConfig::default())
            .with_correlation(Arc::new(FixedTask))
            .with_signer(Arc::new(EchoSigner));

        let envelope = adapter.adapt(Outcome::ok("done"));
        assert_eq!(envelope.task_id(), Some("task-42"));
        assert_eq!(envelope.cypher_check_value(), Some(r#"true|0||"done"|task-42"#));

        let failure = adapter.adapt(Outcome::<&str>::validation_error("name", "blank"));
        assert_eq!(failure.cypher_check_value(), Some("false|199||-|task-42"));
    }

    #[test]
    fn test_check_value_covers_payload_and_message() {
        let adapter = EnvelopeAdapter::default()
            .with_correlation(Arc::new(FixedTask))
            .with_signer(Arc::new(EchoSigner));

        let small = adapter.adapt(Outcome::ok(1_u64));
        let large = adapter.adapt(Outcome::ok(1_000_000_u64));
        assert_ne!(small.cypher_check_value(), large.cypher_check_value());
        assert_eq!(large.cypher_check_value(), Some("true|0||1000000|task-42"));

        let denied = adapter.adapt(Outcome::<u64>::error_with_code("denied", ResultCode::custom(403)));
        let expired = adapter.adapt(Outcome::<u64>::error_with_code("expired", ResultCode::custom(403)));
        assert_ne!(denied.cypher_check_value(), expired.cypher_check_value());
        assert_eq!(expired.cypher_check_value(), Some("false|403|expired|-|task-42"));
    }

    #[test]
    fn test_signer_error_without_requirement() {
        let adapter = EnvelopeAdapter::default().with_signer(Arc::new(EchoSigner));
        let envelope = adapter.adapt(Outcome::ok(1));
        assert!(envelope.is_success());
        assert!(envelope.cypher_check_value().is_none());
    }

    #[test]
    fn test_adapter_with_logging_disabled() {
        let config = EnvelopeConfig {
            log_validation_failures: false,
            log_exception_failures: false,
            ..EnvelopeConfig::default()
        };
        let adapter = EnvelopeAdapter::new(config);
        let envelope =
            adapter.adapt(Outcome::<()>::exception(LedgerUnavailable("replica".to_string())));
        assert!(!envelope.is_success());
        assert_eq!(envelope.result_code(), ResultCode::ProcessingFailed);
        assert_eq!(envelope.result_message(), "");
    }
}
