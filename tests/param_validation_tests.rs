//! Integration tests for path parameter validation
//!
//! These tests verify that:
//! - Each parameter reports its first failing rule with the configured message
//! - Outcomes combine into a single error in the order they were supplied
//! - Registry re-initialization fully resets overrides

use std::collections::HashMap;
use this_validate::prelude::*;

const VALID_ULID: &str = "01AN4Z07BY79KA1307SR9X4MV3";

fn custom_validator() -> ParamValidator {
    let registry = MessageRegistry::with_messages([
        ("required", "カスタム: このフィールドは必須です"),
        ("ulid", "カスタム: 無効なULID形式です"),
        ("int", "カスタム: 無効な整数形式です"),
    ]);
    ParamValidator::new(Arc::new(registry))
}

fn route(params: &[(&str, &str)]) -> HashMap<String, String> {
    params
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

// =============================================================================
// Single Parameter
// =============================================================================

mod param_tests {
    use super::*;

    struct Case {
        name: &'static str,
        param: &'static str,
        value: &'static str,
        rules: &'static [&'static str],
        want: Option<&'static str>,
    }

    #[test]
    fn test_param_cases() {
        let cases = [
            Case {
                name: "valid ulid",
                param: "facility_id",
                value: VALID_ULID,
                rules: &["required", "ulid"],
                want: None,
            },
            Case {
                name: "missing required field",
                param: "facility_id",
                value: "",
                rules: &["required"],
                want: Some("カスタム: このフィールドは必須です"),
            },
            Case {
                name: "invalid ulid",
                param: "facility_id",
                value: "invalid-ulid",
                rules: &["required", "ulid"],
                want: Some("カスタム: 無効なULID形式です"),
            },
            Case {
                name: "valid int",
                param: "department_id",
                value: "123",
                rules: &["required", "int"],
                want: None,
            },
            Case {
                name: "invalid int",
                param: "department_id",
                value: "invalid-int",
                rules: &["required", "int"],
                want: Some("カスタム: 無効な整数形式です"),
            },
        ];

        let validator = custom_validator();
        for case in cases {
            let source = route(&[(case.param, case.value)]);
            let outcome = validator.param(&source, case.param, case.rules.iter().copied());
            let got = outcome.error().map(|e| e.message.as_str());
            assert_eq!(got, case.want, "case '{}'", case.name);
        }
    }

    #[test]
    fn test_default_message_substitutes_name() {
        let validator = ParamValidator::new(Arc::new(MessageRegistry::with_defaults()));
        let outcome = validator.evaluate("facility_id", "", ["required"]);
        assert_eq!(outcome.error().unwrap().message, "facility_idは必須です");
    }

    #[test]
    fn test_absent_param_reads_as_empty() {
        let validator = custom_validator();
        let source = route(&[]);

        let checked = validator.param(&source, "page", ["int"]);
        assert!(checked.error().is_some());

        let unchecked = validator.param(&source, "page", Vec::<&str>::new());
        assert!(unchecked.is_valid());
    }

    #[test]
    fn test_rule_list_from_string() {
        let validator = custom_validator();
        let outcome =
            validator.evaluate("facility_id", VALID_ULID, RuleTag::parse_list("required, ulid"));
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_typo_in_rule_list_fails() {
        let validator = custom_validator();
        let outcome = validator.evaluate("facility_id", VALID_ULID, ["required", "uild"]);
        let error = outcome.error().unwrap();
        assert_eq!(error.rule, RuleTag::Custom("uild".to_string()));
        assert_eq!(error.message, "no message registered for rule 'uild'");
    }
}

// =============================================================================
// Combining Parameters
// =============================================================================

mod combine_tests {
    use super::*;

    #[test]
    fn test_all_valid() {
        let validator = custom_validator();
        let outcomes = [
            validator.evaluate("facility_id", VALID_ULID, ["required", "ulid"]),
            validator.evaluate("department_id", "123", ["required", "int"]),
        ];
        assert!(combine_params(&outcomes).is_ok());
    }

    #[test]
    fn test_one_invalid_ulid() {
        let validator = custom_validator();
        let outcomes = [
            validator.evaluate("facility_id", "invalid-ulid", ["required", "ulid"]),
            validator.evaluate("department_id", "123", ["required", "int"]),
        ];
        let err = combine_params(&outcomes).unwrap_err();
        assert_eq!(err.to_string(), "カスタム: 無効なULID形式です");
    }

    #[test]
    fn test_one_invalid_int() {
        let validator = custom_validator();
        let outcomes = [
            validator.evaluate("facility_id", VALID_ULID, ["required", "ulid"]),
            validator.evaluate("department_id", "invalid-int", ["required", "int"]),
        ];
        let err = combine_params(&outcomes).unwrap_err();
        assert_eq!(err.to_string(), "カスタム: 無効な整数形式です");
    }

    #[test]
    fn test_failures_joined_in_order() {
        let validator = ParamValidator::new(Arc::new(MessageRegistry::with_defaults()));
        let facility = validator.evaluate("facility_id", "", ["required", "ulid"]);
        let department = validator.evaluate("department_id", "x", ["required", "int"]);

        let err = combine_params([&facility, &department]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "facility_idは必須です, department_idは無効な整数形式です"
        );

        let err = combine_params([&department, &facility]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "department_idは無効な整数形式です, facility_idは必須です"
        );
    }

    #[test]
    fn test_combined_error_converts_to_validate_error() {
        fn handler(validator: &ParamValidator) -> Result<(), ValidateError> {
            let outcome = validator.evaluate("id", "", ["required"]);
            combine_params([&outcome])?;
            Ok(())
        }

        let err = handler(&custom_validator()).unwrap_err();
        assert!(matches!(err, ValidateError::Invalid(_)));
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }
}

// =============================================================================
// Registry Lifecycle
// =============================================================================

mod registry_tests {
    use super::*;

    #[test]
    fn test_reinitialize_resets_to_defaults() {
        let mut registry = MessageRegistry::new();
        registry.initialize([("required", "X")]);
        registry.initialize(HashMap::<String, String>::new());

        let validator = ParamValidator::new(Arc::new(registry));
        let outcome = validator.evaluate("id", "", ["required"]);
        assert_eq!(outcome.error().unwrap().message, "idは必須です");
    }

    #[test]
    fn test_uninitialized_registry_does_not_panic() {
        let validator = ParamValidator::new(Arc::new(MessageRegistry::new()));
        let outcome = validator.evaluate("id", "abc", ["int"]);
        assert_eq!(
            outcome.error().unwrap().message,
            "no message registered for rule 'int'"
        );
    }

    #[test]
    fn test_validator_shared_across_threads() {
        let validator = Arc::new(custom_validator());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let validator = Arc::clone(&validator);
                std::thread::spawn(move || {
                    validator
                        .evaluate("page", &i.to_string(), ["required", "int"])
                        .is_valid()
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
