//! Combining failures into a single error
//!
//! Both validators feed their failures through here. Messages keep the order
//! in which outcomes or violations were supplied and are joined with `", "`.

use super::MessageFormatter;
use super::param::ParamOutcome;
use super::structs::FieldViolation;
use crate::core::error::AggregateError;
use crate::core::registry::FIELD_PLACEHOLDER;

/// Combine path parameter outcomes
///
/// Returns `Ok(())` when no outcome recorded a failure (including an empty
/// input), otherwise one error listing every failure message in input order.
pub fn combine_params<'a, I>(outcomes: I) -> Result<(), AggregateError>
where
    I: IntoIterator<Item = &'a ParamOutcome>,
{
    let messages = outcomes
        .into_iter()
        .filter_map(|outcome| outcome.error())
        .map(|error| error.message.clone());

    match AggregateError::from_messages(messages) {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Combine struct field violations
///
/// Each message comes from `formatter(field, tag)` when supplied, otherwise
/// from [`default_violation_message`].
pub fn combine_violations(
    violations: &[FieldViolation],
    formatter: Option<&MessageFormatter>,
) -> Result<(), AggregateError> {
    let messages = violations.iter().map(|violation| match formatter {
        Some(formatter) => formatter(&violation.field, violation.tag.as_str()),
        None => default_violation_message(&violation.field, violation.tag.as_str()),
    });

    match AggregateError::from_messages(messages) {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Fallback message for a struct violation when no formatter is configured
///
/// This table belongs to struct validation and is not read from the
/// [`MessageRegistry`](crate::core::registry::MessageRegistry).
pub fn default_violation_message(field: &str, tag: &str) -> String {
    let template = match tag {
        "required" => "{field} は必須です",
        "email" => "{field} は正しいメールアドレス形式である必要があります",
        "ulid" => "{field} は有効なULID形式である必要があります",
        _ => "{field} に無効な値が入力されています",
    };
    template.replace(FIELD_PLACEHOLDER, field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rule::RuleTag;
    use crate::core::validation::param::ParamError;
    use std::sync::Arc;

    fn failed(name: &str, message: &str) -> ParamOutcome {
        ParamOutcome::new(
            name,
            "",
            vec![RuleTag::Required],
            Some(ParamError {
                rule: RuleTag::Required,
                message: message.to_string(),
            }),
        )
    }

    fn passed(name: &str) -> ParamOutcome {
        ParamOutcome::new(name, "1", vec![RuleTag::Int], None)
    }

    fn violation(field: &str, tag: &str) -> FieldViolation {
        FieldViolation::new(field, field, tag)
    }

    #[test]
    fn test_combine_params_joins_failures() {
        let outcomes = vec![failed("a", "msgA"), passed("b"), failed("c", "msgC")];
        let error = combine_params(&outcomes).unwrap_err();
        assert_eq!(error.to_string(), "msgA, msgC");
        assert_eq!(error.messages(), &["msgA".to_string(), "msgC".to_string()]);
    }

    #[test]
    fn test_combine_params_preserves_order() {
        let outcomes = vec![failed("c", "msgC"), passed("b"), failed("a", "msgA")];
        let error = combine_params(&outcomes).unwrap_err();
        assert_eq!(error.to_string(), "msgC, msgA");
    }

    #[test]
    fn test_combine_params_all_valid() {
        let outcomes = vec![passed("a"), passed("b")];
        assert!(combine_params(&outcomes).is_ok());
    }

    #[test]
    fn test_combine_params_empty() {
        assert!(combine_params(&Vec::<ParamOutcome>::new()).is_ok());
    }

    #[test]
    fn test_combine_params_single_failure_has_no_separator() {
        let outcomes = [passed("a"), failed("b", "only")];
        assert_eq!(combine_params(&outcomes).unwrap_err().to_string(), "only");
    }

    #[test]
    fn test_combine_violations_default_messages() {
        let violations = vec![
            violation("Name", "required"),
            violation("Email", "email"),
            violation("Facility", "ulid"),
            violation("Age", "range"),
        ];
        let error = combine_violations(&violations, None).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Name は必須です, \
             Email は正しいメールアドレス形式である必要があります, \
             Facility は有効なULID形式である必要があります, \
             Age に無効な値が入力されています"
        );
    }

    #[test]
    fn test_combine_violations_with_formatter() {
        let formatter: MessageFormatter =
            Arc::new(|field: &str, tag: &str| format!("{}:{}", field, tag));
        let violations = vec![violation("name", "required"), violation("age", "range")];
        let error = combine_violations(&violations, Some(&formatter)).unwrap_err();
        assert_eq!(error.to_string(), "name:required, age:range");
    }

    #[test]
    fn test_combine_violations_empty() {
        assert!(combine_violations(&[], None).is_ok());
    }

    #[test]
    fn test_default_table_ignores_registry() {
        // "int" has a registry template but no struct default
        assert_eq!(
            default_violation_message("count", "int"),
            "count に無効な値が入力されています"
        );
    }
}
