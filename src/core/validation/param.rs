//! Path parameter validation
//!
//! A [`ParamValidator`] checks one parameter value against an ordered rule
//! list and records at most one failure: the first rule that does not hold.
//! Outcomes are collected per request and combined with
//! [`combine_params`](super::aggregate::combine_params).

use axum::extract::{Path, RawPathParams};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use super::validators;
use crate::core::registry::MessageRegistry;
use crate::core::rule::RuleTag;

/// Check installed for a caller-defined rule tag
pub type ParamCheck = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Anything that can look up a raw path parameter by name
pub trait ParamSource {
    /// Raw value of `name`, or `None` when the route has no such parameter
    fn get_param(&self, name: &str) -> Option<&str>;
}

impl ParamSource for HashMap<String, String> {
    fn get_param(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl ParamSource for BTreeMap<String, String> {
    fn get_param(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl ParamSource for Path<HashMap<String, String>> {
    fn get_param(&self, name: &str) -> Option<&str> {
        self.0.get_param(name)
    }
}

impl ParamSource for RawPathParams {
    fn get_param(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

/// The rule that rejected a parameter, with its formatted message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamError {
    pub rule: RuleTag,
    pub message: String,
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParamError {}

/// Result of validating one named parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamOutcome {
    name: String,
    value: String,
    rules: Vec<RuleTag>,
    error: Option<ParamError>,
}

impl ParamOutcome {
    /// Build an outcome directly, e.g. from a check performed elsewhere
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        rules: Vec<RuleTag>,
        error: Option<ParamError>,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            rules,
            error,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Rules in the order they were requested
    pub fn rules(&self) -> &[RuleTag] {
        &self.rules
    }

    /// The first failing rule, if any
    pub fn error(&self) -> Option<&ParamError> {
        self.error.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Convert into a `Result` carrying the recorded failure
    pub fn into_result(self) -> Result<(), ParamError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Validator for route parameters
///
/// Built-in tags are `required`, `ulid` and `int`. Other tags fail unless a
/// check was registered for them with [`register_rule`](Self::register_rule).
///
/// # Example
///
/// ```rust,ignore
/// let registry = Arc::new(MessageRegistry::with_defaults());
/// let params = ParamValidator::new(registry);
///
/// let outcome = params.evaluate("facility_id", "", ["required", "ulid"]);
/// assert_eq!(outcome.error().unwrap().message, "facility_idは必須です");
/// ```
#[derive(Clone)]
pub struct ParamValidator {
    messages: Arc<MessageRegistry>,
    checks: HashMap<RuleTag, ParamCheck>,
}

impl ParamValidator {
    /// Create a validator formatting messages through `messages`
    pub fn new(messages: Arc<MessageRegistry>) -> Self {
        Self {
            messages,
            checks: HashMap::new(),
        }
    }

    /// Install a check for a caller-defined tag
    ///
    /// Built-in tags always use their own check; registering one is ignored.
    pub fn register_rule<F>(mut self, tag: impl Into<RuleTag>, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let tag = tag.into();
        if matches!(tag, RuleTag::Required | RuleTag::Ulid | RuleTag::Int) {
            tracing::warn!(rule = %tag, "Ignoring registration for built-in rule");
            return self;
        }
        tracing::debug!(rule = %tag, "Registered path parameter rule");
        self.checks.insert(tag, Arc::new(check));
        self
    }

    /// Registry used to format failure messages
    pub fn messages(&self) -> &MessageRegistry {
        &self.messages
    }

    /// Evaluate `rules` in order against `value`, stopping at the first failure
    pub fn evaluate<R>(&self, name: &str, value: &str, rules: R) -> ParamOutcome
    where
        R: IntoIterator,
        R::Item: Into<RuleTag>,
    {
        let rules: Vec<RuleTag> = rules.into_iter().map(Into::into).collect();
        let error = rules
            .iter()
            .find_map(|rule| self.check(name, value, rule).err());

        ParamOutcome {
            name: name.to_string(),
            value: value.to_string(),
            rules,
            error,
        }
    }

    /// Read `name` from `source` (absent reads as empty) and evaluate it
    pub fn param<S, R>(&self, source: &S, name: &str, rules: R) -> ParamOutcome
    where
        S: ParamSource + ?Sized,
        R: IntoIterator,
        R::Item: Into<RuleTag>,
    {
        let value = source.get_param(name).unwrap_or_default();
        self.evaluate(name, value, rules)
    }

    /// Check a single rule
    pub fn check(&self, name: &str, value: &str, rule: &RuleTag) -> Result<(), ParamError> {
        let passed = match rule {
            RuleTag::Required => validators::required(value),
            RuleTag::Ulid => validators::is_valid_ulid(value),
            RuleTag::Int => validators::int(value),
            other => self.checks.get(other).is_some_and(|check| check(value)),
        };

        if passed {
            Ok(())
        } else {
            Err(ParamError {
                rule: rule.clone(),
                message: self.messages.resolve(rule, name),
            })
        }
    }
}

impl fmt::Debug for ParamValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamValidator")
            .field("messages", &self.messages)
            .field("custom_rules", &self.checks.keys().collect::<Vec<_>>())
            .finish()
    }
}
