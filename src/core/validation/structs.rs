//! Request body validation
//!
//! A [`StructValidator`] asks a [`ViolationEngine`] for the failing
//! `(field, tag)` pairs of a value and turns them into one aggregate error.
//! The default engine, [`ValidatorEngine`], runs `#[derive(Validate)]` rules
//! from the `validator` crate.

use serde::Serialize;
use std::fmt;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use super::MessageFormatter;
use super::aggregate::combine_violations;
use super::shape::Shape;
use crate::core::error::{EngineError, ValidateError};
use crate::core::rule::RuleTag;

/// One failing `(field, tag)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Leaf field name, as passed to message formatters
    pub field: String,
    /// Location inside the value (`address.city`, `items[0].name`)
    pub path: String,
    /// Rule that failed
    pub tag: RuleTag,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, path: impl Into<String>, tag: impl Into<RuleTag>) -> Self {
        Self {
            field: field.into(),
            path: path.into(),
            tag: tag.into(),
        }
    }
}

/// Capability that lists the rule violations of a value
///
/// Violations must come back in field declaration order. Closures of shape
/// `Fn(&T) -> Result<Vec<FieldViolation>, EngineError>` are engines too,
/// which covers hand-written per-type validation.
pub trait ViolationEngine<T: ?Sized> {
    fn extract(&self, value: &T) -> Result<Vec<FieldViolation>, EngineError>;
}

impl<T, F> ViolationEngine<T> for F
where
    T: ?Sized,
    F: Fn(&T) -> Result<Vec<FieldViolation>, EngineError>,
{
    fn extract(&self, value: &T) -> Result<Vec<FieldViolation>, EngineError> {
        self(value)
    }
}

/// Engine backed by the `validator` crate
///
/// Reports one violation per field (the first error validator records for
/// it) and flattens nested structs and lists in place. Fields come back in
/// the order derived `Serialize` visits them, which is declaration order even
/// for fields skipped with `skip_serializing_if` or renamed with
/// `rename_all`. The tag is the validator error code, so
/// `length(min = 1, code = "required")` reports `required`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatorEngine;

impl<T> ViolationEngine<T> for ValidatorEngine
where
    T: Validate + Serialize,
{
    fn extract(&self, value: &T) -> Result<Vec<FieldViolation>, EngineError> {
        let errors = match value.validate() {
            Ok(()) => return Ok(Vec::new()),
            Err(errors) => errors,
        };

        let shape = Shape::of(value)?;
        let mut violations = Vec::new();
        collect_violations(&errors, &shape, "", &mut violations);
        Ok(violations)
    }
}

fn collect_violations(
    errors: &ValidationErrors,
    shape: &Shape,
    prefix: &str,
    out: &mut Vec<FieldViolation>,
) {
    for (field, kind) in ordered_fields(errors, shape) {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                if let Some(first) = field_errors.first() {
                    out.push(FieldViolation::new(field, path, &*first.code));
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_violations(nested, shape.field(field), &path, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let item_path = format!("{}[{}]", path, index);
                    collect_violations(nested, shape.field(field).item(*index), &item_path, out);
                }
            }
        }
    }
}

// Declaration order first; fields serde never mentions go last, by name.
fn ordered_fields<'e>(
    errors: &'e ValidationErrors,
    shape: &Shape,
) -> Vec<(&'e str, &'e ValidationErrorsKind)> {
    let mut fields: Vec<(&str, &ValidationErrorsKind)> = errors
        .errors()
        .iter()
        .map(|(field, kind)| (&**field, kind))
        .collect();
    fields.sort_by_key(|(field, _)| (shape.position(field).unwrap_or(usize::MAX), *field));
    fields
}

/// Validator for structured request values
///
/// Must be initialized before use; validating first is reported as
/// [`ValidateError::NotInitialized`].
///
/// # Example
///
/// ```rust,ignore
/// let mut validator = StructValidator::new();
/// validator.initialize(None);
///
/// validator.validate(&CreateUser { name: String::new(), email: "x".into() })?;
/// ```
pub struct StructValidator<E = ValidatorEngine> {
    engine: E,
    formatter: Option<MessageFormatter>,
    initialized: bool,
}

impl StructValidator<ValidatorEngine> {
    /// Uninitialized validator using the `validator` crate
    pub fn new() -> Self {
        Self::with_engine(ValidatorEngine)
    }
}

impl Default for StructValidator<ValidatorEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> StructValidator<E> {
    /// Uninitialized validator using a custom engine
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            formatter: None,
            initialized: false,
        }
    }

    /// Store the message formatter and mark the validator ready
    ///
    /// With `None`, messages come from the built-in struct message table.
    pub fn initialize(&mut self, formatter: Option<MessageFormatter>) {
        tracing::debug!(
            custom_formatter = formatter.is_some(),
            "Struct validator initialized"
        );
        self.formatter = formatter;
        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Validate `value`, combining every violation into one error
    pub fn validate<T>(&self, value: &T) -> Result<(), ValidateError>
    where
        T: ?Sized,
        E: ViolationEngine<T>,
    {
        if !self.initialized {
            return Err(ValidateError::NotInitialized);
        }

        let violations = self.engine.extract(value)?;
        combine_violations(&violations, self.formatter.as_ref())?;
        Ok(())
    }
}

impl<E: fmt::Debug> fmt::Debug for StructValidator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructValidator")
            .field("engine", &self.engine)
            .field("custom_formatter", &self.formatter.is_some())
            .field("initialized", &self.initialized)
            .finish()
    }
}
