//! Validation of path parameters and request bodies
//!
//! Path parameters go through [`ParamValidator`], request bodies through
//! [`StructValidator`]; both report failures as one [`AggregateError`]
//! (see [`aggregate`]).
//!
//! [`AggregateError`]: crate::core::error::AggregateError

use std::sync::Arc;

pub mod aggregate;
pub mod extractor;
pub mod param;
mod shape;
pub mod structs;
pub mod validators;

pub use aggregate::{combine_params, combine_violations, default_violation_message};
pub use extractor::ValidatedJson;
pub use param::{ParamCheck, ParamError, ParamOutcome, ParamSource, ParamValidator};
pub use structs::{FieldViolation, StructValidator, ValidatorEngine, ViolationEngine};
pub use validators::{is_valid_ulid, validate_ulid};

/// Builds the message for a struct violation from `(field, tag)`
pub type MessageFormatter = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;
