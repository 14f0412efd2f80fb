//! Core module containing rule tags, message templates and validators

pub mod error;
pub mod registry;
pub mod rule;
pub mod validation;

pub use error::{AggregateError, EngineError, ErrorResponse, ValidateError};
pub use registry::{FIELD_PLACEHOLDER, MessageRegistry};
pub use rule::RuleTag;
pub use validation::{
    FieldViolation, MessageFormatter, ParamError, ParamOutcome, ParamSource, ParamValidator,
    StructValidator, ValidatedJson, ValidatorEngine, ViolationEngine,
};
