//! # This-Validate
//!
//! Declarative validation for the two inputs an HTTP handler receives: path
//! parameters and JSON request bodies.
//!
//! ## Features
//!
//! - **Rule Tags**: `required`, `ulid` and `int` for path parameters, plus caller-registered rules
//! - **Message Templates**: one `{field}` template per rule, with YAML overrides
//! - **First-Failure Semantics**: each parameter reports only its first failing rule
//! - **Aggregated Errors**: every failure of a request joined into a single error
//! - **Struct Validation**: `#[derive(Validate)]` bodies via the `validator` crate
//! - **Axum Integration**: `ValidatedJson<T>` extractor and `IntoResponse` errors
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use this_validate::prelude::*;
//!
//! // Startup: build the message table and validators once
//! let registry = Arc::new(MessageRegistry::with_messages([
//!     ("required", "{field} is required"),
//! ]));
//! let params = ParamValidator::new(registry);
//!
//! // Per request: one outcome per parameter, then combine
//! let facility = params.evaluate("facility_id", "", ["required", "ulid"]);
//! let department = params.evaluate("department_id", "12", ["required", "int"]);
//!
//! let err = combine_params([&facility, &department]).unwrap_err();
//! assert_eq!(err.to_string(), "facility_id is required");
//! ```

pub mod config;
pub mod core;

pub use crate::core::validation::validators::{is_valid_ulid, validate_ulid};

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Rules & Messages ===
    pub use crate::core::{
        registry::{FIELD_PLACEHOLDER, MessageRegistry},
        rule::RuleTag,
    };

    // === Validators ===
    pub use crate::core::validation::{
        FieldViolation, MessageFormatter, ParamError, ParamOutcome, ParamSource, ParamValidator,
        StructValidator, ValidatedJson, ValidatorEngine, ViolationEngine, combine_params,
        combine_violations, default_violation_message, is_valid_ulid, validate_ulid,
    };

    // === Errors ===
    pub use crate::core::error::{AggregateError, EngineError, ErrorResponse, ValidateError};

    // === Config ===
    pub use crate::config::MessagesConfig;

    // === External dependencies ===
    pub use std::sync::Arc;
    pub use validator::Validate;
}
