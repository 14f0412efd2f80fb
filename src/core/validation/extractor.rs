//! Axum extractor for validated request bodies
//!
//! `ValidatedJson<T>` deserializes the JSON body and runs it through the
//! [`StructValidator`] found in the router state before the handler sees it.

use axum::{
    Json,
    extract::{FromRef, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use super::structs::StructValidator;

/// Axum extractor that deserializes and validates a JSON body
///
/// The router state must provide an `Arc<StructValidator>` through
/// [`FromRef`].
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_booking(
///     ValidatedJson(booking): ValidatedJson<CreateBooking>,
/// ) -> StatusCode {
///     // booking already passed its #[validate] rules
///     StatusCode::CREATED
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    /// Get the inner payload
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Serialize,
    Arc<StructValidator>: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<T> = match Json::from_request(req, state).await {
            Ok(json) => json,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected request body: invalid JSON");
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "Invalid JSON",
                        "details": e.to_string()
                    })),
                )
                    .into_response());
            }
        };

        let validator = Arc::<StructValidator>::from_ref(state);
        match validator.validate(&payload) {
            Ok(()) => Ok(ValidatedJson(payload)),
            Err(errors) => {
                tracing::debug!(
                    code = errors.error_code(),
                    error = %errors,
                    "Rejected request body: validation failed"
                );
                Err(errors.into_response())
            }
        }
    }
}
