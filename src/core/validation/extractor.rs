//! Axum extractor for validated record payloads
//!
//! Parses the request body as [`TrainingDetails`] and runs
//! [`validate_details`](super::validate_details) against the catalog held in
//! the router state. Any failure is answered with a 400 and the usual
//! `{ code, message, details }` body before the handler runs.

use super::validate_details;
use crate::config::ProjectCatalog;
use crate::core::error::{RequestError, TrainingError, ValidationError};
use crate::core::record::TrainingDetails;
use axum::{
    Json,
    extract::{FromRef, FromRequest, Request},
    response::{IntoResponse, Response},
};

/// A request body that is a complete, valid record
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_training(
///     State(state): State<AppState>,
///     ValidatedDetails(details): ValidatedDetails,
/// ) -> Result<(StatusCode, Json<TrainingRecord>), TrainingError> {
///     // details is already validated
/// }
/// ```
#[derive(Debug)]
pub struct ValidatedDetails(pub TrainingDetails);

impl<S> FromRequest<S> for ValidatedDetails
where
    S: Send + Sync,
    ProjectCatalog: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(details): Json<TrainingDetails> = Json::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::warn!(error = %rejection.body_text(), "rejected training payload");
                TrainingError::Request(RequestError::InvalidBody {
                    message: rejection.body_text(),
                })
                .into_response()
            })?;

        let catalog = ProjectCatalog::from_ref(state);
        validate_details(&details, &catalog).map_err(|e: ValidationError| {
            tracing::warn!(fields = ?e.fields(), "training payload failed validation");
            TrainingError::Validation(e).into_response()
        })?;

        Ok(ValidatedDetails(details))
    }
}
