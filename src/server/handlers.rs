//! HTTP handlers for training records

use crate::config::{ProjectCatalog, RecordOptions};
use crate::core::error::{ErrorResponse, RecordError, RequestError, Result};
use crate::core::filter::{FilterState, RecordFilter};
use crate::core::record::{TrainingDetails, TrainingRecord, TrainingStatus, TrainingType};
use crate::core::service::RecordService;
use crate::core::validation::ValidatedDetails;
use axum::{
    extract::{FromRef, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

/// Shared state of the record routes
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn RecordService>,
    pub catalog: ProjectCatalog,
}

impl AppState {
    pub fn new(records: Arc<dyn RecordService>, catalog: ProjectCatalog) -> Self {
        Self { records, catalog }
    }
}

impl FromRef<AppState> for ProjectCatalog {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}

fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| {
        RequestError::InvalidRecordId {
            id: id.to_string(),
        }
        .into()
    })
}

/// GET /api/trainings
///
/// Query parameters named after filter fields narrow the result with the
/// per-field filter, e.g. `?trainingType=Udemy&employeeName=ali`.
#[utoipa::path(
    get,
    path = "/api/trainings",
    tag = "trainings",
    params(
        ("employeeId" = Option<String>, Query, description = "Substring, case-insensitive"),
        ("employeeName" = Option<String>, Query, description = "Substring, case-insensitive"),
        ("course" = Option<String>, Query, description = "Substring, case-insensitive"),
        ("startDate" = Option<String>, Query, description = "Calendar day, YYYY-MM-DD"),
        ("endDate" = Option<String>, Query, description = "Calendar day, YYYY-MM-DD"),
        ("status" = Option<TrainingStatus>, Query, description = "Exact value"),
        ("trainerName" = Option<String>, Query, description = "Substring, case-insensitive"),
        ("trainingType" = Option<TrainingType>, Query, description = "Exact value"),
        ("percentCompleted" = Option<String>, Query, description = "Substring of the number"),
        ("projectName" = Option<String>, Query, description = "Exact value"),
    ),
    responses(
        (status = 200, description = "Records in store order", body = [TrainingRecord]),
        (status = 400, description = "Unknown filter parameter", body = ErrorResponse),
    )
)]
pub async fn list_trainings(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<TrainingRecord>>> {
    let records = state.records.list().await?;
    if params.is_empty() {
        return Ok(Json(records));
    }

    let filter = RecordFilter::per_field(FilterState::from_pairs(params)?);
    let visible = filter.apply(&records).into_iter().cloned().collect();
    Ok(Json(visible))
}

/// GET /api/trainings/{id}
#[utoipa::path(
    get,
    path = "/api/trainings/{id}",
    tag = "trainings",
    params(("id" = Uuid, Path, description = "Record id")),
    responses(
        (status = 200, description = "The record", body = TrainingRecord),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Unknown id", body = ErrorResponse),
    )
)]
pub async fn get_training(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TrainingRecord>> {
    let id = parse_id(&id)?;
    let record = state
        .records
        .get(&id)
        .await?
        .ok_or(RecordError::NotFound { id })?;
    Ok(Json(record))
}

/// POST /api/trainings
#[utoipa::path(
    post,
    path = "/api/trainings",
    tag = "trainings",
    request_body = TrainingDetails,
    responses(
        (status = 201, description = "Stored record with its new id", body = TrainingRecord),
        (status = 400, description = "Invalid body or field values", body = ErrorResponse),
    )
)]
pub async fn create_training(
    State(state): State<AppState>,
    ValidatedDetails(details): ValidatedDetails,
) -> Result<(StatusCode, Json<TrainingRecord>)> {
    let record = state.records.create(details).await?;
    tracing::info!(id = %record.id, employee = %record.employee_name, "training record created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/trainings/{id}
///
/// Full replace: every field comes from the body.
#[utoipa::path(
    put,
    path = "/api/trainings/{id}",
    tag = "trainings",
    params(("id" = Uuid, Path, description = "Record id")),
    request_body = TrainingDetails,
    responses(
        (status = 200, description = "Updated record", body = TrainingRecord),
        (status = 400, description = "Invalid id, body or field values", body = ErrorResponse),
        (status = 404, description = "Unknown id", body = ErrorResponse),
    )
)]
pub async fn update_training(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedDetails(details): ValidatedDetails,
) -> Result<Json<TrainingRecord>> {
    let id = parse_id(&id)?;
    let record = state.records.update(&id, details).await?;
    tracing::info!(id = %record.id, "training record updated");
    Ok(Json(record))
}

/// DELETE /api/trainings/{id}
///
/// Answers 204 whether or not the record existed.
#[utoipa::path(
    delete,
    path = "/api/trainings/{id}",
    tag = "trainings",
    params(("id" = Uuid, Path, description = "Record id")),
    responses(
        (status = 204, description = "Record removed, or it did not exist"),
        (status = 400, description = "Malformed id", body = ErrorResponse),
    )
)]
pub async fn delete_training(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    let removed = state.records.delete(&id).await?;
    if removed {
        tracing::info!(%id, "training record deleted");
    } else {
        tracing::debug!(%id, "delete of unknown training record");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/options
#[utoipa::path(
    get,
    path = "/api/options",
    tag = "options",
    responses((status = 200, description = "Allowed option lists", body = RecordOptions))
)]
pub async fn get_options(State(state): State<AppState>) -> Json<RecordOptions> {
    Json(state.catalog.options())
}

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME")
    }))
}
