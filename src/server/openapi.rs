//! OpenAPI document for the REST surface, served with Swagger UI at `/api-docs`

use super::handlers;
use crate::config::RecordOptions;
use crate::core::error::ErrorResponse;
use crate::core::record::{TrainingDetails, TrainingRecord, TrainingStatus, TrainingType};
use utoipa::OpenApi;

/// Path of the generated JSON document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Training Records API",
        description = "Store and query employee training records"
    ),
    paths(
        handlers::list_trainings,
        handlers::get_training,
        handlers::create_training,
        handlers::update_training,
        handlers::delete_training,
        handlers::get_options,
    ),
    components(schemas(
        TrainingRecord,
        TrainingDetails,
        TrainingStatus,
        TrainingType,
        RecordOptions,
        ErrorResponse
    )),
    tags(
        (name = "trainings", description = "Training record CRUD"),
        (name = "options", description = "Option lists shared with clients")
    )
)]
pub struct ApiDoc;
