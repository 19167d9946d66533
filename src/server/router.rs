//! Router builder for the record routes

use super::handlers::{
    AppState, create_training, delete_training, get_options, get_training, health_check,
    list_trainings, update_training,
};
use super::openapi::{ApiDoc, OPENAPI_JSON_PATH};
use axum::{Router, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Build the REST routes
///
/// - GET    /api/trainings        - List (optionally filtered) records
/// - POST   /api/trainings        - Create a record
/// - GET    /api/trainings/{id}   - Get one record
/// - PUT    /api/trainings/{id}   - Replace a record
/// - DELETE /api/trainings/{id}   - Delete a record
/// - GET    /api/options          - Allowed option lists
/// - GET    /api-docs             - Swagger UI over the OpenAPI document
pub fn build_training_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/trainings", get(list_trainings).post(create_training))
        .route(
            "/api/trainings/{id}",
            get(get_training)
                .put(update_training)
                .delete(delete_training),
        )
        .route("/api/options", get(get_options))
        .with_state(state)
        .merge(SwaggerUi::new("/api-docs").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}

/// Build health check routes
pub fn build_health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}
