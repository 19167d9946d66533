//! HTTP server exposing the record store
//!
//! `ServerBuilder` wires a [`RecordService`](crate::core::RecordService) and
//! the project catalog into an axum router with health, record and option
//! routes, plus the OpenAPI document with Swagger UI at `/api-docs`.

pub mod builder;
pub mod handlers;
pub mod openapi;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use openapi::ApiDoc;
pub use router::{build_health_routes, build_training_routes};
