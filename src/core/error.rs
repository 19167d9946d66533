//! Typed error handling for training records
//!
//! Every fallible operation in the crate, on the server and on the client,
//! returns a [`TrainingError`]. Callers can match on the category instead of
//! inspecting strings, and the server turns any error into a JSON body with a
//! stable error code.
//!
//! # Error Categories
//!
//! - [`RecordError`]: record lookups that found nothing
//! - [`ValidationError`]: rejected input (client gate or server constraints)
//! - [`ConfigError`]: configuration parsing and validation
//! - [`StorageError`]: storage backend failures
//! - [`RequestError`]: malformed HTTP requests
//! - [`TransportError`]: client-side HTTP failures talking to the record store
//! - [`SessionError`]: illegal edit-session transitions
//! - [`ExportError`]: spreadsheet export failures
//!
//! # Example
//!
//! ```rust,ignore
//! match client.submit().await {
//!     Ok(saved) => println!("saved {}", saved.id),
//!     Err(TrainingError::Validation(e)) => println!("fix the form: {}", e),
//!     Err(TrainingError::Transport(e)) => println!("store unavailable: {}", e),
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Crate-wide result alias
pub type Result<T, E = TrainingError> = std::result::Result<T, E>;

/// The main error type for training records
#[derive(Debug, Error)]
pub enum TrainingError {
    /// Record-related errors
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// HTTP/Request errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Client transport errors
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Edit session errors
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Spreadsheet export errors
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Error response structure for HTTP responses
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

impl TrainingError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            TrainingError::Record(e) => e.status_code(),
            TrainingError::Validation(_) => StatusCode::BAD_REQUEST,
            TrainingError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TrainingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TrainingError::Request(e) => e.status_code(),
            TrainingError::Transport(e) => e.status_code(),
            TrainingError::Session(e) => e.status_code(),
            TrainingError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            TrainingError::Record(e) => e.error_code(),
            TrainingError::Validation(_) => "VALIDATION_ERROR",
            TrainingError::Config(_) => "CONFIG_ERROR",
            TrainingError::Storage(_) => "STORAGE_ERROR",
            TrainingError::Request(e) => e.error_code(),
            TrainingError::Transport(e) => e.error_code(),
            TrainingError::Session(e) => e.error_code(),
            TrainingError::Export(_) => "EXPORT_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            TrainingError::Record(RecordError::NotFound { id }) => {
                Some(serde_json::json!({ "id": id.to_string() }))
            }
            TrainingError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            TrainingError::Validation(ValidationError::FieldError { field, message }) => {
                Some(serde_json::json!({
                    "fields": [FieldValidationError::new(field, message)]
                }))
            }
            _ => None,
        }
    }

    /// True when the error was raised locally before any network call
    pub fn is_validation(&self) -> bool {
        matches!(self, TrainingError::Validation(_))
    }
}

impl IntoResponse for TrainingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Record Errors
// =============================================================================

/// Errors related to record lookups
#[derive(Debug, Error)]
pub enum RecordError {
    /// Record was not found
    #[error("training record with id '{id}' not found")]
    NotFound { id: Uuid },
}

impl RecordError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecordError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RecordError::NotFound { .. } => "RECORD_NOT_FOUND",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Invalid JSON format
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// Key that does not name an editable record field
    #[error("Unknown record field: {key}")]
    UnknownField { key: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// Field names involved in this error, in reporting order
    pub fn fields(&self) -> Vec<&str> {
        match self {
            ValidationError::FieldError { field, .. } => vec![field.as_str()],
            ValidationError::FieldErrors(errors) => {
                errors.iter().map(|e| e.field.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{f}'")).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection error
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// Query execution error
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// Data integrity error
    #[error("Data integrity error: {message}")]
    IntegrityError { message: String },
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// Invalid record ID format
    #[error("Invalid record ID: {id}")]
    InvalidRecordId { id: String },

    /// Invalid request body
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidRecordId { .. } => StatusCode::BAD_REQUEST,
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidRecordId { .. } => "INVALID_RECORD_ID",
            RequestError::InvalidBody { .. } => "INVALID_BODY",
        }
    }
}

// =============================================================================
// Transport Errors
// =============================================================================

/// Errors raised by the client while talking to the record store
#[derive(Debug, Error)]
pub enum TransportError {
    /// The store could not be reached
    #[error("record store unreachable at {url}: {message}")]
    Unreachable { url: String, message: String },

    /// The request did not complete in time
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// The store answered with a non-success status
    #[error("record store returned {status}: {message}")]
    Status {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The response body could not be decoded
    #[error("failed to decode record store response: {message}")]
    Decode { message: String },
}

impl TransportError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TransportError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            TransportError::Status { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            TransportError::Unreachable { .. } => "STORE_UNREACHABLE",
            TransportError::Timeout { .. } => "STORE_TIMEOUT",
            TransportError::Status { .. } => "STORE_REJECTED",
            TransportError::Decode { .. } => "STORE_BAD_RESPONSE",
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        if err.is_timeout() {
            TransportError::Timeout { url }
        } else if err.is_decode() {
            TransportError::Decode {
                message: err.to_string(),
            }
        } else {
            TransportError::Unreachable {
                url,
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for TrainingError {
    fn from(err: reqwest::Error) -> Self {
        TrainingError::Transport(err.into())
    }
}

// =============================================================================
// Session Errors
// =============================================================================

/// Illegal transitions of the edit session
#[derive(Debug, Error)]
pub enum SessionError {
    /// A create or edit session is already open
    #[error("an edit session is already open ({state}); cancel or submit it first")]
    Busy { state: &'static str },

    /// Submit or cancel without an open session
    #[error("no edit session is open")]
    NotActive,

    /// The record to edit is not in the cached snapshot
    #[error("record '{id}' is not in the current snapshot")]
    RecordNotCached { id: Uuid },
}

impl SessionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SessionError::Busy { .. } => StatusCode::CONFLICT,
            SessionError::NotActive => StatusCode::BAD_REQUEST,
            SessionError::RecordNotCached { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::Busy { .. } => "SESSION_BUSY",
            SessionError::NotActive => "SESSION_NOT_ACTIVE",
            SessionError::RecordNotCached { .. } => "RECORD_NOT_CACHED",
        }
    }
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors raised while writing a spreadsheet
#[derive(Debug, Error)]
pub enum ExportError {
    /// The workbook could not be built or saved
    #[error("failed to write spreadsheet: {message}")]
    Write { message: String },
}

impl From<rust_xlsxwriter::XlsxError> for TrainingError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        TrainingError::Export(ExportError::Write {
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for TrainingError {
    fn from(err: serde_json::Error) -> Self {
        TrainingError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for TrainingError {
    fn from(err: std::io::Error) -> Self {
        TrainingError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for TrainingError {
    fn from(err: serde_yaml::Error) -> Self {
        TrainingError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<uuid::Error> for TrainingError {
    fn from(err: uuid::Error) -> Self {
        TrainingError::Request(RequestError::InvalidRecordId {
            id: err.to_string(),
        })
    }
}
