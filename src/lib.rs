//! # Training Records
//!
//! Keeps per-employee training records and serves them over a small REST API,
//! together with the client core that browses, filters, edits and exports them.
//!
//! ## Features
//!
//! - **Record Store**: `RecordService` trait with in-memory and MongoDB backends
//! - **REST Server**: axum router with validation against a shared project catalog
//! - **Client Cache**: full snapshot of the store, replaced on every fetch
//! - **Filter Engine**: per-field (AND) and free-text (OR) filtering
//! - **Edit Session**: a single create/edit slot that never loses unsaved input
//! - **Export**: the full record set as an xlsx workbook
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use training::prelude::*;
//!
//! // Server
//! ServerBuilder::new()
//!     .with_record_service(InMemoryRecordService::new())
//!     .serve("0.0.0.0:5000")
//!     .await?;
//!
//! // Client
//! let mut client = TrainingClient::from_config(&ClientConfig::new("http://localhost:5000"))?;
//! client.connect().await?;
//! client.set_filter(RecordField::TrainingType, "Udemy");
//! for record in client.visible_records() {
//!     println!("{} - {}", record.employee_name, record.course);
//! }
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        FieldValue, FilterMode, FilterState, MatchKind, RECORD_FIELDS, RecordField, RecordFilter,
        RecordService, Result, TrainingDate, TrainingDetails, TrainingError, TrainingRecord,
        TrainingStatus, TrainingType,
    };

    // === Config ===
    pub use crate::config::{
        AppConfig, ClientConfig, ConfigDrift, ProjectCatalog, RecordOptions, StorageConfig,
    };

    // === Storage ===
    pub use crate::storage::InMemoryRecordService;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoRecordService;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === Client ===
    pub use crate::client::{
        DEFAULT_EXPORT_FILE, EditSession, ExportTable, HttpTransport, RecordCache, RecordForm,
        RecordTransport, TrainingClient, export_to_xlsx,
    };

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use uuid::Uuid;
}
