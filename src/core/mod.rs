//! Core module containing the record model, errors, filtering and the store contract

pub mod error;
pub mod field;
pub mod filter;
pub mod record;
pub mod service;
pub mod validation;

pub use error::{Result, TrainingError};
pub use field::{FieldValue, RecordField};
pub use filter::{FilterMode, FilterState, MatchKind, RecordFilter};
pub use record::{
    RECORD_FIELDS, TrainingDate, TrainingDetails, TrainingRecord, TrainingStatus, TrainingType,
};
pub use service::RecordService;
