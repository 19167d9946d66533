//! Shared test harness for record store backends
//!
//! Provides record fixtures and the `record_service_tests!` macro that checks
//! any `RecordService` against the store contract.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
mod record_service_tests;

use training::core::record::{
    TrainingDate, TrainingDetails, TrainingRecord, TrainingStatus, TrainingType,
};

/// Details with every field set, varied by `name` and `kind`
pub fn test_details(name: &str, kind: TrainingType) -> TrainingDetails {
    TrainingDetails {
        employee_id: format!("E-{}", name.to_lowercase()),
        employee_name: name.to_string(),
        course: format!("{} course", name),
        start_date: TrainingDate::parse("2024-01-01").unwrap(),
        end_date: TrainingDate::parse("2024-01-31").unwrap(),
        status: TrainingStatus::InProgress,
        trainer_name: "Bob".to_string(),
        training_type: kind,
        percent_completed: 42,
        project_name: "ABC".to_string(),
    }
}

/// Assert that a list contains exactly `n` records.
pub fn assert_count(list: &[TrainingRecord], expected: usize) {
    assert_eq!(
        list.len(),
        expected,
        "Expected {} records, got {}",
        expected,
        list.len()
    );
}

/// Assert that two records agree on every field, dates at day granularity.
pub fn assert_same_record(actual: &TrainingRecord, expected: &TrainingRecord) {
    assert_eq!(actual.id, expected.id);
    assert_eq!(actual.employee_id, expected.employee_id);
    assert_eq!(actual.employee_name, expected.employee_name);
    assert_eq!(actual.course, expected.course);
    assert_eq!(actual.start_date.date(), expected.start_date.date());
    assert_eq!(actual.end_date.date(), expected.end_date.date());
    assert_eq!(actual.status, expected.status);
    assert_eq!(actual.trainer_name, expected.trainer_name);
    assert_eq!(actual.training_type, expected.training_type);
    assert_eq!(actual.percent_completed, expected.percent_completed);
    assert_eq!(actual.project_name, expected.project_name);
}
