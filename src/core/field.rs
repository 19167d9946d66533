//! Field names and field value types

use crate::core::error::ValidationError;
use crate::core::record::{TrainingDate, TrainingRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A polymorphic field value read off a record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Uuid(Uuid),
    Date(TrainingDate),
}

impl FieldValue {
    /// Get the value as a string if it is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Textual form used for substring matching
    ///
    /// Dates render as `YYYY-MM-DD`, integers in decimal.
    pub fn search_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Uuid(id) => id.to_string(),
            FieldValue::Date(date) => date.date_string(),
        }
    }
}

/// The user-editable (and filterable) fields of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
    EmployeeId,
    EmployeeName,
    Course,
    TrainerName,
    TrainingType,
    StartDate,
    EndDate,
    Status,
    PercentCompleted,
    ProjectName,
}

impl RecordField {
    pub const ALL: [RecordField; 10] = [
        RecordField::EmployeeId,
        RecordField::EmployeeName,
        RecordField::Course,
        RecordField::TrainerName,
        RecordField::TrainingType,
        RecordField::StartDate,
        RecordField::EndDate,
        RecordField::Status,
        RecordField::PercentCompleted,
        RecordField::ProjectName,
    ];

    /// Wire name of the field
    pub fn key(&self) -> &'static str {
        match self {
            RecordField::EmployeeId => "employeeId",
            RecordField::EmployeeName => "employeeName",
            RecordField::Course => "course",
            RecordField::TrainerName => "trainerName",
            RecordField::TrainingType => "trainingType",
            RecordField::StartDate => "startDate",
            RecordField::EndDate => "endDate",
            RecordField::Status => "status",
            RecordField::PercentCompleted => "percentCompleted",
            RecordField::ProjectName => "projectName",
        }
    }

    /// The text `record` exposes for this field
    pub fn text(&self, record: &TrainingRecord) -> String {
        record
            .field_value(self.key())
            .map(|value| value.search_text())
            .unwrap_or_default()
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RecordField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| ValidationError::UnknownField { key: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::TrainingType;
    use crate::core::record::fixtures::record;

    #[test]
    fn test_field_value_text() {
        let value = FieldValue::Text("Rust".to_string());
        assert_eq!(value.as_text(), Some("Rust"));
        assert_eq!(value.as_integer(), None);
    }

    #[test]
    fn test_search_text_uses_date_portion() {
        let date = TrainingDate::parse("2024-02-29T23:00:00Z").unwrap();
        assert_eq!(FieldValue::Date(date).search_text(), "2024-02-29");
        assert_eq!(FieldValue::Integer(75).search_text(), "75");
    }

    #[test]
    fn test_every_field_key_round_trips() {
        for field in RecordField::ALL {
            assert_eq!(field.key().parse::<RecordField>().unwrap(), field);
        }
        assert!("salary".parse::<RecordField>().is_err());
    }

    #[test]
    fn test_text_reads_record() {
        let record = record("Alice", TrainingType::Coursera);
        assert_eq!(RecordField::TrainingType.text(&record), "Coursera");
        assert_eq!(RecordField::StartDate.text(&record), "2024-01-01");
        assert_eq!(RecordField::PercentCompleted.text(&record), "0");
    }
}
