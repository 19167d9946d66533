//! Training record data model
//!
//! A record that has not been stored yet is a [`TrainingDetails`]; once the
//! store assigns an id it becomes a [`TrainingRecord`]. Writes always carry a
//! full `TrainingDetails` (full replace, never a patch).

use crate::core::error::{Result, ValidationError};
use crate::core::field::FieldValue;
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Record field names in natural key order
///
/// This is the serialization order of [`TrainingRecord`] and the column order
/// of spreadsheet exports.
pub const RECORD_FIELDS: [&str; 11] = [
    "id",
    "employeeId",
    "employeeName",
    "course",
    "startDate",
    "endDate",
    "status",
    "trainerName",
    "trainingType",
    "percentCompleted",
    "projectName",
];

/// Completion status of a training
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum TrainingStatus {
    Completed,
    #[serde(rename = "In Progress")]
    InProgress,
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
}

impl TrainingStatus {
    pub const ALL: [TrainingStatus; 3] = [
        TrainingStatus::Completed,
        TrainingStatus::InProgress,
        TrainingStatus::NotStarted,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingStatus::Completed => "Completed",
            TrainingStatus::InProgress => "In Progress",
            TrainingStatus::NotStarted => "Not Started",
        }
    }
}

impl fmt::Display for TrainingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrainingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| unknown_option("status", s, &Self::ALL.map(|v| v.as_str())))
    }
}

/// Delivery channel of a training
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum TrainingType {
    #[default]
    Udemy,
    Coursera,
    Classroom,
    Virtual,
}

impl TrainingType {
    pub const ALL: [TrainingType; 4] = [
        TrainingType::Udemy,
        TrainingType::Coursera,
        TrainingType::Classroom,
        TrainingType::Virtual,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingType::Udemy => "Udemy",
            TrainingType::Coursera => "Coursera",
            TrainingType::Classroom => "Classroom",
            TrainingType::Virtual => "Virtual",
        }
    }
}

impl fmt::Display for TrainingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrainingType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| unknown_option("trainingType", s, &Self::ALL.map(|v| v.as_str())))
    }
}

fn unknown_option(field: &str, value: &str, allowed: &[&str]) -> ValidationError {
    ValidationError::FieldError {
        field: field.to_string(),
        message: format!("'{}' is not one of {}", value, allowed.join(", ")),
    }
}

/// A calendar date carried as a UTC date-time
///
/// Only the date component is meaningful. Accepts `YYYY-MM-DD` or any RFC 3339
/// date-time on input and always serializes as an RFC 3339 UTC timestamp with
/// millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrainingDate(DateTime<Utc>);

impl TrainingDate {
    /// Midnight UTC of the given day
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN).and_utc())
    }

    /// Today's date (UTC)
    pub fn today() -> Self {
        Self::from_date(Utc::now().date_naive())
    }

    /// Parse a date-only or RFC 3339 string
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return Some(Self::from_date(date));
        }
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|at| Self(at.with_timezone(&Utc)))
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// The meaningful date component
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// `YYYY-MM-DD`
    pub fn date_string(&self) -> String {
        self.date().format("%Y-%m-%d").to_string()
    }

    /// Wire form, e.g. `2024-01-01T00:00:00.000Z`
    pub fn to_wire(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl fmt::Display for TrainingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl From<NaiveDate> for TrainingDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl Serialize for TrainingDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for TrainingDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        TrainingDate::parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid date '{}', expected YYYY-MM-DD or an RFC 3339 date-time",
                raw
            ))
        })
    }
}

/// Every field of a training record except its id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrainingDetails {
    #[serde(default, alias = "empId")]
    #[schema(example = "E-1042")]
    pub employee_id: String,

    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "Alice Smith")]
    pub employee_name: String,

    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "Rust for Backend Developers")]
    pub course: String,

    #[schema(value_type = String, format = DateTime, example = "2024-01-01T00:00:00.000Z")]
    pub start_date: TrainingDate,

    #[schema(value_type = String, format = DateTime, example = "2024-01-31T00:00:00.000Z")]
    pub end_date: TrainingDate,

    pub status: TrainingStatus,

    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "Bob")]
    pub trainer_name: String,

    pub training_type: TrainingType,

    #[serde(default)]
    #[validate(range(max = 100, message = "must be between 0 and 100"))]
    #[schema(minimum = 0, maximum = 100, example = 40)]
    pub percent_completed: u8,

    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "ABC")]
    pub project_name: String,
}

impl TrainingDetails {
    /// Look up a field by its wire name
    pub fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "employeeId" => FieldValue::Text(self.employee_id.clone()),
            "employeeName" => FieldValue::Text(self.employee_name.clone()),
            "course" => FieldValue::Text(self.course.clone()),
            "startDate" => FieldValue::Date(self.start_date),
            "endDate" => FieldValue::Date(self.end_date),
            "status" => FieldValue::Text(self.status.as_str().to_string()),
            "trainerName" => FieldValue::Text(self.trainer_name.clone()),
            "trainingType" => FieldValue::Text(self.training_type.as_str().to_string()),
            "percentCompleted" => FieldValue::Integer(i64::from(self.percent_completed)),
            "projectName" => FieldValue::Text(self.project_name.clone()),
            _ => return None,
        };
        Some(value)
    }
}

/// A stored training record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TrainingRecord {
    /// Assigned by the store on creation, immutable afterwards
    #[serde(alias = "_id")]
    pub id: Uuid,

    #[serde(flatten)]
    pub details: TrainingDetails,
}

impl TrainingRecord {
    pub fn new(id: Uuid, details: TrainingDetails) -> Self {
        Self { id, details }
    }

    /// Look up a field by its wire name, including `id`
    pub fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Uuid(self.id)),
            _ => self.details.field_value(field),
        }
    }

    /// Field values in natural key order
    pub fn values(&self) -> impl Iterator<Item = FieldValue> + '_ {
        RECORD_FIELDS
            .iter()
            .filter_map(move |field| self.field_value(field))
    }
}

impl Deref for TrainingRecord {
    type Target = TrainingDetails;

    fn deref(&self) -> &Self::Target {
        &self.details
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn details(employee: &str, kind: TrainingType) -> TrainingDetails {
        TrainingDetails {
            employee_id: format!("E-{}", employee.len()),
            employee_name: employee.to_string(),
            course: "Rust".to_string(),
            start_date: TrainingDate::parse("2024-01-01").unwrap(),
            end_date: TrainingDate::parse("2024-01-31").unwrap(),
            status: TrainingStatus::NotStarted,
            trainer_name: "Bob".to_string(),
            training_type: kind,
            percent_completed: 0,
            project_name: "ABC".to_string(),
        }
    }

    pub fn record(employee: &str, kind: TrainingType) -> TrainingRecord {
        TrainingRecord::new(Uuid::new_v4(), details(employee, kind))
    }
}
