//! Filter engine for the record table
//!
//! Derives the visible subset of a record set from a [`RecordFilter`]. The
//! engine is pure: it never mutates its inputs, performs no I/O and keeps the
//! input order. Results are not cached; callers recompute whenever the records
//! or the filter change.
//!
//! Two modes exist:
//!
//! - [`FilterMode::PerField`] (default): one value per field, AND across the
//!   non-empty ones, with a predicate chosen by the field's [`MatchKind`].
//! - [`FilterMode::FreeText`]: one query, case-insensitive substring, OR across
//!   every filterable field.

use crate::core::error::Result;
use crate::core::field::RecordField;
use crate::core::record::TrainingRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a field's filter value is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Case-insensitive substring containment
    Text,
    /// Exact, case-sensitive equality with the enum's wire string
    Exact,
    /// Exact match of `YYYY-MM-DD` against the date portion
    Date,
    /// Substring containment against the decimal text of the number
    NumericText,
}

impl MatchKind {
    /// The predicate form used for `field`
    pub fn of(field: RecordField) -> Self {
        match field {
            RecordField::EmployeeId
            | RecordField::EmployeeName
            | RecordField::Course
            | RecordField::TrainerName => MatchKind::Text,
            RecordField::TrainingType | RecordField::Status | RecordField::ProjectName => {
                MatchKind::Exact
            }
            RecordField::StartDate | RecordField::EndDate => MatchKind::Date,
            RecordField::PercentCompleted => MatchKind::NumericText,
        }
    }
}

/// Does `record` satisfy `value` for `field`
///
/// An empty value imposes no constraint.
pub fn field_matches(field: RecordField, record: &TrainingRecord, value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    match MatchKind::of(field) {
        MatchKind::Text => contains_ignore_case(&field.text(record), value),
        MatchKind::Exact | MatchKind::Date => field.text(record) == value,
        MatchKind::NumericText => field.text(record).contains(value),
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Per-field filter values
///
/// Absent and empty entries both mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    values: BTreeMap<RecordField, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from key/value pairs such as a query string
    ///
    /// Keys must be record field wire names.
    pub fn from_pairs<K, V, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut state = Self::new();
        for (key, value) in pairs {
            let field: RecordField = key.as_ref().parse()?;
            state.set(field, value);
        }
        Ok(state)
    }

    /// Builder-style `set`
    pub fn with(mut self, field: RecordField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
    }

    pub fn get(&self, field: RecordField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn clear(&mut self, field: RecordField) {
        self.values.remove(&field);
    }

    pub fn clear_all(&mut self) {
        self.values.clear();
    }

    /// True when no field constrains the result
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// AND of every non-empty field predicate
    pub fn matches(&self, record: &TrainingRecord) -> bool {
        self.values
            .iter()
            .all(|(field, value)| field_matches(*field, record, value))
    }
}

/// Which predicate form the engine evaluates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    PerField,
    FreeText,
}

/// Complete filter input: mode plus the state for each mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub mode: FilterMode,
    pub fields: FilterState,
    pub query: String,
}

impl RecordFilter {
    pub fn per_field(fields: FilterState) -> Self {
        Self {
            mode: FilterMode::PerField,
            fields,
            query: String::new(),
        }
    }

    pub fn free_text(query: impl Into<String>) -> Self {
        Self {
            mode: FilterMode::FreeText,
            fields: FilterState::default(),
            query: query.into(),
        }
    }

    /// Is `record` part of the visible set
    pub fn matches(&self, record: &TrainingRecord) -> bool {
        match self.mode {
            FilterMode::PerField => self.fields.matches(record),
            FilterMode::FreeText => {
                self.query.is_empty()
                    || RecordField::ALL
                        .iter()
                        .any(|field| contains_ignore_case(&field.text(record), &self.query))
            }
        }
    }

    /// Visible records in input order
    pub fn apply<'a>(&self, records: &'a [TrainingRecord]) -> Vec<&'a TrainingRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}
