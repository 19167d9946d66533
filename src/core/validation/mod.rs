//! Write validation for training records
//!
//! Enumerations are enforced by the types themselves (an unknown `status` or
//! `trainingType` never deserializes). Everything else the store guarantees is
//! checked here: required text fields, the percentage range, and membership of
//! `projectName` in the configured catalog.

pub mod extractor;

pub use extractor::ValidatedDetails;

use crate::config::ProjectCatalog;
use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::record::TrainingDetails;
use validator::Validate;

/// Validate a full record before it is written
///
/// Collects every violation instead of stopping at the first one.
pub fn validate_details(
    details: &TrainingDetails,
    catalog: &ProjectCatalog,
) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    if let Err(report) = details.validate() {
        for (field, field_errors) in report.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                errors.push(FieldValidationError::new(camel_case(&field), message));
            }
        }
    }

    if !details.project_name.is_empty() && !catalog.contains(&details.project_name) {
        errors.push(FieldValidationError::new(
            "projectName",
            format!(
                "'{}' is not one of {}",
                details.project_name,
                catalog.names().join(", ")
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        // validator reports fields in hash order
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        Err(ValidationError::FieldErrors(errors))
    }
}

/// `percent_completed` -> `percentCompleted`
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
