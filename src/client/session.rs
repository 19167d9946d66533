//! The single create/edit slot of the client
//!
//! At most one record template is open at a time. [`EditSession`] makes the
//! three states explicit; the template itself is a [`RecordForm`], which holds
//! dates as plain calendar days the way a date picker would.

use crate::core::error::{Result, SessionError, ValidationError};
use crate::core::field::RecordField;
use crate::core::record::{TrainingDate, TrainingDetails, TrainingRecord, TrainingStatus, TrainingType};
use chrono::NaiveDate;
use uuid::Uuid;

/// Editable copy of a record's user fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordForm {
    pub employee_id: String,
    pub employee_name: String,
    pub course: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: TrainingStatus,
    pub trainer_name: String,
    pub training_type: TrainingType,
    pub percent_completed: u8,
    pub project_name: String,
}

impl RecordForm {
    /// Template for a new record
    ///
    /// Text fields are empty, both dates are `today`, and the project is the
    /// given default.
    pub fn blank(project_name: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            employee_id: String::new(),
            employee_name: String::new(),
            course: String::new(),
            start_date: today,
            end_date: today,
            status: TrainingStatus::NotStarted,
            trainer_name: String::new(),
            training_type: TrainingType::Udemy,
            percent_completed: 0,
            project_name: project_name.into(),
        }
    }

    /// Template for editing `record`, dates truncated to the day
    pub fn from_record(record: &TrainingRecord) -> Self {
        Self {
            employee_id: record.employee_id.clone(),
            employee_name: record.employee_name.clone(),
            course: record.course.clone(),
            start_date: record.start_date.date(),
            end_date: record.end_date.date(),
            status: record.status,
            trainer_name: record.trainer_name.clone(),
            training_type: record.training_type,
            percent_completed: record.percent_completed,
            project_name: record.project_name.clone(),
        }
    }

    /// Set one field from user input
    ///
    /// `projectName` is trimmed. Enumerations, dates and the percentage are
    /// parsed and rejected when invalid, leaving the form unchanged.
    pub fn set_field(&mut self, field: RecordField, value: &str) -> Result<(), ValidationError> {
        match field {
            RecordField::EmployeeId => self.employee_id = value.to_string(),
            RecordField::EmployeeName => self.employee_name = value.to_string(),
            RecordField::Course => self.course = value.to_string(),
            RecordField::TrainerName => self.trainer_name = value.to_string(),
            RecordField::ProjectName => self.project_name = value.trim().to_string(),
            RecordField::TrainingType => self.training_type = value.parse()?,
            RecordField::Status => self.status = value.parse()?,
            RecordField::StartDate => self.start_date = parse_day(field, value)?,
            RecordField::EndDate => self.end_date = parse_day(field, value)?,
            RecordField::PercentCompleted => {
                self.percent_completed = value
                    .trim()
                    .parse::<u8>()
                    .ok()
                    .filter(|p| *p <= 100)
                    .ok_or_else(|| ValidationError::FieldError {
                        field: field.key().to_string(),
                        message: format!("'{}' is not a percentage between 0 and 100", value),
                    })?
            }
        }
        Ok(())
    }

    /// The only check made before a write: a non-blank trainer name
    pub fn check(&self) -> Result<(), ValidationError> {
        if self.trainer_name.trim().is_empty() {
            return Err(ValidationError::FieldError {
                field: RecordField::TrainerName.key().to_string(),
                message: "Trainer Name is required".to_string(),
            });
        }
        Ok(())
    }

    /// Write body for this form, dates at midnight UTC
    pub fn to_details(&self) -> TrainingDetails {
        TrainingDetails {
            employee_id: self.employee_id.clone(),
            employee_name: self.employee_name.clone(),
            course: self.course.clone(),
            start_date: TrainingDate::from_date(self.start_date),
            end_date: TrainingDate::from_date(self.end_date),
            status: self.status,
            trainer_name: self.trainer_name.clone(),
            training_type: self.training_type,
            percent_completed: self.percent_completed,
            project_name: self.project_name.clone(),
        }
    }
}

fn parse_day(field: RecordField, value: &str) -> Result<NaiveDate, ValidationError> {
    TrainingDate::parse(value)
        .map(|d| d.date())
        .ok_or_else(|| ValidationError::FieldError {
            field: field.key().to_string(),
            message: format!("'{}' is not a date (expected YYYY-MM-DD)", value),
        })
}

/// A validated write the session is ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingWrite {
    Create(TrainingDetails),
    Update { id: Uuid, details: TrainingDetails },
}

/// State of the create/edit slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Creating(RecordForm),
    Editing { id: Uuid, form: RecordForm },
}

impl EditSession {
    pub fn name(&self) -> &'static str {
        match self {
            EditSession::Idle => "idle",
            EditSession::Creating(_) => "creating",
            EditSession::Editing { .. } => "editing",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditSession::Idle)
    }

    pub fn form(&self) -> Option<&RecordForm> {
        match self {
            EditSession::Idle => None,
            EditSession::Creating(form) | EditSession::Editing { form, .. } => Some(form),
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut RecordForm> {
        match self {
            EditSession::Idle => None,
            EditSession::Creating(form) | EditSession::Editing { form, .. } => Some(form),
        }
    }

    /// Id of the record being edited
    pub fn editing_id(&self) -> Option<Uuid> {
        match self {
            EditSession::Editing { id, .. } => Some(*id),
            _ => None,
        }
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.is_idle() {
            Ok(())
        } else {
            Err(SessionError::Busy { state: self.name() })
        }
    }

    /// Idle → Creating
    pub fn begin_create(&mut self, form: RecordForm) -> Result<(), SessionError> {
        self.ensure_idle()?;
        *self = EditSession::Creating(form);
        Ok(())
    }

    /// Idle → Editing
    pub fn begin_edit(&mut self, record: &TrainingRecord) -> Result<(), SessionError> {
        self.ensure_idle()?;
        *self = EditSession::Editing {
            id: record.id,
            form: RecordForm::from_record(record),
        };
        Ok(())
    }

    /// Discard the template; a no-op when idle
    pub fn cancel(&mut self) {
        *self = EditSession::Idle;
    }

    /// Edit one field of the open template
    pub fn set_field(&mut self, field: RecordField, value: &str) -> Result<()> {
        let form = self.form_mut().ok_or(SessionError::NotActive)?;
        form.set_field(field, value)?;
        Ok(())
    }

    /// Check the template and describe the write it maps to
    ///
    /// Does not change the session.
    pub fn pending_write(&self) -> Result<PendingWrite> {
        match self {
            EditSession::Idle => Err(SessionError::NotActive.into()),
            EditSession::Creating(form) => {
                form.check()?;
                Ok(PendingWrite::Create(form.to_details()))
            }
            EditSession::Editing { id, form } => {
                form.check()?;
                Ok(PendingWrite::Update {
                    id: *id,
                    details: form.to_details(),
                })
            }
        }
    }
}
