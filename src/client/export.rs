//! Spreadsheet export of the full record set

use crate::core::error::Result;
use crate::core::field::FieldValue;
use crate::core::record::{RECORD_FIELDS, TrainingRecord};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// File name offered for exports
pub const DEFAULT_EXPORT_FILE: &str = "training_data.xlsx";

/// Name of the single worksheet
pub const EXPORT_SHEET: &str = "Trainings";

/// A spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl From<FieldValue> for Cell {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Integer(n) => Cell::Number(n as f64),
            FieldValue::Date(date) => Cell::Text(date.to_wire()),
            other => Cell::Text(other.search_text()),
        }
    }
}

/// One sheet worth of records: a header row plus one row per record
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub sheet_name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl ExportTable {
    /// Columns follow the natural key order of a record
    pub fn from_records(records: &[TrainingRecord]) -> Self {
        Self {
            sheet_name: EXPORT_SHEET.to_string(),
            headers: RECORD_FIELDS.iter().map(|h| h.to_string()).collect(),
            rows: records
                .iter()
                .map(|record| record.values().map(Cell::from).collect())
                .collect(),
        }
    }

    fn workbook(&self) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&self.sheet_name)?;

        for (col, title) in self.headers.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, title, &header)?;
        }
        for (row, cells) in self.rows.iter().enumerate() {
            let row = row as u32 + 1;
            for (col, cell) in cells.iter().enumerate() {
                match cell {
                    Cell::Text(text) => sheet.write_string(row, col as u16, text)?,
                    Cell::Number(n) => sheet.write_number(row, col as u16, *n)?,
                };
            }
        }
        Ok(workbook)
    }

    /// Serialize to xlsx bytes
    pub fn to_xlsx_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.workbook()?.save_to_buffer()?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.workbook()?.save(path.as_ref())?;
        Ok(())
    }
}

/// Write every record to an xlsx file at `path`
///
/// An empty slice still produces a valid workbook with the header row.
pub fn export_to_xlsx(records: &[TrainingRecord], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ExportTable::from_records(records).save(path)?;
    tracing::info!(rows = records.len(), path = %path.display(), "exported training records");
    Ok(())
}
