//! Reads written workbooks back for assertions
//!
//! ```rust,ignore
//! mod workbook_reader;
//! let sheet = workbook_reader::read(&path);
//! ```

#![allow(dead_code)]

use calamine::{Data, Reader, Xlsx, open_workbook};
use std::path::Path;

/// Contents of a saved workbook
pub struct SavedWorkbook {
    pub sheet_names: Vec<String>,
    /// Every row of the first sheet, header included
    pub rows: Vec<Vec<Data>>,
}

impl SavedWorkbook {
    /// Header row as text
    pub fn header(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.iter().map(text).collect())
            .unwrap_or_default()
    }

    /// Rows after the header
    pub fn data_rows(&self) -> &[Vec<Data>] {
        self.rows.get(1..).unwrap_or_default()
    }
}

pub fn read(path: &Path) -> SavedWorkbook {
    let mut workbook: Xlsx<_> = open_workbook(path).expect("Failed to open workbook");
    let sheet_names = workbook.sheet_names();
    let first = sheet_names.first().cloned().expect("workbook has no sheet");
    let range = workbook
        .worksheet_range(&first)
        .expect("Failed to read worksheet");

    SavedWorkbook {
        sheet_names,
        rows: range.rows().map(|row| row.to_vec()).collect(),
    }
}

/// Cell as text, numbers without a trailing `.0`
pub fn text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
