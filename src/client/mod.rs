//! Client side of the record store
//!
//! [`TrainingClient`] keeps a full snapshot of the records, derives the
//! visible subset with the filter engine, runs the single create/edit slot and
//! exports the snapshot to a spreadsheet. It reaches the store through a
//! [`RecordTransport`].

pub mod app;
pub mod cache;
pub mod export;
pub mod session;
pub mod transport;

pub use app::TrainingClient;
pub use cache::RecordCache;
pub use export::{Cell, DEFAULT_EXPORT_FILE, EXPORT_SHEET, ExportTable, export_to_xlsx};
pub use session::{EditSession, PendingWrite, RecordForm};
pub use transport::{HttpTransport, RecordTransport};
