//! Flat-file persistence for scraped store records.
//!
//! Both writers overwrite their target. With no records they log a warning
//! and leave the filesystem untouched.

pub mod csv_file;
pub mod error;
pub mod xlsx_file;

pub use csv_file::{read_csv, write_csv};
pub use error::ExportError;
pub use xlsx_file::write_xlsx;

use std::path::PathBuf;

/// What a writer did with its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Written { path: PathBuf, rows: usize },
    /// Nothing to save; no file was created or touched.
    Skipped,
}
