//! CSV export and import.
//!
//! Files are UTF-8 with a byte-order mark so spreadsheet applications pick
//! the right encoding for Azerbaijani text. The header row is [`COLUMNS`],
//! produced by serializing [`StoreRecord`] field by field.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use umico_core::StoreRecord;
#[cfg(doc)]
use umico_core::COLUMNS;

use crate::error::ExportError;
use crate::SaveOutcome;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes `records` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be created or written and
/// [`ExportError::Csv`] if a record cannot be serialized.
pub fn write_csv(path: &Path, records: &[StoreRecord]) -> Result<SaveOutcome, ExportError> {
    if records.is_empty() {
        tracing::warn!(path = %path.display(), "no data to save; skipping CSV export");
        return Ok(SaveOutcome::Skipped);
    }

    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(file);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = records.len(), "data saved to CSV");
    Ok(SaveOutcome::Written {
        path: path.to_path_buf(),
        rows: records.len(),
    })
}

/// Reads records previously written by [`write_csv`].
///
/// A leading byte-order mark is optional.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be read and
/// [`ExportError::Csv`] if a row does not match the record layout.
pub fn read_csv(path: &Path) -> Result<Vec<StoreRecord>, ExportError> {
    let bytes = std::fs::read(path)?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

    let mut reader = csv::Reader::from_reader(body);
    let records = reader
        .deserialize::<StoreRecord>()
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(path = %path.display(), rows = records.len(), "loaded records from CSV");
    Ok(records)
}
