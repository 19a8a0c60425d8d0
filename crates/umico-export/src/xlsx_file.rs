//! Excel export.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use umico_core::{StoreRecord, COLUMNS};

use crate::error::ExportError;
use crate::SaveOutcome;

const SHEET_NAME: &str = "Stores";
const MAX_COLUMN_WIDTH: u16 = 50;

/// Writes `records` to a single-sheet workbook at `path`, replacing any
/// existing file.
///
/// Numeric columns are written as numbers and `active` as a boolean so the
/// sheet sorts and filters correctly. Column widths fit the longest value,
/// capped at 50 characters.
///
/// # Errors
///
/// Returns [`ExportError::Xlsx`] if the workbook cannot be built or saved.
pub fn write_xlsx(path: &Path, records: &[StoreRecord]) -> Result<SaveOutcome, ExportError> {
    if records.is_empty() {
        tracing::warn!(path = %path.display(), "no data to save; skipping Excel export");
        return Ok(SaveOutcome::Skipped);
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header = Format::new().set_bold();
    for (col, name) in (0u16..).zip(COLUMNS) {
        worksheet.write_string_with_format(0, col, name, &header)?;
    }

    for (row, record) in (1u32..).zip(records) {
        write_row(worksheet, row, record)?;
    }

    for (col, width) in (0u16..).zip(column_widths(records)) {
        worksheet.set_column_width(col, f64::from(width))?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    workbook.save(path)?;

    tracing::info!(path = %path.display(), rows = records.len(), "data saved to Excel");
    Ok(SaveOutcome::Written {
        path: path.to_path_buf(),
        rows: records.len(),
    })
}

/// One typed spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    Bool(bool),
    Blank,
}

impl<'a> Cell<'a> {
    fn text(value: &'a str) -> Self {
        if value.is_empty() {
            Self::Blank
        } else {
            Self::Text(value)
        }
    }

    fn number(value: Option<f64>) -> Self {
        value.map_or(Self::Blank, Self::Number)
    }
}

/// Cells of `record` in [`COLUMNS`] order.
#[allow(clippy::cast_precision_loss)]
fn typed_cells(record: &StoreRecord) -> [Cell<'_>; COLUMNS.len()] {
    [
        Cell::text(&record.store_name),
        Cell::text(&record.phone_numbers),
        Cell::text(&record.website),
        Cell::number(record.cashback_percentage),
        Cell::number(record.rating),
        Cell::number(record.rating_count.map(|n| n as f64)),
        Cell::text(&record.categories),
        Cell::text(&record.main_category),
        Cell::Bool(record.active),
        Cell::text(&record.instagram),
        Cell::text(&record.facebook),
        Cell::text(&record.notes),
        Cell::text(&record.city),
        Cell::text(&record.district),
        Cell::text(&record.street),
        Cell::text(&record.house),
        Cell::text(&record.address_notes),
        Cell::text(&record.coordinates),
        Cell::text(&record.operating_hours),
        Cell::Number(f64::from(record.total_locations)),
    ]
}

fn write_row(worksheet: &mut Worksheet, row: u32, record: &StoreRecord) -> Result<(), XlsxError> {
    for (col, cell) in (0u16..).zip(typed_cells(record)) {
        match cell {
            Cell::Text(value) => {
                worksheet.write_string(row, col, value)?;
            }
            Cell::Number(value) => {
                worksheet.write_number(row, col, value)?;
            }
            Cell::Bool(value) => {
                worksheet.write_boolean(row, col, value)?;
            }
            Cell::Blank => {}
        }
    }
    Ok(())
}

/// Display width per column: the longest of the header and every rendered
/// value, plus two characters of padding, capped at [`MAX_COLUMN_WIDTH`].
fn column_widths(records: &[StoreRecord]) -> [u16; COLUMNS.len()] {
    let mut widths = COLUMNS.map(char_width);
    for record in records {
        for (width, value) in widths.iter_mut().zip(record.cells()) {
            *width = (*width).max(char_width(&value));
        }
    }
    widths.map(|w| w.saturating_add(2).min(MAX_COLUMN_WIDTH))
}

fn char_width(value: &str) -> u16 {
    u16::try_from(value.chars().count()).unwrap_or(u16::MAX)
}
