//! Spreadsheet workbook export.

use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

use crate::error::ExportError;
use crate::record::{Record, Target, flatten};

/// Export a slice of records as a single-sheet XLSX workbook.
///
/// Headers land in row 1 with a bold format, one data row per record
/// below. Labels come from each field's excel label, falling back to the
/// field identifier.
///
/// Returns the raw bytes of the xlsx file (can be written to disk or sent
/// as a download).
pub fn export_xlsx<T: Record>(items: &[T]) -> Result<Vec<u8>, ExportError> {
    let (headers, rows) = flatten(items, Target::Excel)?;
    if headers.is_empty() {
        return Err(ExportError::NoExportableFields);
    }
    debug!(columns = headers.len(), rows = rows.len(), "exporting workbook");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, header, &header_format)
            .map_err(|source| ExportError::CellWrite {
                cell: cell_ref(0, col),
                source,
            })?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let sheet_row = (row_idx + 1) as u32;
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(sheet_row, col_idx as u16, value)
                .map_err(|source| ExportError::CellWrite {
                    cell: cell_ref(sheet_row, col_idx),
                    source,
                })?;
        }
    }

    // Auto-fit columns for readability
    worksheet.autofit();

    Ok(workbook.save_to_buffer()?)
}

/// Spreadsheet letter name for a zero-based column index: `A`..`Z`, then
/// `AA`, `AB`, and so on.
fn column_letter(mut col: usize) -> String {
    let mut name = String::new();
    loop {
        name.insert(0, (b'A' + (col % 26) as u8) as char);
        col /= 26;
        if col == 0 {
            break;
        }
        col -= 1;
    }
    name
}

/// `A1`-style reference for a zero-based (row, column) pair.
fn cell_ref(row: u32, col: usize) -> String {
    format!("{}{}", column_letter(col), row + 1)
}
