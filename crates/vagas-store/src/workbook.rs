//! `.xlsx` reading and writing.
//!
//! Reading goes through `calamine`, writing through `rust_xlsxwriter`. Both
//! work on the first worksheet only.

use crate::error::{Result, StoreError};
use crate::sheet::Sheet;
use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use vagas_core::PAGE_COLUMN;

/// Largest float that still converts to an integer code without loss.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Longest text a single cell can hold, in UTF-16 code units.
const MAX_CELL_LEN: usize = 32_767;

/// Render a cell as text.
///
/// Integral floats lose their fractional part so that codes stored as
/// numbers compare equal to the scraped text.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT => {
            (*f as i64).to_string()
        }
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Read the first worksheet of the workbook at `path`.
///
/// The first row is taken as the header. A sheet with no rows at all yields
/// an empty [`Sheet`].
pub fn read_sheet(path: &Path) -> Result<Sheet> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| StoreError::EmptyWorkbook {
            path: path.display().to_string(),
        })??;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Sheet::default());
    };

    let columns: Vec<String> = header.iter().map(cell_text).collect();
    let rows: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let sheet = Sheet::from_raw(columns, rows);
    tracing::debug!(
        "Read {} rows x {} columns from {}",
        sheet.len(),
        sheet.columns().len(),
        path.display()
    );
    Ok(sheet)
}

/// Write `sheet` as the only worksheet of a new workbook at `path`.
///
/// The header row is bold. Cells of the page column are written as numbers
/// when they parse as one; empty cells are left blank. Text longer than a
/// cell can hold is cut to fit.
pub fn write_sheet(path: &Path, sheet_name: &str, sheet: &Sheet) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    let header = Format::new().set_bold();
    let page_idx = sheet.column_index(PAGE_COLUMN);

    for (col, name) in sheet.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col_num(col)?, clip_to_cell(name), &header)?;
    }

    for (idx, row) in sheet.rows().iter().enumerate() {
        let row_num = u32::try_from(idx + 1)
            .map_err(|_| StoreError::TooLarge(format!("{} rows", sheet.len())))?;

        for (col, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            let col_idx = col_num(col)?;
            match value.parse::<f64>() {
                Ok(number) if Some(col) == page_idx => {
                    worksheet.write_number(row_num, col_idx, number)?;
                }
                _ => {
                    let text = clip_to_cell(value);
                    if text.len() < value.len() {
                        tracing::warn!(
                            "Cell ({}, {}) cut to {} of {} bytes",
                            row_num,
                            col_idx,
                            text.len(),
                            value.len()
                        );
                    }
                    worksheet.write_string(row_num, col_idx, text)?;
                }
            }
        }
    }

    worksheet.autofit();
    workbook.save(path)?;

    tracing::debug!("Wrote {} rows to {}", sheet.len(), path.display());
    Ok(())
}

/// Longest prefix of `value` that fits in one cell.
fn clip_to_cell(value: &str) -> &str {
    let mut units = 0;
    for (idx, ch) in value.char_indices() {
        units += ch.len_utf16();
        if units > MAX_CELL_LEN {
            return &value[..idx];
        }
    }
    value
}

fn col_num(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| StoreError::TooLarge(format!("{} columns", col + 1)))
}
