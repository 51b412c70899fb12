use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};

use crate::tables::WorkbookTables;

/// Write every table to its own named worksheet, header row in bold.
///
/// Cells that read back as the same number are written as numbers so the
/// workbook looks like one typed by hand; everything else is text. An empty
/// table produces an empty worksheet.
pub fn write_workbook(tables: &WorkbookTables) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for (sheet_name, table) in tables.iter() {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(sheet_name)
            .with_context(|| format!("Failed to set sheet name: {sheet_name}"))?;

        for (col, header) in table.columns().iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, header, &header_format)
                .with_context(|| format!("Failed to write header at column {col}"))?;
        }

        for (row_idx, row) in table.rows().enumerate() {
            let excel_row = (row_idx + 1) as u32;
            for (col_idx, cell) in row.values().iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                match cell.parse::<f64>() {
                    Ok(num) if is_plain_number(num, cell) => {
                        worksheet.write_number(excel_row, col_idx as u16, num)?;
                    }
                    _ => {
                        worksheet.write_string(excel_row, col_idx as u16, cell)?;
                    }
                }
            }
        }

        worksheet.autofit();
    }

    let bytes = workbook
        .save_to_buffer()
        .context("Failed to save workbook to buffer")?;

    Ok(bytes)
}

/// True when `cell` is exactly how `num` prints. Negative zero is kept as
/// text since Excel stores it as plain zero.
fn is_plain_number(num: f64, cell: &str) -> bool {
    num.is_finite() && !(num == 0.0 && num.is_sign_negative()) && num.to_string() == cell
}
