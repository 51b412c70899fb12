use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{
    open_workbook_auto, open_workbook_auto_from_rs, Data, ExcelDateTime, Reader, Sheets,
};
use chrono::{Duration, NaiveTime};
use incremint_core::{QuoteError, Result};
use tracing::{debug, info};

use crate::tables::{Table, WorkbookTables, CLIENT_DETAILS, PREMIUMS};

/// Read every sheet of a workbook file (xlsx, xls, xlsb, ods).
pub fn load_workbook(path: &Path) -> Result<WorkbookTables> {
    let mut workbook = open_workbook_auto(path).map_err(QuoteError::malformed)?;
    let tables = read_all_sheets(&mut workbook)?;
    info!(
        path = %path.display(),
        sheets = tables.len(),
        "loaded workbook"
    );
    Ok(tables)
}

/// Read every sheet of an in-memory workbook (an upload or a download).
pub fn load_workbook_bytes(bytes: Vec<u8>) -> Result<WorkbookTables> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(QuoteError::malformed)?;
    read_all_sheets(&mut workbook)
}

/// Merge two separately supplied workbooks: the first sheet of `client_path`
/// becomes "Client Details" and the first sheet of `premium_path` becomes
/// "Premiums".
pub fn combine_workbooks(client_path: &Path, premium_path: &Path) -> Result<WorkbookTables> {
    let mut tables = WorkbookTables::new();
    for (path, name) in [(client_path, CLIENT_DETAILS), (premium_path, PREMIUMS)] {
        let mut workbook = open_workbook_auto(path).map_err(QuoteError::malformed)?;
        if let Some(table) = read_first_sheet(&mut workbook)? {
            debug!(path = %path.display(), sheet = name, rows = table.len(), "combined sheet");
            tables.insert(name, table);
        }
    }
    Ok(tables)
}

fn read_all_sheets<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> Result<WorkbookTables> {
    let mut tables = WorkbookTables::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(QuoteError::malformed)?;
        let table = Table::from_grid(range.rows().map(row_text).collect());
        debug!(sheet = %name, rows = table.len(), "read sheet");
        tables.insert(name, table);
    }
    Ok(tables)
}

fn read_first_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> Result<Option<Table>> {
    let Some(name) = workbook.sheet_names().into_iter().next() else {
        return Ok(None);
    };
    let range = workbook
        .worksheet_range(&name)
        .map_err(QuoteError::malformed)?;
    Ok(Some(Table::from_grid(range.rows().map(row_text).collect())))
}

fn row_text(row: &[Data]) -> Vec<String> {
    row.iter().map(cell_text).collect()
}

/// Render a cell the way it reads in the sheet. Never fails: unexpected
/// values fall back to their raw text.
pub(crate) fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => number_text(*n),
        Data::Int(n) => n.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::Error(e) => e.to_string(),
        Data::DateTime(dt) => datetime_text(dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Integers without decimals, everything else in shortest form.
fn number_text(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Dates as ISO text (time kept only when present), times of day as
/// `HH:MM:SS`, durations as elapsed `H:MM:SS`. Both date systems are handled
/// by calamine.
fn datetime_text(dt: &ExcelDateTime) -> String {
    let serial = dt.as_f64();
    if dt.is_duration() {
        return dt
            .as_duration()
            .map(duration_text)
            .unwrap_or_else(|| number_text(serial));
    }
    if serial < 0.0 {
        return number_text(serial);
    }

    // Less than one day: a time of day with no date part.
    let time_only = serial < 1.0;
    match dt.as_datetime() {
        Some(value) if time_only => value.time().format("%H:%M:%S").to_string(),
        Some(value) if value.time() == NaiveTime::MIN => value.format("%Y-%m-%d").to_string(),
        Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => number_text(serial),
    }
}

/// Elapsed time the way a `[h]:mm:ss` cell shows it.
fn duration_text(duration: Duration) -> String {
    let sign = if duration < Duration::zero() { "-" } else { "" };
    let secs = duration.num_seconds().abs();
    format!("{sign}{}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}
