use crate::loader::{is_blank_row, LoadError};
use crate::models::Table;
use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader};
use std::path::Path;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Read one worksheet of an Excel or OpenDocument workbook.
///
/// The first row of the sheet is the header row, even when it is blank
/// (every column is then `Unnamed: <i>`). Blank data rows are skipped.
pub fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<Table, LoadError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names();

    let name = match sheet {
        Some(requested) => {
            if !sheet_names.iter().any(|n| n == requested) {
                return Err(LoadError::SheetNotFound {
                    name: requested.to_string(),
                    available: sheet_names.join(", "),
                });
            }
            requested.to_string()
        }
        None => sheet_names.first().cloned().ok_or(LoadError::NoSheets)?,
    };

    let range = workbook.worksheet_range(&name)?;
    log::debug!("Reading sheet '{}' ({:?} used cells)", name, range.get_size());

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());

    // The used range starts at the first non-empty cell, so a blank first
    // row of the sheet is not part of it
    let headers = match range.start() {
        Some((first_row, _)) if first_row > 0 => vec![String::new(); range.width()],
        _ => match rows.next() {
            Some(headers) => headers,
            None => return Ok(Table::default()),
        },
    };

    let data = rows.filter(|row| !is_blank_row(row)).collect();
    Ok(Table::new(headers, data))
}

/// Render a cell the way it reads in the sheet; whole floats drop ".0"
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::DateTime(dt) => datetime_text(dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Dates as `YYYY-MM-DD HH:MM:SS`; bare times and durations as `H:MM:SS`
fn datetime_text(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        if let Some(duration) = dt.as_duration() {
            return duration_text(duration);
        }
    } else if let Some(datetime) = dt.as_datetime() {
        let format = if dt.as_f64() < 1.0 { TIME_FORMAT } else { DATETIME_FORMAT };
        return datetime.format(format).to_string();
    }
    dt.as_f64().to_string()
}

fn duration_text(duration: chrono::Duration) -> String {
    let secs = duration.num_seconds();
    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
