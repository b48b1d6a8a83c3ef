use crate::loader::{is_blank_row, LoadError};
use crate::models::Table;
use csv::{ReaderBuilder, Trim};
use std::path::Path;

/// Read a comma-separated file whose first record is the header row
pub fn read_csv(path: &Path) -> Result<Table, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let row: Vec<String> = record?.iter().map(str::to_string).collect();
        if is_blank_row(&row) {
            continue;
        }
        rows.push(row);
    }

    log::debug!("Read {} CSV record(s) from {}", rows.len(), path.display());
    Ok(Table::new(headers, rows))
}
