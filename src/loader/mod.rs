// Spreadsheet loading: CSV files and Excel/OpenDocument workbooks

pub mod delimited;
pub mod workbook;

use crate::models::Table;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("unsupported file type '{extension}' (expected .csv, .xlsx, .xlsm, .xls, .xlsb or .ods)")]
    UnsupportedFormat { extension: String },
    #[error("{0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Workbook(#[from] calamine::Error),
    #[error("workbook contains no sheets")]
    NoSheets,
    #[error("sheet '{name}' not found (available: {available})")]
    SheetNotFound { name: String, available: String },
    #[error("The uploaded file is empty. Please check your file and try again.")]
    Empty,
}

/// Input formats recognised by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Workbook,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(SourceFormat::Workbook),
            _ => Err(LoadError::UnsupportedFormat { extension }),
        }
    }
}

/// Read `path` into a table.
///
/// `sheet` selects a worksheet by name; workbooks default to their first
/// sheet and CSV files ignore it. A file with a header row but no data rows
/// is reported as empty.
pub fn load_table(path: &Path, sheet: Option<&str>) -> Result<Table, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let table = match SourceFormat::from_path(path)? {
        SourceFormat::Csv => {
            if let Some(name) = sheet {
                log::warn!("Ignoring sheet '{}' for CSV input", name);
            }
            delimited::read_csv(path)?
        }
        SourceFormat::Workbook => workbook::read_workbook(path, sheet)?,
    };

    if table.is_empty() {
        return Err(LoadError::Empty);
    }

    log::info!(
        "Loaded {} row(s) x {} column(s) from {}",
        table.row_count(),
        table.columns().len(),
        path.display()
    );
    Ok(table)
}

/// True if every cell in `row` is blank
pub(crate) fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}
