// Output formatting utilities

use crate::mapping::MappingWarning;
use crate::models::{ColumnMapping, Stage, Table};
use std::io::IsTerminal;

// ANSI escape codes for terminal formatting
const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";
const ANSI_FG_GREEN: &str = "\x1b[32m";
const ANSI_FG_YELLOW: &str = "\x1b[33m";
const ANSI_FG_BRIGHT_BLACK: &str = "\x1b[90m";

/// Narrowest a column is squeezed to when the terminal is tight
const MIN_COLUMN_WIDTH: usize = 6;
/// Widest a single column is allowed to grow
const MAX_COLUMN_WIDTH: usize = 40;

pub const HIERARCHY_SKIPPED: &str =
    "Cannot visualize hierarchy until all levels are mapped. Please check your column names.";
pub const SIMULATION_COMPLETE: &str = "Simulation complete! Check the output above.";

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width dynamically
///
/// Uses the `terminal_size` crate for reliable detection, with fallback to
/// COLUMNS environment variable and a sensible default.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
        if w > 0 {
            return w as usize;
        }
    }

    if let Ok(cols) = std::env::var("COLUMNS") {
        if let Ok(width) = cols.parse::<usize>() {
            if width > 0 && width < 10000 {
                return width;
            }
        }
    }

    120
}

/// ANSI styling, switched off entirely when output is not a terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styler {
    enabled: bool,
}

impl Styler {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("{}{}{}", code, text, ANSI_RESET)
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(ANSI_BOLD, text)
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(ANSI_FG_GREEN, text)
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(ANSI_FG_YELLOW, text)
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(ANSI_FG_BRIGHT_BLACK, text)
    }
}

/// Cut `text` to `width` chars, marking the cut with ".."
pub fn truncate_cell(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width <= 2 {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text.chars().take(width - 2).collect();
    cut.push_str("..");
    cut
}

/// Lay out `rows` under `headers` as an aligned, space-separated table.
///
/// Each column is as wide as its widest cell, capped so the table fits in
/// `max_width` where possible; long cells are truncated.
pub fn format_table(headers: &[&str], rows: &[Vec<&str>], max_width: usize) -> String {
    if headers.is_empty() {
        return String::new();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(widths.len()) {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let separators = headers.len() - 1;
    let share = (max_width.saturating_sub(separators) / headers.len()).max(MIN_COLUMN_WIDTH);
    let cap = share.min(MAX_COLUMN_WIDTH);
    for width in widths.iter_mut() {
        *width = (*width).min(cap);
    }

    let mut output = String::new();
    output.push_str(&render_line(headers.iter().copied(), &widths));
    output.push('\n');
    let separator: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    output.push_str(&separator.join(" "));
    output.push('\n');

    for row in rows {
        output.push_str(&render_line(row.iter().copied(), &widths));
        output.push('\n');
    }

    output
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let parts: Vec<String> = cells
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", truncate_cell(cell, *width), width = *width))
        .collect();
    parts.join(" ").trim_end().to_string()
}

/// The first `limit` rows of every column, shown right after loading
pub fn format_preview(table: &Table, limit: usize, max_width: usize) -> String {
    let headers: Vec<&str> = table.columns().iter().map(String::as_str).collect();
    let rows: Vec<Vec<&str>> = table
        .head(limit)
        .iter()
        .map(|row| row.iter().map(String::as_str).collect())
        .collect();
    format_table(&headers, &rows, max_width)
}

/// Stage -> column listing, one stage per line
pub fn format_mapping(mapping: &ColumnMapping, styler: &Styler) -> String {
    let label_width = Stage::ALL.iter().map(|s| s.label().len()).max().unwrap_or(0);
    let mut output = String::new();
    for (stage, column) in mapping.iter() {
        let target = match column {
            Some(column) => column.to_string(),
            None => styler.dim("(unmapped)"),
        };
        output.push_str(&format!("{:<width$}  -> {}\n", stage.label(), target, width = label_width));
    }
    output
}

/// Missing-stage warning plus any "did you mean" hints
pub fn format_mapping_warning(warning: &MappingWarning, styler: &Styler) -> String {
    let mut output = styler.warning(&format!("Warning: {}", warning.message()));
    for hint in warning.hint_lines() {
        output.push_str("\n  ");
        output.push_str(&hint);
    }
    output
}

/// Raw cell values of one row, one per stage in hierarchy order.
///
/// `None` if the mapping is incomplete or the row does not exist.
pub fn hierarchy_values<'a>(table: &'a Table, mapping: &ColumnMapping, row: usize) -> Option<Vec<(Stage, &'a str)>> {
    Stage::ALL
        .iter()
        .map(|stage| {
            let column = mapping.get(*stage)?;
            table.cell(row, column).map(|value| (*stage, value))
        })
        .collect()
}

/// "Generation: v -> Transmission: v -> ... -> Consumer: v" for one row
pub fn hierarchy_line(table: &Table, mapping: &ColumnMapping, row: usize) -> Option<String> {
    let values = hierarchy_values(table, mapping, row)?;
    let parts: Vec<String> = values
        .iter()
        .map(|(stage, value)| format!("{}: {}", stage.label(), value))
        .collect();
    Some(parts.join(" -> "))
}

/// Textual hierarchy for at most the first `limit` rows
pub fn summary_lines(table: &Table, mapping: &ColumnMapping, limit: usize) -> Vec<String> {
    (0..table.row_count().min(limit))
        .filter_map(|row| hierarchy_line(table, mapping, row))
        .collect()
}

/// What the hierarchy view shows for a table and mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HierarchyView {
    /// At least one stage is unmapped
    Skipped,
    Rendered { table: String, summary: Vec<String> },
}

impl HierarchyView {
    pub fn build(
        table: &Table,
        mapping: &ColumnMapping,
        table_rows: usize,
        summary_rows: usize,
        max_width: usize,
    ) -> Self {
        if !mapping.is_complete() {
            return HierarchyView::Skipped;
        }

        let headers = mapping.mapped_columns();
        let rows: Vec<Vec<&str>> = (0..table.row_count().min(table_rows))
            .filter_map(|row| hierarchy_values(table, mapping, row))
            .map(|values| values.into_iter().map(|(_, value)| value).collect())
            .collect();

        HierarchyView::Rendered {
            table: format_table(&headers, &rows, max_width),
            summary: summary_lines(table, mapping, summary_rows),
        }
    }

    pub fn render(&self, styler: &Styler) -> String {
        let mut output = styler.bold("Hierarchy Visualization");
        output.push('\n');
        match self {
            HierarchyView::Skipped => {
                output.push_str(HIERARCHY_SKIPPED);
                output.push('\n');
            }
            HierarchyView::Rendered { table, summary } => {
                output.push('\n');
                output.push_str(&styler.bold("Sample Hierarchy Table"));
                output.push('\n');
                output.push_str(table);
                output.push('\n');
                output.push_str(&styler.bold(&format!("Textual Hierarchy (first {} rows)", summary.len())));
                output.push('\n');
                for line in summary {
                    output.push_str("- ");
                    output.push_str(line);
                    output.push('\n');
                }
            }
        }
        output
    }
}
