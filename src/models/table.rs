use std::collections::HashSet;

/// A sheet of text cells loaded from a spreadsheet.
///
/// Column names are unique and non-empty; every row has exactly one cell
/// per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from a raw header row and data rows.
    ///
    /// Headers are normalized (see `normalize_headers`). Short rows are
    /// padded with empty cells; cells past the last column are dropped.
    pub fn new(raw_columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let columns = normalize_headers(raw_columns);
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() > width {
                    log::warn!("Dropping {} cell(s) beyond the last column", row.len() - width);
                }
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// No data rows or no columns
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// The first `n` rows
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }
}

/// Give every header a usable, unique name.
///
/// Blank headers become `Unnamed: <index>`; repeated names get `.1`, `.2`
/// suffixes in order of appearance.
pub fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut columns = Vec::with_capacity(raw.len());

    for (idx, name) in raw.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            name
        };

        let mut candidate = base.clone();
        let mut suffix = 0;
        while used.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}.{}", base, suffix);
        }
        used.insert(candidate.clone());
        columns.push(candidate);
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_headers() {
        assert_eq!(
            normalize_headers(strings(&["A", "", "A", "  ", "A"])),
            strings(&["A", "Unnamed: 1", "A.1", "Unnamed: 3", "A.2"])
        );
        // An existing "A.1" pushes the duplicate on to "A.2"
        assert_eq!(
            normalize_headers(strings(&["A", "A.1", "A"])),
            strings(&["A", "A.1", "A.2"])
        );
    }

    #[test]
    fn test_rows_are_padded_and_trimmed() {
        let table = Table::new(
            strings(&["a", "b", "c"]),
            vec![strings(&["1"]), strings(&["1", "2", "3", "4"])],
        );
        assert_eq!(table.rows()[0], strings(&["1", "", ""]));
        assert_eq!(table.rows()[1], strings(&["1", "2", "3"]));
    }

    #[test]
    fn test_cell_lookup_and_head() {
        let table = Table::new(
            strings(&["x", "y"]),
            vec![strings(&["1", "2"]), strings(&["3", "4"]), strings(&["5", "6"])],
        );
        assert_eq!(table.cell(1, "y"), Some("4"));
        assert_eq!(table.cell(5, "y"), None);
        assert_eq!(table.cell(0, "z"), None);
        assert_eq!(table.head(2).len(), 2);
        assert_eq!(table.head(10).len(), 3);
    }

    #[test]
    fn test_is_empty() {
        assert!(Table::new(strings(&["a"]), vec![]).is_empty());
        assert!(Table::new(vec![], vec![vec![]]).is_empty());
        assert!(!Table::new(strings(&["a"]), vec![strings(&["1"])]).is_empty());
    }
}
