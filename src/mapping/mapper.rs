use crate::models::{ColumnMapping, Stage};
use crate::utils::fuzzy::{contains_ignore_case, find_near_matches};

/// Maximum edit distance for a column to be offered as a hint
const HINT_MAX_DISTANCE: usize = 3;

/// First column (in original order) whose name contains `key`, ignoring case
pub fn find_column<'a, S: AsRef<str>>(columns: &'a [S], key: &str) -> Option<&'a str> {
    columns
        .iter()
        .map(|column| column.as_ref())
        .find(|column| contains_ignore_case(column, key))
}

/// Map every stage to the first column whose name contains its key.
///
/// Each stage scans all columns independently, so a column claimed by one
/// stage can still be picked by another: "GenerationTransmission" maps to
/// both generation and transmission.
pub fn map_columns<S: AsRef<str>>(columns: &[S]) -> ColumnMapping {
    let mut mapping = ColumnMapping::new();
    for stage in Stage::ALL {
        let found = find_column(columns, stage.key());
        match found {
            Some(column) => log::debug!("Mapped {} -> '{}'", stage.key(), column),
            None => log::debug!("No column found for {}", stage.key()),
        }
        mapping.set(stage, found.map(str::to_string));
    }
    mapping
}

/// Stages left unmapped, with columns that nearly matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingWarning {
    pub missing: Vec<Stage>,
    pub hints: Vec<(Stage, Vec<String>)>,
}

impl MappingWarning {
    pub fn message(&self) -> String {
        let keys: Vec<&str> = self.missing.iter().map(|s| s.key()).collect();
        format!(
            "Could not find columns for: {}. Please ensure your file has columns named for each hierarchy level (e.g., 'Generation', 'Transmission', etc.).",
            keys.join(", ")
        )
    }

    /// One "did you mean" line per stage that has near matches
    pub fn hint_lines(&self) -> Vec<String> {
        self.hints
            .iter()
            .map(|(stage, columns)| {
                let quoted: Vec<String> = columns.iter().map(|c| format!("'{}'", c)).collect();
                format!("{}: did you mean {}?", stage.key(), quoted.join(" or "))
            })
            .collect()
    }
}

/// Warning for an incomplete mapping, or `None` when every stage is mapped
pub fn check_mapping(columns: &[String], mapping: &ColumnMapping) -> Option<MappingWarning> {
    let missing = mapping.missing();
    if missing.is_empty() {
        return None;
    }

    let hints = missing
        .iter()
        .filter_map(|stage| {
            let near: Vec<String> = find_near_matches(stage.key(), columns, HINT_MAX_DISTANCE)
                .into_iter()
                .map(|(name, _)| name)
                .collect();
            if near.is_empty() {
                None
            } else {
                Some((*stage, near))
            }
        })
        .collect();

    log::info!("{} of {} stages unmapped", missing.len(), Stage::ALL.len());
    Some(MappingWarning { missing, hints })
}
