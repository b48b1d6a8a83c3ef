use crate::models::Stage;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Which column (if any) holds each stage of the hierarchy.
///
/// Always carries exactly the five stage keys. The same column may appear
/// under more than one stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: [Option<String>; 5],
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, stage: Stage, column: Option<String>) {
        self.columns[stage.index()] = column;
    }

    pub fn get(&self, stage: Stage) -> Option<&str> {
        self.columns[stage.index()].as_deref()
    }

    /// Entries in hierarchy order
    pub fn iter(&self) -> impl Iterator<Item = (Stage, Option<&str>)> + '_ {
        Stage::ALL.iter().map(move |stage| (*stage, self.get(*stage)))
    }

    /// Stages with no matching column, in hierarchy order
    pub fn missing(&self) -> Vec<Stage> {
        self.iter()
            .filter(|(_, column)| column.is_none())
            .map(|(stage, _)| stage)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.columns.iter().all(Option::is_some)
    }

    /// Mapped column names in hierarchy order (repeats kept)
    pub fn mapped_columns(&self) -> Vec<&str> {
        self.iter().filter_map(|(_, column)| column).collect()
    }
}

impl Serialize for ColumnMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Stage::ALL.len()))?;
        for (stage, column) in self.iter() {
            map.serialize_entry(stage.key(), &column)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_mapping_is_all_missing() {
        let mapping = ColumnMapping::new();
        assert_eq!(mapping.missing(), Stage::ALL.to_vec());
        assert!(!mapping.is_complete());
        assert!(mapping.mapped_columns().is_empty());
    }

    #[test]
    fn test_serializes_every_stage_key() {
        let mut mapping = ColumnMapping::new();
        mapping.set(Stage::Substation, Some("Substation ID".to_string()));
        let json = serde_json::to_value(&mapping).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        assert_eq!(obj["substation"], "Substation ID");
        assert!(obj["generation"].is_null());
        assert!(obj["consumer"].is_null());
    }

    #[test]
    fn test_mapped_columns_keep_repeats() {
        let mut mapping = ColumnMapping::new();
        mapping.set(Stage::Generation, Some("GenTrans".to_string()));
        mapping.set(Stage::Transmission, Some("GenTrans".to_string()));
        assert_eq!(mapping.mapped_columns(), vec!["GenTrans", "GenTrans"]);
        assert_eq!(mapping.missing().len(), 3);
    }
}
