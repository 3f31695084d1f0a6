//! Categorical cardinality tables.
//!
//! The number of levels per categorical column is only known to whoever has
//! looked at the data. It is supplied as a flat YAML (or JSON) mapping:
//!
//! ```yaml
//! iClass: 10
//! dOccup: 9
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config::{ConfigError, ErrorKind};

/// Levels per categorical column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardinalityTable {
    levels: BTreeMap<String, u64>,
}

impl CardinalityTable {
    pub fn get(&self, column: &str) -> Option<u64> {
        self.levels.get(column).copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Parse a table from YAML or JSON text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let levels: BTreeMap<String, u64> = serde_yaml::from_str(text).map_err(|e| {
            ConfigError::new(
                ErrorKind::MalformedDocument,
                format!("invalid cardinality table: {e}"),
            )
        })?;

        if let Some((column, _)) = levels.iter().find(|(_, n)| **n == 0) {
            return Err(ConfigError::new(
                ErrorKind::MalformedDocument,
                format!("cardinality of `{column}` must be at least 1"),
            ));
        }

        Ok(Self { levels })
    }
}

impl<'a> FromIterator<(&'a str, u64)> for CardinalityTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        Self {
            levels: iter
                .into_iter()
                .map(|(name, n)| (name.to_string(), n))
                .collect(),
        }
    }
}

/// Read a cardinality table from `path`.
pub fn read_cardinalities(path: &Path) -> Result<CardinalityTable, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| {
        ConfigError::new(
            ErrorKind::MalformedDocument,
            format!("failed to read cardinality table '{}': {e}", path.display()),
        )
    })?;
    CardinalityTable::parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_yaml_and_json() {
        let yaml = CardinalityTable::parse("iClass: 10\ndOccup: 9\n").unwrap();
        let json = CardinalityTable::parse(r#"{"iClass": 10, "dOccup": 9}"#).unwrap();
        assert_eq!(yaml, json);
        assert_eq!(yaml.get("iClass"), Some(10));
        assert_eq!(yaml.get("missing"), None);
        assert_eq!(yaml.len(), 2);
    }

    #[test]
    fn rejects_zero_and_negative_levels() {
        let err = CardinalityTable::parse("iClass: 0\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
        assert!(err.detail().contains("iClass"));

        assert!(CardinalityTable::parse("iClass: -2\n").is_err());
        assert!(CardinalityTable::parse("- not a map\n").is_err());
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_cardinalities(Path::new("/nonexistent/levels.yaml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
        assert!(err.detail().contains("/nonexistent/levels.yaml"));
    }
}
