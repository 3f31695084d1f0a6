//! Typed configuration sections.
//!
//! These types are the only shape the rest of the crate (and any consumer)
//! sees. They are plain owned data, serializable so they can be:
//!
//! - handed to the downstream pipeline by reference or inside an `Arc`
//! - rendered back to YAML/JSON
//! - compared after a round-trip

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Where the raw census extract lives and where the processed splits go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetPaths {
    pub raw: String,
    pub train: String,
    pub valid: String,
    pub test: String,
}

impl DatasetPaths {
    /// Directory the processed splits are exported into (parent of `train`).
    ///
    /// Returns `None` when the train path has no parent component.
    pub fn processed_dir(&self) -> Option<&Path> {
        Path::new(&self.train)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

/// Train/valid/test fractions. Always sums to 1.0 once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitRatios {
    pub train: f64,
    pub valid: f64,
    pub test: f64,
}

impl SplitRatios {
    pub fn sum(&self) -> f64 {
        self.train + self.valid + self.test
    }

    /// Holdout fractions for a two-pass split.
    ///
    /// The first pass holds out `valid + test` of the data; the second pass
    /// splits that holdout, keeping `test / (valid + test)` of it for test.
    /// 0.6/0.2/0.2 gives `(0.4, 0.5)`.
    pub fn two_stage_holdout(&self) -> (f64, f64) {
        let holdout = self.valid + self.test;
        if holdout <= 0.0 {
            return (0.0, 0.0);
        }
        (holdout, self.test / holdout)
    }
}

/// A column excluded from modeling, with its optional audit note.
///
/// The note is documentation carried through round-trips; nothing reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedColumn {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RemovedColumn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            note: None,
        }
    }

    pub fn with_note(name: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            note: Some(note.into()),
        }
    }
}

/// Feature-column classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSpec {
    pub age_col: String,
    pub citizen_col: String,
    pub hour_col: String,
    pub gain_col: String,
    pub cost_col: String,
    pub binary_cols: Vec<String>,
    pub categorical_cols: Vec<String>,
    pub removed_cols: Vec<RemovedColumn>,
}

impl FeatureSpec {
    /// Columns taken from the raw data: hour, gain, cost, binary, categorical.
    ///
    /// Age and citizen only drive the eligibility screen and are not kept.
    pub fn required_columns(&self) -> Vec<&str> {
        let mut cols = vec![
            self.hour_col.as_str(),
            self.gain_col.as_str(),
            self.cost_col.as_str(),
        ];
        cols.extend(self.binary_cols.iter().map(String::as_str));
        cols.extend(self.categorical_cols.iter().map(String::as_str));
        cols
    }

    /// Columns the upstream eligibility filter reads: age, citizen, cost.
    pub fn screening_columns(&self) -> [&str; 3] {
        [
            self.age_col.as_str(),
            self.citizen_col.as_str(),
            self.cost_col.as_str(),
        ]
    }

    /// Columns that become model inputs after encoding (binary, then categorical).
    pub fn model_input_columns(&self) -> Vec<&str> {
        self.binary_cols
            .iter()
            .chain(self.categorical_cols.iter())
            .map(String::as_str)
            .collect()
    }

    pub fn removed_names(&self) -> impl Iterator<Item = &str> {
        self.removed_cols.iter().map(|c| c.name.as_str())
    }

    /// Every `(column, role, key)` assignment in declaration order.
    ///
    /// Duplicates are kept, so this is also what the exclusivity check walks.
    pub fn assignments(&self) -> Vec<(&str, Role, &'static str)> {
        let mut out = vec![
            (self.age_col.as_str(), Role::AgeScalar, "age_col"),
            (self.citizen_col.as_str(), Role::CitizenScalar, "citizen_col"),
            (self.hour_col.as_str(), Role::HourScalar, "hour_col"),
            (self.gain_col.as_str(), Role::GainCostScalar, "gain_col"),
            (self.cost_col.as_str(), Role::GainCostScalar, "cost_col"),
        ];
        out.extend(
            self.binary_cols
                .iter()
                .map(|c| (c.as_str(), Role::Binary, "binary_cols")),
        );
        out.extend(
            self.categorical_cols
                .iter()
                .map(|c| (c.as_str(), Role::Categorical, "categorical_cols")),
        );
        out.extend(self.removed_names().map(|c| (c, Role::Removed, "removed_cols")));
        out
    }
}

/// Model hyperparameters consumed by the training side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelHyperparams {
    pub max_epochs: u64,
    pub batch_size: u64,
    pub learning_rate: f64,
    pub input_dim: u64,
    pub hidden_dim: u64,
    pub weight_decay: f64,
}

/// Semantic role of a dataset column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    AgeScalar,
    CitizenScalar,
    HourScalar,
    GainCostScalar,
    Binary,
    Categorical,
    Removed,
    Unknown,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::AgeScalar => "age",
            Role::CitizenScalar => "citizen",
            Role::HourScalar => "hour",
            Role::GainCostScalar => "gain/cost",
            Role::Binary => "binary",
            Role::Categorical => "categorical",
            Role::Removed => "removed",
            Role::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// A loaded, validated configuration.
///
/// Construct it through `config::load` / `config::load_str`; there is no
/// way to mutate it afterwards. Share it with `Arc` across threads.
#[derive(Debug, Clone)]
pub struct Config {
    datasets: DatasetPaths,
    split: SplitRatios,
    features: FeatureSpec,
    model: ModelHyperparams,
    roles: HashMap<String, Role>,
}

impl Config {
    /// Assemble a config from sections that have already passed validation.
    pub(crate) fn from_validated(
        datasets: DatasetPaths,
        split: SplitRatios,
        features: FeatureSpec,
        model: ModelHyperparams,
    ) -> Self {
        let roles = features
            .assignments()
            .into_iter()
            .map(|(name, role, _)| (name.to_string(), role))
            .collect();
        Self {
            datasets,
            split,
            features,
            model,
            roles,
        }
    }

    pub fn dataset_paths(&self) -> &DatasetPaths {
        &self.datasets
    }

    pub fn split_ratios(&self) -> &SplitRatios {
        &self.split
    }

    pub fn feature_spec(&self) -> &FeatureSpec {
        &self.features
    }

    pub fn hyperparams(&self) -> &ModelHyperparams {
        &self.model
    }

    /// Role of `name`, or `Role::Unknown` if no list mentions it.
    ///
    /// Lookup is exact: column names are case-sensitive.
    pub fn column_role(&self, name: &str) -> Role {
        self.roles.get(name).copied().unwrap_or(Role::Unknown)
    }
}

impl PartialEq for Config {
    // `roles` is derived from `features`.
    fn eq(&self, other: &Self) -> bool {
        self.datasets == other.datasets
            && self.split == other.split
            && self.features == other.features
            && self.model == other.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> FeatureSpec {
        FeatureSpec {
            age_col: "dAge".to_string(),
            citizen_col: "iCitizen".to_string(),
            hour_col: "dHour89".to_string(),
            gain_col: "dRearning".to_string(),
            cost_col: "dTravtime".to_string(),
            binary_cols: vec!["iSex".to_string()],
            categorical_cols: vec!["iClass".to_string(), "dOccup".to_string()],
            removed_cols: vec![RemovedColumn::with_note("caseid", "row identifier")],
        }
    }

    #[test]
    fn two_stage_holdout_matches_sixty_twenty_twenty() {
        let split = SplitRatios {
            train: 0.6,
            valid: 0.2,
            test: 0.2,
        };
        let (first, second) = split.two_stage_holdout();
        assert!((first - 0.4).abs() < 1e-12);
        assert!((second - 0.5).abs() < 1e-12);
    }

    #[test]
    fn two_stage_holdout_without_holdout_is_zero() {
        let split = SplitRatios {
            train: 1.0,
            valid: 0.0,
            test: 0.0,
        };
        assert_eq!(split.two_stage_holdout(), (0.0, 0.0));
    }

    #[test]
    fn processed_dir_is_parent_of_train() {
        let paths = DatasetPaths {
            raw: "raw.csv".to_string(),
            train: "data/processed/train.csv".to_string(),
            valid: "data/processed/valid.csv".to_string(),
            test: "data/processed/test.csv".to_string(),
        };
        assert_eq!(paths.processed_dir(), Some(Path::new("data/processed")));

        let flat = DatasetPaths {
            train: "train.csv".to_string(),
            ..paths
        };
        assert_eq!(flat.processed_dir(), None);
    }

    #[test]
    fn required_columns_skip_screening_only_columns() {
        let spec = features();
        assert_eq!(
            spec.required_columns(),
            vec!["dHour89", "dRearning", "dTravtime", "iSex", "iClass", "dOccup"]
        );
        assert_eq!(spec.screening_columns(), ["dAge", "iCitizen", "dTravtime"]);
        assert_eq!(spec.model_input_columns(), vec!["iSex", "iClass", "dOccup"]);
    }

    #[test]
    fn column_role_resolves_every_list() {
        let config = Config::from_validated(
            DatasetPaths {
                raw: "r".to_string(),
                train: "t".to_string(),
                valid: "v".to_string(),
                test: "s".to_string(),
            },
            SplitRatios {
                train: 0.6,
                valid: 0.2,
                test: 0.2,
            },
            features(),
            ModelHyperparams {
                max_epochs: 1,
                batch_size: 1,
                learning_rate: 0.1,
                input_dim: 1,
                hidden_dim: 1,
                weight_decay: 0.0,
            },
        );

        assert_eq!(config.column_role("dAge"), Role::AgeScalar);
        assert_eq!(config.column_role("iCitizen"), Role::CitizenScalar);
        assert_eq!(config.column_role("dHour89"), Role::HourScalar);
        assert_eq!(config.column_role("dRearning"), Role::GainCostScalar);
        assert_eq!(config.column_role("dTravtime"), Role::GainCostScalar);
        assert_eq!(config.column_role("iSex"), Role::Binary);
        assert_eq!(config.column_role("dOccup"), Role::Categorical);
        assert_eq!(config.column_role("caseid"), Role::Removed);
        assert_eq!(config.column_role("DAGE"), Role::Unknown);
        assert_eq!(config.column_role(""), Role::Unknown);
    }
}
