//! Semantic validation.
//!
//! Checks:
//! - every path and column name is non-empty
//! - split ratios lie in [0, 1] and sum to 1
//! - each column holds exactly one role
//! - hyperparameters are in range
//!
//! All checks run; every violation is reported together.

use std::collections::HashMap;

use super::error::{ConfigError, ErrorKind, Violation};
use super::parse::{RawDocument, RawHyperparams};
use crate::domain::{Config, DatasetPaths, FeatureSpec, ModelHyperparams, Role, SplitRatios};
use crate::io::CardinalityTable;

/// Allowed distance between the ratio sum and 1.0.
pub const RATIO_TOLERANCE: f64 = 1e-6;

/// Validate a parsed document and freeze it into a `Config`.
pub(crate) fn validate(raw: RawDocument) -> Result<Config, ConfigError> {
    let mut violations = Vec::new();

    check_paths(&raw.datasets, &mut violations);
    check_split(&raw.split, &mut violations);
    check_column_names(&raw.features, &mut violations);
    check_roles(&raw.features, &mut violations);
    let model = check_hyperparams(&raw.model, &mut violations);

    if let Some(err) = ConfigError::from_violations(violations) {
        return Err(err);
    }

    Ok(Config::from_validated(
        raw.datasets,
        raw.split,
        raw.features,
        model,
    ))
}

fn check_paths(paths: &DatasetPaths, violations: &mut Vec<Violation>) {
    let entries = [
        ("datasets.raw", &paths.raw),
        ("datasets.processed.train", &paths.train),
        ("datasets.processed.valid", &paths.valid),
        ("datasets.processed.test", &paths.test),
    ];
    for (key, value) in entries {
        if value.trim().is_empty() {
            violations.push(Violation::new(
                ErrorKind::MissingField,
                format!("{key} is empty"),
            ));
        }
    }
}

fn check_split(split: &SplitRatios, violations: &mut Vec<Violation>) {
    let entries = [
        ("train", split.train),
        ("valid", split.valid),
        ("test", split.test),
    ];

    let mut in_range = true;
    for (key, value) in entries {
        if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
            in_range = false;
            violations.push(Violation::new(
                ErrorKind::InvalidRatio,
                format!("datasets.data_split.{key} must be in [0, 1], got {value}"),
            ));
        }
    }

    // An out-of-range ratio already explains a bad sum.
    if in_range && (split.sum() - 1.0).abs() > RATIO_TOLERANCE {
        violations.push(Violation::new(
            ErrorKind::InvalidRatio,
            format!(
                "datasets.data_split must sum to 1.0, got {} ({} + {} + {})",
                split.sum(),
                split.train,
                split.valid,
                split.test
            ),
        ));
    }
}

fn check_column_names(features: &FeatureSpec, violations: &mut Vec<Violation>) {
    let scalars = [
        ("age_col", &features.age_col),
        ("citizen_col", &features.citizen_col),
        ("hour_col", &features.hour_col),
        ("gain_col", &features.gain_col),
        ("cost_col", &features.cost_col),
    ];
    for (key, name) in scalars {
        if name.trim().is_empty() {
            violations.push(Violation::new(
                ErrorKind::MissingField,
                format!("features.{key} is empty"),
            ));
        }
    }

    let lists = [
        ("binary_cols", features.binary_cols.iter().map(String::as_str).collect::<Vec<_>>()),
        ("categorical_cols", features.categorical_cols.iter().map(String::as_str).collect()),
        ("removed_cols", features.removed_names().collect()),
    ];
    for (key, names) in lists {
        for (i, name) in names.iter().enumerate() {
            if name.trim().is_empty() {
                violations.push(Violation::new(
                    ErrorKind::MissingField,
                    format!("features.{key}[{i}] is empty"),
                ));
            }
        }
    }
}

fn check_roles(features: &FeatureSpec, violations: &mut Vec<Violation>) {
    let mut seen: HashMap<&str, (&'static str, Role)> = HashMap::new();

    for (name, role, key) in features.assignments() {
        if name.trim().is_empty() {
            continue;
        }
        let prior = seen.get(name).copied();
        match prior {
            None => {
                seen.insert(name, (key, role));
            }
            Some((first_key, _)) if first_key == key => {
                violations.push(Violation::new(
                    ErrorKind::DuplicateColumnRole,
                    format!("column `{name}` is listed more than once under {key}"),
                ));
            }
            Some((first_key, first_role)) => {
                violations.push(Violation::new(
                    ErrorKind::DuplicateColumnRole,
                    format!(
                        "column `{name}` is listed under both {first_key} ({first_role}) and {key} ({role})"
                    ),
                ));
            }
        }
    }
}

fn check_hyperparams(raw: &RawHyperparams, violations: &mut Vec<Violation>) -> ModelHyperparams {
    ModelHyperparams {
        max_epochs: positive_int("max_epochs", raw.max_epochs, violations),
        batch_size: positive_int("batch_size", raw.batch_size, violations),
        learning_rate: positive_float("learning_rate", raw.learning_rate, violations),
        input_dim: positive_int("input_dim", raw.input_dim, violations),
        hidden_dim: positive_int("hidden_dim", raw.hidden_dim, violations),
        weight_decay: non_negative_float("weight_decay", raw.weight_decay, violations),
    }
}

fn positive_int(key: &str, value: i128, violations: &mut Vec<Violation>) -> u64 {
    match u64::try_from(value) {
        Ok(v) if v > 0 => v,
        _ => {
            violations.push(Violation::new(
                ErrorKind::OutOfRangeHyperparameter,
                format!("model.{key} must be a positive integer, got {value}"),
            ));
            0
        }
    }
}

fn positive_float(key: &str, value: f64, violations: &mut Vec<Violation>) -> f64 {
    if !(value.is_finite() && value > 0.0) {
        violations.push(Violation::new(
            ErrorKind::OutOfRangeHyperparameter,
            format!("model.{key} must be a positive finite number, got {value}"),
        ));
    }
    value
}

fn non_negative_float(key: &str, value: f64, violations: &mut Vec<Violation>) -> f64 {
    if !(value.is_finite() && value >= 0.0) {
        violations.push(Violation::new(
            ErrorKind::OutOfRangeHyperparameter,
            format!("model.{key} must be a non-negative finite number, got {value}"),
        ));
    }
    value
}

/// Width of the encoded model input, given each categorical column's cardinality.
///
/// Binary columns contribute one dimension each; a categorical column
/// contributes one dimension per level.
pub fn encoded_width(features: &FeatureSpec, table: &CardinalityTable) -> Result<u64, ConfigError> {
    let mut violations = Vec::new();
    let mut width = features.binary_cols.len() as u64;

    for name in &features.categorical_cols {
        match table.get(name) {
            Some(levels) => match width.checked_add(levels) {
                Some(sum) => width = sum,
                None => {
                    return Err(ConfigError::new(
                        ErrorKind::OutOfRangeHyperparameter,
                        format!("encoded width overflows at categorical column `{name}` ({levels} levels)"),
                    ));
                }
            },
            None => violations.push(Violation::new(
                ErrorKind::MissingField,
                format!("no cardinality known for categorical column `{name}`"),
            )),
        }
    }

    match ConfigError::from_violations(violations) {
        Some(err) => Err(err),
        None => Ok(width),
    }
}

/// Cross-check `model.input_dim` against the encoded feature width.
///
/// Returns the width on success.
pub fn check_input_dim(config: &Config, table: &CardinalityTable) -> Result<u64, ConfigError> {
    let features = config.feature_spec();
    let width = encoded_width(features, table)?;
    let declared = config.hyperparams().input_dim;

    if width != declared {
        return Err(ConfigError::new(
            ErrorKind::OutOfRangeHyperparameter,
            format!(
                "model.input_dim is {declared} but the encoded width is {width} \
                 ({} binary + {} categorical levels)",
                features.binary_cols.len(),
                width - features.binary_cols.len() as u64
            ),
        ));
    }
    Ok(width)
}
