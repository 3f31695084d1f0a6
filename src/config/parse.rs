//! Loose YAML tree -> typed sections.
//!
//! This is the only place that looks at `serde_yaml::Value`. Every lookup
//! carries its dotted key path so errors name the exact field. Only shape is
//! checked here; value domains are checked in `validate`.

use std::collections::HashMap;

use serde_yaml::{Mapping, Value};

use super::error::{ConfigError, ErrorKind, Violation};
use crate::domain::{DatasetPaths, FeatureSpec, RemovedColumn, SplitRatios};
use crate::io::comments::normalize_note;

/// Hyperparameters as written, before range checks.
///
/// Integers are kept wide so negative and oversized values reach validation
/// instead of failing as shape errors.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawHyperparams {
    pub max_epochs: i128,
    pub batch_size: i128,
    pub learning_rate: f64,
    pub input_dim: i128,
    pub hidden_dim: i128,
    pub weight_decay: f64,
}

/// A structurally complete document that has not been validated yet.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawDocument {
    pub datasets: DatasetPaths,
    pub split: SplitRatios,
    pub features: FeatureSpec,
    pub model: RawHyperparams,
}

/// Parse `text` into its sections.
///
/// `notes` maps removed column names to the inline comments found next to
/// them in the source text.
pub(crate) fn parse_document(
    text: &str,
    notes: &HashMap<String, String>,
) -> Result<RawDocument, ConfigError> {
    let root: Value = serde_yaml::from_str(text).map_err(|e| {
        ConfigError::new(ErrorKind::MalformedDocument, format!("invalid YAML: {e}"))
    })?;

    let root = match &root {
        Value::Mapping(map) => map,
        Value::Null => {
            return Err(ConfigError::new(
                ErrorKind::MalformedDocument,
                "document is empty",
            ));
        }
        _ => {
            return Err(ConfigError::new(
                ErrorKind::MalformedDocument,
                "top level of the document must be a mapping",
            ));
        }
    };

    let datasets = as_map(required(root, "", "datasets")?, "datasets")?;
    let features = as_map(required(root, "", "features")?, "features")?;
    let model = as_map(required(root, "", "model")?, "model")?;

    Ok(RawDocument {
        datasets: parse_paths(datasets)?,
        split: parse_split(datasets)?,
        features: parse_features(features, notes)?,
        model: parse_model(model)?,
    })
}

fn parse_paths(datasets: &Mapping) -> Result<DatasetPaths, Violation> {
    let raw = as_string(required(datasets, "datasets", "raw")?, "datasets.raw")?;
    let processed = as_map(
        required(datasets, "datasets", "processed")?,
        "datasets.processed",
    )?;

    let split_path = |key: &str| -> Result<String, Violation> {
        let path = format!("datasets.processed.{key}");
        as_string(required(processed, "datasets.processed", key)?, &path)
    };

    Ok(DatasetPaths {
        raw,
        train: split_path("train")?,
        valid: split_path("valid")?,
        test: split_path("test")?,
    })
}

fn parse_split(datasets: &Mapping) -> Result<SplitRatios, Violation> {
    let split = as_map(
        required(datasets, "datasets", "data_split")?,
        "datasets.data_split",
    )?;

    let ratio = |key: &str| -> Result<f64, Violation> {
        let path = format!("datasets.data_split.{key}");
        as_f64(required(split, "datasets.data_split", key)?, &path)
    };

    Ok(SplitRatios {
        train: ratio("train")?,
        valid: ratio("valid")?,
        test: ratio("test")?,
    })
}

fn parse_features(
    features: &Mapping,
    notes: &HashMap<String, String>,
) -> Result<FeatureSpec, Violation> {
    let scalar = |key: &str| -> Result<String, Violation> {
        let path = format!("features.{key}");
        as_string(required(features, "features", key)?, &path)
    };
    let list = |key: &str| -> Result<Vec<String>, Violation> {
        let path = format!("features.{key}");
        as_string_list(required(features, "features", key)?, &path)
    };

    let removed_value = required(features, "features", "removed_cols")?;
    let removed_items = as_seq(removed_value, "features.removed_cols")?;
    let mut removed_cols = Vec::with_capacity(removed_items.len());
    for (i, item) in removed_items.iter().enumerate() {
        let path = format!("features.removed_cols[{i}]");
        let mut column = as_removed_column(item, &path)?;
        if column.note.is_none() {
            column.note = notes.get(&column.name).cloned();
        }
        removed_cols.push(column);
    }

    Ok(FeatureSpec {
        age_col: scalar("age_col")?,
        citizen_col: scalar("citizen_col")?,
        hour_col: scalar("hour_col")?,
        gain_col: scalar("gain_col")?,
        cost_col: scalar("cost_col")?,
        binary_cols: list("binary_cols")?,
        categorical_cols: list("categorical_cols")?,
        removed_cols,
    })
}

fn parse_model(model: &Mapping) -> Result<RawHyperparams, Violation> {
    let int = |key: &str| -> Result<i128, Violation> {
        let path = format!("model.{key}");
        as_int(required(model, "model", key)?, &path)
    };
    let float = |key: &str| -> Result<f64, Violation> {
        let path = format!("model.{key}");
        as_f64(required(model, "model", key)?, &path)
    };

    Ok(RawHyperparams {
        max_epochs: int("max_epochs")?,
        batch_size: int("batch_size")?,
        learning_rate: float("learning_rate")?,
        input_dim: int("input_dim")?,
        hidden_dim: int("hidden_dim")?,
        weight_decay: float("weight_decay")?,
    })
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Fetch `key`; an absent key or an explicit null counts as missing.
fn required<'a>(map: &'a Mapping, parent: &str, key: &str) -> Result<&'a Value, Violation> {
    match map.get(key) {
        Some(Value::Null) | None => Err(Violation::new(ErrorKind::MissingField, join(parent, key))),
        Some(value) => Ok(value),
    }
}

fn malformed(path: &str, expected: &str, value: &Value) -> Violation {
    Violation::new(
        ErrorKind::MalformedDocument,
        format!("`{path}` must be {expected}, found {}", describe(value)),
    )
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn as_map<'a>(value: &'a Value, path: &str) -> Result<&'a Mapping, Violation> {
    value
        .as_mapping()
        .ok_or_else(|| malformed(path, "a mapping", value))
}

fn as_seq<'a>(value: &'a Value, path: &str) -> Result<&'a [Value], Violation> {
    value
        .as_sequence()
        .map(Vec::as_slice)
        .ok_or_else(|| malformed(path, "a list", value))
}

fn as_string(value: &Value, path: &str) -> Result<String, Violation> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Err(Violation::new(ErrorKind::MissingField, path)),
        // `007` or `1.50` would lose their spelling; they must be quoted.
        Value::Number(_) => Err(malformed(path, "a string (quote numeric names)", value)),
        other => Err(malformed(path, "a string", other)),
    }
}

fn as_string_list(value: &Value, path: &str) -> Result<Vec<String>, Violation> {
    as_seq(value, path)?
        .iter()
        .enumerate()
        .map(|(i, item)| as_string(item, &format!("{path}[{i}]")))
        .collect()
}

/// A removed column is either a bare name or `{name, note}`.
fn as_removed_column(value: &Value, path: &str) -> Result<RemovedColumn, Violation> {
    let Value::Mapping(map) = value else {
        return as_string(value, path).map(RemovedColumn::new);
    };

    let name = as_string(required(map, path, "name")?, &format!("{path}.name"))?;
    let note = match map.get("note") {
        None | Some(Value::Null) => None,
        Some(v) => normalize_note(&as_string(v, &format!("{path}.note"))?),
    };
    Ok(RemovedColumn { name, note })
}

/// Numbers, or strings that read as numbers (`"1e-5"`).
fn as_f64(value: &Value, path: &str) -> Result<f64, Violation> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| malformed(path, "a number", value)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| malformed(path, "a number", value)),
        other => Err(malformed(path, "a number", other)),
    }
}

fn as_int(value: &Value, path: &str) -> Result<i128, Violation> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .ok_or_else(|| malformed(path, "an integer", value)),
        Value::String(s) => s
            .trim()
            .parse::<i128>()
            .map_err(|_| malformed(path, "an integer", value)),
        other => Err(malformed(path, "an integer", other)),
    }
}
