//! Render a `Config` back to a document.
//!
//! The YAML output is canonical (fixed key order, block lists) and keeps
//! removed-column notes as trailing comments, so loading it again yields an
//! identical `Config`.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::domain::{Config, DatasetPaths, FeatureSpec, ModelHyperparams, SplitRatios};
use crate::error::AppError;
use crate::io::comments::normalize_note;

/// Canonical YAML rendering of `config`.
pub fn to_yaml(config: &Config) -> String {
    let paths = config.dataset_paths();
    let split = config.split_ratios();
    let features = config.feature_spec();
    let model = config.hyperparams();

    let mut out = String::new();

    out.push_str("datasets:\n");
    out.push_str(&format!("  raw: {}\n", scalar(&paths.raw)));
    out.push_str("  processed:\n");
    out.push_str(&format!("    train: {}\n", scalar(&paths.train)));
    out.push_str(&format!("    valid: {}\n", scalar(&paths.valid)));
    out.push_str(&format!("    test: {}\n", scalar(&paths.test)));
    out.push_str("  data_split:\n");
    out.push_str(&format!("    train: {}\n", float(split.train)));
    out.push_str(&format!("    valid: {}\n", float(split.valid)));
    out.push_str(&format!("    test: {}\n", float(split.test)));

    out.push_str("\nfeatures:\n");
    out.push_str(&format!("  age_col: {}\n", scalar(&features.age_col)));
    out.push_str(&format!("  citizen_col: {}\n", scalar(&features.citizen_col)));
    out.push_str(&format!("  hour_col: {}\n", scalar(&features.hour_col)));
    out.push_str(&format!("  gain_col: {}\n", scalar(&features.gain_col)));
    out.push_str(&format!("  cost_col: {}\n", scalar(&features.cost_col)));
    push_list(&mut out, "binary_cols", &features.binary_cols);
    push_list(&mut out, "categorical_cols", &features.categorical_cols);
    if features.removed_cols.is_empty() {
        out.push_str("  removed_cols: []\n");
    } else {
        out.push_str("  removed_cols:\n");
        for col in &features.removed_cols {
            match col.note.as_deref().and_then(normalize_note) {
                Some(note) => out.push_str(&format!("    - {}  # {note}\n", scalar(&col.name))),
                None => out.push_str(&format!("    - {}\n", scalar(&col.name))),
            }
        }
    }

    out.push_str("\nmodel:\n");
    out.push_str(&format!("  max_epochs: {}\n", model.max_epochs));
    out.push_str(&format!("  batch_size: {}\n", model.batch_size));
    out.push_str(&format!("  learning_rate: {}\n", float(model.learning_rate)));
    out.push_str(&format!("  input_dim: {}\n", model.input_dim));
    out.push_str(&format!("  hidden_dim: {}\n", model.hidden_dim));
    out.push_str(&format!("  weight_decay: {}\n", float(model.weight_decay)));

    out
}

/// Document layout of a `Config`, for serializers.
#[derive(Serialize)]
struct DocumentView<'a> {
    datasets: DatasetsView<'a>,
    features: &'a FeatureSpec,
    model: &'a ModelHyperparams,
}

#[derive(Serialize)]
struct DatasetsView<'a> {
    raw: &'a str,
    processed: ProcessedView<'a>,
    data_split: &'a SplitRatios,
}

#[derive(Serialize)]
struct ProcessedView<'a> {
    train: &'a str,
    valid: &'a str,
    test: &'a str,
}

impl<'a> DocumentView<'a> {
    fn new(config: &'a Config) -> Self {
        let DatasetPaths {
            raw,
            train,
            valid,
            test,
        } = config.dataset_paths();
        Self {
            datasets: DatasetsView {
                raw,
                processed: ProcessedView { train, valid, test },
                data_split: config.split_ratios(),
            },
            features: config.feature_spec(),
            model: config.hyperparams(),
        }
    }
}

/// Pretty JSON rendering of `config` in document layout.
///
/// Removed-column notes become `{name, note}` entries; JSON is valid YAML,
/// so the output loads back with `config::load_str`.
pub fn to_json(config: &Config) -> Result<String, AppError> {
    serde_json::to_string_pretty(&DocumentView::new(config))
        .map_err(|e| AppError::new(2, format!("Failed to render config as JSON: {e}")))
}

/// Write the canonical YAML rendering to `path`.
pub fn write_yaml(path: &Path, config: &Config) -> Result<(), AppError> {
    fs::write(path, to_yaml(config))
        .map_err(|e| AppError::new(2, format!("Failed to write config '{}': {e}", path.display())))
}

fn push_list(out: &mut String, key: &str, items: &[String]) {
    if items.is_empty() {
        out.push_str(&format!("  {key}: []\n"));
        return;
    }
    out.push_str(&format!("  {key}:\n"));
    for item in items {
        out.push_str(&format!("    - {}\n", scalar(item)));
    }
}

/// Shortest representation that parses back to the same `f64`.
fn float(v: f64) -> String {
    format!("{v:?}")
}

/// Emit `s` plain when YAML would read it back unchanged as a string,
/// otherwise as a double-quoted (JSON-escaped) string.
fn scalar(s: &str) -> String {
    if is_plain_safe(s) {
        s.to_string()
    } else {
        serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
    }
}

fn is_plain_safe(s: &str) -> bool {
    const RESERVED: [&str; 10] = [
        "true", "false", "null", "~", "yes", "no", "on", "off", "y", "n",
    ];

    let Some(first) = s.chars().next() else {
        return false;
    };
    if first == '-' || first == '.' || first == '+' || first.is_ascii_digit() {
        return false;
    }
    if RESERVED.iter().any(|r| s.eq_ignore_ascii_case(r)) {
        return false;
    }
    // `inf`/`nan` and friends would come back as numbers.
    if s.parse::<f64>().is_ok() {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/' | '-'))
}
