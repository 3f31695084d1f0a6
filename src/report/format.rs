//! Formatted terminal output.
//!
//! Formatting lives in one place so the loading/validation code stays free of
//! presentation concerns.

use std::path::Path;

use crate::domain::{Config, Role};

/// Summary printed by `censuscfg check`.
pub fn format_summary(config: &Config, source: &Path) -> String {
    let paths = config.dataset_paths();
    let split = config.split_ratios();
    let features = config.feature_spec();
    let model = config.hyperparams();

    let mut out = String::new();

    out.push_str("=== censuscfg - configuration OK ===\n");
    out.push_str(&format!("Source: {}\n", source.display()));

    out.push_str("\nDatasets:\n");
    out.push_str(&format!("- raw  : {}\n", paths.raw));
    out.push_str(&format!("- train: {}\n", paths.train));
    out.push_str(&format!("- valid: {}\n", paths.valid));
    out.push_str(&format!("- test : {}\n", paths.test));
    if let Some(dir) = paths.processed_dir() {
        out.push_str(&format!("- output dir: {}\n", dir.display()));
    }

    let (first, second) = split.two_stage_holdout();
    out.push_str(&format!(
        "Split: train={:.3} valid={:.3} test={:.3} (holdout {:.3}, then {:.3} of holdout to test)\n",
        split.train, split.valid, split.test, first, second
    ));

    out.push_str("\nFeatures:\n");
    out.push_str(&format!(
        "- scalars: age={} citizen={} hour={} gain={} cost={}\n",
        features.age_col, features.citizen_col, features.hour_col, features.gain_col, features.cost_col
    ));
    out.push_str(&format!("- binary     : {}\n", features.binary_cols.len()));
    out.push_str(&format!("- categorical: {}\n", features.categorical_cols.len()));
    let annotated = features.removed_cols.iter().filter(|c| c.note.is_some()).count();
    out.push_str(&format!(
        "- removed    : {} ({annotated} annotated)\n",
        features.removed_cols.len()
    ));
    out.push_str(&format!(
        "- selected from raw data: {}\n",
        features.required_columns().len()
    ));

    out.push_str("\nModel:\n");
    out.push_str(&format!(
        "- epochs={} batch={} lr={} weight_decay={}\n",
        model.max_epochs, model.batch_size, model.learning_rate, model.weight_decay
    ));
    out.push_str(&format!(
        "- input_dim={} hidden_dim={}\n",
        model.input_dim, model.hidden_dim
    ));

    out
}

/// One `name<TAB>role` line per queried column.
pub fn format_roles(config: &Config, names: &[String]) -> String {
    let mut out = String::new();
    for name in names {
        out.push_str(&format!("{name}\t{}\n", config.column_role(name)));
    }
    out
}

/// Result line for a successful `input_dim` cross-check.
pub fn format_width(config: &Config, width: u64) -> String {
    let features = config.feature_spec();
    format!(
        "input_dim OK: {width} = {} binary + {} categorical levels ({} categorical columns)\n",
        features.binary_cols.len(),
        width - features.binary_cols.len() as u64,
        features.categorical_cols.len()
    )
}

/// True when any queried name has no role.
pub fn any_unknown(config: &Config, names: &[String]) -> bool {
    names.iter().any(|n| config.column_role(n) == Role::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        crate::config::load_str(include_str!("../../config.yaml")).unwrap()
    }

    #[test]
    fn summary_reports_role_counts() {
        let text = format_summary(&config(), Path::new("config.yaml"));
        assert!(text.contains("Source: config.yaml"));
        assert!(text.contains("- binary     : 5"));
        assert!(text.contains("- categorical: 34"));
        assert!(text.contains("- removed    : 23 (15 annotated)"));
        assert!(text.contains("- selected from raw data: 42"));
        assert!(text.contains("holdout 0.400, then 0.500"));
        assert!(text.contains("- output dir: data/processed"));
    }

    #[test]
    fn roles_are_tab_separated() {
        let names = vec!["iSex".to_string(), "nope".to_string()];
        let config = config();
        assert_eq!(format_roles(&config, &names), "iSex\tbinary\nnope\tunknown\n");
        assert!(any_unknown(&config, &names));
        assert!(!any_unknown(&config, &names[..1]));
    }

    #[test]
    fn width_line_splits_binary_and_levels() {
        let line = format_width(&config(), 215);
        assert_eq!(
            line,
            "input_dim OK: 215 = 5 binary + 210 categorical levels (34 categorical columns)\n"
        );
    }
}
