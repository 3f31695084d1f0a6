//! Property-based tests for loading and validation

use proptest::prelude::*;

use super::{ErrorKind, load_str};
use crate::domain::Role;

#[derive(Debug)]
struct Columns {
    scalars: Vec<String>,
    binary: Vec<String>,
    categorical: Vec<String>,
    removed: Vec<(String, Option<String>)>,
}

fn arb_columns() -> impl Strategy<Value = Columns> {
    (
        proptest::collection::btree_set("[a-z][a-zA-Z0-9]{0,7}", 12..30),
        proptest::collection::vec(proptest::option::of("[a-zA-Z][a-zA-Z0-9 :,]{0,15}"), 30),
    )
        .prop_map(|(names, notes)| {
            let names: Vec<String> = names.into_iter().map(|n| format!("c_{n}")).collect();
            let rest = names.len() - 5;
            let binary_end = 5 + rest / 3;
            let categorical_end = binary_end + rest / 3;
            Columns {
                scalars: names[..5].to_vec(),
                binary: names[5..binary_end].to_vec(),
                categorical: names[binary_end..categorical_end].to_vec(),
                removed: names[categorical_end..]
                    .iter()
                    .cloned()
                    .zip(notes)
                    .collect(),
            }
        })
}

fn render(columns: &Columns, split: (f64, f64, f64), weight_decay: f64) -> String {
    let list = |items: &[String]| {
        if items.is_empty() {
            " []\n".to_string()
        } else {
            let mut out = String::from("\n");
            for item in items {
                out.push_str(&format!("    - {item}\n"));
            }
            out
        }
    };

    let mut removed = String::from("\n");
    for (name, note) in &columns.removed {
        match note {
            Some(note) => removed.push_str(&format!("    - {name}  # {note}\n")),
            None => removed.push_str(&format!("    - {name}\n")),
        }
    }
    if columns.removed.is_empty() {
        removed = " []\n".to_string();
    }

    format!(
        "datasets:\n  raw: raw.csv\n  processed:\n    train: out/train.csv\n    valid: out/valid.csv\n    test: out/test.csv\n  \
         data_split:\n    train: {:?}\n    valid: {:?}\n    test: {:?}\n\
         features:\n  age_col: {}\n  citizen_col: {}\n  hour_col: {}\n  gain_col: {}\n  cost_col: {}\n  \
         binary_cols:{}  categorical_cols:{}  removed_cols:{}\
         model:\n  max_epochs: 5\n  batch_size: 16\n  learning_rate: 0.001\n  input_dim: 10\n  hidden_dim: 4\n  weight_decay: {:?}\n",
        split.0,
        split.1,
        split.2,
        columns.scalars[0],
        columns.scalars[1],
        columns.scalars[2],
        columns.scalars[3],
        columns.scalars[4],
        list(&columns.binary),
        list(&columns.categorical),
        removed,
        weight_decay,
    )
}

fn arb_split() -> impl Strategy<Value = (f64, f64, f64)> {
    (0.0f64..1.0, 0.0f64..1.0).prop_map(|(a, b)| (a, (1.0 - a) * b, (1.0 - a) * (1.0 - b)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_valid_document_loads(columns in arb_columns(), split in arb_split()) {
        let config = load_str(&render(&columns, split, 1e-5)).unwrap();
        prop_assert_eq!(config.feature_spec().binary_cols.len(), columns.binary.len());
        prop_assert_eq!(config.feature_spec().removed_cols.len(), columns.removed.len());
    }

    #[test]
    fn prop_yaml_round_trip_is_identity(columns in arb_columns(), split in arb_split()) {
        let first = load_str(&render(&columns, split, 0.0)).unwrap();
        let second = load_str(&crate::io::to_yaml(&first)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_ratio_sum_outside_tolerance_fails(
        columns in arb_columns(),
        split in arb_split(),
        excess in 2e-6f64..0.5,
    ) {
        let (train, valid, test) = split;
        // Push the excess into whichever ratio keeps every value within [0, 1].
        let skewed = if test + excess <= 1.0 {
            (train, valid, test + excess)
        } else {
            (train, valid, test - excess)
        };
        prop_assume!((0.0..=1.0).contains(&skewed.2));

        let err = load_str(&render(&columns, skewed, 0.0)).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InvalidRatio);
    }

    #[test]
    fn prop_binary_categorical_overlap_fails(
        columns in arb_columns(),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!columns.binary.is_empty());
        let shared = pick.get(&columns.binary).clone();
        let mut columns = columns;
        columns.categorical.push(shared.clone());

        let err = load_str(&render(&columns, (0.6, 0.2, 0.2), 0.0)).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::DuplicateColumnRole);
        let expected = format!("`{shared}`");
        prop_assert!(err.detail().contains(&expected));
    }

    #[test]
    fn prop_column_role_matches_declaring_list(columns in arb_columns(), stranger in "[a-z]{1,8}") {
        let config = load_str(&render(&columns, (0.6, 0.2, 0.2), 0.0)).unwrap();
        for name in &columns.binary {
            prop_assert_eq!(config.column_role(name), Role::Binary);
        }
        for name in &columns.categorical {
            prop_assert_eq!(config.column_role(name), Role::Categorical);
        }
        for (name, _) in &columns.removed {
            prop_assert_eq!(config.column_role(name), Role::Removed);
        }
        // Generated columns all start with `c_`.
        prop_assert_eq!(config.column_role(&stranger), Role::Unknown);
    }

    #[test]
    fn prop_negative_weight_decay_fails(columns in arb_columns(), decay in -10.0f64..-1e-12) {
        let err = load_str(&render(&columns, (0.6, 0.2, 0.2), decay)).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::OutOfRangeHyperparameter);
    }
}
