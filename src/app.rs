//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves and loads the pipeline config
//! - prints summaries, canonical documents and role lookups
//! - cross-checks `model.input_dim` against known cardinalities

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::cli::{CheckArgs, Command, DimsArgs, RoleArgs, ShowArgs, ShowFormat};
use crate::config;
use crate::domain::Config;
use crate::error::AppError;

/// Entry point for the `censuscfg` binary.
pub fn run() -> Result<(), AppError> {
    // `censuscfg` and `censuscfg path/to/config.yaml` behave like `censuscfg check ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    let verbose = cli.verbose;

    match cli.command {
        Command::Check(args) => handle_check(args, verbose),
        Command::Show(args) => handle_show(args, verbose),
        Command::Role(args) => handle_role(args, verbose),
        Command::Dims(args) => handle_dims(args, verbose),
    }
}

fn load_config(explicit: Option<&Path>, verbose: bool) -> Result<(PathBuf, Config), AppError> {
    let path = config::resolve_config_path(explicit);
    if verbose {
        eprintln!("[censuscfg] loading config from {}", path.display());
    }
    let loaded = config::load(&path).map_err(|err| AppError::from_config(&path, err))?;
    if verbose {
        let features = loaded.feature_spec();
        eprintln!(
            "[censuscfg] loaded: {} binary, {} categorical, {} removed columns",
            features.binary_cols.len(),
            features.categorical_cols.len(),
            features.removed_cols.len()
        );
    }
    Ok((path, loaded))
}

fn handle_check(args: CheckArgs, verbose: bool) -> Result<(), AppError> {
    let (path, config) = load_config(args.path.as_deref(), verbose)?;
    print!("{}", crate::report::format_summary(&config, &path));
    Ok(())
}

fn handle_show(args: ShowArgs, verbose: bool) -> Result<(), AppError> {
    let (_, config) = load_config(args.path.as_deref(), verbose)?;

    match (args.format, &args.output) {
        (ShowFormat::Yaml, Some(out)) => {
            crate::io::write_yaml(out, &config)?;
            if verbose {
                eprintln!("[censuscfg] wrote {}", out.display());
            }
        }
        (ShowFormat::Yaml, None) => print!("{}", crate::io::to_yaml(&config)),
        (ShowFormat::Json, None) => println!("{}", crate::io::to_json(&config)?),
        (ShowFormat::Json, Some(_)) => {
            return Err(AppError::new(2, "--output is only supported with --format yaml"));
        }
    }
    Ok(())
}

fn handle_role(args: RoleArgs, verbose: bool) -> Result<(), AppError> {
    let (_, config) = load_config(args.config.as_deref(), verbose)?;
    print!("{}", crate::report::format_roles(&config, &args.names));

    if args.strict && crate::report::any_unknown(&config, &args.names) {
        return Err(AppError::new(3, "one or more columns have no role"));
    }
    Ok(())
}

fn handle_dims(args: DimsArgs, verbose: bool) -> Result<(), AppError> {
    let (_, config) = load_config(args.config.as_deref(), verbose)?;
    let table = crate::io::read_cardinalities(&args.cardinalities).map_err(|err| {
        AppError::new(
            2,
            format!("Invalid cardinalities '{}': {err}", args.cardinalities.display()),
        )
    })?;
    if verbose {
        eprintln!("[censuscfg] {} cardinalities read", table.len());
    }

    let width = config::check_input_dim(&config, &table).map_err(|err| AppError::new(3, err.to_string()))?;
    print!("{}", crate::report::format_width(&config, width));
    Ok(())
}

/// Rewrite argv so `censuscfg` defaults to `censuscfg check`.
///
/// Rules:
/// - `censuscfg`                     -> `censuscfg check`
/// - `censuscfg my.yaml`             -> `censuscfg check my.yaml`
/// - `censuscfg -v`                  -> `censuscfg check -v`
/// - `censuscfg --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("check".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if is_known_subcommand(&arg1) {
        return argv;
    }

    // `-v` followed by a subcommand stays as-is.
    if arg1.starts_with('-') && argv.get(2).is_some_and(|a| is_known_subcommand(a)) {
        return argv;
    }

    argv.insert(1, "check".to_string());
    argv
}

fn is_known_subcommand(arg: &str) -> bool {
    matches!(arg, "check" | "show" | "role" | "dims")
}
