//! Command-line parsing for the census pipeline config checker.
//!
//! The goal of this module is to keep **argument parsing** separate from
//! loading/validation and from output formatting.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "censuscfg",
    version,
    about = "Validate and inspect the census-income pipeline configuration"
)]
pub struct Cli {
    /// Print diagnostics to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load and validate a config file, then print a summary.
    Check(CheckArgs),
    /// Print the canonical form of a config file (comments on removed columns kept).
    Show(ShowArgs),
    /// Print the role of one or more columns.
    Role(RoleArgs),
    /// Cross-check `model.input_dim` against categorical cardinalities.
    Dims(DimsArgs),
}

/// Options for `check`.
#[derive(Debug, Parser, Clone)]
pub struct CheckArgs {
    /// Config file (defaults to $CENSUS_CONFIG, then ./config.yaml).
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

/// Output format for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    Yaml,
    Json,
}

/// Options for `show`.
#[derive(Debug, Parser, Clone)]
pub struct ShowArgs {
    /// Config file (defaults to $CENSUS_CONFIG, then ./config.yaml).
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ShowFormat::Yaml)]
    pub format: ShowFormat,

    /// Write to a file instead of stdout (YAML only).
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Options for `role`.
#[derive(Debug, Parser, Clone)]
pub struct RoleArgs {
    /// Column names to look up.
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,

    /// Config file (defaults to $CENSUS_CONFIG, then ./config.yaml).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Exit with an error if any name has no role.
    #[arg(long)]
    pub strict: bool,
}

/// Options for `dims`.
#[derive(Debug, Parser, Clone)]
pub struct DimsArgs {
    /// YAML/JSON mapping of categorical column -> number of levels.
    #[arg(long, value_name = "FILE")]
    pub cardinalities: PathBuf,

    /// Config file (defaults to $CENSUS_CONFIG, then ./config.yaml).
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}
