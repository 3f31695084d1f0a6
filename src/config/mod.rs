//! Loading and validating the pipeline configuration.
//!
//! `load` is the whole pipeline: read -> parse -> validate -> freeze. The
//! resulting `Config` is immutable; `ConfigStore` keeps the current one
//! behind an `Arc` and swaps in a fresh instance on reload.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::Config;

mod error;
mod parse;
mod validate;

#[cfg(test)]
mod proptests;

pub use error::{ConfigError, ErrorKind, Violation};
pub use validate::{RATIO_TOLERANCE, check_input_dim, encoded_width};

/// Environment variable naming the config file when no path is given.
pub const CONFIG_ENV: &str = "CENSUS_CONFIG";

/// Config file used when neither a path nor `CENSUS_CONFIG` is given.
pub const DEFAULT_CONFIG: &str = "config.yaml";

/// Load and validate the config at `path`.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| {
        ConfigError::new(
            ErrorKind::MalformedDocument,
            format!("failed to read '{}': {e}", path.display()),
        )
    })?;
    load_str(&text)
}

/// Load and validate an in-memory document.
pub fn load_str(text: &str) -> Result<Config, ConfigError> {
    let notes = crate::io::removed_notes(text);
    let raw = parse::parse_document(text, &notes)?;
    validate::validate(raw)
}

/// Pick the config file: explicit path, then `$CENSUS_CONFIG`, then `config.yaml`.
///
/// A `.env` file in the working directory is honoured for `CENSUS_CONFIG`.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    dotenvy::dotenv().ok();
    std::env::var_os(CONFIG_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG))
}

/// Holder for the current configuration of a running process.
///
/// Readers take an `Arc<Config>` snapshot and keep using it for as long as
/// they like; `reload` never touches a snapshot that was already handed out.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    current: Arc<Config>,
}

impl ConfigStore {
    /// Load `path` once and keep it as the reload source.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let current = Arc::new(load(&path)?);
        Ok(Self { path, current })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> Arc<Config> {
        Arc::clone(&self.current)
    }

    /// Re-read the source file.
    ///
    /// On success the new config becomes current and is returned. On failure
    /// the previous config stays current.
    pub fn reload(&mut self) -> Result<Arc<Config>, ConfigError> {
        let fresh = Arc::new(load(&self.path)?);
        self.current = Arc::clone(&fresh);
        Ok(fresh)
    }
}

impl std::ops::Deref for ConfigStore {
    type Target = Config;

    fn deref(&self) -> &Config {
        &self.current
    }
}
