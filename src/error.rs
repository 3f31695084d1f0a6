//! Binary-facing error: a message plus the process exit code.
//!
//! Exit codes:
//! - 2: the config (or another input file) could not be loaded or validated
//! - 3: a cross-check against external information failed

use crate::config::ConfigError;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    /// Wrap a config error with the file it came from.
    pub fn from_config(source: &std::path::Path, err: ConfigError) -> Self {
        Self::new(2, format!("Invalid config '{}': {err}", source.display()))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
