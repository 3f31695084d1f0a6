//! Reporting utilities: human-readable views of a loaded configuration.

pub mod format;

pub use format::*;
