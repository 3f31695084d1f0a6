//! Configuration error types.

use std::fmt;

/// Category of a configuration problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unreadable or unparsable document, or a value of the wrong shape.
    MalformedDocument,
    /// Required key absent (or present but empty).
    MissingField,
    /// Split ratio outside [0, 1] or ratios not summing to 1.
    InvalidRatio,
    /// Column listed under more than one role.
    DuplicateColumnRole,
    /// Numeric hyperparameter outside its domain.
    OutOfRangeHyperparameter,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::MalformedDocument => "malformed document",
            ErrorKind::MissingField => "missing field",
            ErrorKind::InvalidRatio => "invalid ratio",
            ErrorKind::DuplicateColumnRole => "duplicate column role",
            ErrorKind::OutOfRangeHyperparameter => "out-of-range hyperparameter",
        };
        f.write_str(label)
    }
}

/// A single problem found in the document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {detail}")]
pub struct Violation {
    pub kind: ErrorKind,
    pub detail: String,
}

impl Violation {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

/// Load/validation failure carrying every violation that was found.
///
/// Structural problems (unparsable input, missing keys) stop the load at the
/// first one; semantic checks run to completion and report everything.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    violations: Vec<Violation>,
}

impl ConfigError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation::new(kind, detail)],
        }
    }

    /// Wrap a non-empty list of violations.
    pub(crate) fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    /// Kind of the first violation.
    pub fn kind(&self) -> ErrorKind {
        self.violations[0].kind
    }

    /// Detail of the first violation.
    pub fn detail(&self) -> &str {
        &self.violations[0].detail
    }

    pub fn has(&self, kind: ErrorKind) -> bool {
        self.violations.iter().any(|v| v.kind == kind)
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl From<Violation> for ConfigError {
    fn from(value: Violation) -> Self {
        Self {
            violations: vec![value],
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.violations.as_slice() {
            [only] => write!(f, "{only}"),
            many => {
                write!(f, "{} configuration problems:", many.len())?;
                for v in many {
                    write!(f, "\n  - {v}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}
