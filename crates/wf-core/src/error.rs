use std::fmt;

use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

/// Coarse classification shared by every windflow error type.
///
/// Callers branch on the kind instead of on crate-specific variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown model name or incompatible options.
    Configuration,
    /// Physically invalid combination of inputs.
    Domain,
    /// A required quantity, height or curve is absent.
    MissingData,
    /// A value has the wrong shape or is not a usable number.
    TypeMismatch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Domain => "domain",
            ErrorKind::MissingData => "missing data",
            ErrorKind::TypeMismatch => "type mismatch",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Length mismatch in {what}: {left} vs {right}")]
    LengthMismatch {
        what: &'static str,
        left: usize,
        right: usize,
    },

    #[error("Empty input: {what}")]
    Empty { what: &'static str },
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NonFinite { .. } => ErrorKind::TypeMismatch,
            CoreError::InvalidArg { .. } => ErrorKind::Configuration,
            CoreError::LengthMismatch { .. } => ErrorKind::Domain,
            CoreError::Empty { .. } => ErrorKind::MissingData,
        }
    }
}
