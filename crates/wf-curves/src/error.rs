//! Error types for curve operations.

use thiserror::Error;
use wf_core::{CoreError, ErrorKind};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Invalid curve: {what}")]
    InvalidCurve { what: String },

    #[error("Missing data: {what}")]
    MissingData { what: String },

    #[error("Type mismatch: {what}")]
    TypeMismatch { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Unknown wind efficiency curve '{name}' (known: {known})")]
    UnknownEfficiencyCurve { name: String, known: String },
}

pub type CurveResult<T> = Result<T, CurveError>;

impl CurveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CurveError::Core(e) => e.kind(),
            CurveError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            CurveError::MissingData { .. } => ErrorKind::MissingData,
            CurveError::InvalidCurve { .. }
            | CurveError::InvalidArg { .. }
            | CurveError::UnknownEfficiencyCurve { .. } => ErrorKind::Configuration,
        }
    }
}
