//! Error types for plant definitions and power curve aggregation.

use thiserror::Error;
use wf_core::{CoreError, ErrorKind};
use wf_curves::CurveError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlantError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error("Non-physical value: {what}")]
    NonPhysical { what: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Missing data: {what}")]
    MissingData { what: String },
}

pub type PlantResult<T> = Result<T, PlantError>;

impl PlantError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlantError::Core(e) => e.kind(),
            PlantError::Curve(e) => e.kind(),
            PlantError::NonPhysical { .. } => ErrorKind::Domain,
            PlantError::InvalidArg { .. } => ErrorKind::Configuration,
            PlantError::MissingData { .. } => ErrorKind::MissingData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_kind_is_preserved() {
        let err: PlantError = CurveError::MissingData {
            what: "turbulence intensity".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::MissingData);
        assert!(err.to_string().contains("turbulence intensity"));
    }
}
