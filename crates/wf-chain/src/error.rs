//! Error types for the model chain.

use std::path::PathBuf;

use wf_atmos::AtmosError;
use wf_core::{CoreError, ErrorKind};
use wf_curves::CurveError;
use wf_plants::PlantError;

/// Model chain error wrapping the errors of the model crates.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("Configuration error: {what}")]
    Configuration { what: String },

    #[error("Missing data: {what}")]
    MissingData { what: String },

    #[error("Type mismatch: {what}")]
    TypeMismatch { what: String },

    #[error(transparent)]
    Atmos(#[from] AtmosError),

    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error(transparent)]
    Plant(#[from] PlantError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to read config file: {path}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for wf-chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

impl ChainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChainError::Configuration { .. } | ChainError::ConfigRead { .. } => {
                ErrorKind::Configuration
            }
            ChainError::MissingData { .. } => ErrorKind::MissingData,
            ChainError::TypeMismatch { .. }
            | ChainError::Yaml(_)
            | ChainError::Json(_) => ErrorKind::TypeMismatch,
            ChainError::Atmos(e) => e.kind(),
            ChainError::Curve(e) => e.kind(),
            ChainError::Plant(e) => e.kind(),
            ChainError::Core(e) => e.kind(),
        }
    }
}
