//! Error types for atmosphere models and weather data access.

use thiserror::Error;
use wf_core::{CoreError, ErrorKind};

use crate::weather::Quantity;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AtmosError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Missing weather data for {quantity}: {what}")]
    MissingData { quantity: Quantity, what: String },

    #[error("Domain error: {what}")]
    Domain { what: String },

    #[error("Type mismatch: {what}")]
    TypeMismatch { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Unknown weather quantity '{name}'")]
    UnknownQuantity { name: String },
}

pub type AtmosResult<T> = Result<T, AtmosError>;

impl AtmosError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AtmosError::Core(e) => e.kind(),
            AtmosError::MissingData { .. } => ErrorKind::MissingData,
            AtmosError::Domain { .. } => ErrorKind::Domain,
            AtmosError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            AtmosError::InvalidArg { .. } | AtmosError::UnknownQuantity { .. } => {
                ErrorKind::Configuration
            }
        }
    }
}
