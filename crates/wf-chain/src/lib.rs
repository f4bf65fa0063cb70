//! wf-chain: model chain computing wind power output time series.
//!
//! A [`ModelChain`] binds a power plant (turbine, farm or cluster) to a
//! validated selection of sub-models and turns a [`WeatherTable`] into a
//! power output series:
//!
//! 1. wind speed at hub height
//! 2. air density at hub height (power coefficient curve or density correction)
//! 3. power curve, aggregated for farms and clusters
//! 4. speed based wake losses
//! 5. power output, clipped to nominal power
//!
//! Configuration is plain serde data ([`ModelChainConfig`]) loadable from
//! YAML or JSON.

pub mod chain;
pub mod config;
pub mod error;
pub mod models;
pub mod validate;

pub use chain::{ModelChain, RunOutput, RunStage};
pub use config::{ModelChainConfig, from_json_str, from_yaml_str, load_json, load_yaml};
pub use error::{ChainError, ChainResult};
pub use models::*;
pub use validate::{ChainOptions, validate_config};

pub use wf_atmos::{Quantity, WeatherTable};
pub use wf_core::{ErrorKind, Series};
pub use wf_curves::{Curve, EfficiencyRegistry};
pub use wf_plants::{PowerPlant, PowerPlantInfo};
