//! Model chain configuration as plain serde data.
//!
//! Model names are kept as strings here so that an unknown name surfaces as a
//! `Configuration` error listing the valid options, see
//! [`validate_config`](crate::validate::validate_config).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChainError, ChainResult};

/// Raw model chain configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelChainConfig {
    pub wind_speed_model: String,
    pub temperature_model: String,
    pub density_model: String,
    pub power_output_model: String,
    pub density_correction: bool,
    /// Height of obstacles around the plant in m.
    pub obstacle_height: f64,
    pub hellman_exp: Option<f64>,
    /// Only used for wind farms and clusters; `None` disables wake losses.
    pub wake_losses_model: Option<String>,
    pub smoothing: bool,
    /// Width of the Gaussian integration block in m/s.
    pub block_width: f64,
    pub standard_deviation_method: String,
    pub smoothing_order: String,
}

impl Default for ModelChainConfig {
    fn default() -> Self {
        Self {
            wind_speed_model: "logarithmic".into(),
            temperature_model: "linear_gradient".into(),
            density_model: "barometric".into(),
            power_output_model: "power_curve".into(),
            density_correction: false,
            obstacle_height: 0.0,
            hellman_exp: None,
            wake_losses_model: Some("dena_mean".into()),
            smoothing: false,
            block_width: 0.5,
            standard_deviation_method: "turbulence_intensity".into(),
            smoothing_order: "wind_farm_power_curves".into(),
        }
    }
}

fn read(path: &Path) -> ChainResult<String> {
    std::fs::read_to_string(path).map_err(|source| ChainError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })
}

pub fn from_yaml_str(content: &str) -> ChainResult<ModelChainConfig> {
    Ok(serde_yaml::from_str(content)?)
}

pub fn load_yaml(path: &Path) -> ChainResult<ModelChainConfig> {
    from_yaml_str(&read(path)?)
}

pub fn from_json_str(content: &str) -> ChainResult<ModelChainConfig> {
    Ok(serde_json::from_str(content)?)
}

pub fn load_json(path: &Path) -> ChainResult<ModelChainConfig> {
    from_json_str(&read(path)?)
}
