//! Validation of a raw configuration into typed model selections.

use wf_curves::{EfficiencyRegistry, SmoothingParams};

use crate::config::ModelChainConfig;
use crate::error::{ChainError, ChainResult};
use crate::models::{
    DensityModel, PowerOutputModel, SmoothingOrder, StandardDeviationMethod, TemperatureModel,
    WakeLossesModel, WindSpeedModel, parse_wake_losses_model,
};

/// Typed, validated model chain options.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainOptions {
    pub wind_speed_model: WindSpeedModel,
    pub temperature_model: TemperatureModel,
    pub density_model: DensityModel,
    pub power_output_model: PowerOutputModel,
    pub density_correction: bool,
    pub obstacle_height: f64,
    pub hellman_exp: Option<f64>,
    pub wake_losses_model: WakeLossesModel,
    pub smoothing: bool,
    pub smoothing_order: SmoothingOrder,
    pub smoothing_params: SmoothingParams,
}

impl ChainOptions {
    /// Whether hub-height density has to be computed.
    pub fn needs_density(&self) -> bool {
        self.power_output_model == PowerOutputModel::PowerCoefficientCurve
            || self.density_correction
    }
}

pub fn validate_config(
    config: &ModelChainConfig,
    registry: &EfficiencyRegistry,
) -> ChainResult<ChainOptions> {
    if !config.obstacle_height.is_finite() || config.obstacle_height < 0.0 {
        return Err(ChainError::Configuration {
            what: format!(
                "obstacle_height must be a non-negative number, got {}",
                config.obstacle_height
            ),
        });
    }
    if let Some(alpha) = config.hellman_exp
        && !alpha.is_finite()
    {
        return Err(ChainError::TypeMismatch {
            what: format!("hellman_exp must be a finite number, got {alpha}"),
        });
    }

    let smoothing_params = SmoothingParams {
        block_width: config.block_width,
        standard_deviation_method: config
            .standard_deviation_method
            .parse::<StandardDeviationMethod>()?,
        ..SmoothingParams::default()
    };
    smoothing_params.validate()?;

    let smoothing_order = config
        .smoothing_order
        .parse::<SmoothingOrder>()
        .map_err(|e| ChainError::Configuration { what: e.to_string() })?;

    Ok(ChainOptions {
        wind_speed_model: config.wind_speed_model.parse()?,
        temperature_model: config.temperature_model.parse()?,
        density_model: config.density_model.parse()?,
        power_output_model: config.power_output_model.parse()?,
        density_correction: config.density_correction,
        obstacle_height: config.obstacle_height,
        hellman_exp: config.hellman_exp,
        wake_losses_model: parse_wake_losses_model(
            config.wake_losses_model.as_deref(),
            registry,
        )?,
        smoothing: config.smoothing,
        smoothing_order,
        smoothing_params,
    })
}
