//! Model chain orchestration.
//!
//! ## Run stages
//!
//! A run checks the weather table against the selected models first, then
//! moves through [`RunStage`]s in order. Each finished stage is logged at
//! debug level and recorded in [`RunOutput::stages`].

use std::fmt;

use tracing::{debug, warn};
use wf_atmos::{
    Quantity, WeatherTable, density, linear_interpolation_extrapolation,
    logarithmic_interpolation_extrapolation, temperature, wind_speed,
};
use wf_core::{Series, clip_upper};
use wf_curves::{Curve, EfficiencyRegistry, power_output, reduce_wind_speed};
use wf_plants::{
    FleetAggregator, PowerPlant, PowerPlantInfo, TurbulenceSource, WakeLossesModel, WindFarm,
    WindTurbine,
};

use crate::config::ModelChainConfig;
use crate::error::{ChainError, ChainResult};
use crate::models::{
    DensityModel, PowerOutputModel, StandardDeviationMethod, TemperatureModel, WindSpeedModel,
};
use crate::validate::{ChainOptions, validate_config};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Configured,
    SpeedResolved,
    DensityResolved,
    CurveResolved,
    PowerComputed,
    Clipped,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunStage::Configured => "configured",
            RunStage::SpeedResolved => "speed resolved",
            RunStage::DensityResolved => "density resolved",
            RunStage::CurveResolved => "curve resolved",
            RunStage::PowerComputed => "power computed",
            RunStage::Clipped => "clipped",
        };
        f.write_str(s)
    }
}

/// Result of [`ModelChain::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    /// Power output in W, one value per weather row, on the weather index.
    pub power_output: Series,
    /// Power curve used for the output. `None` for the power coefficient model.
    pub power_curve: Option<Curve>,
    pub stages: Vec<RunStage>,
}

/// Power output calculation for one power plant.
#[derive(Debug, Clone)]
pub struct ModelChain {
    plant: PowerPlant,
    options: ChainOptions,
    registry: EfficiencyRegistry,
}

impl ModelChain {
    /// Model chain using the bundled wind efficiency curves.
    pub fn new(plant: impl Into<PowerPlant>, config: &ModelChainConfig) -> ChainResult<Self> {
        Self::with_registry(plant, config, EfficiencyRegistry::builtin())
    }

    /// Model chain resolving wind efficiency curves from `registry`.
    ///
    /// # Errors
    /// `Configuration` for unknown model names and for model selections the
    /// plant cannot support, `MissingData` if the plant lacks the curve or
    /// dimension the selected power output model needs.
    pub fn with_registry(
        plant: impl Into<PowerPlant>,
        config: &ModelChainConfig,
        registry: EfficiencyRegistry,
    ) -> ChainResult<Self> {
        let plant = plant.into();
        let options = validate_config(config, &registry)?;
        check_plant(&plant, &options)?;
        debug!(
            plant = plant.kind_str(),
            wind_speed_model = %options.wind_speed_model,
            power_output_model = %options.power_output_model,
            wake_losses_model = %options.wake_losses_model,
            "model chain configured"
        );
        Ok(Self {
            plant,
            options,
            registry,
        })
    }

    pub fn plant(&self) -> &PowerPlant {
        &self.plant
    }

    pub fn options(&self) -> &ChainOptions {
        &self.options
    }

    /// Compute the power output time series for `weather`.
    pub fn run(&self, weather: &WeatherTable) -> ChainResult<RunOutput> {
        let mut stages = vec![RunStage::Configured];
        self.check_weather(weather)?;

        let mut wind_speed = self.wind_speed_hub(weather)?;
        advance(&mut stages, RunStage::SpeedResolved);

        let density = if self.options.needs_density() {
            let rho = self.density_hub(weather)?;
            advance(&mut stages, RunStage::DensityResolved);
            Some(rho)
        } else {
            None
        };

        let power_curve = self.resolve_power_curve(weather)?;
        advance(&mut stages, RunStage::CurveResolved);

        if self.plant.is_aggregated()
            && let WakeLossesModel::WindEfficiencyCurve(name) = &self.options.wake_losses_model
        {
            wind_speed = reduce_wind_speed(&wind_speed, self.registry.get(name)?);
            debug!(curve = %name, "wind speed reduced by wind efficiency curve");
        }

        let power = self.power_output(&wind_speed, density.as_ref(), power_curve.as_ref())?;
        advance(&mut stages, RunStage::PowerComputed);

        let power = match self.plant.nominal_power() {
            Some(nominal) => power.map(|p| clip_upper(p, nominal)),
            None => {
                debug!("nominal power unknown, power output is not clipped");
                power
            }
        };
        advance(&mut stages, RunStage::Clipped);

        Ok(RunOutput {
            power_output: power,
            power_curve,
            stages,
        })
    }

    /// Wind speed at hub height in m/s.
    pub fn wind_speed_hub(&self, weather: &WeatherTable) -> ChainResult<Series> {
        let hub_height = self.plant.hub_height();
        if let Some(data) = weather.at_height(Quantity::WindSpeed, hub_height) {
            debug!(hub_height, "wind speed measured at hub height");
            return Ok(data.clone());
        }
        let speed = match self.options.wind_speed_model {
            WindSpeedModel::Logarithmic => {
                let column = weather.closest(Quantity::WindSpeed, hub_height)?;
                let z0 = weather.first(Quantity::RoughnessLength)?;
                wind_speed::logarithmic_profile(
                    &column.data,
                    column.height,
                    hub_height,
                    &z0.data,
                    self.options.obstacle_height,
                )?
            }
            WindSpeedModel::Hellman => {
                let column = weather.closest(Quantity::WindSpeed, hub_height)?;
                let z0 = weather.first(Quantity::RoughnessLength).ok();
                wind_speed::hellman(
                    &column.data,
                    column.height,
                    hub_height,
                    z0.map(|c| &c.data),
                    self.options.hellman_exp,
                )?
            }
            WindSpeedModel::InterpolationExtrapolation => {
                linear_interpolation_extrapolation(weather, Quantity::WindSpeed, hub_height)?
            }
            WindSpeedModel::LogInterpolationExtrapolation => {
                logarithmic_interpolation_extrapolation(weather, Quantity::WindSpeed, hub_height)?
            }
        };
        debug!(model = %self.options.wind_speed_model, hub_height, "wind speed at hub height");
        Ok(speed)
    }

    /// Temperature at hub height in K.
    pub fn temperature_hub(&self, weather: &WeatherTable) -> ChainResult<Series> {
        let hub_height = self.plant.hub_height();
        if let Some(data) = weather.at_height(Quantity::Temperature, hub_height) {
            return Ok(data.clone());
        }
        let temperature = match self.options.temperature_model {
            TemperatureModel::LinearGradient => {
                let column = weather.closest(Quantity::Temperature, hub_height)?;
                temperature::linear_gradient(&column.data, column.height, hub_height)
            }
            TemperatureModel::InterpolationExtrapolation => {
                linear_interpolation_extrapolation(weather, Quantity::Temperature, hub_height)?
            }
        };
        Ok(temperature)
    }

    /// Air density at hub height in kg/m³.
    pub fn density_hub(&self, weather: &WeatherTable) -> ChainResult<Series> {
        let hub_height = self.plant.hub_height();
        let rho = match self.options.density_model {
            DensityModel::Barometric | DensityModel::IdealGas => {
                let temperature = self.temperature_hub(weather)?;
                let pressure = weather.closest(Quantity::Pressure, hub_height)?;
                if self.options.density_model == DensityModel::Barometric {
                    density::barometric(&pressure.data, pressure.height, hub_height, &temperature)?
                } else {
                    density::ideal_gas(&pressure.data, pressure.height, hub_height, &temperature)?
                }
            }
            DensityModel::InterpolationExtrapolation => {
                linear_interpolation_extrapolation(weather, Quantity::Density, hub_height)?
            }
        };
        debug!(model = %self.options.density_model, hub_height, "density at hub height");
        Ok(rho)
    }

    /// Check that `weather` holds every column the selected models read.
    pub fn check_weather(&self, weather: &WeatherTable) -> ChainResult<()> {
        let hub_height = self.plant.hub_height();
        let opts = &self.options;

        require(weather, Quantity::WindSpeed, 1, "wind speed")?;
        if weather.at_height(Quantity::WindSpeed, hub_height).is_none() {
            match opts.wind_speed_model {
                WindSpeedModel::Logarithmic => require(
                    weather,
                    Quantity::RoughnessLength,
                    1,
                    "the logarithmic wind speed model",
                )?,
                WindSpeedModel::Hellman => {}
                WindSpeedModel::InterpolationExtrapolation
                | WindSpeedModel::LogInterpolationExtrapolation => require(
                    weather,
                    Quantity::WindSpeed,
                    2,
                    "wind speed inter-/extrapolation",
                )?,
            }
        }

        if opts.needs_density() {
            match opts.density_model {
                DensityModel::Barometric | DensityModel::IdealGas => {
                    require(weather, Quantity::Pressure, 1, "the density model")?;
                    if weather.at_height(Quantity::Temperature, hub_height).is_none() {
                        let needed = match opts.temperature_model {
                            TemperatureModel::LinearGradient => 1,
                            TemperatureModel::InterpolationExtrapolation => 2,
                        };
                        require(weather, Quantity::Temperature, needed, "the temperature model")?;
                    }
                }
                DensityModel::InterpolationExtrapolation => {
                    require(weather, Quantity::Density, 2, "density inter-/extrapolation")?
                }
            }
        }

        if self.plant.is_aggregated()
            && opts.smoothing
            && opts.smoothing_params.standard_deviation_method
                == StandardDeviationMethod::TurbulenceIntensity
            && !weather.has(Quantity::TurbulenceIntensity)
            && !weather.has(Quantity::RoughnessLength)
        {
            return Err(ChainError::MissingData {
                what: "power curve smoothing with the 'turbulence_intensity' method needs \
                       turbulence intensity or roughness length in the weather data"
                    .into(),
            });
        }
        Ok(())
    }

    fn resolve_power_curve(&self, weather: &WeatherTable) -> ChainResult<Option<Curve>> {
        match &self.plant {
            PowerPlant::Turbine(turbine) => match self.options.power_output_model {
                PowerOutputModel::PowerCurve => Ok(Some(required_power_curve(turbine)?.clone())),
                PowerOutputModel::PowerCoefficientCurve => Ok(None),
            },
            plant => {
                let aggregator = FleetAggregator {
                    wake_losses_model: self.options.wake_losses_model.clone(),
                    smoothing: self.options.smoothing,
                    smoothing_order: self.options.smoothing_order,
                    smoothing_params: self.options.smoothing_params,
                    turbulence: turbulence_source(weather),
                };
                let curve = aggregator.power_curve(plant)?;
                debug!(
                    plant = plant.kind_str(),
                    points = curve.len(),
                    "aggregated power curve"
                );
                Ok(Some(curve))
            }
        }
    }

    fn power_output(
        &self,
        wind_speed: &Series,
        density: Option<&Series>,
        power_curve: Option<&Curve>,
    ) -> ChainResult<Series> {
        match (self.options.power_output_model, &self.plant, power_curve) {
            (PowerOutputModel::PowerCurve, _, Some(curve)) => Ok(power_output::power_curve_output(
                curve,
                wind_speed,
                density,
                self.options.density_correction,
            )?),
            (PowerOutputModel::PowerCoefficientCurve, PowerPlant::Turbine(turbine), _) => {
                let (cp_curve, rotor_diameter) = coefficient_inputs(turbine)?;
                let density = density.ok_or_else(|| ChainError::MissingData {
                    what: "the power coefficient model needs density at hub height".into(),
                })?;
                Ok(power_output::power_coefficient_curve(
                    cp_curve,
                    wind_speed,
                    density,
                    rotor_diameter,
                )?)
            }
            _ => Err(ChainError::MissingData {
                what: format!("no power curve resolved for the {}", self.plant.kind_str()),
            }),
        }
    }
}

fn advance(stages: &mut Vec<RunStage>, stage: RunStage) {
    debug!(stage = %stage, "model chain stage finished");
    stages.push(stage);
}

fn require(
    weather: &WeatherTable,
    quantity: Quantity,
    columns: usize,
    needed_by: &str,
) -> ChainResult<()> {
    let available = weather.columns(quantity).count();
    if available < columns {
        return Err(ChainError::MissingData {
            what: format!(
                "{needed_by} needs {columns} {quantity} column(s), weather data has {available}"
            ),
        });
    }
    Ok(())
}

fn required_power_curve(turbine: &WindTurbine) -> ChainResult<&Curve> {
    turbine.power_curve().ok_or_else(|| ChainError::MissingData {
        what: format!(
            "power curve of {} is needed for the 'power_curve' model",
            turbine.label()
        ),
    })
}

fn coefficient_inputs(turbine: &WindTurbine) -> ChainResult<(&Curve, f64)> {
    let cp_curve = turbine
        .power_coefficient_curve()
        .ok_or_else(|| ChainError::MissingData {
            what: format!(
                "power coefficient curve of {} is needed for the \
                 'power_coefficient_curve' model",
                turbine.label()
            ),
        })?;
    let rotor_diameter = turbine.rotor_diameter().ok_or_else(|| ChainError::MissingData {
        what: format!(
            "rotor diameter of {} is needed for the 'power_coefficient_curve' model",
            turbine.label()
        ),
    })?;
    Ok((cp_curve, rotor_diameter))
}

fn farms(plant: &PowerPlant) -> impl Iterator<Item = &WindFarm> {
    let farms: &[WindFarm] = match plant {
        PowerPlant::Turbine(_) => &[],
        PowerPlant::Farm(farm) => std::slice::from_ref(farm),
        PowerPlant::Cluster(cluster) => cluster.wind_farms(),
    };
    farms.iter()
}

fn fleet_turbines(plant: &PowerPlant) -> Vec<&WindTurbine> {
    match plant {
        PowerPlant::Turbine(t) => vec![t],
        _ => farms(plant)
            .flat_map(|farm| farm.fleet().iter().map(|g| g.turbine()))
            .collect(),
    }
}

/// Eager checks of the plant against the selected models.
fn check_plant(plant: &PowerPlant, options: &ChainOptions) -> ChainResult<()> {
    match (plant, options.power_output_model) {
        (PowerPlant::Turbine(turbine), PowerOutputModel::PowerCoefficientCurve) => {
            turbine.validate()?;
            coefficient_inputs(turbine)?;
        }
        (PowerPlant::Turbine(turbine), PowerOutputModel::PowerCurve) => {
            turbine.validate()?;
            required_power_curve(turbine)?;
        }
        (_, PowerOutputModel::PowerCoefficientCurve) => {
            return Err(ChainError::Configuration {
                what: format!(
                    "the 'power_coefficient_curve' model is only available for single \
                     turbines, not for a {}",
                    plant.kind_str()
                ),
            });
        }
        (_, PowerOutputModel::PowerCurve) => {
            for turbine in fleet_turbines(plant) {
                required_power_curve(turbine)?;
            }
        }
    }
    if options.density_correction
        && options.power_output_model == PowerOutputModel::PowerCoefficientCurve
    {
        warn!(
            plant = plant.kind_str(),
            "density correction is ignored by the 'power_coefficient_curve' model"
        );
    }
    if !plant.is_aggregated() && options.wake_losses_model != WakeLossesModel::None {
        debug!(
            wake_losses_model = %options.wake_losses_model,
            "wake losses model is ignored for single turbines"
        );
    }
    if options.wake_losses_model != WakeLossesModel::WindFarmEfficiency {
        for farm in farms(plant).filter(|f| f.efficiency().is_some()) {
            warn!(
                farm = %farm.label(),
                wake_losses_model = %options.wake_losses_model,
                "wind farm efficiency is ignored by the selected wake losses model"
            );
        }
    }
    if plant.nominal_power().is_none() {
        warn!(
            plant = plant.kind_str(),
            "nominal power unknown, power output will not be clipped"
        );
    }
    Ok(())
}

/// Turbulence for smoothing of aggregated curves: the mean measured
/// turbulence intensity, else the mean roughness length of the first column.
fn turbulence_source(weather: &WeatherTable) -> TurbulenceSource {
    let measured: Series = weather
        .columns(Quantity::TurbulenceIntensity)
        .flat_map(|c| c.data.iter())
        .collect();
    if let Some(ti) = measured.mean() {
        return TurbulenceSource::Intensity(ti);
    }
    weather
        .first(Quantity::RoughnessLength)
        .ok()
        .and_then(|c| c.data.mean())
        .map_or(TurbulenceSource::Unavailable, TurbulenceSource::RoughnessLength)
}
