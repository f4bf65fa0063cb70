//! Sub-model selections of the model chain.

use std::fmt;
use std::str::FromStr;

use wf_curves::EfficiencyRegistry;

pub use wf_curves::StandardDeviationMethod;
pub use wf_plants::{SmoothingOrder, WakeLossesModel};

use crate::error::{ChainError, ChainResult};

/// Declares a closed set of model names with `as_str`, `Display` and `FromStr`.
macro_rules! model_enum {
    ($(#[$meta:meta])* $name:ident, $what:literal { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $s),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ChainError;

            fn from_str(s: &str) -> ChainResult<Self> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|m| m.as_str() == s)
                    .ok_or_else(|| ChainError::Configuration {
                        what: format!(
                            "'{s}' is an invalid value for `{}`; valid options: {}",
                            $what,
                            $name::ALL.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ")
                        ),
                    })
            }
        }
    };
}

model_enum!(
    /// Wind speed at hub height.
    WindSpeedModel, "wind_speed_model" {
        Logarithmic => "logarithmic",
        Hellman => "hellman",
        InterpolationExtrapolation => "interpolation_extrapolation",
        LogInterpolationExtrapolation => "log_interpolation_extrapolation",
    }
);

model_enum!(
    /// Temperature at hub height.
    TemperatureModel, "temperature_model" {
        LinearGradient => "linear_gradient",
        InterpolationExtrapolation => "interpolation_extrapolation",
    }
);

model_enum!(
    /// Air density at hub height.
    DensityModel, "density_model" {
        Barometric => "barometric",
        IdealGas => "ideal_gas",
        InterpolationExtrapolation => "interpolation_extrapolation",
    }
);

model_enum!(
    /// Power output evaluation.
    PowerOutputModel, "power_output_model" {
        PowerCurve => "power_curve",
        PowerCoefficientCurve => "power_coefficient_curve",
    }
);

/// Parse a wake losses model name.
///
/// `None` or `"none"` disable wake losses, `"wind_farm_efficiency"` selects
/// the farm efficiency, any other name must be a curve in `registry`.
pub fn parse_wake_losses_model(
    name: Option<&str>,
    registry: &EfficiencyRegistry,
) -> ChainResult<WakeLossesModel> {
    match name {
        None | Some("none") => Ok(WakeLossesModel::None),
        Some("wind_farm_efficiency") => Ok(WakeLossesModel::WindFarmEfficiency),
        Some(curve) => {
            registry.get(curve)?;
            Ok(WakeLossesModel::WindEfficiencyCurve(curve.to_string()))
        }
    }
}
