//! Wake losses: speed based reduction and power curve reduction.

use serde::{Deserialize, Serialize};
use wf_core::{Series, interp, interp_clamped};

use crate::curve::Curve;
use crate::error::{CurveError, CurveResult};

/// Wind farm efficiency, constant or wind speed dependent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Efficiency {
    Constant(f64),
    Curve(Curve),
}

impl From<f64> for Efficiency {
    fn from(v: f64) -> Self {
        Efficiency::Constant(v)
    }
}

impl From<Curve> for Efficiency {
    fn from(c: Curve) -> Self {
        Efficiency::Curve(c)
    }
}

/// Reduce hub-height wind speed by a wind efficiency curve.
///
/// `v' = v * eta(v)`, with `eta` interpolated linearly and held constant
/// beyond the ends of the efficiency curve.
pub fn reduce_wind_speed(wind_speed: &Series, wind_efficiency_curve: &Curve) -> Series {
    wind_speed.map(|v| {
        v * interp_clamped(
            v,
            wind_efficiency_curve.wind_speeds(),
            wind_efficiency_curve.values(),
        )
    })
}

/// Reduce the values of a power curve by a wind farm efficiency.
///
/// With a constant efficiency every value is scaled. With an efficiency
/// curve the power curve points are matched on wind speed: efficiencies
/// between tabulated points are interpolated linearly, power curve points
/// beyond the last efficiency take the last efficiency, and points before
/// the first efficiency are dropped.
///
/// # Errors
/// `TypeMismatch` for a non-finite constant; `InvalidCurve` if fewer than
/// two points remain.
pub fn apply_to_power_curve(power_curve: &Curve, efficiency: &Efficiency) -> CurveResult<Curve> {
    match efficiency {
        Efficiency::Constant(eta) => {
            if !eta.is_finite() {
                return Err(CurveError::TypeMismatch {
                    what: "wind farm efficiency must be a finite number",
                });
            }
            power_curve.map_values(|_, v| v * eta)
        }
        Efficiency::Curve(eff) => {
            let (wind_speed, value): (Vec<f64>, Vec<f64>) = power_curve
                .points()
                .filter_map(|(ws, p)| {
                    let eta = interp(ws, eff.wind_speeds(), eff.values(), f64::NAN, eff.last_value());
                    (!eta.is_nan()).then_some((ws, p * eta))
                })
                .unzip();
            let dropped = power_curve.len() - wind_speed.len();
            if dropped > 0 {
                tracing::debug!(
                    dropped,
                    first_efficiency_wind_speed = eff.first_wind_speed(),
                    "power curve points below the efficiency curve dropped"
                );
            }
            Curve::new(wind_speed, value)
        }
    }
}
