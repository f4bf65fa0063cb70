//! Gaussian smoothing of power curves.
//!
//! Smoothing spreads each power curve value over neighbouring wind speeds to
//! account for the spatial distribution of wind speed across a wind farm:
//!
//! ```text
//! P_smooth(v) = sum_w  dw * P(w) * N(v - w; mu, sigma(v))
//! w in [v - range, v + range] with step dw
//! ```
//!
//! `sigma(v)` is either `v * TI` (turbulence intensity method) or
//! `0.2 * v + 0.6` (Staffell-Pfenninger).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wf_core::{gauss, interp};

use crate::curve::Curve;
use crate::error::{CurveError, CurveResult};

/// Spacing of the zero points appended to the curve tail (m/s).
pub const PADDING_STEP: f64 = 0.5;

/// Standard deviation model of the Gaussian kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StandardDeviationMethod {
    #[serde(rename = "turbulence_intensity")]
    TurbulenceIntensity,
    #[serde(rename = "Staffell_Pfenninger")]
    StaffellPfenninger,
}

impl StandardDeviationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            StandardDeviationMethod::TurbulenceIntensity => "turbulence_intensity",
            StandardDeviationMethod::StaffellPfenninger => "Staffell_Pfenninger",
        }
    }

    /// Whether the method needs a turbulence intensity.
    pub fn needs_turbulence_intensity(&self) -> bool {
        matches!(self, StandardDeviationMethod::TurbulenceIntensity)
    }
}

impl fmt::Display for StandardDeviationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StandardDeviationMethod {
    type Err = CurveError;

    fn from_str(s: &str) -> CurveResult<Self> {
        match s {
            "turbulence_intensity" => Ok(StandardDeviationMethod::TurbulenceIntensity),
            "Staffell_Pfenninger" => Ok(StandardDeviationMethod::StaffellPfenninger),
            other => Err(CurveError::InvalidArg {
                what: format!(
                    "'{other}' is not a valid standard deviation method; \
                     use 'turbulence_intensity' or 'Staffell_Pfenninger'"
                ),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingParams {
    /// Step between wind speeds in the kernel sum (m/s).
    pub block_width: f64,
    /// Half width of the kernel window (m/s).
    pub wind_speed_range: f64,
    /// Mean of the Gaussian kernel (m/s).
    pub mean_gauss: f64,
    pub standard_deviation_method: StandardDeviationMethod,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            block_width: 0.5,
            wind_speed_range: 15.0,
            mean_gauss: 0.0,
            standard_deviation_method: StandardDeviationMethod::TurbulenceIntensity,
        }
    }
}

impl SmoothingParams {
    pub fn validate(&self) -> CurveResult<()> {
        if !(self.block_width.is_finite() && self.block_width > 0.0) {
            return Err(CurveError::InvalidArg {
                what: format!("block width must be positive, got {}", self.block_width),
            });
        }
        if !(self.wind_speed_range.is_finite() && self.wind_speed_range >= 0.0) {
            return Err(CurveError::InvalidArg {
                what: format!(
                    "wind speed range must be non-negative, got {}",
                    self.wind_speed_range
                ),
            });
        }
        if !self.mean_gauss.is_finite() {
            return Err(CurveError::TypeMismatch {
                what: "gauss mean must be a finite number",
            });
        }
        Ok(())
    }
}

/// Smooth a power curve.
///
/// The curve is first padded on the right with zero points every 0.5 m/s up
/// to `last_wind_speed + wind_speed_range`. The returned curve lives on that
/// padded wind speed axis. A zero standard deviation, or a NaN sum, yields 0.
///
/// # Errors
/// `MissingData` if the turbulence intensity method is selected and
/// `turbulence_intensity` is `None` or NaN.
pub fn smooth_power_curve(
    curve: &Curve,
    params: &SmoothingParams,
    turbulence_intensity: Option<f64>,
) -> CurveResult<Curve> {
    params.validate()?;
    let sigma_of: Box<dyn Fn(f64) -> f64> = match params.standard_deviation_method {
        StandardDeviationMethod::TurbulenceIntensity => {
            let ti = turbulence_intensity
                .filter(|ti| !ti.is_nan())
                .ok_or_else(|| CurveError::MissingData {
                    what: "turbulence intensity must be defined for the \
                           'turbulence_intensity' standard deviation method"
                        .into(),
                })?;
            if ti < 0.0 || ti.is_infinite() {
                return Err(CurveError::InvalidArg {
                    what: format!("turbulence intensity must be non-negative, got {ti}"),
                });
            }
            Box::new(move |v| v * ti)
        }
        StandardDeviationMethod::StaffellPfenninger => Box::new(|v| 0.2 * v + 0.6),
    };

    let (wind_speeds, values) = padded(curve, params.wind_speed_range);
    let range = params.wind_speed_range;
    let bw = params.block_width;
    let blocks = ((2.0 * range + bw) / bw).ceil() as usize;

    let smoothed = wind_speeds
        .iter()
        .map(|&v| {
            let sigma = sigma_of(v);
            if sigma == 0.0 {
                return 0.0;
            }
            let sum: f64 = (0..blocks)
                .map(|k| {
                    let w = v - range + k as f64 * bw;
                    bw * interp(w, &wind_speeds, &values, 0.0, 0.0)
                        * gauss(v - w, sigma, params.mean_gauss)
                })
                .sum();
            if sum.is_nan() { 0.0 } else { sum }
        })
        .collect();
    tracing::debug!(
        method = %params.standard_deviation_method,
        turbulence_intensity,
        points = wind_speeds.len(),
        "power curve smoothed"
    );
    Curve::new(wind_speeds, smoothed)
}

fn padded(curve: &Curve, wind_speed_range: f64) -> (Vec<f64>, Vec<f64>) {
    let last = curve.last_wind_speed();
    let extra = (wind_speed_range / PADDING_STEP).ceil() as usize;
    let mut wind_speeds = curve.wind_speeds().to_vec();
    let mut values = curve.values().to_vec();
    wind_speeds.extend((1..=extra).map(|k| last + k as f64 * PADDING_STEP));
    values.extend(std::iter::repeat_n(0.0, extra));
    (wind_speeds, values)
}
