//! Power output of a single turbine from hub-height wind speed.
//!
//! Curve evaluation policy: wind speeds below the first tabulated wind speed
//! give 0, wind speeds at or above the last one give the last tabulated value,
//! everything in between is interpolated linearly.

use wf_core::units::constants::rho0;
use wf_core::units::{in_kg_m3, m, rotor_area};
use wf_core::{Series, interp};

use crate::curve::Curve;
use crate::error::{CurveError, CurveResult};

/// Density correction exponent breakpoints (m/s) and values.
const DENSITY_EXPONENT_WIND_SPEEDS: [f64; 2] = [7.5, 12.5];
const DENSITY_EXPONENT_VALUES: [f64; 2] = [1.0 / 3.0, 2.0 / 3.0];

#[inline]
fn evaluate_on(wind_speeds: &[f64], values: &[f64], v: f64) -> f64 {
    match (wind_speeds.last(), values.last()) {
        (Some(&ws_max), Some(&last)) if v >= ws_max => last,
        _ => interp(v, wind_speeds, values, 0.0, 0.0),
    }
}

/// Evaluate `curve` at a single wind speed.
pub fn evaluate(curve: &Curve, wind_speed: f64) -> f64 {
    evaluate_on(curve.wind_speeds(), curve.values(), wind_speed)
}

/// Power output in W from a power curve.
pub fn power_curve(curve: &Curve, wind_speed: &Series) -> Series {
    wind_speed.map(|v| evaluate(curve, v))
}

/// Power output in W from a power coefficient curve.
///
/// ```text
/// P = rho / 2 * pi * (D / 2)^2 * v^3 * cp(v)
/// ```
pub fn power_coefficient_curve(
    cp_curve: &Curve,
    wind_speed: &Series,
    density: &Series,
    rotor_diameter: f64,
) -> CurveResult<Series> {
    let swept_area = rotor_area(m(rotor_diameter)).value;
    Ok(wind_speed.zip_with(density, "wind speed/density", |v, rho| {
        rho / 2.0 * swept_area * v.powi(3) * evaluate(cp_curve, v)
    })?)
}

/// Exponent `p(v)` of the density correction: 1/3 up to 7.5 m/s, 2/3 from
/// 12.5 m/s, linear in between.
pub fn density_correction_exponent(wind_speed: f64) -> f64 {
    wf_core::interp_clamped(wind_speed, &DENSITY_EXPONENT_WIND_SPEEDS, &DENSITY_EXPONENT_VALUES)
}

/// Power output in W from a power curve corrected for air density.
///
/// For each time step the curve's wind speed axis is rescaled,
/// `v_i' = v_i * (rho0 / rho)^p(v_i)`, and the result is evaluated with the
/// usual policy. At `rho == rho0` this is the plain power curve.
///
/// # Errors
/// `TypeMismatch` if no density is supplied.
pub fn density_correct(
    curve: &Curve,
    wind_speed: &Series,
    density: Option<&Series>,
) -> CurveResult<Series> {
    let density = density.ok_or(CurveError::TypeMismatch {
        what: "density correction requires air density at hub height",
    })?;
    let exponents: Vec<f64> = curve
        .wind_speeds()
        .iter()
        .map(|&ws| density_correction_exponent(ws))
        .collect();
    let rho0 = in_kg_m3(rho0());
    Ok(wind_speed.zip_with(density, "wind speed/density", |v, rho| {
        let ratio = rho0 / rho;
        let axis: Vec<f64> = curve
            .wind_speeds()
            .iter()
            .zip(&exponents)
            .map(|(&ws, &p)| ws * ratio.powf(p))
            .collect();
        evaluate_on(&axis, curve.values(), v)
    })?)
}

/// Power output from a power coefficient curve converted to a power curve at
/// reference density, then density corrected.
pub fn density_correct_coefficient(
    cp_curve: &Curve,
    wind_speed: &Series,
    density: Option<&Series>,
    rotor_diameter: f64,
) -> CurveResult<Series> {
    let rho0 = in_kg_m3(rho0());
    let curve = cp_curve.map_values(|ws, cp| {
        rho0 / 8.0 * rotor_diameter.powi(2) * std::f64::consts::PI * ws.powi(3) * cp
    })?;
    density_correct(&curve, wind_speed, density)
}

/// Power output from a power curve, density corrected if requested.
pub fn power_curve_output(
    curve: &Curve,
    wind_speed: &Series,
    density: Option<&Series>,
    density_correction: bool,
) -> CurveResult<Series> {
    if density_correction {
        density_correct(curve, wind_speed, density)
    } else {
        Ok(power_curve(curve, wind_speed))
    }
}
