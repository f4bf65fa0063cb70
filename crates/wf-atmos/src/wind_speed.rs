//! Wind speed at hub height from a single measurement height.

use wf_core::{Series, ensure_finite};

use crate::error::{AtmosError, AtmosResult};

/// Default Hellman exponent for neutral stability over open terrain.
pub const DEFAULT_HELLMAN_EXPONENT: f64 = 1.0 / 7.0;

/// Fraction of the obstacle height that acts as zero-plane displacement.
pub const DISPLACEMENT_FACTOR: f64 = 0.7;

/// Logarithmic wind profile.
///
/// ```text
/// d     = 0.7 * obstacle_height
/// v_hub = v_ref * ln((h_hub - d) / z0) / ln((h_ref - d) / z0)
/// ```
///
/// # Errors
/// `Domain` if the displacement height exceeds the measurement height; the
/// profile is not defined below it.
pub fn logarithmic_profile(
    wind_speed: &Series,
    wind_speed_height: f64,
    hub_height: f64,
    roughness_length: &Series,
    obstacle_height: f64,
) -> AtmosResult<Series> {
    let displacement = DISPLACEMENT_FACTOR * obstacle_height;
    if displacement > wind_speed_height {
        return Err(AtmosError::Domain {
            what: format!(
                "0.7 * obstacle height ({displacement} m) exceeds wind speed height \
                 ({wind_speed_height} m); logarithmic profile is undefined"
            ),
        });
    }
    Ok(wind_speed.zip_with(roughness_length, "wind speed/roughness length", |v, z0| {
        v * ((hub_height - displacement) / z0).ln() / ((wind_speed_height - displacement) / z0).ln()
    })?)
}

/// Hellman power law `v_hub = v_ref * (h_hub / h_ref)^alpha`.
///
/// Exponent selection: the explicit `hellman_exponent` if given, otherwise
/// `1 / ln(h_hub / z0)` when a roughness length is available, otherwise 1/7.
///
/// # Errors
/// `TypeMismatch` if `hellman_exponent` is not a finite number.
pub fn hellman(
    wind_speed: &Series,
    wind_speed_height: f64,
    hub_height: f64,
    roughness_length: Option<&Series>,
    hellman_exponent: Option<f64>,
) -> AtmosResult<Series> {
    let ratio = hub_height / wind_speed_height;
    match (hellman_exponent, roughness_length) {
        (Some(alpha), _) => {
            ensure_finite(alpha, "hellman exponent").map_err(|_| AtmosError::TypeMismatch {
                what: "hellman exponent must be a finite number",
            })?;
            Ok(wind_speed.map(|v| v * ratio.powf(alpha)))
        }
        (None, Some(z0)) => Ok(wind_speed.zip_with(z0, "wind speed/roughness length", |v, z0| {
            v * ratio.powf(1.0 / (hub_height / z0).ln())
        })?),
        (None, None) => Ok(wind_speed.map(|v| v * ratio.powf(DEFAULT_HELLMAN_EXPONENT))),
    }
}
