//! Air density at hub height from pressure and hub-height temperature.
//!
//! Both equations shift the reference pressure by 1 hPa per 8 m of height
//! difference before applying the state equation.

use wf_core::Series;
use wf_core::units::constants::{R_DRY_AIR, p0, rho0, t0};
use wf_core::units::{in_k, in_kg_m3, in_pa};

use crate::error::AtmosResult;

/// Pressure at hub height in hPa.
#[inline]
fn hub_pressure_hpa(pressure_pa: f64, pressure_height: f64, hub_height: f64) -> f64 {
    pressure_pa / 100.0 - (hub_height - pressure_height) / 8.0
}

/// Barometric height equation.
///
/// ```text
/// rho = p_hub[hPa] * rho0 * T0 * 100 / (p0 * T_hub)
/// ```
pub fn barometric(
    pressure: &Series,
    pressure_height: f64,
    hub_height: f64,
    temperature_hub: &Series,
) -> AtmosResult<Series> {
    let scale = in_kg_m3(rho0()) * in_k(t0()) * 100.0 / in_pa(p0());
    Ok(pressure.zip_with(temperature_hub, "pressure/temperature", |p, t| {
        hub_pressure_hpa(p, pressure_height, hub_height) * scale / t
    })?)
}

/// Ideal gas equation for dry air, `rho = p_hub[Pa] / (R_s * T_hub)`.
pub fn ideal_gas(
    pressure: &Series,
    pressure_height: f64,
    hub_height: f64,
    temperature_hub: &Series,
) -> AtmosResult<Series> {
    Ok(pressure.zip_with(temperature_hub, "pressure/temperature", |p, t| {
        hub_pressure_hpa(p, pressure_height, hub_height) * 100.0 / (R_DRY_AIR * t)
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_core::{CoreError, ErrorKind};

    use crate::AtmosError;

    #[test]
    fn barometric_reference_point() {
        let rho = barometric(&101_125.0.into(), 0.0, 100.0, &267.0.into()).unwrap();
        assert!((rho.values()[0] - 1.303_053_361_499_916).abs() < 1e-9);
    }

    #[test]
    fn barometric_series() {
        let p = Series::new(vec![101_125.0, 101_000.0]);
        let t = Series::new(vec![267.0, 268.0]);
        let rho = barometric(&p, 0.0, 100.0, &t).unwrap();
        assert!((rho.values()[0] - 1.303_053_36).abs() < 1e-6);
        assert!((rho.values()[1] - 1.296_566_45).abs() < 1e-6);
    }

    #[test]
    fn ideal_gas_reference_point() {
        let rho = ideal_gas(&101_125.0.into(), 0.0, 100.0, &267.0.into()).unwrap();
        assert!((rho.values()[0] - 1.303_094_39).abs() < 1e-6);
    }

    #[test]
    fn mismatched_lengths() {
        let p = Series::new(vec![101_125.0, 101_000.0]);
        let t = Series::new(vec![267.0, 268.0, 269.0]);
        let err = ideal_gas(&p, 0.0, 100.0, &t).unwrap_err();
        assert!(matches!(err, AtmosError::Core(CoreError::LengthMismatch { .. })));
        assert_eq!(err.kind(), ErrorKind::Domain);
    }
}
