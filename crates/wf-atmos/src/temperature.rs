//! Air temperature at hub height.

use wf_core::Series;
use wf_core::units::constants::TEMPERATURE_GRADIENT_K_PER_M;

/// Linear temperature gradient of the standard atmosphere.
///
/// `T_hub = T_ref - 0.0065 * (h_hub - h_ref)`, no bounds applied.
pub fn linear_gradient(temperature: &Series, temperature_height: f64, hub_height: f64) -> Series {
    let delta = TEMPERATURE_GRADIENT_K_PER_M * (hub_height - temperature_height);
    temperature.map(|t| t - delta)
}
