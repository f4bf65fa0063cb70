//! wf-atmos: weather data and hub-height atmosphere models.
//!
//! Provides:
//! - `WeatherTable`: time series columns tagged by quantity and measurement height
//! - wind speed profiles (logarithmic, Hellman)
//! - temperature gradient and air density (barometric, ideal gas)
//! - linear and logarithmic inter-/extrapolation between two measurement heights
//! - turbulence intensity estimate from roughness length
//!
//! All models operate on `wf_core::Series`, so scalars and time series share
//! one code path.

pub mod density;
pub mod error;
pub mod height_interp;
pub mod temperature;
pub mod turbulence;
pub mod weather;
pub mod wind_speed;

// Re-exports
pub use error::{AtmosError, AtmosResult};
pub use height_interp::{linear_interpolation_extrapolation, logarithmic_interpolation_extrapolation};
pub use turbulence::estimate_turbulence_intensity;
pub use weather::{Quantity, WeatherColumn, WeatherTable};
