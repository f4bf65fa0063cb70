//! wf-curves: power curves and the operations applied to them.
//!
//! Provides:
//! - `Curve`: validated wind speed → value table (power in W or cp)
//! - power output from a power curve, a power coefficient curve, or a
//!   density corrected power curve
//! - Gaussian power curve smoothing
//! - wake losses, speed based (wind efficiency curves) and curve based
//!   (wind farm efficiency)
//! - `EfficiencyRegistry` of named wind efficiency curves
//!
//! Curves are never mutated in place; every transformation returns a new one.

pub mod curve;
pub mod efficiency_curves;
pub mod error;
pub mod power_output;
pub mod smoothing;
pub mod wake_losses;

// Re-exports
pub use curve::Curve;
pub use efficiency_curves::EfficiencyRegistry;
pub use error::{CurveError, CurveResult};
pub use smoothing::{SmoothingParams, StandardDeviationMethod, smooth_power_curve};
pub use wake_losses::{Efficiency, apply_to_power_curve, reduce_wind_speed};
