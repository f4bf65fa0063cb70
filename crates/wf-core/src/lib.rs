//! wf-core: numeric foundation for windflow.
//!
//! Contains:
//! - units (uom SI types + constructors + reference atmosphere constants)
//! - numeric (Real + tolerances + float helpers)
//! - series (time-indexed numeric sequence with scalar broadcast)
//! - interp (1-D piecewise linear interpolation, Gaussian density)
//! - error (shared error types and the error-kind taxonomy)

pub mod error;
pub mod interp;
pub mod numeric;
pub mod series;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult, ErrorKind};
pub use interp::{gauss, interp, interp_clamped};
pub use numeric::*;
pub use series::Series;
pub use units::*;
