//! wf-plants: wind turbines, wind farms and wind turbine clusters.
//!
//! Every plant exposes nominal power and hub height through
//! [`PowerPlantInfo`]. [`PowerPlant`] tags the three kinds so callers can
//! dispatch on them, and [`FleetAggregator`] turns a farm or cluster into a
//! single representative power curve.

pub mod aggregate;
pub mod cluster;
pub mod error;
pub mod farm;
pub mod plant;
pub mod turbine;

// Re-exports
pub use aggregate::{FleetAggregator, SmoothingOrder, TurbulenceSource, WakeLossesModel};
pub use cluster::WindTurbineCluster;
pub use error::{PlantError, PlantResult};
pub use farm::{FleetEntry, WindFarm, WindTurbineGroup};
pub use plant::{PowerPlant, PowerPlantInfo};
pub use turbine::WindTurbine;
