//! Common view on turbines, farms and clusters.

use serde::{Deserialize, Serialize};

use crate::cluster::WindTurbineCluster;
use crate::farm::WindFarm;
use crate::turbine::WindTurbine;

/// Data every power plant exposes to the model chain.
pub trait PowerPlantInfo: Send + Sync {
    /// Name or turbine type, if one was given.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Nominal power in W, if known.
    fn nominal_power(&self) -> Option<f64>;

    /// (Mean) hub height in m.
    fn hub_height(&self) -> f64;
}

/// A power plant the model chain can compute output for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PowerPlant {
    Turbine(WindTurbine),
    Farm(WindFarm),
    Cluster(WindTurbineCluster),
}

impl PowerPlant {
    fn info(&self) -> &dyn PowerPlantInfo {
        match self {
            PowerPlant::Turbine(t) => t,
            PowerPlant::Farm(f) => f,
            PowerPlant::Cluster(c) => c,
        }
    }

    pub fn kind_str(&self) -> &'static str {
        match self {
            PowerPlant::Turbine(_) => "turbine",
            PowerPlant::Farm(_) => "wind farm",
            PowerPlant::Cluster(_) => "wind turbine cluster",
        }
    }

    /// Whether the plant's power curve is aggregated from a fleet.
    pub fn is_aggregated(&self) -> bool {
        !matches!(self, PowerPlant::Turbine(_))
    }
}

impl PowerPlantInfo for PowerPlant {
    fn name(&self) -> Option<&str> {
        self.info().name()
    }

    fn nominal_power(&self) -> Option<f64> {
        self.info().nominal_power()
    }

    fn hub_height(&self) -> f64 {
        self.info().hub_height()
    }
}

impl From<WindTurbine> for PowerPlant {
    fn from(t: WindTurbine) -> Self {
        PowerPlant::Turbine(t)
    }
}

impl From<WindFarm> for PowerPlant {
    fn from(f: WindFarm) -> Self {
        PowerPlant::Farm(f)
    }
}

impl From<WindTurbineCluster> for PowerPlant {
    fn from(c: WindTurbineCluster) -> Self {
        PowerPlant::Cluster(c)
    }
}
