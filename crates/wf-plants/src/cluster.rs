//! Wind turbine cluster: a group of wind farms, e.g. all farms in one grid region.

use serde::{Deserialize, Serialize};

use crate::error::{PlantError, PlantResult};
use crate::farm::WindFarm;
use crate::plant::PowerPlantInfo;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WindTurbineClusterDef", into = "WindTurbineClusterDef")]
pub struct WindTurbineCluster {
    name: Option<String>,
    wind_farms: Vec<WindFarm>,
}

#[derive(Serialize, Deserialize)]
struct WindTurbineClusterDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    wind_farms: Vec<WindFarm>,
}

impl TryFrom<WindTurbineClusterDef> for WindTurbineCluster {
    type Error = PlantError;

    fn try_from(def: WindTurbineClusterDef) -> PlantResult<Self> {
        WindTurbineCluster::new(def.wind_farms, def.name)
    }
}

impl From<WindTurbineCluster> for WindTurbineClusterDef {
    fn from(c: WindTurbineCluster) -> Self {
        WindTurbineClusterDef {
            name: c.name,
            wind_farms: c.wind_farms,
        }
    }
}

impl WindTurbineCluster {
    pub fn new(wind_farms: Vec<WindFarm>, name: Option<String>) -> PlantResult<Self> {
        if wind_farms.is_empty() {
            return Err(PlantError::MissingData {
                what: "a wind turbine cluster needs at least one wind farm".into(),
            });
        }
        Ok(Self { name, wind_farms })
    }

    pub fn wind_farms(&self) -> &[WindFarm] {
        &self.wind_farms
    }

    pub fn installed_capacity(&self) -> f64 {
        self.wind_farms.iter().map(WindFarm::installed_capacity).sum()
    }

    /// Logarithmic mean of the farms' mean hub heights, weighted by farm
    /// nominal power.
    pub fn mean_hub_height(&self) -> f64 {
        let weighted: f64 = self
            .wind_farms
            .iter()
            .map(|f| f.mean_hub_height().ln() * f.installed_capacity())
            .sum();
        (weighted / self.installed_capacity()).exp()
    }
}

impl PowerPlantInfo for WindTurbineCluster {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn nominal_power(&self) -> Option<f64> {
        Some(self.installed_capacity())
    }

    fn hub_height(&self) -> f64 {
        self.mean_hub_height()
    }
}
