//! Wind farm: a fleet of turbine types with counts.

use serde::{Deserialize, Serialize};
use wf_curves::Efficiency;

use crate::error::{PlantError, PlantResult};
use crate::plant::PowerPlantInfo;
use crate::turbine::WindTurbine;

/// Tolerance in W when comparing a given total capacity with the derived one.
pub const CAPACITY_TOLERANCE_W: f64 = 1.0;

/// Raw fleet entry as supplied by the caller.
///
/// At least one of `number_of_turbines` and `total_capacity` must be
/// derivable; see [`WindTurbineGroup::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetEntry {
    pub wind_turbine: WindTurbine,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_turbines: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_capacity: Option<f64>,
}

impl FleetEntry {
    pub fn with_number(wind_turbine: WindTurbine, number_of_turbines: f64) -> Self {
        Self {
            wind_turbine,
            number_of_turbines: Some(number_of_turbines),
            total_capacity: None,
        }
    }

    pub fn with_capacity(wind_turbine: WindTurbine, total_capacity: f64) -> Self {
        Self {
            wind_turbine,
            number_of_turbines: None,
            total_capacity: Some(total_capacity),
        }
    }
}

/// Fleet entry with both count and installed capacity resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct WindTurbineGroup {
    turbine: WindTurbine,
    number_of_turbines: f64,
    total_capacity: f64,
}

impl WindTurbineGroup {
    /// Complete a fleet entry.
    ///
    /// - missing count: `total_capacity / nominal_power`
    /// - missing capacity: `number_of_turbines * nominal_power`
    /// - both given but differing by 1 W or more: the capacity is overwritten
    ///   with the derived value and a warning is emitted
    ///
    /// # Errors
    /// `MissingData` if the turbine's nominal power is unknown or neither
    /// value is given; `InvalidArg` for non-positive values.
    pub fn resolve(entry: FleetEntry) -> PlantResult<Self> {
        let FleetEntry {
            wind_turbine,
            number_of_turbines,
            total_capacity,
        } = entry;
        for (what, value) in [
            ("number_of_turbines", number_of_turbines),
            ("total_capacity", total_capacity),
        ] {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(PlantError::InvalidArg {
                        what: format!("{what} of {} must be positive, got {v}", wind_turbine.label()),
                    });
                }
            }
        }
        let nominal_power = wind_turbine.nominal_power().ok_or_else(|| PlantError::MissingData {
            what: format!(
                "nominal power of {} is not set; number of turbines and total capacity \
                 cannot be deduced",
                wind_turbine.label()
            ),
        })?;

        let number_of_turbines = match (number_of_turbines, total_capacity) {
            (Some(n), _) => n,
            (None, Some(cap)) => cap / nominal_power,
            (None, None) => {
                return Err(PlantError::MissingData {
                    what: format!(
                        "give number_of_turbines or total_capacity for {}",
                        wind_turbine.label()
                    ),
                });
            }
        };
        let derived = number_of_turbines * nominal_power;
        let total_capacity = match total_capacity {
            Some(cap) if (cap - derived).abs() >= CAPACITY_TOLERANCE_W => {
                tracing::warn!(
                    turbine = %wind_turbine.label(),
                    given = cap,
                    derived,
                    "total capacity inconsistent with number of turbines; overwritten"
                );
                derived
            }
            Some(cap) => cap,
            None => derived,
        };
        Ok(Self {
            turbine: wind_turbine,
            number_of_turbines,
            total_capacity,
        })
    }

    pub fn turbine(&self) -> &WindTurbine {
        &self.turbine
    }

    pub fn number_of_turbines(&self) -> f64 {
        self.number_of_turbines
    }

    pub fn total_capacity(&self) -> f64 {
        self.total_capacity
    }
}

impl From<WindTurbineGroup> for FleetEntry {
    fn from(g: WindTurbineGroup) -> Self {
        FleetEntry {
            wind_turbine: g.turbine,
            number_of_turbines: Some(g.number_of_turbines),
            total_capacity: Some(g.total_capacity),
        }
    }
}

/// A wind farm.
///
/// `efficiency` is the wind farm efficiency used by the
/// `wind_farm_efficiency` wake losses model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WindFarmDef", into = "WindFarmDef")]
pub struct WindFarm {
    name: Option<String>,
    fleet: Vec<WindTurbineGroup>,
    efficiency: Option<Efficiency>,
}

#[derive(Serialize, Deserialize)]
struct WindFarmDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    wind_turbine_fleet: Vec<FleetEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    efficiency: Option<Efficiency>,
}

impl TryFrom<WindFarmDef> for WindFarm {
    type Error = PlantError;

    fn try_from(def: WindFarmDef) -> PlantResult<Self> {
        WindFarm::new(def.wind_turbine_fleet, def.efficiency, def.name)
    }
}

impl From<WindFarm> for WindFarmDef {
    fn from(f: WindFarm) -> Self {
        WindFarmDef {
            name: f.name,
            wind_turbine_fleet: f.fleet.into_iter().map(FleetEntry::from).collect(),
            efficiency: f.efficiency,
        }
    }
}

impl WindFarm {
    /// # Errors
    /// `MissingData` for an empty fleet, plus any error of
    /// [`WindTurbineGroup::resolve`].
    pub fn new(
        fleet: Vec<FleetEntry>,
        efficiency: Option<Efficiency>,
        name: Option<String>,
    ) -> PlantResult<Self> {
        let fleet = fleet
            .into_iter()
            .map(WindTurbineGroup::resolve)
            .collect::<PlantResult<Vec<_>>>()?;
        Self::from_groups(fleet, efficiency, name)
    }

    pub fn from_groups(
        fleet: Vec<WindTurbineGroup>,
        efficiency: Option<Efficiency>,
        name: Option<String>,
    ) -> PlantResult<Self> {
        if fleet.is_empty() {
            return Err(PlantError::MissingData {
                what: "a wind farm needs at least one fleet entry".into(),
            });
        }
        Ok(Self {
            name,
            fleet,
            efficiency,
        })
    }

    pub fn fleet(&self) -> &[WindTurbineGroup] {
        &self.fleet
    }

    pub fn efficiency(&self) -> Option<&Efficiency> {
        self.efficiency.as_ref()
    }

    pub fn label(&self) -> String {
        match &self.name {
            Some(n) => format!("wind farm {n}"),
            None => format!("wind farm with {} turbine types", self.fleet.len()),
        }
    }

    /// Sum of installed capacity in W.
    pub fn installed_capacity(&self) -> f64 {
        self.fleet.iter().map(WindTurbineGroup::total_capacity).sum()
    }

    /// Capacity weighted logarithmic mean of the hub heights,
    /// `exp(sum(ln(h_k) * P_k) / sum(P_k))`.
    pub fn mean_hub_height(&self) -> f64 {
        let weighted: f64 = self
            .fleet
            .iter()
            .map(|g| g.turbine().hub_height().ln() * g.total_capacity())
            .sum();
        (weighted / self.installed_capacity()).exp()
    }
}

impl PowerPlantInfo for WindFarm {
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

#[cfg(test)]
mod tests {
    use super::*;
    use wf_core::ErrorKind;
    use wf_core::units::{m, w};
    use wf_curves::Curve;

    fn turbine(hub: f64, nominal: f64) -> WindTurbine {
        WindTurbine::new(m(hub))
            .unwrap()
            .with_nominal_power(w(nominal))
            .unwrap()
            .with_power_curve(Curve::from_points(&[(0.0, 0.0), (10.0, nominal)]).unwrap())
    }

    #[test]
    fn mean_hub_height_weights_by_capacity() {
        let farm = WindFarm::new(
            vec![
                FleetEntry::with_number(turbine(100.0, 4.2e6), 2.0),
                FleetEntry::with_capacity(turbine(90.0, 3.0e6), 3.0e6),
            ],
            None,
            Some("test".into()),
        )
        .unwrap();
        assert!((farm.mean_hub_height() - 97.265).abs() < 1e-3);
        assert_eq!(farm.nominal_power(), Some(11.4e6));
        assert_eq!(farm.fleet()[1].number_of_turbines(), 1.0);
        assert_eq!(farm.name(), Some("test"));
    }

    #[test]
    fn inconsistent_capacity_is_overwritten() {
        let entry = FleetEntry {
            wind_turbine: turbine(100.0, 3.0e6),
            number_of_turbines: Some(2.0),
            total_capacity: Some(7.0e6),
        };
        let g = WindTurbineGroup::resolve(entry).unwrap();
        assert_eq!(g.total_capacity(), 6.0e6);

        let entry = FleetEntry {
            wind_turbine: turbine(100.0, 3.0e6),
            number_of_turbines: Some(2.0),
            total_capacity: Some(6.0e6 + 0.5),
        };
        assert_eq!(WindTurbineGroup::resolve(entry).unwrap().total_capacity(), 6.0e6 + 0.5);
    }

    #[test]
    fn undeducible_entries() {
        let bare = WindTurbine::new(m(100.0)).unwrap();
        let err = WindTurbineGroup::resolve(FleetEntry::with_capacity(bare.clone(), 6.0e6))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingData);
        let err = WindTurbineGroup::resolve(FleetEntry::with_number(bare, 2.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingData);

        let none = FleetEntry {
            wind_turbine: turbine(100.0, 3.0e6),
            number_of_turbines: None,
            total_capacity: None,
        };
        assert!(WindTurbineGroup::resolve(none).is_err());
        assert!(WindFarm::new(vec![], None, None).is_err());
        assert!(
            WindTurbineGroup::resolve(FleetEntry::with_number(turbine(100.0, 3.0e6), -1.0))
                .is_err()
        );
    }

    #[test]
    fn yaml_farm() {
        let yaml = r#"
name: north
efficiency: 0.9
wind_turbine_fleet:
  - wind_turbine:
      hub_height: 100.0
      nominal_power: 3000000.0
      power_curve: { wind_speed: [0.0, 10.0], value: [0.0, 3000000.0] }
    number_of_turbines: 3
"#;
        let farm: WindFarm = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(farm.installed_capacity(), 9.0e6);
        assert_eq!(farm.efficiency(), Some(&Efficiency::Constant(0.9)));
    }
}
