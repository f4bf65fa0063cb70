//! Wind turbine definition.

use serde::{Deserialize, Serialize};
use wf_core::units::{Length, Power, in_m, in_w};
use wf_curves::Curve;

use crate::error::{PlantError, PlantResult};
use crate::farm::{FleetEntry, WindTurbineGroup};
use crate::plant::PowerPlantInfo;

/// A single wind turbine type.
///
/// ## Data
///
/// - hub height in m (required)
/// - rotor diameter in m, needed for power coefficient curves
/// - nominal power in W; falls back to the maximum of the power curve
/// - power curve (W) and/or power coefficient curve (cp)
///
/// Curves are supplied by the caller; windflow does not look up turbine
/// libraries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WindTurbineDef", into = "WindTurbineDef")]
pub struct WindTurbine {
    turbine_type: Option<String>,
    hub_height: f64,
    rotor_diameter: Option<f64>,
    nominal_power: Option<f64>,
    power_curve: Option<Curve>,
    power_coefficient_curve: Option<Curve>,
}

#[derive(Serialize, Deserialize)]
struct WindTurbineDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    turbine_type: Option<String>,
    hub_height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rotor_diameter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nominal_power: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    power_curve: Option<Curve>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    power_coefficient_curve: Option<Curve>,
}

impl TryFrom<WindTurbineDef> for WindTurbine {
    type Error = PlantError;

    fn try_from(def: WindTurbineDef) -> PlantResult<Self> {
        let turbine = WindTurbine {
            turbine_type: def.turbine_type,
            hub_height: def.hub_height,
            rotor_diameter: def.rotor_diameter,
            nominal_power: def.nominal_power,
            power_curve: def.power_curve,
            power_coefficient_curve: def.power_coefficient_curve,
        };
        turbine.validate()?;
        if !turbine.has_curves() {
            tracing::warn!(
                turbine = %turbine.label(),
                "wind turbine has neither a power curve nor a power coefficient curve"
            );
        }
        Ok(turbine)
    }
}

impl From<WindTurbine> for WindTurbineDef {
    fn from(t: WindTurbine) -> Self {
        WindTurbineDef {
            turbine_type: t.turbine_type,
            hub_height: t.hub_height,
            rotor_diameter: t.rotor_diameter,
            nominal_power: t.nominal_power,
            power_curve: t.power_curve,
            power_coefficient_curve: t.power_coefficient_curve,
        }
    }
}

fn non_physical(what: impl Into<String>) -> PlantError {
    PlantError::NonPhysical { what: what.into() }
}

impl WindTurbine {
    /// Create a turbine with only a hub height; add data with the `with_*`
    /// methods.
    ///
    /// # Errors
    /// Returns error if the hub height is not positive.
    pub fn new(hub_height: Length) -> PlantResult<Self> {
        let turbine = Self {
            turbine_type: None,
            hub_height: in_m(hub_height),
            rotor_diameter: None,
            nominal_power: None,
            power_curve: None,
            power_coefficient_curve: None,
        };
        turbine.validate()?;
        Ok(turbine)
    }

    pub fn with_turbine_type(mut self, turbine_type: impl Into<String>) -> Self {
        self.turbine_type = Some(turbine_type.into());
        self
    }

    /// # Errors
    /// Returns error if the diameter is not positive or the rotor would
    /// reach the ground.
    pub fn with_rotor_diameter(mut self, rotor_diameter: Length) -> PlantResult<Self> {
        self.rotor_diameter = Some(in_m(rotor_diameter));
        self.validate()?;
        Ok(self)
    }

    pub fn with_nominal_power(mut self, nominal_power: Power) -> PlantResult<Self> {
        self.nominal_power = Some(in_w(nominal_power));
        self.validate()?;
        Ok(self)
    }

    pub fn with_power_curve(mut self, curve: Curve) -> Self {
        self.power_curve = Some(curve);
        self
    }

    pub fn with_power_coefficient_curve(mut self, curve: Curve) -> Self {
        self.power_coefficient_curve = Some(curve);
        self
    }

    pub fn validate(&self) -> PlantResult<()> {
        if !(self.hub_height.is_finite() && self.hub_height > 0.0) {
            return Err(non_physical(format!(
                "hub height must be positive, got {}",
                self.hub_height
            )));
        }
        if let Some(d) = self.rotor_diameter {
            if !(d.is_finite() && d > 0.0) {
                return Err(non_physical(format!("rotor diameter must be positive, got {d}")));
            }
            if self.hub_height <= 0.5 * d {
                return Err(non_physical(format!(
                    "hub height {} m must exceed half the rotor diameter {d} m",
                    self.hub_height
                )));
            }
        }
        if let Some(p) = self.nominal_power {
            if !(p.is_finite() && p > 0.0) {
                return Err(non_physical(format!("nominal power must be positive, got {p}")));
            }
        }
        Ok(())
    }

    pub fn turbine_type(&self) -> Option<&str> {
        self.turbine_type.as_deref()
    }

    pub fn rotor_diameter(&self) -> Option<f64> {
        self.rotor_diameter
    }

    pub fn power_curve(&self) -> Option<&Curve> {
        self.power_curve.as_ref()
    }

    pub fn power_coefficient_curve(&self) -> Option<&Curve> {
        self.power_coefficient_curve.as_ref()
    }

    pub fn has_curves(&self) -> bool {
        self.power_curve.is_some() || self.power_coefficient_curve.is_some()
    }

    /// Human readable identification for messages.
    pub fn label(&self) -> String {
        match &self.turbine_type {
            Some(t) => format!("{t} at {} m", self.hub_height),
            None => format!("wind turbine at {} m", self.hub_height),
        }
    }

    /// Fleet entry of this turbine type.
    ///
    /// Give either the number of turbines or their total capacity; with
    /// neither, a single turbine is assumed.
    ///
    /// # Errors
    /// `InvalidArg` if both are given.
    pub fn to_group(
        &self,
        number_of_turbines: Option<f64>,
        total_capacity: Option<f64>,
    ) -> PlantResult<WindTurbineGroup> {
        let entry = match (number_of_turbines, total_capacity) {
            (Some(_), Some(_)) => {
                return Err(PlantError::InvalidArg {
                    what: format!(
                        "give either number_of_turbines or total_capacity for {}, not both",
                        self.label()
                    ),
                });
            }
            (None, None) => FleetEntry::with_number(self.clone(), 1.0),
            (number_of_turbines, total_capacity) => FleetEntry {
                wind_turbine: self.clone(),
                number_of_turbines,
                total_capacity,
            },
        };
        WindTurbineGroup::resolve(entry)
    }
}

impl PowerPlantInfo for WindTurbine {
    fn name(&self) -> Option<&str> {
        self.turbine_type.as_deref()
    }

    fn nominal_power(&self) -> Option<f64> {
        self.nominal_power
            .or_else(|| self.power_curve.as_ref().map(Curve::max_value))
    }

    fn hub_height(&self) -> f64 {
        self.hub_height
    }
}
