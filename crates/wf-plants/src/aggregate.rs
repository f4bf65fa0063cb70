//! Aggregation of turbine power curves into wind farm and cluster power curves.
//!
//! ## Algorithm
//!
//! 1. Per fleet entry: smooth the turbine curve (turbine order smoothing) or
//!    pad it with zeros, `(0, 0)` in front if it does not start at 0 m/s and
//!    `(last + 0.5, 0)` behind if it does not end at 0 W.
//! 2. Join all curves on the union of their wind speeds. Each curve
//!    contributes 0 before its first point, linear interpolation inside,
//!    and its last value after its last point. Contributions are scaled by
//!    the number of turbines and summed in fleet order.
//! 3. Wind farm order smoothing of the sum.
//! 4. Wind farm efficiency, if that wake losses model is selected.
//!
//! A cluster aggregates every farm this way and sums the farm curves.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use wf_atmos::estimate_turbulence_intensity;
use wf_core::interp;
use wf_curves::{Curve, Efficiency, SmoothingParams, apply_to_power_curve, smooth_power_curve};

use crate::cluster::WindTurbineCluster;
use crate::error::{PlantError, PlantResult};
use crate::farm::{WindFarm, WindTurbineGroup};
use crate::plant::{PowerPlant, PowerPlantInfo};

/// Wind speed offset of the trailing zero point added to open-ended curves (m/s).
pub const TAIL_PADDING: f64 = 0.5;

/// Stage at which power curves are smoothed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingOrder {
    /// Smooth every turbine curve before aggregation.
    TurbinePowerCurves,
    /// Smooth the aggregated curve.
    #[default]
    WindFarmPowerCurves,
}

impl SmoothingOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SmoothingOrder::TurbinePowerCurves => "turbine_power_curves",
            SmoothingOrder::WindFarmPowerCurves => "wind_farm_power_curves",
        }
    }
}

impl fmt::Display for SmoothingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SmoothingOrder {
    type Err = PlantError;

    fn from_str(s: &str) -> PlantResult<Self> {
        match s {
            "turbine_power_curves" => Ok(SmoothingOrder::TurbinePowerCurves),
            "wind_farm_power_curves" => Ok(SmoothingOrder::WindFarmPowerCurves),
            other => Err(PlantError::InvalidArg {
                what: format!(
                    "'{other}' is not a valid smoothing order; use 'turbine_power_curves' \
                     or 'wind_farm_power_curves'"
                ),
            }),
        }
    }
}

/// Wake losses handling for aggregated plants.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WakeLossesModel {
    /// No wake losses.
    #[default]
    None,
    /// Reduce the aggregated power curve by the farm's efficiency.
    WindFarmEfficiency,
    /// Reduce hub-height wind speed by the named wind efficiency curve.
    WindEfficiencyCurve(String),
}

impl fmt::Display for WakeLossesModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WakeLossesModel::None => f.write_str("none"),
            WakeLossesModel::WindFarmEfficiency => f.write_str("wind_farm_efficiency"),
            WakeLossesModel::WindEfficiencyCurve(name) => f.write_str(name),
        }
    }
}

/// Where the turbulence intensity for smoothing comes from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TurbulenceSource {
    /// Measured turbulence intensity.
    Intensity(f64),
    /// Estimated per hub height as `1 / ln(h / z0)`.
    RoughnessLength(f64),
    #[default]
    Unavailable,
}

impl TurbulenceSource {
    pub fn at_height(&self, hub_height: f64) -> Option<f64> {
        match *self {
            TurbulenceSource::Intensity(ti) => Some(ti),
            TurbulenceSource::RoughnessLength(z0) => {
                Some(estimate_turbulence_intensity(hub_height, z0))
            }
            TurbulenceSource::Unavailable => None,
        }
    }
}

/// Builds representative power curves for farms and clusters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FleetAggregator {
    pub wake_losses_model: WakeLossesModel,
    pub smoothing: bool,
    pub smoothing_order: SmoothingOrder,
    pub smoothing_params: SmoothingParams,
    pub turbulence: TurbulenceSource,
}

impl FleetAggregator {
    /// Power curve of any plant. A turbine's own curve is returned unchanged.
    ///
    /// # Errors
    /// `MissingData` if a turbine lacks a power curve.
    pub fn power_curve(&self, plant: &PowerPlant) -> PlantResult<Curve> {
        match plant {
            PowerPlant::Turbine(t) => t.power_curve().cloned().ok_or_else(|| {
                PlantError::MissingData {
                    what: format!("power curve of {} is missing", t.label()),
                }
            }),
            PowerPlant::Farm(farm) => self.farm_power_curve(farm),
            PowerPlant::Cluster(cluster) => self.cluster_power_curve(cluster),
        }
    }

    pub fn farm_power_curve(&self, farm: &WindFarm) -> PlantResult<Curve> {
        let efficiency = match self.wake_losses_model {
            WakeLossesModel::WindFarmEfficiency => {
                Some(farm.efficiency().ok_or_else(|| PlantError::MissingData {
                    what: format!(
                        "wind farm efficiency of {} is needed for the \
                         'wind_farm_efficiency' wake losses model",
                        farm.label()
                    ),
                })?)
            }
            _ => None,
        };
        self.aggregate(farm.fleet(), efficiency, farm.hub_height())
    }

    pub fn cluster_power_curve(&self, cluster: &WindTurbineCluster) -> PlantResult<Curve> {
        let farm_curves = cluster
            .wind_farms()
            .iter()
            .map(|farm| -> PlantResult<(Curve, f64)> {
                Ok((self.farm_power_curve(farm)?, 1.0))
            })
            .collect::<PlantResult<Vec<_>>>()?;
        sum_curves(&farm_curves)
    }

    /// Aggregate a fleet into one power curve.
    ///
    /// `hub_height` is the (mean) hub height of the fleet, used for the
    /// turbulence intensity estimate of wind farm order smoothing.
    pub fn aggregate(
        &self,
        fleet: &[WindTurbineGroup],
        farm_efficiency: Option<&Efficiency>,
        hub_height: f64,
    ) -> PlantResult<Curve> {
        let prepared = fleet
            .par_iter()
            .map(|group| -> PlantResult<(Curve, f64)> {
                Ok((self.prepare(group)?, group.number_of_turbines()))
            })
            .collect::<PlantResult<Vec<_>>>()?;
        let mut curve = sum_curves(&prepared)?;

        if self.smoothing && self.smoothing_order == SmoothingOrder::WindFarmPowerCurves {
            curve = smooth_power_curve(
                &curve,
                &self.smoothing_params,
                self.turbulence.at_height(hub_height),
            )?;
        }
        if let Some(efficiency) = farm_efficiency {
            curve = apply_to_power_curve(&curve, efficiency)?;
        }
        Ok(curve)
    }

    fn prepare(&self, group: &WindTurbineGroup) -> PlantResult<Curve> {
        let turbine = group.turbine();
        let curve = turbine.power_curve().ok_or_else(|| PlantError::MissingData {
            what: format!(
                "aggregated power curves need a power curve for every turbine, {} has none",
                turbine.label()
            ),
        })?;
        if self.smoothing && self.smoothing_order == SmoothingOrder::TurbinePowerCurves {
            Ok(smooth_power_curve(
                curve,
                &self.smoothing_params,
                self.turbulence.at_height(turbine.hub_height()),
            )?)
        } else {
            pad_with_zeros(curve)
        }
    }
}

/// Close a curve with zero power at both ends.
pub fn pad_with_zeros(curve: &Curve) -> PlantResult<Curve> {
    let mut points: Vec<(f64, f64)> = curve.points().collect();
    if curve.first_wind_speed() != 0.0 {
        points.insert(0, (0.0, 0.0));
    }
    if curve.last_value() != 0.0 {
        points.push((curve.last_wind_speed() + TAIL_PADDING, 0.0));
    }
    Ok(Curve::from_points(&points)?)
}

/// Weighted sum of curves on the union of their wind speeds.
pub fn sum_curves(curves: &[(Curve, f64)]) -> PlantResult<Curve> {
    let mut grid: Vec<f64> = curves
        .iter()
        .flat_map(|(c, _)| c.wind_speeds().iter().copied())
        .collect();
    grid.sort_by(f64::total_cmp);
    grid.dedup();

    let values = grid
        .iter()
        .map(|&ws| {
            curves
                .iter()
                .map(|(c, weight)| {
                    if ws < c.first_wind_speed() {
                        0.0
                    } else {
                        weight * interp(ws, c.wind_speeds(), c.values(), 0.0, c.last_value())
                    }
                })
                .sum()
        })
        .collect();
    Ok(Curve::new(grid, values)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::farm::FleetEntry;
    use crate::turbine::WindTurbine;
    use wf_core::ErrorKind;
    use wf_core::units::{m, w};
    use wf_curves::StandardDeviationMethod;
    use wf_curves::power_output::evaluate;

    fn turbine(hub: f64, points: &[(f64, f64)]) -> WindTurbine {
        let curve = Curve::from_points(points).unwrap();
        WindTurbine::new(m(hub))
            .unwrap()
            .with_nominal_power(w(curve.max_value()))
            .unwrap()
            .with_power_curve(curve)
    }

    fn farm(entries: Vec<FleetEntry>, efficiency: Option<Efficiency>) -> WindFarm {
        WindFarm::new(entries, efficiency, None).unwrap()
    }

    #[test]
    fn three_identical_turbines() {
        let t = turbine(100.0, &[(0.0, 0.0), (10.0, 3000.0)]);
        let f = farm(vec![FleetEntry::with_number(t, 3.0)], None);
        let curve = FleetAggregator::default().farm_power_curve(&f).unwrap();
        assert_eq!(evaluate(&curve, 10.0), 9000.0);
        // zero tail appended because the curve ends at rated power
        assert_eq!(curve.wind_speeds(), &[0.0, 10.0, 10.5]);
    }

    #[test]
    fn single_turbine_reproduces_padded_curve() {
        let t = turbine(100.0, &[(3.0, 0.0), (10.0, 2000.0), (25.0, 2000.0)]);
        let padded = pad_with_zeros(t.power_curve().unwrap()).unwrap();
        let f = farm(vec![FleetEntry::with_number(t, 1.0)], None);
        let curve = FleetAggregator::default().farm_power_curve(&f).unwrap();
        assert_eq!(curve, padded);
        assert_eq!(curve.wind_speeds(), &[0.0, 3.0, 10.0, 25.0, 25.5]);
    }

    #[test]
    fn union_grid_interpolates_and_holds() {
        let a = turbine(100.0, &[(0.0, 0.0), (4.0, 100.0), (8.0, 500.0), (12.0, 0.0)]);
        let b = turbine(100.0, &[(2.0, 0.0), (6.0, 300.0), (10.0, 0.0)]);
        let f = farm(
            vec![FleetEntry::with_number(a, 2.0), FleetEntry::with_number(b, 1.0)],
            None,
        );
        let curve = FleetAggregator::default().farm_power_curve(&f).unwrap();
        // b is padded with (0, 0) in front
        assert_eq!(curve.wind_speeds(), &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0]);
        let expected = [0.0, 100.0, 200.0 + 150.0, 600.0 + 300.0, 1000.0 + 150.0, 500.0, 0.0];
        for (got, want) in curve.values().iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{got} vs {want}");
        }
    }

    #[test]
    fn later_starting_curve_contributes_zero_before_start() {
        let a = Curve::from_points(&[(0.0, 0.0), (10.0, 1000.0)]).unwrap();
        let b = Curve::from_points(&[(5.0, 200.0), (10.0, 400.0)]).unwrap();
        let sum = sum_curves(&[(a, 1.0), (b, 1.0)]).unwrap();
        assert_eq!(sum.wind_speeds(), &[0.0, 5.0, 10.0]);
        assert_eq!(sum.values(), &[0.0, 700.0, 1400.0]);
    }

    #[test]
    fn wind_farm_efficiency() {
        let t = turbine(100.0, &[(0.0, 0.0), (10.0, 3000.0), (20.0, 0.0)]);
        let agg = FleetAggregator {
            wake_losses_model: WakeLossesModel::WindFarmEfficiency,
            ..Default::default()
        };
        let with = farm(vec![FleetEntry::with_number(t.clone(), 2.0)], Some(0.9.into()));
        let curve = agg.farm_power_curve(&with).unwrap();
        assert!((evaluate(&curve, 10.0) - 5400.0).abs() < 1e-9);

        let without = farm(vec![FleetEntry::with_number(t, 2.0)], None);
        let err = agg.farm_power_curve(&without).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingData);
    }

    #[test]
    fn smoothing_needs_turbulence() {
        let t = turbine(100.0, &[(0.0, 0.0), (10.0, 3000.0), (20.0, 0.0)]);
        let f = farm(vec![FleetEntry::with_number(t, 1.0)], None);
        let mut agg = FleetAggregator {
            smoothing: true,
            ..Default::default()
        };
        let err = agg.farm_power_curve(&f).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingData);

        agg.turbulence = TurbulenceSource::RoughnessLength(0.15);
        let smoothed = agg.farm_power_curve(&f).unwrap();
        assert!(smoothed.max_value() < 3000.0);

        agg.smoothing_order = SmoothingOrder::TurbinePowerCurves;
        agg.smoothing_params.standard_deviation_method = StandardDeviationMethod::StaffellPfenninger;
        agg.turbulence = TurbulenceSource::Unavailable;
        assert!(agg.farm_power_curve(&f).is_ok());
    }

    #[test]
    fn missing_power_curve() {
        let bare = WindTurbine::new(m(100.0))
            .unwrap()
            .with_nominal_power(w(3.0e6))
            .unwrap();
        let f = farm(vec![FleetEntry::with_number(bare, 1.0)], None);
        let err = FleetAggregator::default().farm_power_curve(&f).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingData);
    }

    #[test]
    fn cluster_sums_farms() {
        let t = turbine(100.0, &[(0.0, 0.0), (10.0, 3000.0), (20.0, 0.0)]);
        let f1 = farm(vec![FleetEntry::with_number(t.clone(), 3.0)], None);
        let f2 = farm(vec![FleetEntry::with_number(t, 1.0)], None);
        let cluster = WindTurbineCluster::new(vec![f1, f2], None).unwrap();
        let curve = FleetAggregator::default()
            .power_curve(&PowerPlant::Cluster(cluster))
            .unwrap();
        assert_eq!(evaluate(&curve, 10.0), 12_000.0);
    }

    #[test]
    fn smoothing_order_names() {
        assert_eq!(
            "turbine_power_curves".parse::<SmoothingOrder>().unwrap(),
            SmoothingOrder::TurbinePowerCurves
        );
        let err = "farm_first".parse::<SmoothingOrder>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
