//! Wind speed indexed curve.

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// Ordered `(wind_speed, value)` table.
///
/// Invariants, checked on construction and deserialization:
/// - at least two points, wind speed and value columns of equal length
/// - all entries finite
/// - wind speeds non-negative and strictly increasing
/// - values non-negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurveDef", into = "CurveDef")]
pub struct Curve {
    wind_speed: Vec<f64>,
    value: Vec<f64>,
}

#[derive(Serialize, Deserialize)]
struct CurveDef {
    wind_speed: Vec<f64>,
    value: Vec<f64>,
}

impl TryFrom<CurveDef> for Curve {
    type Error = CurveError;

    fn try_from(def: CurveDef) -> CurveResult<Self> {
        Curve::new(def.wind_speed, def.value)
    }
}

impl From<Curve> for CurveDef {
    fn from(c: Curve) -> Self {
        CurveDef {
            wind_speed: c.wind_speed,
            value: c.value,
        }
    }
}

fn invalid(what: impl Into<String>) -> CurveError {
    CurveError::InvalidCurve { what: what.into() }
}

impl Curve {
    pub fn new(wind_speed: Vec<f64>, value: Vec<f64>) -> CurveResult<Self> {
        if wind_speed.len() != value.len() {
            return Err(invalid(format!(
                "{} wind speeds but {} values",
                wind_speed.len(),
                value.len()
            )));
        }
        if wind_speed.len() < 2 {
            return Err(invalid("a curve needs at least two points"));
        }
        for (&ws, &v) in wind_speed.iter().zip(&value) {
            if !ws.is_finite() || !v.is_finite() {
                return Err(invalid(format!("non-finite point ({ws}, {v})")));
            }
            if ws < 0.0 {
                return Err(invalid(format!("negative wind speed {ws}")));
            }
            if v < 0.0 {
                return Err(invalid(format!("negative value {v} at {ws} m/s")));
            }
        }
        if let Some(pair) = wind_speed.windows(2).find(|p| p[1] <= p[0]) {
            return Err(invalid(format!(
                "wind speeds must be strictly increasing ({} then {})",
                pair[0], pair[1]
            )));
        }
        Ok(Self { wind_speed, value })
    }

    pub fn from_points(points: &[(f64, f64)]) -> CurveResult<Self> {
        let (wind_speed, value) = points.iter().copied().unzip();
        Self::new(wind_speed, value)
    }

    pub fn wind_speeds(&self) -> &[f64] {
        &self.wind_speed
    }

    pub fn values(&self) -> &[f64] {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.wind_speed.len()
    }

    /// Always false; a curve holds at least two points.
    pub fn is_empty(&self) -> bool {
        self.wind_speed.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.wind_speed.iter().copied().zip(self.value.iter().copied())
    }

    pub fn first_wind_speed(&self) -> f64 {
        self.wind_speed[0]
    }

    pub fn last_wind_speed(&self) -> f64 {
        self.wind_speed[self.wind_speed.len() - 1]
    }

    pub fn last_value(&self) -> f64 {
        self.value[self.value.len() - 1]
    }

    pub fn max_value(&self) -> f64 {
        self.value.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// New curve on the same wind speeds with transformed values.
    pub fn map_values(&self, f: impl Fn(f64, f64) -> f64) -> CurveResult<Curve> {
        let value = self.points().map(|(ws, v)| f(ws, v)).collect();
        Curve::new(self.wind_speed.clone(), value)
    }
}
