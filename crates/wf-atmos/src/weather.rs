//! Weather table: time series keyed by quantity and measurement height.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wf_core::{Series, Tolerances, nearly_equal};

use crate::error::{AtmosError, AtmosResult};

/// Physical quantity carried by a weather column.
///
/// Units are fixed: m/s, K, Pa, m, dimensionless, kg/m³.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    WindSpeed,
    Temperature,
    Pressure,
    RoughnessLength,
    TurbulenceIntensity,
    Density,
}

impl Quantity {
    pub const ALL: [Quantity; 6] = [
        Quantity::WindSpeed,
        Quantity::Temperature,
        Quantity::Pressure,
        Quantity::RoughnessLength,
        Quantity::TurbulenceIntensity,
        Quantity::Density,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quantity::WindSpeed => "wind_speed",
            Quantity::Temperature => "temperature",
            Quantity::Pressure => "pressure",
            Quantity::RoughnessLength => "roughness_length",
            Quantity::TurbulenceIntensity => "turbulence_intensity",
            Quantity::Density => "density",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quantity {
    type Err = AtmosError;

    fn from_str(s: &str) -> AtmosResult<Self> {
        Quantity::ALL
            .into_iter()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| AtmosError::UnknownQuantity { name: s.to_string() })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherColumn {
    pub quantity: Quantity,
    /// Measurement height in m.
    pub height: f64,
    pub data: Series,
}

/// Column store of weather time series.
///
/// All columns share one row count. Several heights per quantity are allowed;
/// a `(quantity, height)` pair appears at most once.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "WeatherTableDef", into = "WeatherTableDef")]
pub struct WeatherTable {
    index: Option<Vec<DateTime<Utc>>>,
    columns: Vec<WeatherColumn>,
}

#[derive(Serialize, Deserialize)]
struct WeatherTableDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<Vec<DateTime<Utc>>>,
    #[serde(default)]
    columns: Vec<WeatherColumn>,
}

impl TryFrom<WeatherTableDef> for WeatherTable {
    type Error = AtmosError;

    fn try_from(def: WeatherTableDef) -> AtmosResult<Self> {
        let mut table = WeatherTable {
            index: def.index,
            columns: Vec::with_capacity(def.columns.len()),
        };
        for col in def.columns {
            table.push(col.quantity, col.height, col.data)?;
        }
        Ok(table)
    }
}

impl From<WeatherTable> for WeatherTableDef {
    fn from(t: WeatherTable) -> Self {
        WeatherTableDef {
            index: t.index,
            columns: t.columns,
        }
    }
}

impl WeatherTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`WeatherTable::push`].
    pub fn with_column(
        mut self,
        quantity: Quantity,
        height: f64,
        data: impl Into<Series>,
    ) -> AtmosResult<Self> {
        self.push(quantity, height, data)?;
        Ok(self)
    }

    /// Add a column. NaN values are accepted with a warning.
    pub fn push(
        &mut self,
        quantity: Quantity,
        height: f64,
        data: impl Into<Series>,
    ) -> AtmosResult<()> {
        let data: Series = data.into();
        if !height.is_finite() {
            return Err(AtmosError::InvalidArg {
                what: format!("{quantity} column height must be finite, got {height}"),
            });
        }
        if data.is_empty() {
            return Err(AtmosError::InvalidArg {
                what: format!("{quantity} column at {height} m is empty"),
            });
        }
        if let Some(rows) = self.rows() {
            if rows != data.len() {
                return Err(AtmosError::InvalidArg {
                    what: format!(
                        "{quantity} column at {height} m has {} rows, table has {rows}",
                        data.len()
                    ),
                });
            }
        }
        if self.at_height(quantity, height).is_some() {
            return Err(AtmosError::InvalidArg {
                what: format!("duplicate {quantity} column at {height} m"),
            });
        }
        if data.has_nan() {
            tracing::warn!(
                %quantity,
                height,
                "weather column contains NaN values; results at those time steps will be NaN"
            );
        }
        // Column data carries the table index so model outputs keep it.
        let data = match &self.index {
            Some(ix) => data.reindexed(Some(ix.clone()))?,
            None => data,
        };
        self.columns.push(WeatherColumn {
            quantity,
            height,
            data,
        });
        Ok(())
    }

    /// Number of rows, `None` while the table has neither index nor columns.
    pub fn rows(&self) -> Option<usize> {
        self.index
            .as_ref()
            .map(Vec::len)
            .or_else(|| self.columns.first().map(|c| c.data.len()))
    }

    pub fn index(&self) -> Option<&[DateTime<Utc>]> {
        self.index.as_deref()
    }

    pub fn has(&self, quantity: Quantity) -> bool {
        self.columns.iter().any(|c| c.quantity == quantity)
    }

    /// Columns of one quantity in insertion order.
    pub fn columns(&self, quantity: Quantity) -> impl Iterator<Item = &WeatherColumn> {
        self.columns.iter().filter(move |c| c.quantity == quantity)
    }

    pub fn heights(&self, quantity: Quantity) -> Vec<f64> {
        self.columns(quantity).map(|c| c.height).collect()
    }

    /// Column measured at `height`, if any.
    ///
    /// Heights match within floating point tolerance.
    pub fn at_height(&self, quantity: Quantity, height: f64) -> Option<&Series> {
        self.columns(quantity)
            .find(|c| nearly_equal(c.height, height, Tolerances::default()))
            .map(|c| &c.data)
    }

    /// First column of a quantity.
    pub fn first(&self, quantity: Quantity) -> AtmosResult<&WeatherColumn> {
        self.columns(quantity)
            .next()
            .ok_or_else(|| AtmosError::MissingData {
                quantity,
                what: "no column in weather table".into(),
            })
    }

    /// Column whose height is numerically closest to `target`.
    ///
    /// Ties go to the column inserted first.
    pub fn closest(&self, quantity: Quantity, target: f64) -> AtmosResult<&WeatherColumn> {
        self.by_distance(quantity, target)
            .into_iter()
            .next()
            .ok_or_else(|| AtmosError::MissingData {
                quantity,
                what: "no column in weather table".into(),
            })
    }

    /// The two columns closest to `target`, nearest first.
    ///
    /// They need not bracket `target`.
    pub fn two_closest(
        &self,
        quantity: Quantity,
        target: f64,
    ) -> AtmosResult<(&WeatherColumn, &WeatherColumn)> {
        let sorted = self.by_distance(quantity, target);
        match sorted.as_slice() {
            [first, second, ..] => Ok((*first, *second)),
            _ => Err(AtmosError::MissingData {
                quantity,
                what: format!(
                    "inter-/extrapolation needs at least two heights, found {}",
                    sorted.len()
                ),
            }),
        }
    }

    fn by_distance(&self, quantity: Quantity, target: f64) -> Vec<&WeatherColumn> {
        let mut cols: Vec<&WeatherColumn> = self.columns(quantity).collect();
        // sort_by is stable, so equal distances keep insertion order
        cols.sort_by(|a, b| (a.height - target).abs().total_cmp(&(b.height - target).abs()));
        cols
    }
}
