//! Ordered numeric sequence with an optional time index.
//!
//! Every physical formula in windflow operates on `Series`. A length-1 series
//! acts as a scalar and broadcasts against series of any length.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "SeriesDef", into = "SeriesDef")]
pub struct Series {
    index: Option<Vec<DateTime<Utc>>>,
    values: Vec<Real>,
}

#[derive(Serialize, Deserialize)]
struct SeriesDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<Vec<DateTime<Utc>>>,
    values: Vec<Real>,
}

impl TryFrom<SeriesDef> for Series {
    type Error = CoreError;

    fn try_from(def: SeriesDef) -> CoreResult<Self> {
        match def.index {
            Some(index) => Series::with_index(index, def.values),
            None => Ok(Series::new(def.values)),
        }
    }
}

impl From<Series> for SeriesDef {
    fn from(s: Series) -> Self {
        SeriesDef {
            index: s.index,
            values: s.values,
        }
    }
}

impl Series {
    pub fn new(values: Vec<Real>) -> Self {
        Self {
            index: None,
            values,
        }
    }

    pub fn scalar(value: Real) -> Self {
        Self::new(vec![value])
    }

    /// Create a time-indexed series. Index and values must have equal length.
    pub fn with_index(index: Vec<DateTime<Utc>>, values: Vec<Real>) -> CoreResult<Self> {
        if index.len() != values.len() {
            return Err(CoreError::LengthMismatch {
                what: "series index/values",
                left: index.len(),
                right: values.len(),
            });
        }
        Ok(Self {
            index: Some(index),
            values,
        })
    }

    pub fn index(&self) -> Option<&[DateTime<Utc>]> {
        self.index.as_deref()
    }

    pub fn values(&self) -> &[Real] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_scalar(&self) -> bool {
        self.values.len() == 1
    }

    pub fn iter(&self) -> impl Iterator<Item = Real> + '_ {
        self.values.iter().copied()
    }

    /// Value at position `i`, broadcasting scalars.
    #[inline]
    fn at(&self, i: usize) -> Real {
        if self.is_scalar() {
            self.values[0]
        } else {
            self.values[i]
        }
    }

    pub fn has_nan(&self) -> bool {
        self.values.iter().any(|v| v.is_nan())
    }

    /// Arithmetic mean over the non-NaN values, `None` if there are none.
    pub fn mean(&self) -> Option<Real> {
        let (sum, n) = self
            .values
            .iter()
            .filter(|v| !v.is_nan())
            .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
        if n == 0 { None } else { Some(sum / n as Real) }
    }

    pub fn map(&self, f: impl Fn(Real) -> Real) -> Series {
        Series {
            index: self.index.clone(),
            values: self.values.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Element-wise combination with scalar broadcast.
    ///
    /// The result carries the index of whichever operand has one at the
    /// result length, preferring `self`.
    pub fn zip_with(
        &self,
        other: &Series,
        what: &'static str,
        f: impl Fn(Real, Real) -> Real,
    ) -> CoreResult<Series> {
        let len = broadcast_len(self.len(), other.len(), what)?;
        let values = (0..len).map(|i| f(self.at(i), other.at(i))).collect();
        let index = [self, other]
            .into_iter()
            .filter(|s| s.len() == len)
            .find_map(|s| s.index.clone());
        Ok(Series { index, values })
    }

    /// Attach a time index, replacing any existing one.
    pub fn reindexed(mut self, index: Option<Vec<DateTime<Utc>>>) -> CoreResult<Series> {
        if let Some(ix) = &index {
            if ix.len() != self.values.len() {
                return Err(CoreError::LengthMismatch {
                    what: "series index/values",
                    left: ix.len(),
                    right: self.values.len(),
                });
            }
        }
        self.index = index;
        Ok(self)
    }
}

fn broadcast_len(a: usize, b: usize, what: &'static str) -> CoreResult<usize> {
    if a == 0 || b == 0 {
        return Err(CoreError::Empty { what });
    }
    match (a, b) {
        _ if a == b => Ok(a),
        (1, n) | (n, 1) => Ok(n),
        _ => Err(CoreError::LengthMismatch {
            what,
            left: a,
            right: b,
        }),
    }
}

impl From<Vec<Real>> for Series {
    fn from(values: Vec<Real>) -> Self {
        Series::new(values)
    }
}

impl From<Real> for Series {
    fn from(value: Real) -> Self {
        Series::scalar(value)
    }
}

impl FromIterator<Real> for Series {
    fn from_iter<I: IntoIterator<Item = Real>>(iter: I) -> Self {
        Series::new(iter.into_iter().collect())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn broadcast_matches_map(
            values in prop::collection::vec(-1e6f64..1e6, 1..50),
            c in -1e3f64..1e3,
        ) {
            let s = Series::new(values);
            let zipped = s.zip_with(&Series::scalar(c), "prop", |a, b| a * b).unwrap();
            let mapped = s.map(|a| a * c);
            prop_assert_eq!(zipped, mapped);
        }
    }
}
