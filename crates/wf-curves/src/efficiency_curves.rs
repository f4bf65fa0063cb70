//! Named wind efficiency curves for speed based wake losses.

use std::collections::BTreeMap;

use crate::curve::Curve;
use crate::error::{CurveError, CurveResult};

/// Mean wind efficiency curve of the dena grid study, resampled at 1..=25 m/s.
///
/// The published curve has about 170 points; this is a 25-point linear
/// resample of it. It is the only bundled curve: the other published curves
/// (`dena_extreme1`, `dena_extreme2`, `knorr_mean`, `knorr_extreme1` to
/// `knorr_extreme3`) have to be added with [`EfficiencyRegistry::register`].
const DENA_MEAN: [f64; 25] = [
    0.994_953_423_411_939_6,
    0.994_866_394_244_604_3,
    0.994_779_151_515_151_5,
    0.951_909_066_246_056_8,
    0.942_986_256_952_169,
    0.940_417_921_985_815_4,
    0.943_860_158_292_814_9,
    0.949_052_895_899_053_6,
    0.954_997_966_903_073_3,
    0.960_613_565_847_511_1,
    0.965_438_981_735_159_7,
    0.970_107_663_157_894_8,
    0.974_924_068_472_151_3,
    0.979_249_333_333_333_3,
    0.982_833_884_037_819_8,
    0.985_830_813_322_368_3,
    0.987_918_529_983_792_6,
    0.989_871_279_603_223_7,
    0.992_260_524_581_307_3,
    0.993_254_769_746_874,
    0.993_276_564_500_485_1,
    0.993_380_440_051_568_6,
    0.993_508_710_900_474,
    0.994_150_849_056_603_7,
    0.998_324_999_999_999_9,
];

/// Read-only lookup of wind efficiency curves by name.
#[derive(Debug, Clone, Default)]
pub struct EfficiencyRegistry {
    curves: BTreeMap<String, Curve>,
}

impl EfficiencyRegistry {
    /// Registry without any curves.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding the curves shipped with windflow (`dena_mean`).
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        let wind_speed = (1..=25).map(f64::from).collect();
        // Static table, satisfies every curve invariant.
        if let Ok(curve) = Curve::new(wind_speed, DENA_MEAN.to_vec()) {
            registry.curves.insert("dena_mean".to_string(), curve);
        }
        registry
    }

    /// Add or replace a named curve.
    ///
    /// # Errors
    /// `InvalidCurve` if an efficiency lies outside `[0, 1]`.
    pub fn register(&mut self, name: impl Into<String>, curve: Curve) -> CurveResult<&mut Self> {
        let name = name.into();
        if let Some(eta) = curve.values().iter().find(|eta| !(0.0..=1.0).contains(*eta)) {
            return Err(CurveError::InvalidCurve {
                what: format!("wind efficiency curve '{name}' has efficiency {eta} outside [0, 1]"),
            });
        }
        self.curves.insert(name, curve);
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.curves.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.curves.keys().map(String::as_str)
    }

    /// # Errors
    /// `UnknownEfficiencyCurve` (a configuration error) for unknown names.
    pub fn get(&self, name: &str) -> CurveResult<&Curve> {
        self.curves
            .get(name)
            .ok_or_else(|| CurveError::UnknownEfficiencyCurve {
                name: name.to_string(),
                known: self.names().collect::<Vec<_>>().join(", "),
            })
    }
}
