// wf-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, Length as UomLength, MassDensity as UomMassDensity, Power as UomPower,
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn kg_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

/// Reads a length back as meters.
#[inline]
pub fn in_m(l: Length) -> f64 {
    use uom::si::length::meter;
    l.get::<meter>()
}

/// Reads a power back as watts.
#[inline]
pub fn in_w(p: Power) -> f64 {
    use uom::si::power::watt;
    p.get::<watt>()
}

#[inline]
pub fn in_pa(p: Pressure) -> f64 {
    use uom::si::pressure::pascal;
    p.get::<pascal>()
}

#[inline]
pub fn in_k(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

#[inline]
pub fn in_kg_m3(rho: Density) -> f64 {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    rho.get::<kilogram_per_cubic_meter>()
}

/// Swept area of a rotor with diameter `d`.
#[inline]
pub fn rotor_area(d: Length) -> Area {
    (d / 2.0) * (d / 2.0) * std::f64::consts::PI
}

/// Reference atmosphere used by the density and power models.
pub mod constants {
    use super::*;

    /// Specific gas constant of dry air (J/(kg·K)).
    pub const R_DRY_AIR: f64 = 287.058;
    /// Temperature lapse rate of the standard atmosphere (K/m).
    pub const TEMPERATURE_GRADIENT_K_PER_M: f64 = 0.0065;

    /// Air density at standard conditions.
    #[inline]
    pub fn rho0() -> Density {
        kg_m3(1.225)
    }

    /// Temperature at standard conditions.
    #[inline]
    pub fn t0() -> Temperature {
        k(288.15)
    }

    /// Pressure at standard conditions used by the barometric equation.
    #[inline]
    pub fn p0() -> Pressure {
        pa(1.0133e5)
    }
}
