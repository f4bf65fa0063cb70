//! Inter- and extrapolation of a weather quantity between two measurement heights.
//!
//! The two columns closest to the target height are used, nearest first.
//! They need not bracket the target, so these functions extrapolate freely.

use wf_core::Series;

use crate::error::{AtmosError, AtmosResult};
use crate::weather::{Quantity, WeatherColumn, WeatherTable};

/// Linear inter-/extrapolation to `target_height`.
///
/// ```text
/// f(h) = (f(h2) - f(h1)) / (h2 - h1) * (h - h1) + f(h1)
/// ```
/// with `h1` the nearest and `h2` the second nearest height.
pub fn linear_interpolation_extrapolation(
    table: &WeatherTable,
    quantity: Quantity,
    target_height: f64,
) -> AtmosResult<Series> {
    let (near, far) = table.two_closest(quantity, target_height)?;
    check_distinct(quantity, near, far)?;
    let (h1, h2) = (near.height, far.height);
    Ok(near.data.zip_with(&far.data, "height columns", |f1, f2| {
        (f2 - f1) / (h2 - h1) * (target_height - h1) + f1
    })?)
}

/// Logarithmic inter-/extrapolation to `target_height`.
///
/// ```text
/// f(h) = (ln(h) * (f(h2) - f(h1)) - f(h2) * ln(h1) + f(h1) * ln(h2)) / (ln(h2) - ln(h1))
/// ```
///
/// # Errors
/// `Domain` if any of the heights involved is not positive.
pub fn logarithmic_interpolation_extrapolation(
    table: &WeatherTable,
    quantity: Quantity,
    target_height: f64,
) -> AtmosResult<Series> {
    let (near, far) = table.two_closest(quantity, target_height)?;
    check_distinct(quantity, near, far)?;
    if near.height <= 0.0 || far.height <= 0.0 || target_height <= 0.0 {
        return Err(AtmosError::Domain {
            what: format!(
                "logarithmic interpolation of {quantity} needs positive heights \
                 ({}, {} -> {target_height} m)",
                near.height, far.height
            ),
        });
    }
    let (ln1, ln2, ln_t) = (near.height.ln(), far.height.ln(), target_height.ln());
    Ok(near.data.zip_with(&far.data, "height columns", |f1, f2| {
        (ln_t * (f2 - f1) - f2 * ln1 + f1 * ln2) / (ln2 - ln1)
    })?)
}

fn check_distinct(quantity: Quantity, a: &WeatherColumn, b: &WeatherColumn) -> AtmosResult<()> {
    if a.height == b.height {
        return Err(AtmosError::Domain {
            what: format!("{quantity} heights must differ for inter-/extrapolation"),
        });
    }
    Ok(())
}
