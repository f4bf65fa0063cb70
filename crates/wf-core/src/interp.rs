//! One-dimensional interpolation helpers.
//!
//! `xp` must be sorted ascending and as long as `fp`. Callers in windflow
//! guarantee this through the `Curve` invariants.

use crate::numeric::Real;

/// Piecewise linear interpolation with explicit fill values outside `xp`.
///
/// `x < xp[0]` yields `left`, `x > xp[last]` yields `right`, NaN yields NaN.
/// An empty table yields NaN.
pub fn interp(x: Real, xp: &[Real], fp: &[Real], left: Real, right: Real) -> Real {
    debug_assert_eq!(xp.len(), fp.len());
    let n = xp.len().min(fp.len());
    if n == 0 || x.is_nan() {
        return Real::NAN;
    }
    if x < xp[0] {
        return left;
    }
    if x > xp[n - 1] {
        return right;
    }
    if x == xp[n - 1] {
        return fp[n - 1];
    }
    // First index with xp[i] > x; x lies in [xp[i-1], xp[i]).
    let i = xp[..n].partition_point(|&v| v <= x);
    let (x0, x1) = (xp[i - 1], xp[i]);
    let (y0, y1) = (fp[i - 1], fp[i]);
    if x == x0 {
        return y0;
    }
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Interpolation that holds the first and last table values outside `xp`.
pub fn interp_clamped(x: Real, xp: &[Real], fp: &[Real]) -> Real {
    match (fp.first(), fp.last()) {
        (Some(&first), Some(&last)) => interp(x, xp, fp, first, last),
        _ => Real::NAN,
    }
}

/// Normal probability density with standard deviation `sigma` and mean `mean`.
pub fn gauss(x: Real, sigma: Real, mean: Real) -> Real {
    let z = (x - mean) / sigma;
    (-0.5 * z * z).exp() / (sigma * (2.0 * std::f64::consts::PI).sqrt())
}
