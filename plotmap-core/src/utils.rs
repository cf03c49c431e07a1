//! Utility functions for longitude wrapping and rounding.
//!
//! # Wrapping
//!
//! | Function | Input | Output Range |
//! |----------|-------|--------------|
//! | [`span`] | any real, any `lo != hi` | `[min(lo,hi), max(lo,hi))` |
//! | [`normalize_lon`] | degrees | `[-180°, 180°)` |
//! | [`normalize_lon_positive`] | degrees | `[0°, 360°)` |
//! | [`clamp_lat`] | degrees | `[-90°, 90°]` (clamped) |
//! | [`angular_difference`] | degrees | `(-180°, 180°]` |
//!
//! Every longitude difference inside the projection kernels goes through
//! [`span`], so a point just east of the antimeridian and one just west of it
//! land next to each other in plot units.
//!
//! # Rounding
//!
//! [`nearest_int`] rounds half-way cases to the even neighbour. Plot corners
//! rounded this way stay stable when a corner sits exactly on `n + 0.5`.

use crate::constants::{FULL_CIRCLE_DEG, KM_PER_DEGREE};
use crate::math::floor_mod;

/// Wraps `value` into the half-open range between `begin` and `end`.
///
/// The bounds may be given in either order. The result satisfies
/// `min(begin, end) <= result < max(begin, end)` for every finite input and
/// is periodic with period `|end - begin|`.
///
/// # Example
///
/// ```
/// use plotmap_core::span;
///
/// assert_eq!(span(190.0, -180.0, 180.0), -170.0);
/// assert_eq!(span(-190.0, -180.0, 180.0), 170.0);
/// assert_eq!(span(180.0, -180.0, 180.0), -180.0);
/// ```
#[inline]
pub fn span(value: f64, begin: f64, end: f64) -> f64 {
    let first = begin.min(end);
    let last = begin.max(end);
    let val = floor_mod(value - first, last - first) + first;
    if val >= last {
        first
    } else {
        val
    }
}

/// Normalizes longitude to the range [-180°, 180°).
#[inline]
pub fn normalize_lon(lon: f64) -> f64 {
    span(lon, -180.0, 180.0)
}

/// Normalizes longitude to the range [0°, 360°).
#[inline]
pub fn normalize_lon_positive(lon: f64) -> f64 {
    span(lon, 0.0, FULL_CIRCLE_DEG)
}

/// Clamps latitude to the valid range [-90°, 90°].
#[inline]
pub fn clamp_lat(lat: f64) -> f64 {
    lat.clamp(-90.0, 90.0)
}

/// Computes the shortest signed angular difference `a - b` in degrees.
///
/// The result is in the range (-180°, 180°]. Unlike a single `±360`
/// correction this holds for inputs of any magnitude.
///
/// ```
/// use plotmap_core::angular_difference;
///
/// assert!((angular_difference(-179.0, 179.0) - 2.0).abs() < 1e-12);
/// assert_eq!(angular_difference(0.0, 180.0), 180.0);
/// ```
#[inline]
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = span(a - b, -180.0, 180.0);
    if diff == -180.0 {
        180.0
    } else {
        diff
    }
}

/// True when a west edge lies in the eastern hemisphere and the east edge in
/// the western one, i.e. the box wraps through ±180°.
#[inline]
pub fn crosses_dateline(west: f64, east: f64) -> bool {
    west > 0.0 && east < 0.0
}

/// Fortran `SIGN`: the magnitude of `a` with the sign of `b` (zero counts as positive).
#[inline]
pub fn sign(a: f64, b: f64) -> f64 {
    if b >= 0.0 {
        a.abs()
    } else {
        -a.abs()
    }
}

/// Rounds to the nearest integer, ties to even.
#[inline]
pub fn nearest_int(a: f64) -> i64 {
    a.round_ties_even() as i64
}

#[inline]
pub fn deg_to_km(deg: f64) -> f64 {
    deg * KM_PER_DEGREE
}

#[inline]
pub fn km_to_deg(km: f64) -> f64 {
    km / KM_PER_DEGREE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basic() {
        assert_eq!(span(0.0, -180.0, 180.0), 0.0);
        assert_eq!(span(190.0, -180.0, 180.0), -170.0);
        assert_eq!(span(-190.0, -180.0, 180.0), 170.0);
        assert_eq!(span(540.0, -180.0, 180.0), -180.0);
        assert_eq!(span(-180.0, -180.0, 180.0), -180.0);
    }

    #[test]
    fn test_span_reversed_bounds() {
        assert_eq!(span(190.0, 180.0, -180.0), -170.0);
        assert_eq!(span(-10.0, 360.0, 0.0), 350.0);
    }

    #[test]
    fn test_span_is_periodic_and_half_open() {
        let bounds = [(-180.0, 180.0), (0.0, 360.0), (-90.0, 270.0), (12.5, 372.5)];
        let values = [
            -1080.5, -725.0, -360.0, -180.0, -179.5, -0.25, 0.0, 0.5, 90.0, 179.75, 180.0,
            359.5, 360.0, 721.0,
        ];
        for &(lo, hi) in &bounds {
            for &v in &values {
                let w = span(v, lo, hi);
                assert!(lo <= w && w < hi, "span({v}, {lo}, {hi}) = {w}");
                assert_eq!(span(v + 360.0, lo, hi), w, "periodicity at {v}");
            }
        }
    }

    #[test]
    fn test_span_non_degree_period() {
        let w = span(7.0, 0.0, 3.0);
        assert_eq!(w, 1.0);
        assert_eq!(span(-0.5, 0.0, 3.0), 2.5);
    }

    #[test]
    fn test_normalize_lon() {
        assert_eq!(normalize_lon(0.0), 0.0);
        assert_eq!(normalize_lon(180.0), -180.0);
        assert_eq!(normalize_lon(-180.0), -180.0);
        assert_eq!(normalize_lon(181.0), -179.0);
        assert_eq!(normalize_lon(-181.0), 179.0);
        assert_eq!(normalize_lon(450.0), 90.0);
    }

    #[test]
    fn test_normalize_lon_positive() {
        assert_eq!(normalize_lon_positive(-1.0), 359.0);
        assert_eq!(normalize_lon_positive(360.0), 0.0);
        assert_eq!(normalize_lon_positive(-77.0), 283.0);
    }

    #[test]
    fn test_clamp_lat() {
        assert_eq!(clamp_lat(45.0), 45.0);
        assert_eq!(clamp_lat(100.0), 90.0);
        assert_eq!(clamp_lat(-100.0), -90.0);
    }

    #[test]
    fn test_angular_difference() {
        assert_eq!(angular_difference(0.0, 0.0), 0.0);
        assert_eq!(angular_difference(90.0, 45.0), 45.0);
        assert_eq!(angular_difference(45.0, 90.0), -45.0);
        assert!((angular_difference(10.0, 350.0) - 20.0).abs() < 1e-12);
        assert!((angular_difference(-170.0, 170.0) - 20.0).abs() < 1e-12);
        assert!((angular_difference(350.0, 10.0) + 20.0).abs() < 1e-12);
        assert_eq!(angular_difference(180.0, 0.0), 180.0);
        assert_eq!(angular_difference(0.0, 180.0), 180.0);
        assert!((angular_difference(1090.0, -10.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_crosses_dateline() {
        assert!(crosses_dateline(170.0, -170.0));
        assert!(!crosses_dateline(-170.0, 170.0));
        assert!(!crosses_dateline(10.0, 20.0));
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(3.0, 1.0), 3.0);
        assert_eq!(sign(3.0, -1.0), -3.0);
        assert_eq!(sign(-3.0, 0.0), 3.0);
        assert_eq!(sign(-89.5, -10.0), -89.5);
    }

    #[test]
    fn test_nearest_int_ties_to_even() {
        assert_eq!(nearest_int(0.5), 0);
        assert_eq!(nearest_int(1.5), 2);
        assert_eq!(nearest_int(2.5), 2);
        assert_eq!(nearest_int(-2.5), -2);
        assert_eq!(nearest_int(2.51), 3);
        assert_eq!(nearest_int(-0.49), 0);
    }

    #[test]
    fn test_km_degree_conversion() {
        assert_eq!(deg_to_km(1.0), 111.0);
        assert_eq!(km_to_deg(222.0), 2.0);
    }
}
