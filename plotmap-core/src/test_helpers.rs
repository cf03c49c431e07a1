//! Float assertions shared by the workspace tests.
//!
//! Exact arithmetic (saturated poles, unit conversions, degree factors) is
//! checked in ULPs with [`assert_ulp_lt!`](crate::assert_ulp_lt); anything
//! that passes through a projection round trip is checked with an absolute
//! tolerance via [`assert_abs_lt!`](crate::assert_abs_lt).

/// Position of `x` on a line where neighbouring floats differ by one and both
/// zeros share a slot.
fn ordinal(x: f64) -> i64 {
    let bits = x.to_bits() as i64;
    if bits < 0 {
        i64::MIN - bits
    } else {
        bits
    }
}

/// Number of representable floats between `a` and `b`.
#[inline]
pub fn ulp_distance(a: f64, b: f64) -> u64 {
    ordinal(a).abs_diff(ordinal(b))
}

#[track_caller]
pub fn assert_ulp_within(a: f64, b: f64, max_ulp: u64, ctx: &str) {
    assert!(
        a.is_finite() && b.is_finite(),
        "non-finite value in {}: a={} b={}",
        ctx,
        a,
        b
    );
    let d = ulp_distance(a, b);
    assert!(d <= max_ulp, "{}: {} and {} are {} ULP apart, limit {}", ctx, a, b, d, max_ulp);
}

/// Absolute-difference check for quantities that pass through a projection
/// round trip, where ULP distance is meaningless near zero.
#[track_caller]
pub fn assert_abs_le(a: f64, b: f64, tol: f64, ctx: &str) {
    assert!(
        a.is_finite() && b.is_finite(),
        "non-finite value in {}: a={} b={}",
        ctx,
        a,
        b
    );
    assert!(
        (a - b).abs() <= tol,
        "{}: |{} - {}| = {:e} exceeds {:e}",
        ctx,
        a,
        b,
        (a - b).abs(),
        tol
    );
}

#[macro_export]
macro_rules! assert_ulp_lt {
    ($a:expr, $b:expr, $max_ulp:expr) => {
        $crate::test_helpers::assert_ulp_within(
            $a,
            $b,
            $max_ulp,
            &format!("{} vs {}", stringify!($a), stringify!($b)),
        )
    };
    ($a:expr, $b:expr, $max_ulp:expr, $($arg:tt)*) => {
        $crate::test_helpers::assert_ulp_within($a, $b, $max_ulp, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! assert_abs_lt {
    ($a:expr, $b:expr, $tol:expr) => {
        $crate::test_helpers::assert_abs_le(
            $a,
            $b,
            $tol,
            &format!("{} vs {}", stringify!($a), stringify!($b)),
        )
    };
    ($a:expr, $b:expr, $tol:expr, $($arg:tt)*) => {
        $crate::test_helpers::assert_abs_le($a, $b, $tol, &format!($($arg)*))
    };
}
