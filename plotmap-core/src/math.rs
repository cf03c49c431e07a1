#[inline]
pub fn fmod(x: f64, y: f64) -> f64 {
    libm::fmod(x, y)
}

/// Floored modulo: the result has the sign of `y` and lies in `[0, y)` for `y > 0`.
///
/// `fmod` keeps the sign of the dividend, so negative inputs are shifted up by
/// one period afterwards. A tiny negative remainder can round to exactly `y`
/// after the shift; that case folds back to zero.
#[inline]
pub fn floor_mod(x: f64, y: f64) -> f64 {
    let mut r = fmod(x, y);
    if r < 0.0 {
        r += y;
    }
    if r >= y {
        r = 0.0;
    }
    r
}
