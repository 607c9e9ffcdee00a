//! Arithmetically and geometrically varying annuities

use crate::rates::{discount_factor, nearly, ZERO_TOLERANCE};

use super::annuity_immediate;

/// Payments of 1, 2, ..., n at the end of each period, `(Ia)(n,i)`
///
/// Callers scale the result by their step size.
pub fn increasing_annuity(n: f64, i: f64) -> f64 {
    (annuity_immediate(n, i) - n * (1.0 + i).powf(-n)) / i
}

/// Payments of n, n-1, ..., 1 at the end of each period, `(Da)(n,i)`
pub fn decreasing_annuity(n: f64, i: f64) -> f64 {
    (n - annuity_immediate(n, i)) / i
}

/// Payments of `(1+g)^(k-1)` at the end of period `k`, for `k = 1..n`
///
/// When `i` and `g` coincide the closed form is 0/0, so the payments for
/// the whole periods in `n` are summed directly instead. That sum runs once
/// per period; callers bound `n` before reaching it.
pub fn geometric_annuity(n: f64, i: f64, g: f64) -> f64 {
    if nearly(i, g, ZERO_TOLERANCE) {
        let v = discount_factor(i);
        let periods = n.max(0.0).floor() as u64;
        return (1..=periods)
            .map(|k| (1.0 + g).powf(k as f64 - 1.0) * v.powf(k as f64))
            .sum();
    }
    (1.0 - ((1.0 + g) / (1.0 + i)).powf(n)) / (i - g)
}
