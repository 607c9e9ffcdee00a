//! Interest rate conventions
//!
//! Conversions between effective rates, discount rates, nominal rates
//! compounded `m` times per year and the force of interest.

mod conversion;

pub use conversion::{
    discount_factor, discount_rate, effective_from_discount, effective_from_nominal,
    effective_from_nominal_discount, force_from_effective, force_from_nominal,
    nominal_from_effective, subperiod_rate,
};

/// Absolute tolerance for "zero" and "equal" comparisons in closed-form formulas
pub const ZERO_TOLERANCE: f64 = 1e-12;

/// True when `a` and `b` differ by less than `eps`
pub fn nearly(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

/// True when `x` is within [`ZERO_TOLERANCE`] of zero
pub fn is_zero(x: f64) -> bool {
    nearly(x, 0.0, ZERO_TOLERANCE)
}
