//! Pure rate conversions
//!
//! None of these functions validate their inputs: `m = 0` or `i <= -1`
//! produce non-finite values, which callers render as a placeholder.

/// Discount factor `v = 1/(1+i)`
pub fn discount_factor(i: f64) -> f64 {
    1.0 / (1.0 + i)
}

/// Effective discount rate `d = i/(1+i)`
pub fn discount_rate(i: f64) -> f64 {
    i / (1.0 + i)
}

/// Effective rate from a discount rate, `i = d/(1-d)`
pub fn effective_from_discount(d: f64) -> f64 {
    d / (1.0 - d)
}

/// Effective rate per sub-period when each period is split into `m` parts
///
/// # Formula
/// ```text
/// i_m = (1 + i)^(1/m) - 1
/// ```
pub fn subperiod_rate(i: f64, m: f64) -> f64 {
    (1.0 + i).powf(1.0 / m) - 1.0
}

/// Effective annual rate from a nominal rate `j` compounded `m` times per year
///
/// # Formula
/// ```text
/// i = (1 + j/m)^m - 1
/// ```
pub fn effective_from_nominal(j: f64, m: f64) -> f64 {
    (1.0 + j / m).powf(m) - 1.0
}

/// Nominal rate compounded `m` times per year equivalent to effective `i`
pub fn nominal_from_effective(i: f64, m: f64) -> f64 {
    m * subperiod_rate(i, m)
}

/// Force of interest from a nominal rate, `δ = m·ln(1 + j/m)`
pub fn force_from_nominal(j: f64, m: f64) -> f64 {
    m * (1.0 + j / m).ln()
}

/// Force of interest from an effective rate, `δ = ln(1 + i)`
pub fn force_from_effective(i: f64) -> f64 {
    (1.0 + i).ln()
}

/// Effective annual rate from a nominal discount rate `d` convertible `m` times
///
/// # Formula
/// ```text
/// i = (1 - d/m)^(-m) - 1
/// ```
pub fn effective_from_nominal_discount(d: f64, m: f64) -> f64 {
    (1.0 - d / m).powf(-m) - 1.0
}
