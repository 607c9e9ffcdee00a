//! Level annuities

use serde::{Deserialize, Serialize};

use crate::rates::{discount_factor, discount_rate, is_zero, subperiod_rate};

/// Present value of `n` unit payments at the end of each period, `a(n,i)`
///
/// # Formula
/// ```text
/// a(n,i) = (1 - (1+i)^-n) / i,    a(n,0) = n
/// ```
pub fn annuity_immediate(n: f64, i: f64) -> f64 {
    if is_zero(i) {
        return n;
    }
    (1.0 - (1.0 + i).powf(-n)) / i
}

/// Accumulated value at time `n` of `n` unit end-of-period payments, `s(n,i)`
pub fn accumulated_annuity(n: f64, i: f64) -> f64 {
    if is_zero(i) {
        return n;
    }
    ((1.0 + i).powf(n) - 1.0) / i
}

/// Present value of `n` unit payments at the start of each period, `ä(n,i)`
///
/// Equal to `(1+i)·a(n,i)`; the discount rate `d = i/(1+i)` is the divisor.
pub fn annuity_due(n: f64, i: f64) -> f64 {
    let d = discount_rate(i);
    if is_zero(d) {
        return n;
    }
    (1.0 - (1.0 + i).powf(-n)) / d
}

/// Continuously payable annuity at force of interest `delta`, `ā(n,δ)`
pub fn continuous_annuity(n: f64, delta: f64) -> f64 {
    if is_zero(delta) {
        return n;
    }
    (1.0 - (-delta * n).exp()) / delta
}

/// An annuity payable `m` times per year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MthlyAnnuity {
    /// Present value of one unit per sub-period over `m·n` sub-periods
    pub value: f64,
    /// Effective rate per sub-period
    pub subperiod_rate: f64,
}

/// `n` years of unit payments made `m` times per year at annual effective `i`
pub fn mthly_annuity(n: f64, i: f64, m: f64) -> MthlyAnnuity {
    let i_m = subperiod_rate(i, m);
    MthlyAnnuity {
        value: annuity_immediate(m * n, i_m),
        subperiod_rate: i_m,
    }
}

/// Perpetuity-immediate of one unit per period, deferred `m` periods: `v^m / i`
pub fn deferred_perpetuity(i: f64, m: f64) -> f64 {
    discount_factor(i).powf(m) / i
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_known_values() {
        assert_abs_diff_eq!(annuity_immediate(10.0, 0.05), 7.721734929, epsilon = 1e-8);
        assert_abs_diff_eq!(accumulated_annuity(10.0, 0.05), 12.577892536, epsilon = 1e-8);
    }

    #[test]
    fn test_annuity_identity() {
        for &n in &[1.0, 5.0, 12.0, 30.0, 100.0] {
            for &i in &[0.001, 0.03, 0.05, 0.12, 0.5] {
                let lhs = annuity_immediate(n, i) * i + (1.0 + i).powf(-n);
                assert_abs_diff_eq!(lhs, 1.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_due_is_immediate_times_one_plus_i() {
        for &n in &[1.0, 7.0, 25.0] {
            for &i in &[0.01, 0.04, 0.09] {
                assert_relative_eq!(
                    annuity_due(n, i),
                    (1.0 + i) * annuity_immediate(n, i),
                    max_relative = 1e-12
                );
            }
        }
    }

    #[test]
    fn test_zero_rate_limits_are_exact() {
        assert_eq!(annuity_immediate(10.0, 0.0), 10.0);
        assert_eq!(accumulated_annuity(10.0, 0.0), 10.0);
        assert_eq!(annuity_due(10.0, 0.0), 10.0);
        assert_eq!(continuous_annuity(10.0, 0.0), 10.0);
    }

    #[test]
    fn test_continuous_between_immediate_and_due() {
        let i: f64 = 0.06;
        let delta = (1.0 + i).ln();
        let cont = continuous_annuity(10.0, delta);
        assert!(cont > annuity_immediate(10.0, i));
        assert!(cont < annuity_due(10.0, i));
    }

    #[test]
    fn test_continuous_fractional_term() {
        let value = continuous_annuity(2.5, 0.05);
        assert_abs_diff_eq!(value, (1.0 - (-0.125_f64).exp()) / 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_mthly_annuity() {
        let result = mthly_annuity(5.0, 0.06, 12.0);
        assert_abs_diff_eq!(
            (1.0 + result.subperiod_rate).powi(12),
            1.06,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            result.value,
            annuity_immediate(60.0, result.subperiod_rate),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_deferred_perpetuity() {
        // Undeferred perpetuity is 1/i
        assert_abs_diff_eq!(deferred_perpetuity(0.05, 0.0), 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(deferred_perpetuity(0.05, 3.0), 20.0 / 1.05_f64.powi(3), epsilon = 1e-10);
        assert!(!deferred_perpetuity(0.0, 3.0).is_finite());
    }
}
