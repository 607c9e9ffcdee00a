//! Par swap rate and mark-to-market value

use serde::{Deserialize, Serialize};

/// Accrual fraction used for any period without an explicit one
///
/// Assumes unit-length periods; the fractions are not checked against the
/// timing implied by the discount factors.
pub const DEFAULT_ACCRUAL: f64 = 1.0;

/// Fixed-leg annuity `Σ α_t·DF_t`
///
/// Periods beyond the end of `accruals` use [`DEFAULT_ACCRUAL`].
pub fn annuity_factor(discount_factors: &[f64], accruals: &[f64]) -> f64 {
    discount_factors
        .iter()
        .enumerate()
        .map(|(idx, df)| accruals.get(idx).copied().unwrap_or(DEFAULT_ACCRUAL) * df)
        .sum()
}

fn floating_leg(discount_factors: &[f64]) -> f64 {
    1.0 - discount_factors.last().copied().unwrap_or(f64::NAN)
}

/// Fixed rate making the swap worth zero, `S* = (1 - DF_n) / Σ α_t·DF_t`
pub fn par_swap_rate(discount_factors: &[f64], accruals: &[f64]) -> f64 {
    floating_leg(discount_factors) / annuity_factor(discount_factors, accruals)
}

/// Par rate and value of a swap receiving fixed rate `fixed_rate` on `notional`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwapValuation {
    pub par_rate: f64,
    /// `N·(S·Σα_t·DF_t - (1 - DF_n))`
    pub value: f64,
}

impl SwapValuation {
    pub fn compute(
        discount_factors: &[f64],
        accruals: &[f64],
        fixed_rate: f64,
        notional: f64,
    ) -> Self {
        let annuity = annuity_factor(discount_factors, accruals);
        let floating = floating_leg(discount_factors);
        Self {
            par_rate: floating / annuity,
            value: notional * (fixed_rate * annuity - floating),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn flat_dfs(rate: f64, n: i32) -> Vec<f64> {
        (1..=n).map(|t| (1.0 + rate).powi(-t)).collect()
    }

    #[test]
    fn test_flat_curve_par_rate() {
        let dfs = flat_dfs(0.04, 5);
        assert_abs_diff_eq!(par_swap_rate(&dfs, &[]), 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_swap_at_par_is_worth_zero() {
        let dfs = [0.97, 0.94, 0.905, 0.87];
        let par = par_swap_rate(&dfs, &[]);
        let valuation = SwapValuation::compute(&dfs, &[], par, 10_000_000.0);
        assert_abs_diff_eq!(valuation.value, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(valuation.par_rate, par, epsilon = 1e-15);
    }

    #[test]
    fn test_receiving_above_par_has_positive_value() {
        let dfs = flat_dfs(0.03, 4);
        let valuation = SwapValuation::compute(&dfs, &[], 0.04, 1_000_000.0);
        let annuity = annuity_factor(&dfs, &[]);
        assert!(valuation.value > 0.0);
        assert_abs_diff_eq!(valuation.value, 1_000_000.0 * (0.04 - 0.03) * annuity, epsilon = 1e-6);
    }

    #[test]
    fn test_missing_accruals_default_to_one() {
        let dfs = [0.99, 0.98, 0.97];
        assert_abs_diff_eq!(
            annuity_factor(&dfs, &[0.5]),
            0.5 * 0.99 + 0.98 + 0.97,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_explicit_zero_accrual_drops_period() {
        let dfs = [0.99, 0.98, 0.97];
        assert_abs_diff_eq!(
            annuity_factor(&dfs, &[1.0, 0.0, 1.0]),
            0.99 + 0.97,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_semiannual_accruals() {
        let dfs: Vec<f64> = (1..=4).map(|k| 1.02_f64.powi(-k)).collect();
        let par = par_swap_rate(&dfs, &[0.5; 4]);
        // Semi-annual periodic rate of 2% quoted on a half-year accrual
        assert_abs_diff_eq!(par, 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_curve_is_non_finite() {
        assert!(par_swap_rate(&[], &[]).is_nan());
    }
}
