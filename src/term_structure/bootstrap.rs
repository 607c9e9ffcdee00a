//! Discount factors, implied forwards and par yield

use serde::{Deserialize, Serialize};

/// `DF(t) = (1 + s_t)^-t`
pub fn spot_discount_factor(spot: f64, t: f64) -> f64 {
    (1.0 + spot).powf(-t)
}

/// Discount factors for maturities `1..=n`
pub fn discount_factors(spots: &[f64]) -> Vec<f64> {
    spots
        .iter()
        .enumerate()
        .map(|(idx, &s)| spot_discount_factor(s, (idx + 1) as f64))
        .collect()
}

/// One-period forward rate from maturity `t` to `t+1`
///
/// # Formula
/// ```text
/// f = (1 + s_{t+1})^(t+1) / (1 + s_t)^t - 1
/// ```
pub fn forward_rate(spot_t: f64, spot_next: f64, t: f64) -> f64 {
    (1.0 + spot_next).powf(t + 1.0) / (1.0 + spot_t).powf(t) - 1.0
}

/// Forwards between each pair of adjacent maturities (`n - 1` values)
pub fn forward_rates(spots: &[f64]) -> Vec<f64> {
    spots
        .windows(2)
        .enumerate()
        .map(|(idx, pair)| forward_rate(pair[0], pair[1], (idx + 1) as f64))
        .collect()
}

/// Coupon rate pricing an `n`-period bond at par, `(1 - DF(n)) / Σ DF(t)`
pub fn par_yield(discount_factors: &[f64]) -> f64 {
    let last = discount_factors.last().copied().unwrap_or(f64::NAN);
    let annuity: f64 = discount_factors.iter().sum();
    (1.0 - last) / annuity
}

/// Vertical axis maximum for plotting percent-valued spot points
pub fn plot_axis_max(points_pct: &[f64]) -> f64 {
    let highest = points_pct.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    f64::max(5.0, highest + 1.0)
}

/// Everything derived from one spot curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermStructure {
    pub discount_factors: Vec<f64>,
    pub forwards: Vec<f64>,
    pub par_yield: f64,
}

impl TermStructure {
    pub fn from_spots(spots: &[f64]) -> Self {
        let discount_factors = discount_factors(spots);
        let par_yield = par_yield(&discount_factors);
        Self {
            forwards: forward_rates(spots),
            discount_factors,
            par_yield,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_flat_curve() {
        let spots = [0.05; 5];
        let ts = TermStructure::from_spots(&spots);
        for f in &ts.forwards {
            assert_abs_diff_eq!(*f, 0.05, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(ts.par_yield, 0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(ts.discount_factors[2], 1.05_f64.powi(-3), epsilon = 1e-14);
    }

    #[test]
    fn test_forwards_chain_to_spots() {
        let spots = [0.02, 0.025, 0.03, 0.034];
        let forwards = forward_rates(&spots);
        assert_eq!(forwards.len(), 3);
        let mut growth = 1.0 + spots[0];
        for f in &forwards {
            growth *= 1.0 + f;
        }
        assert_abs_diff_eq!(growth, 1.034_f64.powi(4), epsilon = 1e-12);
    }

    #[test]
    fn test_upward_curve_forwards_above_spots() {
        let spots = [0.02, 0.03, 0.04];
        let forwards = forward_rates(&spots);
        assert!(forwards[0] > spots[1]);
        assert!(forwards[1] > spots[2]);
    }

    #[test]
    fn test_par_yield_prices_at_par() {
        let spots = [0.03, 0.035, 0.04, 0.042];
        let dfs = discount_factors(&spots);
        let c = par_yield(&dfs);
        let price: f64 = dfs.iter().map(|df| c * df).sum::<f64>() + dfs[3];
        assert_abs_diff_eq!(price, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_curve() {
        let ts = TermStructure::from_spots(&[]);
        assert!(ts.discount_factors.is_empty());
        assert!(ts.forwards.is_empty());
        assert!(ts.par_yield.is_nan());
    }

    #[test]
    fn test_plot_axis() {
        assert_eq!(plot_axis_max(&[1.0, 2.5, 3.0]), 5.0);
        assert_eq!(plot_axis_max(&[4.5, 6.25]), 7.25);
    }
}
