//! Duration and convexity of end-of-period cashflows

use serde::{Deserialize, Serialize};

use crate::cashflows::present_value;

/// Macaulay duration in periods, `Σ t·cf_t·v^t / P`
pub fn macaulay_duration(cashflows: &[f64], i: f64) -> f64 {
    let price = present_value(cashflows, i);
    let weighted: f64 = cashflows
        .iter()
        .enumerate()
        .map(|(idx, &cf)| {
            let t = (idx + 1) as f64;
            t * cf * (1.0 + i).powf(-t)
        })
        .sum();
    weighted / price
}

/// Macaulay convexity, `Σ t(t+1)·cf_t·v^(t+2) / P`
pub fn macaulay_convexity(cashflows: &[f64], i: f64) -> f64 {
    let price = present_value(cashflows, i);
    let weighted: f64 = cashflows
        .iter()
        .enumerate()
        .map(|(idx, &cf)| {
            let t = (idx + 1) as f64;
            t * (t + 1.0) * cf * (1.0 + i).powf(-(t + 2.0))
        })
        .sum();
    weighted / price
}

/// Value, duration and convexity of one side of a portfolio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMeasures {
    pub present_value: f64,
    pub macaulay_duration: f64,
    pub macaulay_convexity: f64,
}

impl PortfolioMeasures {
    pub fn compute(cashflows: &[f64], i: f64) -> Self {
        Self {
            present_value: present_value(cashflows, i),
            macaulay_duration: macaulay_duration(cashflows, i),
            macaulay_convexity: macaulay_convexity(cashflows, i),
        }
    }
}

/// Full set of price risk measures at a flat rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMeasures {
    pub price: f64,
    pub macaulay_duration: f64,
    pub modified_duration: f64,
    pub macaulay_convexity: f64,
    pub modified_convexity: f64,
}

impl RiskMeasures {
    pub fn compute(cashflows: &[f64], i: f64) -> Self {
        let base = PortfolioMeasures::compute(cashflows, i);
        Self {
            price: base.present_value,
            macaulay_duration: base.macaulay_duration,
            modified_duration: base.macaulay_duration / (1.0 + i),
            macaulay_convexity: base.macaulay_convexity,
            modified_convexity: base.macaulay_convexity / (1.0 + i).powi(2),
        }
    }
}

/// Price change for a one basis point move, `0.0001·P·D_mod`
pub fn dv01(price: f64, modified_duration: f64) -> f64 {
    0.0001 * price * modified_duration
}

/// Dollar duration `dP/di ≈ -P·D_mod`
pub fn dollar_duration(price: f64, modified_duration: f64) -> f64 {
    -price * modified_duration
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn coupon_bond() -> Vec<f64> {
        let mut cfs = vec![50.0; 10];
        cfs[9] += 1000.0;
        cfs
    }

    #[test]
    fn test_zero_coupon_duration_is_maturity() {
        let cfs = [0.0, 0.0, 0.0, 0.0, 1000.0];
        assert_abs_diff_eq!(macaulay_duration(&cfs, 0.07), 5.0, epsilon = 1e-12);
        // t(t+1)/(1+i)^2
        assert_abs_diff_eq!(macaulay_convexity(&cfs, 0.07), 30.0 / 1.07_f64.powi(2), epsilon = 1e-10);
    }

    #[test]
    fn test_scale_invariance() {
        let cfs = coupon_bond();
        let scaled: Vec<f64> = cfs.iter().map(|cf| cf * 37.5).collect();
        let i = 0.06;
        assert_relative_eq!(
            macaulay_duration(&cfs, i),
            macaulay_duration(&scaled, i),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            macaulay_convexity(&cfs, i),
            macaulay_convexity(&scaled, i),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_modified_measures() {
        let measures = RiskMeasures::compute(&coupon_bond(), 0.06);
        assert_abs_diff_eq!(measures.price, 926.3991, epsilon = 1e-3);
        assert_abs_diff_eq!(
            measures.modified_duration,
            measures.macaulay_duration / 1.06,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            measures.modified_convexity,
            measures.macaulay_convexity / 1.1236,
            epsilon = 1e-10
        );
        assert!(measures.macaulay_duration < 10.0);
    }

    #[test]
    fn test_modified_duration_predicts_price_change() {
        let cfs = coupon_bond();
        let i = 0.06;
        let h = 1e-6;
        let measures = RiskMeasures::compute(&cfs, i);
        let slope = (present_value(&cfs, i + h) - present_value(&cfs, i - h)) / (2.0 * h);
        assert_relative_eq!(
            slope,
            dollar_duration(measures.price, measures.modified_duration),
            max_relative = 1e-6
        );
    }

    #[test]
    fn test_dv01() {
        assert_abs_diff_eq!(dv01(1000.0, 7.5), 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(dollar_duration(1000.0, 7.5), -7500.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_cashflows_are_non_finite() {
        assert!(macaulay_duration(&[], 0.05).is_nan());
        assert!(macaulay_convexity(&[], 0.05).is_nan());
    }
}
