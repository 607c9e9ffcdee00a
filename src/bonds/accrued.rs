//! Accrued interest between coupon dates

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::bond_price;

/// Price split for a purchase part way through a coupon period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccruedInterest {
    pub accrued: f64,
    pub dirty: f64,
    pub clean: f64,
}

/// Accrued interest `days` into a `period`-day coupon period
///
/// The base price is always computed with redemption at par (`C = F`).
pub fn accrued_interest(
    face: f64,
    coupon_rate: f64,
    i: f64,
    n: f64,
    days: f64,
    period: f64,
) -> AccruedInterest {
    let base = bond_price(face, face, coupon_rate, i, n);
    let coupon = face * coupon_rate;
    let accrued = coupon * (days / period);
    let dirty = base + accrued;
    AccruedInterest {
        accrued,
        dirty,
        clean: dirty - accrued,
    }
}

/// Same split with day counts taken as actual days between dates
pub fn accrued_interest_between(
    face: f64,
    coupon_rate: f64,
    i: f64,
    n: f64,
    last_coupon: NaiveDate,
    settlement: NaiveDate,
    next_coupon: NaiveDate,
) -> AccruedInterest {
    let days = (settlement - last_coupon).num_days() as f64;
    let period = (next_coupon - last_coupon).num_days() as f64;
    accrued_interest(face, coupon_rate, i, n, days, period)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_half_period_accrual() {
        let split = accrued_interest(1000.0, 0.05, 0.06, 10.0, 91.0, 182.0);
        assert_abs_diff_eq!(split.accrued, 25.0, epsilon = 1e-12);
        assert_abs_diff_eq!(split.dirty - split.clean, 25.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            split.clean,
            bond_price(1000.0, 1000.0, 0.05, 0.06, 10.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_from_dates() {
        let last = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let settle = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        let next = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let by_dates = accrued_interest_between(1000.0, 0.04, 0.05, 6.0, last, settle, next);
        let by_days = accrued_interest(1000.0, 0.04, 0.05, 6.0, 91.0, 182.0);
        assert_eq!(by_dates, by_days);
    }

    #[test]
    fn test_zero_length_period_is_non_finite() {
        let split = accrued_interest(1000.0, 0.05, 0.06, 10.0, 10.0, 0.0);
        assert!(!split.accrued.is_finite());
    }
}
