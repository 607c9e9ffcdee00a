//! Calculator requests
//!
//! One variant per calculator. Field names are the named inputs of each
//! calculator; rates are whole-number percentages (`5` means 5%).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::input::{NumberList, Scalar};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalcRequest {
    /// Effective rate and force of interest from a nominal rate
    NominalRate { nominal_pct: Scalar, m: Scalar },

    /// Present and accumulated value of end-of-period cashflows
    CashflowValue { cashflows: NumberList, rate_pct: Scalar },

    /// a(n,i), ä(n,i) and s(n,i)
    LevelAnnuity { n: Scalar, rate_pct: Scalar },

    /// ā(n,δ)
    ContinuousAnnuity { n: Scalar, force_pct: Scalar },

    /// Annuity payable m times per year for n years
    MthlyAnnuity {
        years: Scalar,
        rate_pct: Scalar,
        m: Scalar,
    },

    /// Increasing and decreasing annuities scaled by a step size
    ArithmeticAnnuity {
        n: Scalar,
        rate_pct: Scalar,
        step: Scalar,
    },

    /// Annuity with payments growing geometrically
    GeometricAnnuity {
        n: Scalar,
        rate_pct: Scalar,
        growth_pct: Scalar,
    },

    /// Level payment and amortization table
    LoanSchedule {
        principal: Scalar,
        rate_pct: Scalar,
        term: Scalar,
    },

    /// Outstanding balance at time t, prospectively and retrospectively
    LoanBalance {
        principal: Scalar,
        rate_pct: Scalar,
        term: Scalar,
        t: Scalar,
    },

    /// Bond price, optionally with its book-value schedule
    BondPrice {
        face: Scalar,
        redemption: Scalar,
        coupon_pct: Scalar,
        yield_pct: Scalar,
        term: Scalar,
        #[serde(default)]
        schedule: bool,
    },

    /// Accrued interest with dirty and clean price
    AccruedInterest {
        face: Scalar,
        coupon_pct: Scalar,
        yield_pct: Scalar,
        term: Scalar,
        days: Scalar,
        period: Scalar,
    },

    /// Accrued interest with actual day counts taken from coupon dates
    AccruedInterestDates {
        face: Scalar,
        coupon_pct: Scalar,
        yield_pct: Scalar,
        term: Scalar,
        last_coupon: NaiveDate,
        settlement: NaiveDate,
        next_coupon: NaiveDate,
    },

    /// Price, duration and convexity of a cashflow stream
    Duration { cashflows: NumberList, rate_pct: Scalar },

    /// Discount factors, forwards and par yield from spot rates
    TermStructure { spots_pct: NumberList },

    /// Redington conditions for liability and asset cashflows
    Immunization {
        liabilities: NumberList,
        assets: NumberList,
        rate_pct: Scalar,
    },

    /// Par swap rate and value of a swap at a contract fixed rate
    Swap {
        discount_factors: NumberList,
        #[serde(default)]
        accruals: NumberList,
        fixed_rate_pct: Scalar,
        notional: Scalar,
    },

    /// Perpetuity-immediate deferred m periods
    DeferredPerpetuity { rate_pct: Scalar, deferral: Scalar },

    /// DV01 and dollar duration from price and modified duration
    Dv01 { price: Scalar, modified_duration: Scalar },

    /// Time-weighted return of sub-period percentage returns
    TimeWeightedReturn { returns_pct: NumberList },

    /// Internal rate of return of cashflows starting at time 0
    Irr { cashflows: NumberList },
}

impl CalcRequest {
    pub fn name(&self) -> &'static str {
        match self {
            CalcRequest::NominalRate { .. } => "nominal_rate",
            CalcRequest::CashflowValue { .. } => "cashflow_value",
            CalcRequest::LevelAnnuity { .. } => "level_annuity",
            CalcRequest::ContinuousAnnuity { .. } => "continuous_annuity",
            CalcRequest::MthlyAnnuity { .. } => "mthly_annuity",
            CalcRequest::ArithmeticAnnuity { .. } => "arithmetic_annuity",
            CalcRequest::GeometricAnnuity { .. } => "geometric_annuity",
            CalcRequest::LoanSchedule { .. } => "loan_schedule",
            CalcRequest::LoanBalance { .. } => "loan_balance",
            CalcRequest::BondPrice { .. } => "bond_price",
            CalcRequest::AccruedInterest { .. } => "accrued_interest",
            CalcRequest::AccruedInterestDates { .. } => "accrued_interest_dates",
            CalcRequest::Duration { .. } => "duration",
            CalcRequest::TermStructure { .. } => "term_structure",
            CalcRequest::Immunization { .. } => "immunization",
            CalcRequest::Swap { .. } => "swap",
            CalcRequest::DeferredPerpetuity { .. } => "deferred_perpetuity",
            CalcRequest::Dv01 { .. } => "dv01",
            CalcRequest::TimeWeightedReturn { .. } => "time_weighted_return",
            CalcRequest::Irr { .. } => "irr",
        }
    }
}
