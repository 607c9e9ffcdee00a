//! Loan amortization schedule and outstanding balance

use log::debug;
use serde::{Deserialize, Serialize};

use crate::annuities::{accumulated_annuity, annuity_immediate};

/// One period of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanRow {
    pub period: u32,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    /// Balance after this period's payment, floored at zero
    pub balance_after: f64,
}

/// Level payment and the full schedule for a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSchedule {
    pub payment: f64,
    pub rows: Vec<LoanRow>,
}

impl LoanSchedule {
    /// Build the schedule for loan `principal` over `term` periods at rate `i`
    pub fn build(principal: f64, term: u32, i: f64) -> Self {
        let payment = level_payment(principal, term as f64, i);
        let mut rows = Vec::with_capacity(term as usize);
        let mut balance = principal;

        for period in 1..=term {
            let interest = balance * i;
            let principal_repaid = payment - interest;
            let next = balance - principal_repaid;
            rows.push(LoanRow {
                period,
                payment,
                interest,
                principal: principal_repaid,
                balance_after: next.max(0.0),
            });
            balance = next;
        }

        debug!(
            "loan schedule: L={} n={} i={} payment={} residual={}",
            principal, term, i, payment, balance
        );

        Self { payment, rows }
    }

    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest).sum()
    }

    pub fn total_principal(&self) -> f64 {
        self.rows.iter().map(|r| r.principal).sum()
    }

    /// Balance after the last payment (zero up to rounding)
    pub fn final_balance(&self) -> f64 {
        self.rows.last().map(|r| r.balance_after).unwrap_or(f64::NAN)
    }
}

/// Level payment `P = L / a(n,i)`
pub fn level_payment(principal: f64, n: f64, i: f64) -> f64 {
    principal / annuity_immediate(n, i)
}

/// Present value at time `t` of the payments still to be made
pub fn prospective_balance(principal: f64, n: f64, i: f64, t: f64) -> f64 {
    level_payment(principal, n, i) * annuity_immediate(n - t, i)
}

/// Accumulated loan less accumulated payments made up to time `t`
pub fn retrospective_balance(principal: f64, n: f64, i: f64, t: f64) -> f64 {
    let payment = level_payment(principal, n, i);
    principal * (1.0 + i).powf(t) - payment * accumulated_annuity(t, i)
}

/// Outstanding balance computed both ways
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanBalance {
    pub prospective: f64,
    pub retrospective: f64,
}

pub fn outstanding_balance(principal: f64, n: f64, i: f64, t: f64) -> LoanBalance {
    LoanBalance {
        prospective: prospective_balance(principal, n, i, t),
        retrospective: retrospective_balance(principal, n, i, t),
    }
}
