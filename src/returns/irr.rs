//! Internal Rate of Return (IRR) calculation
//!
//! Newton-Raphson on `f(j) = Σ cf_t / (1+j)^t` with `t` counted from 0, so the
//! initial outflow is `cashflows[0]`. There is no bracketing or bisection
//! fallback: a non-finite step resets the estimate to the initial guess and
//! stops, and the status records that the estimate is unconverged.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;

/// How the Newton iteration ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverStatus {
    /// `|f(j)|` fell below the tolerance
    Converged,
    /// A step produced a non-finite rate; the rate was reset to the initial guess
    Diverged,
    /// Iteration cap reached without meeting the tolerance
    MaxIterations,
}

/// Result of an IRR solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrSolution {
    /// Periodic rate estimate
    pub rate: f64,
    /// Number of NPV evaluations performed
    pub iterations: u32,
    pub status: SolverStatus,
}

impl IrrSolution {
    pub fn is_converged(&self) -> bool {
        self.status == SolverStatus::Converged
    }

    /// Annual effective rate when the cashflows are spaced `periods_per_year` apart
    pub fn annualized(&self, periods_per_year: u32) -> f64 {
        (1.0 + self.rate).powi(periods_per_year as i32) - 1.0
    }
}

/// Solve with the default guess of 10%, tolerance 1e-9 and 100 iterations
pub fn solve_irr(cashflows: &[f64]) -> IrrSolution {
    solve_irr_with(cashflows, &SolverConfig::default())
}

/// Calculate the IRR of `cashflows` using the Newton-Raphson method
///
/// # Arguments
/// * `cashflows` - Cash flows from time 0 (positive = inflow, negative = outflow)
/// * `config` - Initial guess, residual tolerance and iteration cap
pub fn solve_irr_with(cashflows: &[f64], config: &SolverConfig) -> IrrSolution {
    let mut rate = config.initial_guess;
    let mut iterations = 0;
    let mut status = SolverStatus::MaxIterations;

    while iterations < config.max_iterations {
        iterations += 1;
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if npv.abs() < config.tolerance {
            status = SolverStatus::Converged;
            break;
        }

        rate -= npv / dnpv;

        if !rate.is_finite() {
            warn!(
                "IRR step became non-finite after {} iterations (npv={}, dnpv={}); returning initial guess",
                iterations, npv, dnpv
            );
            rate = config.initial_guess;
            status = SolverStatus::Diverged;
            break;
        }
    }

    debug!("IRR solve: rate={} iterations={} status={:?}", rate, iterations, status);

    IrrSolution {
        rate,
        iterations,
        status,
    }
}

/// Calculate NPV and its derivative with respect to rate
pub fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        npv += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            dnpv -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (npv, dnpv)
}
