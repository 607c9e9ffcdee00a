//! Rates of return
//!
//! Internal rate of return by Newton-Raphson and time-weighted return over
//! sub-period returns.

mod irr;
mod time_weighted;

pub use irr::{npv_and_derivative, solve_irr, solve_irr_with, IrrSolution, SolverStatus};
pub use time_weighted::time_weighted_return;
