//! Actuarial Math - financial mathematics calculation engine
//!
//! This library provides:
//! - Interest rate conversions (effective, discount, nominal, force of interest)
//! - Cashflow valuation and level/varying annuities
//! - Loan and bond amortization
//! - Duration, convexity and Redington immunization
//! - Term-structure bootstrap and swap valuation
//! - IRR by Newton-Raphson
//!
//! All math functions are pure: invalid inputs yield NaN or infinity rather
//! than errors. The [`calculator`] module is the boundary that validates
//! named inputs and packages outputs for display.

pub mod annuities;
pub mod batch;
pub mod bonds;
pub mod calculator;
pub mod cashflows;
pub mod config;
pub mod error;
pub mod format;
pub mod loans;
pub mod rates;
pub mod report;
pub mod returns;
pub mod risk;
pub mod swaps;
pub mod term_structure;

// Re-export commonly used types
pub use calculator::{evaluate, CalcRequest, CalcResponse, Computed};
pub use config::EngineConfig;
pub use error::{ConfigError, InputError};
pub use loans::LoanSchedule;
pub use bonds::BondSchedule;
pub use returns::{solve_irr, IrrSolution};
