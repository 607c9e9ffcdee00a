//! Annuity valuation
//!
//! Level, due, continuous and varying annuities. These are the algebraic
//! foundation reused by loan amortization and bond pricing.
//!
//! Every function takes the period count `n` as `f64`: closed forms tolerate
//! non-integer terms, which matters for continuous annuities.

mod level;
mod varying;

pub use level::{
    accumulated_annuity, annuity_due, annuity_immediate, continuous_annuity, deferred_perpetuity,
    mthly_annuity, MthlyAnnuity,
};
pub use varying::{decreasing_annuity, geometric_annuity, increasing_annuity};
