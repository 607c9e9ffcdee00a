//! Valuation of arbitrary cashflow sequences
//!
//! Index 0 of a sequence is the payment at the end of period 1.

mod valuation;

pub use valuation::{accumulated_value, present_value};
