//! Term structure derived from a spot-rate curve
//!
//! Spot rates are indexed by integer maturity starting at 1. Discount
//! factors, forwards and the par yield are recomputed on every call.

mod bootstrap;

pub use bootstrap::{
    discount_factors, forward_rate, forward_rates, par_yield, plot_axis_max,
    spot_discount_factor, TermStructure,
};
