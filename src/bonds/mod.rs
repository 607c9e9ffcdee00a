//! Level-coupon bond pricing
//!
//! - Price from yield with arbitrary redemption value
//! - Book-value (amortization) schedule
//! - Accrued interest split into dirty and clean price

mod accrued;
mod pricing;

pub use accrued::{accrued_interest, accrued_interest_between, AccruedInterest};
pub use pricing::{bond_price, BondRow, BondSchedule};
