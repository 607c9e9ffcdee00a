//! Plain fixed-for-floating interest rate swaps valued off a discount curve

mod valuation;

pub use valuation::{annuity_factor, par_swap_rate, SwapValuation, DEFAULT_ACCRUAL};
