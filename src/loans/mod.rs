//! Level-payment loan amortization
//!
//! Schedules are built forward period by period; outstanding balances can be
//! queried prospectively or retrospectively and the two methods agree.

mod amortization;

pub use amortization::{
    level_payment, outstanding_balance, prospective_balance, retrospective_balance,
    LoanBalance, LoanRow, LoanSchedule,
};
