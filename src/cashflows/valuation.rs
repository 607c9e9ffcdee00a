//! Present and accumulated value of end-of-period cashflows

/// Present value at time 0 of `cashflows[t-1]` paid at the end of period `t`
pub fn present_value(cashflows: &[f64], i: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(idx, &cf)| cf / (1.0 + i).powi(idx as i32 + 1))
        .sum()
}

/// Value of the same sequence at the final period `n`
pub fn accumulated_value(cashflows: &[f64], i: f64) -> f64 {
    let n = cashflows.len();
    cashflows
        .iter()
        .enumerate()
        .map(|(idx, &cf)| cf * (1.0 + i).powi((n - (idx + 1)) as i32))
        .sum()
}
