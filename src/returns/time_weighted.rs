/// Time-weighted return over consecutive sub-period returns, `Π(1 + r_k) - 1`
pub fn time_weighted_return(returns: &[f64]) -> f64 {
    returns.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
}
