//! Bond price and book-value schedule

use log::debug;
use serde::{Deserialize, Serialize};

use crate::annuities::annuity_immediate;

/// Price of a bond with face `face`, redemption `redemption`, coupon rate
/// `coupon_rate` and `n` periods remaining, at yield `i` per period
///
/// # Formula
/// ```text
/// P = F·r·a(n,i) + C·(1+i)^-n
/// ```
pub fn bond_price(face: f64, redemption: f64, coupon_rate: f64, i: f64, n: f64) -> f64 {
    face * coupon_rate * annuity_immediate(n, i) + redemption * (1.0 + i).powf(-n)
}

/// One period of a bond amortization table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondRow {
    pub period: u32,
    pub book_value_start: f64,
    pub interest: f64,
    pub coupon: f64,
    pub book_value_end: f64,
}

/// Book values of a bond rolled forward from its purchase price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondSchedule {
    pub rows: Vec<BondRow>,
}

impl BondSchedule {
    /// Roll `initial_price` forward at yield `i`, paying coupon `F·r` each period
    pub fn build(initial_price: f64, face: f64, coupon_rate: f64, i: f64, term: u32) -> Self {
        let coupon = face * coupon_rate;
        let mut book = initial_price;
        let rows = (1..=term)
            .map(|period| {
                let interest = book * i;
                let end = book * (1.0 + i) - coupon;
                let row = BondRow {
                    period,
                    book_value_start: book,
                    interest,
                    coupon,
                    book_value_end: end,
                };
                book = end;
                row
            })
            .collect();

        debug!("bond schedule: P0={} n={} final book={}", initial_price, term, book);
        Self { rows }
    }

    pub fn final_book_value(&self) -> f64 {
        self.rows.last().map(|r| r.book_value_end).unwrap_or(f64::NAN)
    }

    /// Total premium amortized (positive) or discount accumulated (negative)
    pub fn total_write_down(&self) -> f64 {
        self.rows.iter().map(|r| r.coupon - r.interest).sum()
    }
}
