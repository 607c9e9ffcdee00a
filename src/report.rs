//! CSV export of amortization schedules

use std::io::Write;

use serde::Serialize;

use crate::bonds::BondSchedule;
use crate::loans::LoanSchedule;

fn write_rows<W: Write, R: Serialize>(writer: W, rows: &[R]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write one line per period: period, payment, interest, principal, balance_after
pub fn write_loan_schedule<W: Write>(schedule: &LoanSchedule, writer: W) -> Result<(), csv::Error> {
    write_rows(writer, &schedule.rows)
}

/// Write one line per period of a bond book-value schedule
pub fn write_bond_schedule<W: Write>(schedule: &BondSchedule, writer: W) -> Result<(), csv::Error> {
    write_rows(writer, &schedule.rows)
}
