//! Calculator boundary
//!
//! Each calculator takes named inputs as they arrive from a form or a JSON
//! request, validates them, runs the math modules and returns named outputs
//! ready for display. Calculators hold no state between invocations.

mod evaluate;
mod input;
mod output;
mod request;

pub use evaluate::evaluate;
pub use input::{parse_number, parse_number_list, NumberList, Scalar, MAX_SCHEDULE_PERIODS};
pub use output::{CalcResponse, Computed, Output, OutputValue, Table};
pub use request::CalcRequest;
