//! Interest rate risk measures
//!
//! Macaulay and modified duration and convexity of a cashflow stream at a
//! flat rate, price sensitivities, and Redington immunization tests built
//! on the same measures.

mod duration;
mod immunization;

pub use duration::{
    dollar_duration, dv01, macaulay_convexity, macaulay_duration, PortfolioMeasures,
    RiskMeasures,
};
pub use immunization::{RedingtonCheck, RedingtonCondition, IMMUNIZATION_TOLERANCE};
