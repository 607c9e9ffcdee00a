//! Redington immunization test

use std::fmt;

use serde::{Deserialize, Serialize};

use super::PortfolioMeasures;
use crate::rates::nearly;

/// Tolerance on the present value and duration equality conditions
pub const IMMUNIZATION_TOLERANCE: f64 = 1e-6;

/// One of the three Redington conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RedingtonCondition {
    PresentValue,
    Duration,
    Convexity,
}

impl fmt::Display for RedingtonCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RedingtonCondition::PresentValue => "PV",
            RedingtonCondition::Duration => "Dur",
            RedingtonCondition::Convexity => "Conv",
        };
        f.write_str(label)
    }
}

/// Asset and liability measures with each condition evaluated separately
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RedingtonCheck {
    pub assets: PortfolioMeasures,
    pub liabilities: PortfolioMeasures,
    /// `|PV_A - PV_L| < 1e-6`
    pub present_values_match: bool,
    /// `|D_A - D_L| < 1e-6`
    pub durations_match: bool,
    /// `C_A > C_L`
    pub asset_convexity_exceeds: bool,
}

impl RedingtonCheck {
    pub fn evaluate(liabilities: &[f64], assets: &[f64], i: f64) -> Self {
        let liabilities = PortfolioMeasures::compute(liabilities, i);
        let assets = PortfolioMeasures::compute(assets, i);
        Self {
            present_values_match: nearly(
                assets.present_value,
                liabilities.present_value,
                IMMUNIZATION_TOLERANCE,
            ),
            durations_match: nearly(
                assets.macaulay_duration,
                liabilities.macaulay_duration,
                IMMUNIZATION_TOLERANCE,
            ),
            asset_convexity_exceeds: assets.macaulay_convexity > liabilities.macaulay_convexity,
            assets,
            liabilities,
        }
    }

    pub fn is_immunized(&self) -> bool {
        self.present_values_match && self.durations_match && self.asset_convexity_exceeds
    }

    pub fn conditions(&self) -> [(RedingtonCondition, bool); 3] {
        [
            (RedingtonCondition::PresentValue, self.present_values_match),
            (RedingtonCondition::Duration, self.durations_match),
            (RedingtonCondition::Convexity, self.asset_convexity_exceeds),
        ]
    }

    pub fn failed_conditions(&self) -> Vec<RedingtonCondition> {
        self.conditions()
            .iter()
            .filter(|(_, ok)| !ok)
            .map(|(condition, _)| *condition)
            .collect()
    }

    /// One-line verdict in the form shown next to the calculator
    pub fn verdict(&self) -> String {
        if self.is_immunized() {
            return "Yes - Redington satisfied".to_string();
        }
        let marks: Vec<String> = self
            .conditions()
            .iter()
            .map(|(condition, ok)| format!("[{} {}]", condition, if *ok { "✓" } else { "✗" }))
            .collect();
        format!("No - Conditions: {}", marks.join(" "))
    }
}
