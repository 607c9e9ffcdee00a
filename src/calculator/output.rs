//! Calculator outputs
//!
//! Every numeric result is wrapped in [`Computed`], which records whether the
//! arithmetic produced a usable number. The math never fails; the presentation
//! layer decides what to show for a non-finite result.

use serde::{Serialize, Serializer};

use crate::config::DisplayConfig;
use crate::format::{format_number, format_percent};

/// A numeric result, or a marker that the arithmetic produced NaN/infinity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Computed {
    Finite(f64),
    NonFinite,
}

impl Computed {
    pub fn value(&self) -> Option<f64> {
        match self {
            Computed::Finite(x) => Some(*x),
            Computed::NonFinite => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, Computed::Finite(_))
    }

    fn raw(&self) -> f64 {
        self.value().unwrap_or(f64::NAN)
    }
}

impl From<f64> for Computed {
    fn from(x: f64) -> Self {
        if x.is_finite() {
            Computed::Finite(x)
        } else {
            Computed::NonFinite
        }
    }
}

impl Serialize for Computed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Computed::Finite(x) => serializer.serialize_f64(*x),
            Computed::NonFinite => serializer.serialize_none(),
        }
    }
}

/// Tabular output such as an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Computed>>,
}

/// The value of one named output together with how it is displayed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputValue {
    Number { value: Computed, decimals: usize },
    Percent { value: Computed, decimals: usize },
    NumberList { values: Vec<Computed>, decimals: usize },
    PercentList { values: Vec<Computed>, decimals: usize },
    Text { text: String },
    Table { table: Table },
}

impl OutputValue {
    pub fn number(x: f64, decimals: usize) -> Self {
        OutputValue::Number {
            value: x.into(),
            decimals,
        }
    }

    pub fn percent(x: f64, decimals: usize) -> Self {
        OutputValue::Percent {
            value: x.into(),
            decimals,
        }
    }

    pub fn number_list(xs: &[f64], decimals: usize) -> Self {
        OutputValue::NumberList {
            values: xs.iter().map(|&x| x.into()).collect(),
            decimals,
        }
    }

    pub fn percent_list(xs: &[f64], decimals: usize) -> Self {
        OutputValue::PercentList {
            values: xs.iter().map(|&x| x.into()).collect(),
            decimals,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        OutputValue::Text { text: text.into() }
    }

    /// True when any number carried by this output is non-finite
    pub fn has_non_finite(&self) -> bool {
        match self {
            OutputValue::Number { value, .. } | OutputValue::Percent { value, .. } => {
                !value.is_finite()
            }
            OutputValue::NumberList { values, .. } | OutputValue::PercentList { values, .. } => {
                values.iter().any(|v| !v.is_finite())
            }
            OutputValue::Text { .. } => false,
            OutputValue::Table { table } => table
                .rows
                .iter()
                .any(|row| row.iter().any(|v| !v.is_finite())),
        }
    }

    pub fn render(&self, display: &DisplayConfig) -> String {
        match self {
            OutputValue::Number { value, decimals } => format_number(value.raw(), *decimals, display),
            OutputValue::Percent { value, decimals } => {
                format_percent(value.raw(), *decimals, display)
            }
            OutputValue::NumberList { values, decimals } => values
                .iter()
                .map(|v| format_number(v.raw(), *decimals, display))
                .collect::<Vec<_>>()
                .join(", "),
            OutputValue::PercentList { values, decimals } => values
                .iter()
                .map(|v| format_percent(v.raw(), *decimals, display))
                .collect::<Vec<_>>()
                .join(", "),
            OutputValue::Text { text } => text.clone(),
            OutputValue::Table { table } => render_table(table, display),
        }
    }
}

fn render_table(table: &Table, display: &DisplayConfig) -> String {
    let mut lines = Vec::with_capacity(table.rows.len() + 2);
    let header: Vec<String> = table.columns.iter().map(|c| format!("{:>14}", c)).collect();
    lines.push(header.join(" "));
    lines.push("-".repeat(15 * table.columns.len()));
    for row in &table.rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(idx, v)| {
                // First column is the period number
                let decimals = if idx == 0 { 0 } else { display.table_decimals };
                format!("{:>14}", format_number(v.raw(), decimals, display))
            })
            .collect();
        lines.push(cells.join(" "));
    }
    lines.join("\n")
}

/// A named output of a calculator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Output {
    pub name: String,
    #[serde(flatten)]
    pub value: OutputValue,
}

/// Everything one calculator invocation produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalcResponse {
    pub calculator: String,
    pub outputs: Vec<Output>,
}

impl CalcResponse {
    pub fn new(calculator: impl Into<String>) -> Self {
        Self {
            calculator: calculator.into(),
            outputs: Vec::new(),
        }
    }

    /// Builder-style append of a named output
    pub fn with(mut self, name: impl Into<String>, value: OutputValue) -> Self {
        self.outputs.push(Output {
            name: name.into(),
            value,
        });
        self
    }

    pub fn get(&self, name: &str) -> Option<&OutputValue> {
        self.outputs.iter().find(|o| o.name == name).map(|o| &o.value)
    }

    /// Finite numeric value of a scalar output, if present
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            OutputValue::Number { value, .. } | OutputValue::Percent { value, .. } => value.value(),
            _ => None,
        }
    }

    pub fn render(&self, display: &DisplayConfig) -> String {
        self.outputs
            .iter()
            .map(|o| match &o.value {
                OutputValue::Table { .. } => format!("{}:\n{}", o.name, o.value.render(display)),
                _ => format!("{:<24} {}", o.name, o.value.render(display)),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computed_marker() {
        assert_eq!(Computed::from(1.5), Computed::Finite(1.5));
        assert_eq!(Computed::from(f64::NAN), Computed::NonFinite);
        assert_eq!(Computed::from(f64::NEG_INFINITY), Computed::NonFinite);
    }

    #[test]
    fn test_serialization() {
        let response = CalcResponse::new("demo")
            .with("ok", OutputValue::number(2.5, 2))
            .with("bad", OutputValue::percent(f64::NAN, 2));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["outputs"][0]["value"], 2.5);
        assert_eq!(json["outputs"][0]["kind"], "number");
        assert!(json["outputs"][1]["value"].is_null());
    }

    #[test]
    fn test_render_uses_placeholder() {
        let display = DisplayConfig::default();
        let response = CalcResponse::new("demo").with("x", OutputValue::number(f64::INFINITY, 2));
        assert!(response.render(&display).ends_with("—"));
        assert!(response.get("x").unwrap().has_non_finite());
        assert_eq!(response.number("x"), None);
    }

    #[test]
    fn test_render_lists() {
        let display = DisplayConfig::default();
        let value = OutputValue::percent_list(&[0.02, 0.031], 2);
        assert_eq!(value.render(&display), "2.00%, 3.10%");
    }
}
