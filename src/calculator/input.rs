//! Parsing of user-supplied calculator inputs
//!
//! Scalars are strict: text that is not a finite number is rejected. Lists
//! follow the form convention of comma/space-delimited numbers where
//! anything non-numeric is dropped.

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Largest term accepted for schedule-producing calculators
pub const MAX_SCHEDULE_PERIODS: u32 = 100_000;

/// Parse one scalar field, rejecting non-numeric or non-finite text
pub fn parse_number(field: &str, text: &str) -> Result<f64, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::MissingField {
            field: field.to_string(),
        });
    }
    match trimmed.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err(InputError::NotANumber {
            field: field.to_string(),
            value: trimmed.to_string(),
        }),
    }
}

/// Parse a comma/space-delimited list, silently dropping non-numeric tokens
pub fn parse_number_list(text: &str) -> Vec<f64> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.parse::<f64>().ok())
        .filter(|x| !x.is_nan())
        .collect()
}

/// A scalar input given either as a JSON number or as form text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    pub fn resolve(&self, field: &str) -> Result<f64, InputError> {
        match self {
            Scalar::Number(x) => Ok(*x),
            Scalar::Text(text) => parse_number(field, text),
        }
    }

    /// Resolve a whole-percent input (e.g. `5` for 5%) to a decimal rate
    pub fn resolve_pct(&self, field: &str) -> Result<f64, InputError> {
        Ok(self.resolve(field)? / 100.0)
    }

    /// Resolve a period count for a schedule; fractional parts are dropped
    pub fn resolve_periods(&self, field: &str) -> Result<u32, InputError> {
        Ok(self.resolve_bounded_periods(field)?.max(0.0).floor() as u32)
    }

    /// Resolve a term used by period-by-period summation, keeping any
    /// fractional part but rejecting anything above [`MAX_SCHEDULE_PERIODS`]
    pub fn resolve_bounded_periods(&self, field: &str) -> Result<f64, InputError> {
        let x = self.resolve(field)?;
        if !x.is_finite() || x > MAX_SCHEDULE_PERIODS as f64 {
            return Err(InputError::OutOfRange {
                field: field.to_string(),
                value: x,
                reason: format!("at most {} periods", MAX_SCHEDULE_PERIODS),
            });
        }
        Ok(x)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Number(x)
    }
}

impl From<String> for Scalar {
    fn from(text: String) -> Self {
        Scalar::Text(text)
    }
}

impl From<&str> for Scalar {
    fn from(text: &str) -> Self {
        Scalar::Text(text.to_string())
    }
}

/// A numeric sequence given either as a JSON array or as delimited text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberList {
    Numbers(Vec<f64>),
    Text(String),
}

impl NumberList {
    pub fn values(&self) -> Vec<f64> {
        match self {
            NumberList::Numbers(values) => values.clone(),
            NumberList::Text(text) => parse_number_list(text),
        }
    }

    /// Values of a whole-percent list converted to decimals
    pub fn values_pct(&self) -> Vec<f64> {
        self.values().into_iter().map(|x| x / 100.0).collect()
    }
}

impl Default for NumberList {
    fn default() -> Self {
        NumberList::Numbers(Vec::new())
    }
}

impl From<Vec<f64>> for NumberList {
    fn from(values: Vec<f64>) -> Self {
        NumberList::Numbers(values)
    }
}

impl From<String> for NumberList {
    fn from(text: String) -> Self {
        NumberList::Text(text)
    }
}

impl From<&str> for NumberList {
    fn from(text: &str) -> Self {
        NumberList::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("rate", " 5.25 ").unwrap(), 5.25);
        assert_eq!(parse_number("rate", "1e3").unwrap(), 1000.0);
        assert!(matches!(
            parse_number("rate", "five"),
            Err(InputError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_number("rate", "NaN"),
            Err(InputError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_number("rate", "   "),
            Err(InputError::MissingField { .. })
        ));
    }

    #[test]
    fn test_parse_list_drops_junk() {
        assert_eq!(
            parse_number_list("-1000, 300 300,,abc 300  1e2"),
            vec![-1000.0, 300.0, 300.0, 300.0, 100.0]
        );
        assert!(parse_number_list("").is_empty());
    }

    #[test]
    fn test_scalar_from_json() {
        let values: Vec<Scalar> = serde_json::from_str(r#"[5, "6.5", "x"]"#).unwrap();
        assert_eq!(values[0].resolve_pct("a").unwrap(), 0.05);
        assert_eq!(values[1].resolve("b").unwrap(), 6.5);
        assert!(values[2].resolve("c").is_err());
    }

    #[test]
    fn test_resolve_periods() {
        assert_eq!(Scalar::from(12.7).resolve_periods("n").unwrap(), 12);
        assert_eq!(Scalar::from(-3.0).resolve_periods("n").unwrap(), 0);
        assert!(Scalar::from(1e9).resolve_periods("n").is_err());
    }

    #[test]
    fn test_list_from_json() {
        let list: NumberList = serde_json::from_str(r#""2, 2.5 3""#).unwrap();
        assert_eq!(list.values_pct(), vec![0.02, 0.025, 0.03]);
        let list: NumberList = serde_json::from_str("[0.97, 0.94]").unwrap();
        assert_eq!(list.values(), vec![0.97, 0.94]);
    }
}
