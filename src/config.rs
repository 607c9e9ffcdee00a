//! Engine configuration
//!
//! Defaults reproduce the calculator constants. A JSON file can override any
//! subset of fields, and environment variables override the solver settings:
//!   ACTUARIAL_IRR_GUESS, ACTUARIAL_IRR_TOLERANCE, ACTUARIAL_IRR_MAX_ITER

use std::env;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calculator::parse_number;
use crate::error::{ConfigError, InputError};

/// Newton-Raphson settings for the IRR solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Starting rate (default 10%)
    pub initial_guess: f64,
    /// Stop once `|f(j)|` is below this (default 1e-9)
    pub tolerance: f64,
    /// Iteration cap (default 100)
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.1,
            tolerance: 1e-9,
            max_iterations: 100,
        }
    }
}

/// How calculator outputs are rendered as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Shown in place of NaN or infinite results
    pub placeholder: String,
    /// Insert thousands separators in plain numbers
    pub group_thousands: bool,
    /// Decimal places for amortization table cells
    pub table_decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            placeholder: "—".to_string(),
            group_thousands: true,
            table_decimals: 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub solver: SolverConfig,
    pub display: DisplayConfig,
}

impl EngineConfig {
    /// Defaults, then the optional JSON file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_json_path(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_json_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text)?;
        debug!("loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Override solver settings from `ACTUARIAL_IRR_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(guess) = env_number("ACTUARIAL_IRR_GUESS")? {
            self.solver.initial_guess = guess;
        }
        if let Some(tolerance) = env_number("ACTUARIAL_IRR_TOLERANCE")? {
            self.solver.tolerance = tolerance;
        }
        if let Some(max_iter) = env_number("ACTUARIAL_IRR_MAX_ITER")? {
            if max_iter < 0.0 || max_iter.fract() != 0.0 {
                return Err(ConfigError::Env {
                    name: "ACTUARIAL_IRR_MAX_ITER".to_string(),
                    source: InputError::OutOfRange {
                        field: "max_iterations".to_string(),
                        value: max_iter,
                        reason: "expected a non-negative whole number".to_string(),
                    },
                });
            }
            self.solver.max_iterations = max_iter as u32;
        }
        Ok(())
    }
}

fn env_number(name: &str) -> Result<Option<f64>, ConfigError> {
    match env::var(name) {
        Ok(text) => parse_number(name, &text)
            .map(Some)
            .map_err(|source| ConfigError::Env {
                name: name.to_string(),
                source,
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.solver.initial_guess, 0.1);
        assert_eq!(config.solver.tolerance, 1e-9);
        assert_eq!(config.solver.max_iterations, 100);
        assert_eq!(config.display.placeholder, "—");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"solver": {"max_iterations": 250}}"#).unwrap();
        assert_eq!(config.solver.max_iterations, 250);
        assert_eq!(config.solver.initial_guess, 0.1);
        assert_eq!(config.display, DisplayConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_json_path(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
