//! Batch evaluation of independent calculator requests
//!
//! Requests share nothing, so they are evaluated in parallel and returned in
//! input order.

use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::calculator::{evaluate, CalcRequest, CalcResponse};
use crate::config::EngineConfig;

/// Outcome of one request in a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchOutcome {
    Ok(CalcResponse),
    Rejected { calculator: String, error: String },
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, BatchOutcome::Ok(_))
    }
}

/// Evaluate every request, keeping input errors per request
pub fn evaluate_batch(requests: &[CalcRequest], config: &EngineConfig) -> Vec<BatchOutcome> {
    let outcomes: Vec<BatchOutcome> = requests
        .par_iter()
        .map(|request| match evaluate(request, config) {
            Ok(response) => BatchOutcome::Ok(response),
            Err(e) => BatchOutcome::Rejected {
                calculator: request.name().to_string(),
                error: e.to_string(),
            },
        })
        .collect();

    let rejected = outcomes.iter().filter(|o| !o.is_ok()).count();
    info!("evaluated {} requests ({} rejected)", outcomes.len(), rejected);
    outcomes
}
