//! AWS Lambda handler for the calculators
//!
//! Accepts a single calculator request or an array of requests as JSON and
//! returns the named outputs. Served through a Lambda Function URL, with CORS
//! headers for direct browser access.

use actuarial_math::{
    batch::{evaluate_batch, BatchOutcome},
    calculator::{evaluate, CalcRequest},
    config::EngineConfig,
};
use aws_lambda_events::event::lambda_function_urls::{
    LambdaFunctionUrlRequest, LambdaFunctionUrlResponse,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Single(CalcRequest),
    Batch(Vec<CalcRequest>),
}

#[derive(Debug, Serialize)]
struct BatchResponse {
    results: Vec<BatchOutcome>,
    execution_time_ms: u64,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn response(status_code: i64, body: Option<String>) -> Result<LambdaFunctionUrlResponse, Error> {
    let mut response = LambdaFunctionUrlResponse {
        status_code,
        headers: Default::default(),
        body,
        is_base64_encoded: false,
        cookies: Vec::new(),
    };
    response
        .headers
        .insert("content-type", "application/json".parse()?);
    response
        .headers
        .insert("access-control-allow-origin", "*".parse()?);
    response
        .headers
        .insert("access-control-allow-methods", "POST, OPTIONS".parse()?);
    response
        .headers
        .insert("access-control-allow-headers", "Content-Type".parse()?);
    Ok(response)
}

fn error_response(status_code: i64, message: String) -> Result<LambdaFunctionUrlResponse, Error> {
    let body = serde_json::to_string(&ErrorBody { error: message })?;
    response(status_code, Some(body))
}

/// Lambda handler function
async fn handler(
    event: LambdaEvent<LambdaFunctionUrlRequest>,
    config: &EngineConfig,
) -> Result<LambdaFunctionUrlResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    // Handle CORS preflight
    if request.request_context.http.method.as_deref() == Some("OPTIONS") {
        return response(200, None);
    }

    if request.is_base64_encoded {
        return error_response(400, "base64-encoded bodies are not supported".to_string());
    }

    let body = request.body.unwrap_or_else(|| "{}".to_string());
    let payload: Payload = match serde_json::from_str(&body) {
        Ok(p) => p,
        Err(e) => return error_response(400, format!("Invalid JSON: {}", e)),
    };

    match payload {
        Payload::Single(calc) => match evaluate(&calc, config) {
            Ok(result) => {
                info!("{} evaluated in {:?}", calc.name(), start.elapsed());
                response(200, Some(serde_json::to_string(&result)?))
            }
            Err(e) => error_response(400, e.to_string()),
        },
        Payload::Batch(requests) => {
            let results = evaluate_batch(&requests, config);
            let body = BatchResponse {
                results,
                execution_time_ms: start.elapsed().as_millis() as u64,
            };
            response(200, Some(serde_json::to_string(&body)?))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = EngineConfig::load(None)?;
    let config = &config;
    run(service_fn(move |event| async move { handler(event, config).await })).await
}
