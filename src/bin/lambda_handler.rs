//! AWS Lambda handler for running the heating comparison
//!
//! Accepts the comparison parameters as JSON, either as the event itself or
//! as the `body` of a Lambda Function URL request, and returns the report
//! together with the annual series a chart needs.

use heating_comparison::{ComparisonInputs, ComparisonReport, CostSeries, ScenarioRunner};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Serialize;
use serde_json::{json, Value};

/// Annual series of one scenario, for charting
#[derive(Debug, Serialize)]
pub struct SeriesOutput {
    pub label: String,
    pub heat_pump: CostSeries,
    pub financing: CostSeries,
    pub heating: CostSeries,
    pub district_heating: CostSeries,
}

/// Output from the comparison
#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    pub report: ComparisonReport,
    pub series: Vec<SeriesOutput>,
    pub execution_time_ms: u64,
}

/// Pull the parameter document out of the event. Function URL events carry
/// it as a string body; direct invocations pass it as the payload.
fn request_inputs(payload: Value) -> Result<ComparisonInputs, String> {
    let body = match payload.get("body") {
        Some(Value::String(body)) => Some(body.clone()),
        Some(Value::Null) | None => None,
        Some(_) => return Err("Invalid JSON: body must be a string".to_string()),
    };
    let document = match body {
        Some(body) if body.trim().is_empty() => json!({}),
        Some(body) => serde_json::from_str(&body).map_err(|e| format!("Invalid JSON: {}", e))?,
        None => payload,
    };
    serde_json::from_value(document).map_err(|e| format!("Invalid parameters: {}", e))
}

fn is_preflight(payload: &Value) -> bool {
    payload
        .pointer("/requestContext/http/method")
        .and_then(Value::as_str)
        .is_some_and(|method| method == "OPTIONS")
}

fn http_response(status: u16, body: String) -> Value {
    json!({
        "statusCode": status,
        "headers": {
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
            "Access-Control-Allow-Methods": "POST, OPTIONS",
            "Access-Control-Allow-Headers": "Content-Type",
        },
        "body": body,
    })
}

fn error_response(status: u16, message: &str) -> Value {
    http_response(status, json!({ "error": message }).to_string())
}

fn compare(inputs: ComparisonInputs, start: std::time::Instant) -> Result<ComparisonResponse, String> {
    let runner = ScenarioRunner::new(inputs).map_err(|e| e.to_string())?;
    let result = runner.run();

    let series = result
        .scenarios
        .iter()
        .map(|s| SeriesOutput {
            label: s.scenario.label.clone(),
            heat_pump: s.heat_pump_costs.clone(),
            financing: s.breakdown.financing.clone(),
            heating: s.breakdown.heating.clone(),
            district_heating: s.district_heating_costs.clone(),
        })
        .collect();

    Ok(ComparisonResponse {
        report: ComparisonReport::new(&result),
        series,
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

async fn handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let start = std::time::Instant::now();
    let payload = event.payload;

    if is_preflight(&payload) {
        return Ok(http_response(200, String::new()));
    }

    let inputs = match request_inputs(payload) {
        Ok(inputs) => inputs,
        Err(message) => return Ok(error_response(400, &message)),
    };

    let response = match compare(inputs, start) {
        Ok(response) => response,
        Err(message) => return Ok(error_response(422, &message)),
    };

    log::info!("comparison completed in {} ms", response.execution_time_ms);
    Ok(http_response(200, serde_json::to_string(&response)?))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_payload() {
        let inputs = request_inputs(json!({ "scop": 4.0 })).unwrap();
        assert_eq!(inputs.scop, 4.0);
        assert_eq!(inputs.financial.loan_term_years, 20);
    }

    #[test]
    fn test_function_url_body() {
        let payload = json!({ "body": "{\"floor_area_m2\": 2500}" });
        let inputs = request_inputs(payload).unwrap();
        assert_eq!(inputs.floor_area_m2, 2500.0);

        let empty = request_inputs(json!({ "body": "" })).unwrap();
        assert_eq!(empty, ComparisonInputs::default());
    }

    #[test]
    fn test_malformed_body() {
        let err = request_inputs(json!({ "body": "{not json" })).unwrap_err();
        assert!(err.starts_with("Invalid JSON"));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let inputs = request_inputs(json!({ "financial": { "loan_term_years": 0 } })).unwrap();
        let err = compare(inputs, std::time::Instant::now()).unwrap_err();
        assert!(err.contains("loan_term_years"));
    }

    #[test]
    fn test_preflight() {
        let payload = json!({ "requestContext": { "http": { "method": "OPTIONS" } } });
        assert!(is_preflight(&payload));
        assert!(!is_preflight(&json!({})));
    }

    #[test]
    fn test_response_shape() {
        let response = compare(ComparisonInputs::default(), std::time::Instant::now()).unwrap();
        assert_eq!(response.series.len(), 3);
        assert_eq!(response.series[0].heat_pump.len(), 50);
        let body = http_response(200, serde_json::to_string(&response).unwrap());
        assert_eq!(body["statusCode"], 200);
    }
}
