//! API route handlers
//!
//! Every response carries `success`. Engine errors and malformed bodies map
//! to 400, everything else to 200.

use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use seqecho::{codes, samples, EchoError, HistorySnapshot, PatternResult};
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info};

pub type ApiResponse = (StatusCode, Json<JsonValue>);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    pub sequence: Vec<JsonValue>,
    #[serde(default)]
    pub predict_count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub sequence: Vec<JsonValue>,
}

fn ok(body: JsonValue) -> ApiResponse {
    (StatusCode::OK, Json(body))
}

fn error_response(err: &EchoError) -> ApiResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "success": false,
            "error": err.message,
            "code": err.code,
        })),
    )
}

fn rejection_response(rejection: JsonRejection) -> ApiResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "success": false,
            "error": rejection.body_text(),
            "code": codes::INPUT_SHAPE,
        })),
    )
}

/// Non-numeric elements become NaN, which the classifier reports as an
/// invalid element.
fn to_numbers(values: &[JsonValue]) -> Vec<f64> {
    values.iter().map(|v| v.as_f64().unwrap_or(f64::NAN)).collect()
}

fn pattern_details(pattern: &PatternResult, formula: Option<&str>) -> JsonValue {
    match pattern {
        PatternResult::Arithmetic { difference } => json!({
            "difference": difference,
            "formula": formula,
        }),
        PatternResult::Geometric { ratio } => json!({
            "ratio": ratio,
            "formula": formula,
        }),
        PatternResult::Polynomial { degree, differences } => json!({
            "degree": degree,
            "differences": differences,
            "formula": formula,
        }),
        PatternResult::Unknown { reason } => json!({
            "reason": reason.to_string(),
        }),
    }
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> ApiResponse {
    let Json(req) = match payload {
        Ok(p) => p,
        Err(rejection) => return rejection_response(rejection),
    };

    let sequence = to_numbers(&req.sequence);
    let result = state.echo.lock().analyze(&sequence, req.predict_count);

    match result {
        Ok(analysis) => ok(json!({
            "success": true,
            "predictions": analysis.predictions,
            "nextNumber": analysis.next_number,
            "pattern": analysis.pattern.kind(),
            "patternDetails": pattern_details(&analysis.pattern, analysis.formula.as_deref()),
            "sequenceLength": analysis.sequence_length,
            "memory": analysis.memory,
        })),
        Err(err) => {
            debug!(code = %err.code, "predict rejected");
            error_response(&err)
        }
    }
}

pub async fn validate(
    State(state): State<AppState>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> ApiResponse {
    let Json(req) = match payload {
        Ok(p) => p,
        Err(rejection) => return rejection_response(rejection),
    };

    let sequence = to_numbers(&req.sequence);
    let validation = state.echo.lock().validate(&sequence);

    ok(json!({
        "success": true,
        "valid": validation.valid,
        "inputError": validation.input_error,
        "pattern": validation.pattern.kind(),
        "patternDetails": pattern_details(&validation.pattern, validation.formula.as_deref()),
        "message": validation.message,
    }))
}

pub async fn memories(State(state): State<AppState>) -> ApiResponse {
    let echo = state.echo.lock();
    ok(json!({
        "success": true,
        "memories": echo.recent_memories(),
        "total": echo.memory_count(),
        "limit": echo.config().memories_limit,
    }))
}

pub async fn statistics(State(state): State<AppState>) -> ApiResponse {
    let stats = state.echo.lock().statistics();
    ok(json!({
        "success": true,
        "statistics": stats,
        "averageSequenceLengthRounded": stats.average_sequence_length_rounded(),
    }))
}

pub async fn clear(State(state): State<AppState>) -> ApiResponse {
    let mut echo = state.echo.lock();
    let dropped = echo.memory_count();
    echo.clear();
    ok(json!({
        "success": true,
        "message": format!("Cleared {} memories", dropped),
    }))
}

pub async fn list_samples() -> ApiResponse {
    ok(json!({
        "success": true,
        "samples": samples(),
    }))
}

pub async fn export(State(state): State<AppState>) -> ApiResponse {
    let snapshot = state.echo.lock().export();
    ok(json!({
        "success": true,
        "snapshot": snapshot,
    }))
}

pub async fn import(
    State(state): State<AppState>,
    payload: Result<Json<HistorySnapshot>, JsonRejection>,
) -> ApiResponse {
    let Json(snapshot) = match payload {
        Ok(p) => p,
        Err(rejection) => return rejection_response(rejection),
    };

    let count = snapshot.memories.len();
    match state.echo.lock().import(snapshot) {
        Ok(()) => {
            info!(count, "snapshot imported over HTTP");
            ok(json!({
                "success": true,
                "message": format!("Imported {} memories", count),
            }))
        }
        Err(err) => error_response(&err),
    }
}

pub async fn health() -> ApiResponse {
    ok(json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqecho::SeqEcho;

    fn state() -> AppState {
        AppState::new(SeqEcho::new())
    }

    fn predict_request(sequence: JsonValue, predict_count: Option<usize>) -> Result<Json<PredictRequest>, JsonRejection> {
        let sequence = match sequence {
            JsonValue::Array(items) => items,
            other => vec![other],
        };
        Ok(Json(PredictRequest { sequence, predict_count }))
    }

    #[tokio::test]
    async fn test_predict_arithmetic() {
        let (status, Json(body)) = predict(State(state()), predict_request(json!([3, 6, 9, 12]), Some(1))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["predictions"], json!([15.0]));
        assert_eq!(body["nextNumber"], json!(15.0));
        assert_eq!(body["pattern"], json!("arithmetic"));
        assert_eq!(body["patternDetails"]["difference"], json!(3.0));
        assert_eq!(body["sequenceLength"], json!(4));
        assert_eq!(body["memory"]["id"], json!(1));
    }

    #[tokio::test]
    async fn test_predict_geometric() {
        let (status, Json(body)) = predict(State(state()), predict_request(json!([2, 6, 18, 54]), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["predictions"], json!([162.0]));
        assert_eq!(body["patternDetails"]["ratio"], json!(3.0));
    }

    #[tokio::test]
    async fn test_unknown_pattern_is_bad_request() {
        let app = state();
        let (status, Json(body)) = predict(State(app.clone()), predict_request(json!([1, 1, 2, 3, 5, 8]), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["code"], json!("CLASSIFICATION_MISS"));
        assert_eq!(app.echo.lock().memory_count(), 0);
    }

    #[tokio::test]
    async fn test_non_numeric_element() {
        let (status, Json(body)) = predict(State(state()), predict_request(json!([1, "two", 3]), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("INPUT_VALUE"));
        assert!(body["error"].as_str().unwrap().contains("all elements must be valid numbers"));
    }

    #[tokio::test]
    async fn test_validate_does_not_record() {
        let app = state();
        let req = Ok(Json(ValidateRequest { sequence: vec![json!(1), json!(4), json!(9), json!(16)] }));
        let (status, Json(body)) = validate(State(app.clone()), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], json!(true));
        assert_eq!(body["pattern"], json!("polynomial"));
        assert_eq!(body["patternDetails"]["degree"], json!(2));
        assert_eq!(body["inputError"], json!(false));
        assert_eq!(app.echo.lock().memory_count(), 0);
    }

    #[tokio::test]
    async fn test_validate_flags_input_errors() {
        let req = Ok(Json(ValidateRequest { sequence: vec![json!(1), json!("x")] }));
        let (status, Json(body)) = validate(State(state()), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], json!(false));
        assert_eq!(body["inputError"], json!(true));

        let req = Ok(Json(ValidateRequest { sequence: vec![json!(1), json!(1), json!(2), json!(3), json!(5), json!(8)] }));
        let (_, Json(body)) = validate(State(state()), req).await;
        assert_eq!(body["valid"], json!(false));
        assert_eq!(body["inputError"], json!(false));
    }

    #[tokio::test]
    async fn test_predict_out_of_range() {
        let app = state();
        let (status, Json(body)) = predict(State(app.clone()), predict_request(json!([1e308, 1.7e308]), None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("INPUT_VALUE"));
        assert_eq!(app.echo.lock().memory_count(), 0);
    }

    #[tokio::test]
    async fn test_clear_and_statistics() {
        let app = state();
        let (status, _) = predict(State(app.clone()), predict_request(json!([1, 2, 3]), None)).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = predict(State(app.clone()), predict_request(json!([1, 2, 4]), None)).await;
        assert_eq!(status, StatusCode::OK);

        let (_, Json(body)) = memories(State(app.clone())).await;
        assert_eq!(body["total"], json!(2));

        let (status, Json(body)) = clear(State(app.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], json!("Cleared 2 memories"));

        let (_, Json(body)) = statistics(State(app.clone())).await;
        assert_eq!(body["statistics"]["totalEchoes"], json!(0));
        assert_eq!(body["statistics"]["firstEcho"], JsonValue::Null);

        let (_, Json(body)) = predict(State(app), predict_request(json!([5, 10]), None)).await;
        assert_eq!(body["memory"]["id"], json!(1));
    }

    #[tokio::test]
    async fn test_export_then_import() {
        let source = state();
        let (status, _) = predict(State(source.clone()), predict_request(json!([3, 6, 9]), None)).await;
        assert_eq!(status, StatusCode::OK);
        let (_, Json(body)) = export(State(source)).await;
        let snapshot: HistorySnapshot = serde_json::from_value(body["snapshot"].clone()).unwrap();

        let target = state();
        let (status, _) = import(State(target.clone()), Ok(Json(snapshot))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(target.echo.lock().memory_count(), 1);
    }

    #[tokio::test]
    async fn test_samples_listed() {
        let (_, Json(body)) = list_samples().await;
        assert!(body["samples"].as_array().unwrap().len() >= 10);
    }
}
