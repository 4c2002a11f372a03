//! HTTP request handlers for the Port Tariff Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{ENGINE_VERSION, calculate_all};

use super::request::{CalculationRequest, NlQuery, prepare_query};
use super::response::{ApiError, ApiErrorResponse, NlCalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/nl_calculate", post(nl_calculate_handler))
        .route("/calculate", post(calculate_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Handler for GET /.
async fn root_handler(State(state): State<AppState>) -> Json<Value> {
    let metadata = state.config().config().metadata();
    Json(json!({
        "service": "Port Tariff Engine",
        "version": ENGINE_VERSION,
        "tariff_book": metadata.name,
        "tariff_edition": metadata.edition,
        "endpoints": ["GET /health", "POST /nl_calculate", "POST /calculate"],
    }))
}

/// Handler for GET /health.
async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for POST /nl_calculate.
///
/// Translates a free-text vessel description, prices it and attaches a
/// plain-language explanation.
async fn nl_calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<NlQuery>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing natural language calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let Some(query) = prepare_query(&request.query) else {
        warn!(correlation_id = %correlation_id, "Empty query");
        return ApiErrorResponse::unprocessable(ApiError::validation_error(
            "query must not be empty",
        ))
        .into_response();
    };

    let start_time = Instant::now();
    let description = state.translator().translate(&query).await;

    let vessel = match description.to_particulars() {
        Ok(vessel) => vessel,
        Err(err) => return failure_response(correlation_id, err),
    };

    let config = state.config().config();
    let assessment = match calculate_all(&vessel, config) {
        Ok(assessment) => assessment,
        Err(err) => return failure_response(correlation_id, err),
    };

    let explanation = match state
        .explainer()
        .explain(config, &description, &assessment.dues)
        .await
    {
        Ok(explanation) => explanation,
        Err(err) => return failure_response(correlation_id, err),
    };

    info!(
        correlation_id = %correlation_id,
        port = %vessel.port(),
        gross_tonnage = %vessel.gross_tonnage(),
        total = %assessment.dues.total,
        duration_us = start_time.elapsed().as_micros() as u64,
        "Natural language calculation completed"
    );

    (
        StatusCode::OK,
        Json(NlCalculationResponse {
            calculation_id: assessment.calculation_id,
            dues: assessment.dues,
            explanation,
        }),
    )
        .into_response()
}

/// Handler for POST /calculate.
///
/// Prices structured vessel particulars and returns the full assessment
/// with its audit trace.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let vessel = match request.to_particulars() {
        Ok(vessel) => vessel,
        Err(err) => return failure_response(correlation_id, err),
    };

    match calculate_all(&vessel, state.config().config()) {
        Ok(assessment) => {
            info!(
                correlation_id = %correlation_id,
                port = %vessel.port(),
                gross_tonnage = %vessel.gross_tonnage(),
                total = %assessment.dues.total,
                duration_us = assessment.audit_trace.duration_us,
                "Calculation completed successfully"
            );
            (StatusCode::OK, Json(assessment)).into_response()
        }
        Err(err) => failure_response(correlation_id, err),
    }
}

fn failure_response(correlation_id: Uuid, error: impl Into<ApiErrorResponse>) -> Response {
    let api_error: ApiErrorResponse = error.into();
    warn!(
        correlation_id = %correlation_id,
        status = api_error.status.as_u16(),
        code = %api_error.error.code,
        error = %api_error.error.message,
        "Calculation failed"
    );
    api_error.into_response()
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::unprocessable(error).into_response()
}
