//! Response types for the Port Tariff Engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::llm::LlmError;
use crate::models::TariffBreakdown;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a processing error response.
    pub fn processing_error(details: impl Into<String>) -> Self {
        Self::with_details("PROCESSING_ERROR", "Calculation failed", details)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 422 response for a request the engine cannot price.
    pub fn unprocessable(error: ApiError) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidPort { ref value } => Self::unprocessable(ApiError::with_details(
                "INVALID_PORT",
                error.to_string(),
                format!("The port '{}' is not covered by the tariff book", value),
            )),
            EngineError::InvalidVessel { .. } => {
                Self::unprocessable(ApiError::new("INVALID_VESSEL", error.to_string()))
            }
            other => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::processing_error(other.to_string()),
            },
        }
    }
}

impl From<LlmError> for ApiErrorResponse {
    fn from(error: LlmError) -> Self {
        ApiErrorResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: ApiError::processing_error(error.to_string()),
        }
    }
}

/// Response body of the `/nl_calculate` endpoint.
///
/// The six dues and the total are flattened into the top-level object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NlCalculationResponse {
    /// Identifier of the underlying assessment.
    pub calculation_id: Uuid,
    /// The itemized dues.
    #[serde(flatten)]
    pub dues: TariffBreakdown,
    /// Plain-language explanation of the dues.
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Port;
    use rust_decimal::Decimal;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_invalid_port_maps_to_422() {
        let response: ApiErrorResponse = EngineError::InvalidPort {
            value: "Lagos".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.error.code, "INVALID_PORT");
        assert!(response.error.details.unwrap().contains("Lagos"));
    }

    #[test]
    fn test_invalid_vessel_maps_to_422() {
        let response: ApiErrorResponse = EngineError::InvalidVessel {
            field: "gross_tonnage".to_string(),
            message: "must be greater than zero, got 0".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.error.code, "INVALID_VESSEL");
    }

    #[test]
    fn test_missing_port_rate_maps_to_500() {
        let response: ApiErrorResponse = EngineError::PortNotConfigured {
            category: "towage_dues".to_string(),
            port: Port::Ngqura,
        }
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "PROCESSING_ERROR");
        assert_eq!(
            response.error.details.as_deref(),
            Some("No towage_dues rate configured for port 'Ngqura'")
        );
    }

    #[test]
    fn test_llm_error_maps_to_500() {
        let response: ApiErrorResponse = LlmError::EmptyResponse.into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "PROCESSING_ERROR");
    }

    #[test]
    fn test_nl_response_flattens_dues() {
        let response = NlCalculationResponse {
            calculation_id: Uuid::nil(),
            dues: TariffBreakdown {
                light_dues: Decimal::new(100, 0),
                port_dues: Decimal::ZERO,
                vts_dues: Decimal::ZERO,
                pilotage_dues: Decimal::ZERO,
                towage_dues: Decimal::ZERO,
                line_running_dues: Decimal::ZERO,
                total: Decimal::new(100, 0),
            },
            explanation: "n/a".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["light_dues"], "100");
        assert_eq!(json["total"], "100");
        assert_eq!(json["explanation"], "n/a");
        assert!(json.get("dues").is_none());
    }
}
