//! HTTP API module for the Port Tariff Engine.
//!
//! This module provides the REST API endpoints for pricing a port call,
//! either from a free-text vessel description or from structured
//! particulars.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, NlQuery, prepare_query};
pub use response::{ApiError, ApiErrorResponse, NlCalculationResponse};
pub use state::AppState;
