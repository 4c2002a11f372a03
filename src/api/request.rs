//! Request types for the Port Tariff Engine API.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{Port, VesselParticulars};

/// Request body for the `/nl_calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NlQuery {
    /// Free-text vessel and port call description.
    pub query: String,
}

/// Request body for the `/calculate` endpoint.
///
/// Only `port`, `gt` and `days_alongside` are priced; the schedule fields
/// are accepted for parity with the free-text flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Port name, e.g. "Durban" or "Richards Bay".
    pub port: String,
    /// Gross tonnage.
    pub gt: Decimal,
    /// Days alongside, possibly fractional.
    pub days_alongside: Decimal,
    /// Length overall in metres.
    #[serde(default)]
    pub loa: Option<Decimal>,
    /// Arrival time.
    #[serde(default)]
    pub arrival: Option<NaiveDateTime>,
    /// Departure time.
    #[serde(default)]
    pub departure: Option<NaiveDateTime>,
    /// Number of cargo operations.
    #[serde(default)]
    pub operations: Option<u32>,
}

impl CalculationRequest {
    /// Normalizes the port name and validates the pricing inputs.
    pub fn to_particulars(&self) -> EngineResult<VesselParticulars> {
        let port: Port = self.port.parse()?;
        VesselParticulars::new(self.gt, port, self.days_alongside)
    }
}

/// Collapses runs of whitespace (including newlines) into single spaces.
///
/// Returns `None` for a blank query.
pub fn prepare_query(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::str::FromStr;

    fn request(port: &str, gt: &str, days: &str) -> CalculationRequest {
        CalculationRequest {
            port: port.to_string(),
            gt: Decimal::from_str(gt).unwrap(),
            days_alongside: Decimal::from_str(days).unwrap(),
            loa: None,
            arrival: None,
            departure: None,
            operations: None,
        }
    }

    #[test]
    fn test_prepare_query_collapses_whitespace() {
        assert_eq!(
            prepare_query("Vessel Name:\n  SUDESTADA\r\n\tGT / NT: 51300 / 31192 "),
            Some("Vessel Name: SUDESTADA GT / NT: 51300 / 31192".to_string())
        );
    }

    #[test]
    fn test_prepare_query_rejects_blank() {
        assert_eq!(prepare_query(" \n\t "), None);
    }

    #[test]
    fn test_to_particulars_normalizes_port() {
        let vessel = request("Port Elizabeth", "12000", "1.5").to_particulars().unwrap();
        assert_eq!(vessel.port(), Port::PortElizabeth);
    }

    #[test]
    fn test_to_particulars_rejects_unknown_port() {
        assert!(matches!(
            request("Lagos", "12000", "1").to_particulars(),
            Err(EngineError::InvalidPort { .. })
        ));
    }

    #[test]
    fn test_to_particulars_rejects_zero_gt() {
        assert!(matches!(
            request("Durban", "0", "1").to_particulars(),
            Err(EngineError::InvalidVessel { .. })
        ));
    }

    #[test]
    fn test_deserialize_numbers_and_optional_fields() {
        let request: CalculationRequest = serde_json::from_str(
            r#"{"port": "Durban", "gt": 51300, "days_alongside": 3.39,
                "arrival": "2024-11-15T10:12:00"}"#,
        )
        .unwrap();

        assert_eq!(request.gt, Decimal::from(51300));
        assert_eq!(request.days_alongside, Decimal::from_str("3.39").unwrap());
        assert!(request.arrival.is_some());
        assert_eq!(request.operations, None);
    }
}
