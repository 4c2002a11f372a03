//! Vessel models.
//!
//! [`VesselParticulars`] is the validated input bundle the engine prices.
//! [`VesselDescription`] is the richer record extracted from a free-text
//! vessel description, which carries schedule details the tariffs do not use.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::Port;

/// Largest gross tonnage accepted for pricing.
pub const MAX_GROSS_TONNAGE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Longest stay alongside accepted for pricing, in days.
pub const MAX_DAYS_ALONGSIDE: Decimal = Decimal::from_parts(365, 0, 0, false, 0);

/// The inputs every tariff category is priced from.
///
/// Instances can only be built through [`VesselParticulars::new`] (or by
/// deserializing, which runs the same checks), so gross tonnage and days
/// alongside are always strictly positive and within
/// [`MAX_GROSS_TONNAGE`] and [`MAX_DAYS_ALONGSIDE`].
///
/// # Examples
///
/// ```
/// use port_tariff_engine::models::{Port, VesselParticulars};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let vessel = VesselParticulars::new(
///     Decimal::from_str("51300").unwrap(),
///     Port::Durban,
///     Decimal::from_str("3.39").unwrap(),
/// )
/// .unwrap();
/// assert_eq!(vessel.port(), Port::Durban);
///
/// assert!(VesselParticulars::new(Decimal::ZERO, Port::Durban, Decimal::ONE).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedParticulars")]
pub struct VesselParticulars {
    gross_tonnage: Decimal,
    port: Port,
    days_alongside: Decimal,
}

impl VesselParticulars {
    /// Validates and bundles the pricing inputs.
    ///
    /// Returns `InvalidVessel` if gross tonnage or days alongside is zero,
    /// negative or above its upper limit.
    pub fn new(gross_tonnage: Decimal, port: Port, days_alongside: Decimal) -> EngineResult<Self> {
        ensure_in_range("gross_tonnage", gross_tonnage, MAX_GROSS_TONNAGE)?;
        ensure_in_range("days_alongside", days_alongside, MAX_DAYS_ALONGSIDE)?;

        Ok(Self {
            gross_tonnage,
            port,
            days_alongside,
        })
    }

    /// Gross tonnage of the vessel.
    pub fn gross_tonnage(&self) -> Decimal {
        self.gross_tonnage
    }

    /// The port of call.
    pub fn port(&self) -> Port {
        self.port
    }

    /// Days spent alongside, possibly fractional.
    pub fn days_alongside(&self) -> Decimal {
        self.days_alongside
    }
}

fn ensure_in_range(field: &str, value: Decimal, max: Decimal) -> EngineResult<()> {
    if value <= Decimal::ZERO {
        return Err(EngineError::InvalidVessel {
            field: field.to_string(),
            message: format!("must be greater than zero, got {}", value),
        });
    }
    if value > max {
        return Err(EngineError::InvalidVessel {
            field: field.to_string(),
            message: format!("must not exceed {}, got {}", max, value),
        });
    }
    Ok(())
}

#[derive(Deserialize)]
struct UncheckedParticulars {
    gross_tonnage: Decimal,
    port: Port,
    days_alongside: Decimal,
}

impl TryFrom<UncheckedParticulars> for VesselParticulars {
    type Error = EngineError;

    fn try_from(raw: UncheckedParticulars) -> Result<Self, Self::Error> {
        VesselParticulars::new(raw.gross_tonnage, raw.port, raw.days_alongside)
    }
}

/// A vessel call as described in free text.
///
/// This is the fixed record shape returned by the vessel translator. Only
/// `port`, `gt` and `days_alongside` feed the tariff calculation; the rest
/// is carried through to the explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselDescription {
    /// The port of call.
    pub port: Port,
    /// Gross tonnage.
    pub gt: Decimal,
    /// Length overall in metres.
    pub loa: Decimal,
    /// Days alongside.
    pub days_alongside: Decimal,
    /// Arrival time (port local time).
    pub arrival: NaiveDateTime,
    /// Departure time (port local time).
    pub departure: NaiveDateTime,
    /// Number of cargo operations.
    pub operations: u32,
}

impl VesselDescription {
    /// Extracts the validated pricing inputs from this description.
    pub fn to_particulars(&self) -> EngineResult<VesselParticulars> {
        VesselParticulars::new(self.gt, self.port, self.days_alongside)
    }

    /// Hours between arrival and departure.
    ///
    /// Negative when the departure precedes the arrival.
    pub fn hours_in_port(&self) -> Decimal {
        let minutes = (self.departure - self.arrival).num_minutes();
        Decimal::from(minutes) / Decimal::from(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_description() -> VesselDescription {
        VesselDescription {
            port: Port::Durban,
            gt: dec("51300"),
            loa: dec("229.2"),
            days_alongside: dec("3.39"),
            arrival: NaiveDate::from_ymd_opt(2024, 11, 15)
                .unwrap()
                .and_hms_opt(10, 12, 0)
                .unwrap(),
            departure: NaiveDate::from_ymd_opt(2024, 11, 22)
                .unwrap()
                .and_hms_opt(13, 0, 0)
                .unwrap(),
            operations: 2,
        }
    }

    #[test]
    fn test_new_accepts_positive_inputs() {
        let vessel = VesselParticulars::new(dec("0.01"), Port::Ngqura, dec("0.5")).unwrap();
        assert_eq!(vessel.gross_tonnage(), dec("0.01"));
        assert_eq!(vessel.days_alongside(), dec("0.5"));
        assert_eq!(vessel.port(), Port::Ngqura);
    }

    #[test]
    fn test_new_rejects_non_positive_gross_tonnage() {
        match VesselParticulars::new(dec("-1"), Port::Durban, dec("1")) {
            Err(EngineError::InvalidVessel { field, .. }) => assert_eq!(field, "gross_tonnage"),
            other => panic!("Expected InvalidVessel error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_rejects_zero_days() {
        match VesselParticulars::new(dec("1000"), Port::Durban, Decimal::ZERO) {
            Err(EngineError::InvalidVessel { field, .. }) => assert_eq!(field, "days_alongside"),
            other => panic!("Expected InvalidVessel error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_accepts_upper_limits() {
        let vessel =
            VesselParticulars::new(MAX_GROSS_TONNAGE, Port::Saldanha, MAX_DAYS_ALONGSIDE).unwrap();
        assert_eq!(vessel.gross_tonnage(), dec("1000000"));
        assert_eq!(vessel.days_alongside(), dec("365"));
    }

    #[test]
    fn test_new_rejects_gross_tonnage_near_decimal_max() {
        match VesselParticulars::new(Decimal::MAX, Port::Durban, dec("1")) {
            Err(EngineError::InvalidVessel { field, message }) => {
                assert_eq!(field, "gross_tonnage");
                assert!(message.contains("must not exceed 1000000"));
            }
            other => panic!("Expected InvalidVessel error, got {:?}", other),
        }
    }

    #[test]
    fn test_new_rejects_stay_longer_than_a_year() {
        match VesselParticulars::new(dec("51300"), Port::Durban, dec("365.01")) {
            Err(EngineError::InvalidVessel { field, .. }) => assert_eq!(field, "days_alongside"),
            other => panic!("Expected InvalidVessel error, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_runs_validation() {
        let ok: VesselParticulars = serde_json::from_str(
            r#"{"gross_tonnage": "51300", "port": "Durban", "days_alongside": "3.39"}"#,
        )
        .unwrap();
        assert_eq!(ok.gross_tonnage(), dec("51300"));

        let err = serde_json::from_str::<VesselParticulars>(
            r#"{"gross_tonnage": "0", "port": "Durban", "days_alongside": "3.39"}"#,
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_description_to_particulars() {
        let vessel = sample_description().to_particulars().unwrap();
        assert_eq!(vessel.gross_tonnage(), dec("51300"));
        assert_eq!(vessel.port(), Port::Durban);
        assert_eq!(vessel.days_alongside(), dec("3.39"));
    }

    #[test]
    fn test_hours_in_port() {
        // 15 Nov 10:12 -> 22 Nov 13:00 is 7 days, 2 h 48 min
        assert_eq!(sample_description().hours_in_port(), dec("170.8"));
    }

    #[test]
    fn test_description_serializes_iso_datetimes() {
        let json = serde_json::to_value(sample_description()).unwrap();
        assert_eq!(json["arrival"], "2024-11-15T10:12:00");
        assert_eq!(json["port"], "Durban");
        assert_eq!(json["operations"], 2);
    }
}
