//! Free-text vessel description to structured record.
//!
//! The translator never fails a request: when no API key is configured, or
//! the model's answer cannot be used, the fixed fallback vessel is returned
//! instead.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::models::{Port, VesselDescription};

use super::{GeminiClient, LlmError};

/// Turns a free-text vessel description into a [`VesselDescription`].
#[async_trait]
pub trait VesselTranslator: Send + Sync {
    /// Extracts the vessel record, falling back to a fixed record on failure.
    async fn translate(&self, query: &str) -> VesselDescription;
}

#[async_trait]
impl VesselTranslator for GeminiClient {
    async fn translate(&self, query: &str) -> VesselDescription {
        if !self.has_api_key() {
            debug!("No language model API key configured, using fallback vessel");
            return fallback_description();
        }

        match self.try_translate(query).await {
            Ok(description) => description,
            Err(err) => {
                warn!(error = %err, "Vessel description parsing failed, using fallback vessel");
                fallback_description()
            }
        }
    }
}

impl GeminiClient {
    async fn try_translate(&self, query: &str) -> Result<VesselDescription, LlmError> {
        let text = self.generate_content(&translation_prompt(query)).await?;
        let value: Value = serde_json::from_str(clean_json_response(&text))?;
        normalize_description(&value)
    }
}

/// The record substituted when translation is unavailable or fails.
///
/// A 51,300 GT bulk carrier calling at Durban for 3.39 days.
pub fn fallback_description() -> VesselDescription {
    VesselDescription {
        port: Port::Durban,
        gt: Decimal::from(51_300),
        loa: Decimal::new(2292, 1),
        days_alongside: Decimal::new(339, 2),
        arrival: NaiveDate::from_ymd_opt(2024, 11, 15)
            .and_then(|d| d.and_hms_opt(10, 12, 0))
            .unwrap_or_default(),
        departure: NaiveDate::from_ymd_opt(2024, 11, 22)
            .and_then(|d| d.and_hms_opt(13, 0, 0))
            .unwrap_or_default(),
        operations: 2,
    }
}

/// Builds the extraction prompt for a vessel description.
pub fn translation_prompt(query: &str) -> String {
    let ports: Vec<&str> = Port::ALL.iter().map(Port::as_str).collect();

    format!(
        r#"Extract the port tariff calculation parameters from this vessel information:

{query}

Answer with a single JSON object with exactly these keys:
- port: one of {ports:?} (underscores instead of spaces, no apostrophes)
- gt: gross tonnage as a number (the GT figure of a "GT / NT" field)
- loa: length overall in metres as a number
- days_alongside: days alongside as a number
- arrival: arrival time as an ISO 8601 date-time (e.g. "15 Nov 2024 10:12" becomes "2024-11-15T10:12:00")
- departure: departure time as an ISO 8601 date-time
- operations: number of operations as an integer

Example:
{{
  "port": "Durban",
  "gt": 51300.0,
  "loa": 229.2,
  "days_alongside": 3.39,
  "arrival": "2024-11-15T10:12:00",
  "departure": "2024-11-22T13:00:00",
  "operations": 2
}}"#
    )
}

/// Strips markdown code fences and surrounding prose from a JSON answer.
///
/// # Examples
///
/// ```
/// use port_tariff_engine::llm::clean_json_response;
///
/// assert_eq!(clean_json_response("```json\n{\"gt\": 1}\n```"), "{\"gt\": 1}");
/// assert_eq!(clean_json_response("Here you go: {\"gt\": 1}."), "{\"gt\": 1}");
/// ```
pub fn clean_json_response(text: &str) -> &str {
    let unfenced = if let Some((_, rest)) = text.split_once("```json") {
        rest.split("```").next().unwrap_or(rest)
    } else if let Some((_, rest)) = text.split_once("```") {
        rest.split("```").next().unwrap_or(rest)
    } else {
        text
    };

    let trimmed = unfenced.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

/// Validates and coerces the model's JSON into a vessel record.
///
/// Unknown ports become Durban and unparsable timestamps become the current
/// local time. Numeric fields accept numbers or numeric strings. A missing
/// field is an error.
pub fn normalize_description(value: &Value) -> Result<VesselDescription, LlmError> {
    let record = value.as_object().ok_or_else(|| LlmError::InvalidField {
        field: "<root>".to_string(),
    })?;

    let raw_port = required(record, "port")?;
    let port = raw_port
        .as_str()
        .and_then(|name| name.parse::<Port>().ok())
        .unwrap_or_else(|| {
            warn!(port = %raw_port, "Unsupported port in vessel description, defaulting to Durban");
            Port::Durban
        });

    Ok(VesselDescription {
        port,
        gt: decimal_field(record, "gt")?,
        loa: decimal_field(record, "loa")?,
        days_alongside: decimal_field(record, "days_alongside")?,
        arrival: datetime_field(record, "arrival")?,
        departure: datetime_field(record, "departure")?,
        operations: integer_field(record, "operations")?,
    })
}

fn required<'a>(record: &'a Map<String, Value>, field: &str) -> Result<&'a Value, LlmError> {
    record.get(field).ok_or_else(|| invalid(field))
}

fn invalid(field: &str) -> LlmError {
    LlmError::InvalidField {
        field: field.to_string(),
    }
}

fn decimal_field(record: &Map<String, Value>, field: &str) -> Result<Decimal, LlmError> {
    let text = match required(record, field)? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().replace(',', ""),
        _ => return Err(invalid(field)),
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| invalid(field))
}

fn integer_field(record: &Map<String, Value>, field: &str) -> Result<u32, LlmError> {
    let value = decimal_field(record, field)?;
    if value.is_sign_negative() {
        return Err(invalid(field));
    }
    u32::try_from(value.trunc()).map_err(|_| invalid(field))
}

fn datetime_field(record: &Map<String, Value>, field: &str) -> Result<NaiveDateTime, LlmError> {
    let parsed = required(record, field)?.as_str().and_then(parse_datetime);
    Ok(parsed.unwrap_or_else(|| {
        warn!(field, "Unparsable timestamp in vessel description, using current time");
        Local::now().naive_local()
    }))
}

/// Parses the timestamp layouts models commonly produce.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    const LAYOUTS: [&str; 5] = [
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%d %b %Y %H:%M",
        "%d %B %Y %H:%M",
    ];

    let raw = raw.trim();
    if let Ok(parsed) = raw.parse::<NaiveDateTime>() {
        return Some(parsed);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_local());
    }
    if let Some(parsed) = LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
    {
        return Some(parsed);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
