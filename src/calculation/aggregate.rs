//! Full tariff assessment for a port call.
//!
//! Runs every category calculator against one vessel and sums the results.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::config::TariffConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, DueCategory, TariffAssessment, TariffBreakdown, VesselParticulars,
};

use super::units::round_currency;
use super::{
    DueResult, calculate_light_dues, calculate_line_running_dues, calculate_pilotage_dues,
    calculate_port_dues, calculate_towage_dues, calculate_vts_dues,
};

/// The version of the engine, reported with every assessment.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prices all six tariff categories for a vessel.
///
/// Each amount is rounded to cents by its calculator; the total is the sum
/// of those amounts, rounded again. If any category fails (for example a
/// port missing from a port-specific table) the error is returned and no
/// partial result is produced.
///
/// # Examples
///
/// ```no_run
/// use port_tariff_engine::calculation::calculate_all;
/// use port_tariff_engine::config::ConfigLoader;
/// use port_tariff_engine::models::{Port, VesselParticulars};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("./config/transnet_2024_25").unwrap();
/// let vessel = VesselParticulars::new(
///     Decimal::from(51300),
///     Port::Durban,
///     Decimal::from_str("3.39").unwrap(),
/// )
/// .unwrap();
///
/// let assessment = calculate_all(&vessel, loader.config()).unwrap();
/// assert_eq!(assessment.dues.total, Decimal::from_str("375427.52").unwrap());
/// ```
pub fn calculate_all(
    vessel: &VesselParticulars,
    config: &TariffConfig,
) -> EngineResult<TariffAssessment> {
    let start_time = Instant::now();
    let gross_tonnage = vessel.gross_tonnage();
    let port = vessel.port();

    let results: Vec<DueResult> = vec![
        calculate_light_dues(gross_tonnage, config, 1),
        calculate_port_dues(gross_tonnage, vessel.days_alongside(), config, 2),
        calculate_vts_dues(gross_tonnage, port, config, 3),
        calculate_pilotage_dues(gross_tonnage, port, config, 4)?,
        calculate_towage_dues(gross_tonnage, port, config, 5)?,
        calculate_line_running_dues(port, config, 6)?,
    ];

    let amount_of = |category: DueCategory| {
        results
            .iter()
            .find(|r| r.category == category)
            .map(|r| r.amount)
            .unwrap_or(Decimal::ZERO)
    };

    let sum = results
        .iter()
        .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.amount))
        .ok_or_else(|| EngineError::CalculationError {
            message: "total dues overflowed".to_string(),
        })?;
    let total = round_currency(sum);

    let dues = TariffBreakdown {
        light_dues: amount_of(DueCategory::Light),
        port_dues: amount_of(DueCategory::Port),
        vts_dues: amount_of(DueCategory::Vts),
        pilotage_dues: amount_of(DueCategory::Pilotage),
        towage_dues: amount_of(DueCategory::Towage),
        line_running_dues: amount_of(DueCategory::LineRunning),
        total,
    };

    let mut steps: Vec<AuditStep> = results.into_iter().map(|r| r.audit_step).collect();
    steps.push(total_step(&dues, steps.len() as u32 + 1));

    let duration_us = start_time.elapsed().as_micros() as u64;
    debug!(
        port = %port,
        gross_tonnage = %gross_tonnage,
        total = %total,
        duration_us,
        "Tariff assessment calculated"
    );

    Ok(TariffAssessment {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        tariff_edition: config.metadata().edition.clone(),
        currency: config.metadata().currency.clone(),
        vessel: vessel.clone(),
        dues,
        audit_trace: AuditTrace { steps, duration_us },
    })
}

fn total_step(dues: &TariffBreakdown, step_number: u32) -> AuditStep {
    let items: serde_json::Map<String, serde_json::Value> = DueCategory::ALL
        .iter()
        .map(|c| {
            (
                c.rule_id().to_string(),
                serde_json::Value::String(dues.amount(*c).to_string()),
            )
        })
        .collect();

    AuditStep {
        step_number,
        rule_id: "total".to_string(),
        rule_name: "Total Dues".to_string(),
        section_ref: String::new(),
        input: serde_json::Value::Object(items),
        output: serde_json::json!({ "total": dues.total.to_string() }),
        reasoning: format!(
            "Sum of {} tariff categories = R{}",
            DueCategory::ALL.len(),
            dues.total
        ),
    }
}
