//! Light dues calculation.
//!
//! Light dues fund navigational aids and are charged on every vessel
//! entering a port, per 100 GT or part thereof.

use rust_decimal::Decimal;

use crate::config::TariffConfig;
use crate::models::DueCategory;

use super::DueResult;
use super::units::{gt_units, round_currency};

/// Calculates light dues for a vessel.
///
/// `units = ceil(gt / 100)`, `amount = units * formula_rate`, rounded to
/// cents.
///
/// # Arguments
///
/// * `gross_tonnage` - Gross tonnage of the vessel
/// * `config` - The tariff configuration
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_light_dues(
    gross_tonnage: Decimal,
    config: &TariffConfig,
    step_number: u32,
) -> DueResult {
    let section = &config.tariffs().light_dues;
    let rate = section.calculation.formula_rate;

    let units = gt_units(gross_tonnage);
    let amount = round_currency(units * rate);

    DueResult::new(
        DueCategory::Light,
        amount,
        &section.section,
        step_number,
        serde_json::json!({
            "gross_tonnage": gross_tonnage.normalize().to_string(),
            "formula_rate": rate.to_string()
        }),
        serde_json::json!({
            "units": units.normalize().to_string(),
            "amount": amount.to_string()
        }),
        format!(
            "{} units of 100 GT x R{} = R{}",
            units.normalize(),
            rate.normalize(),
            amount
        ),
    )
}
