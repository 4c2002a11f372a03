//! Port dues calculation.
//!
//! Port dues combine a one-off entry charge with a daily charge for each
//! day, or part day, the vessel spends alongside. Both charges scale with
//! the vessel's size in 100 GT units.

use rust_decimal::Decimal;

use crate::config::TariffConfig;
use crate::models::DueCategory;

use super::DueResult;
use super::units::{ceil_units, gt_units, round_currency};

/// Calculates port dues for a vessel.
///
/// ```text
/// entry_units = ceil(gt / 100)
/// day_units   = ceil(days_alongside)
/// amount      = entry_units * entry_fee + entry_units * daily_fee * day_units
/// ```
///
/// # Arguments
///
/// * `gross_tonnage` - Gross tonnage of the vessel
/// * `days_alongside` - Days alongside, possibly fractional
/// * `config` - The tariff configuration
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```no_run
/// use port_tariff_engine::calculation::calculate_port_dues;
/// use port_tariff_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("./config/transnet_2024_25").unwrap();
/// let result = calculate_port_dues(
///     Decimal::from(51300),
///     Decimal::from_str("3.39").unwrap(),
///     loader.config(),
///     1,
/// );
/// assert_eq!(result.amount, Decimal::from_str("217455.57").unwrap());
/// ```
pub fn calculate_port_dues(
    gross_tonnage: Decimal,
    days_alongside: Decimal,
    config: &TariffConfig,
    step_number: u32,
) -> DueResult {
    let section = &config.tariffs().port_dues;
    let rates = &section.calculation;

    let entry_units = gt_units(gross_tonnage);
    let day_units = ceil_units(days_alongside, Decimal::ONE);

    let entry_fee = entry_units * rates.entry_fee;
    let daily_fee = entry_units * rates.daily_fee * day_units;
    let amount = round_currency(entry_fee + daily_fee);

    DueResult::new(
        DueCategory::Port,
        amount,
        &section.section,
        step_number,
        serde_json::json!({
            "gross_tonnage": gross_tonnage.normalize().to_string(),
            "days_alongside": days_alongside.normalize().to_string(),
            "entry_fee": rates.entry_fee.to_string(),
            "daily_fee": rates.daily_fee.to_string()
        }),
        serde_json::json!({
            "entry_units": entry_units.normalize().to_string(),
            "day_units": day_units.normalize().to_string(),
            "entry_charge": entry_fee.normalize().to_string(),
            "daily_charge": daily_fee.normalize().to_string(),
            "amount": amount.to_string()
        }),
        format!(
            "Entry: {} x R{} = R{}; daily: {} x R{} x {} day(s) = R{}; total R{}",
            entry_units.normalize(),
            rates.entry_fee.normalize(),
            entry_fee.normalize(),
            entry_units.normalize(),
            rates.daily_fee.normalize(),
            day_units.normalize(),
            daily_fee.normalize(),
            amount
        ),
    )
}
