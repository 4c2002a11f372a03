//! Running of vessel lines dues calculation.

use crate::config::TariffConfig;
use crate::error::EngineResult;
use crate::models::{DueCategory, Port};

use super::DueResult;
use super::units::round_currency;

/// Calculates the running of vessel lines charge for a port.
///
/// A flat fee per port; the vessel's size does not matter.
///
/// # Returns
///
/// Returns `PortNotConfigured` if the tariff book has no rate for the port.
pub fn calculate_line_running_dues(
    port: Port,
    config: &TariffConfig,
    step_number: u32,
) -> EngineResult<DueResult> {
    let rate = config.line_running_rate(port)?;
    let amount = round_currency(rate.flat_fee);

    Ok(DueResult::new(
        DueCategory::LineRunning,
        amount,
        &config.tariffs().running_of_vessel_lines_dues.section,
        step_number,
        serde_json::json!({ "port": port.as_str() }),
        serde_json::json!({ "flat_fee": rate.flat_fee.to_string(), "amount": amount.to_string() }),
        format!("{}: flat fee R{}", port, amount),
    ))
}
