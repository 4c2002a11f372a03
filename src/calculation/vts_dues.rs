//! Vessel traffic services (VTS) dues calculation.

use rust_decimal::Decimal;

use crate::config::TariffConfig;
use crate::models::{DueCategory, Port};

use super::DueResult;
use super::units::round_currency;

/// Calculates VTS dues for a vessel.
///
/// Durban and Saldanha are charged at their own rate per GT; every other
/// port uses the `other_ports` rate. The result is never below the
/// configured minimum fee.
///
/// # Arguments
///
/// * `gross_tonnage` - Gross tonnage of the vessel
/// * `port` - The port of call
/// * `config` - The tariff configuration
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_vts_dues(
    gross_tonnage: Decimal,
    port: Port,
    config: &TariffConfig,
    step_number: u32,
) -> DueResult {
    let section = &config.tariffs().vts_dues;
    let calculation = &section.calculation;
    let bucket = if port.is_major_vts_port() {
        "Durban_Saldanha"
    } else {
        "other_ports"
    };
    let rate = calculation.rate_for(port).rate_per_gt;

    let charge = gross_tonnage * rate;
    let minimum_applied = charge < calculation.minimum_fee;
    let amount = round_currency(charge.max(calculation.minimum_fee));

    let reasoning = if minimum_applied {
        format!(
            "{} GT x R{} = R{} is below the minimum; minimum fee R{} applies",
            gross_tonnage.normalize(),
            rate.normalize(),
            charge.normalize(),
            amount
        )
    } else {
        format!(
            "{} GT x R{} ({}) = R{}",
            gross_tonnage.normalize(),
            rate.normalize(),
            bucket,
            amount
        )
    };

    DueResult::new(
        DueCategory::Vts,
        amount,
        &section.section,
        step_number,
        serde_json::json!({
            "gross_tonnage": gross_tonnage.normalize().to_string(),
            "port": port.as_str(),
            "rate_group": bucket,
            "rate_per_gt": rate.to_string(),
            "minimum_fee": calculation.minimum_fee.to_string()
        }),
        serde_json::json!({
            "charge": charge.normalize().to_string(),
            "minimum_applied": minimum_applied,
            "amount": amount.to_string()
        }),
        reasoning,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn config() -> TariffConfig {
        ConfigLoader::load("./config/transnet_2024_25")
            .unwrap()
            .config()
            .clone()
    }

    #[test]
    fn test_durban_uses_durban_saldanha_rate() {
        let result = calculate_vts_dues(dec("51300"), Port::Durban, &config(), 1);
        assert_eq!(result.amount, dec("33345.00"));
        assert_eq!(result.audit_step.input["rate_group"], "Durban_Saldanha");
    }

    #[test]
    fn test_saldanha_uses_durban_saldanha_rate() {
        let result = calculate_vts_dues(dec("10000"), Port::Saldanha, &config(), 1);
        assert_eq!(result.amount, dec("6500.00"));
    }

    #[test]
    fn test_other_port_uses_other_ports_rate() {
        let result = calculate_vts_dues(dec("10000"), Port::CapeTown, &config(), 1);
        assert_eq!(result.amount, dec("5400.00"));
        assert_eq!(result.audit_step.input["rate_group"], "other_ports");
    }

    #[test]
    fn test_minimum_fee_applies_to_small_vessels() {
        // 300 x 0.54 = 162.00 < 235.52
        let result = calculate_vts_dues(dec("300"), Port::EastLondon, &config(), 1);
        assert_eq!(result.amount, dec("235.52"));
        assert_eq!(result.audit_step.output["minimum_applied"], true);
        assert!(result.audit_step.reasoning.contains("minimum fee"));
    }

    #[test]
    fn test_charge_is_not_rounded_to_units() {
        // VTS is charged per GT, not per 100 GT block
        let result = calculate_vts_dues(dec("1000.5"), Port::Ngqura, &config(), 1);
        assert_eq!(result.amount, dec("540.27"));
        assert_eq!(result.audit_step.output["minimum_applied"], false);
    }
}
