//! Pilotage dues calculation.
//!
//! Pilotage is compulsory and priced per port, so a port without a
//! configured rate is an error rather than a default.

use rust_decimal::Decimal;

use crate::config::TariffConfig;
use crate::error::EngineResult;
use crate::models::{DueCategory, Port};

use super::DueResult;
use super::units::{gt_units, round_currency};

/// Calculates pilotage dues for a vessel.
///
/// `amount = base_fee + ceil(gt / 100) * per_100_gt`, rounded to cents.
///
/// # Returns
///
/// Returns `PortNotConfigured` if the tariff book has no pilotage rate for
/// the port.
pub fn calculate_pilotage_dues(
    gross_tonnage: Decimal,
    port: Port,
    config: &TariffConfig,
    step_number: u32,
) -> EngineResult<DueResult> {
    let rate = config.pilotage_rate(port)?;

    let units = gt_units(gross_tonnage);
    let amount = round_currency(rate.base_fee + units * rate.per_100_gt);

    Ok(DueResult::new(
        DueCategory::Pilotage,
        amount,
        &config.tariffs().pilotage_dues.section,
        step_number,
        serde_json::json!({
            "gross_tonnage": gross_tonnage.normalize().to_string(),
            "port": port.as_str(),
            "base_fee": rate.base_fee.to_string(),
            "per_100_gt": rate.per_100_gt.to_string()
        }),
        serde_json::json!({
            "units": units.normalize().to_string(),
            "amount": amount.to_string()
        }),
        format!(
            "{}: base R{} + {} x R{} = R{}",
            port,
            rate.base_fee.normalize(),
            units.normalize(),
            rate.per_100_gt.normalize(),
            amount
        ),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::error::EngineError;
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
    fn test_pilotage_reference_vessel() {
        // 18608.61 + 513 x 9.72
        let result = calculate_pilotage_dues(dec("51300"), Port::Durban, &config(), 1).unwrap();
        assert_eq!(result.amount, dec("23594.97"));
    }

    #[test]
    fn test_pilotage_uses_port_specific_rate() {
        // 6342.39 + 100 x 10.20
        let result =
            calculate_pilotage_dues(dec("10000"), Port::CapeTown, &config(), 1).unwrap();
        assert_eq!(result.amount, dec("7362.39"));
        assert!(result.audit_step.reasoning.starts_with("Cape_Town"));
    }

    #[test]
    fn test_unconfigured_port_fails_instead_of_defaulting() {
        let loaded = config();
        let mut tariffs = loaded.tariffs().clone();
        tariffs.pilotage_dues.calculation.remove(&Port::Ngqura);
        let config = TariffConfig::new_unchecked(loaded.metadata().clone(), tariffs);

        match calculate_pilotage_dues(dec("10000"), Port::Ngqura, &config, 1) {
            Err(EngineError::PortNotConfigured { category, port }) => {
                assert_eq!(category, "pilotage_dues");
                assert_eq!(port, Port::Ngqura);
            }
            other => panic!("Expected PortNotConfigured error, got {:?}", other),
        }

        // Other ports are unaffected
        assert!(calculate_pilotage_dues(dec("10000"), Port::Durban, &config, 1).is_ok());
    }

    #[test]
    fn test_audit_step_section() {
        let result = calculate_pilotage_dues(dec("51300"), Port::Durban, &config(), 4).unwrap();
        assert_eq!(result.audit_step.rule_id, "pilotage_dues");
        assert_eq!(result.audit_step.section_ref, "3.3");
        assert_eq!(result.audit_step.step_number, 4);
    }
}
