//! Configuration types for tariff calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the tariff book YAML files.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Port;

/// Largest rate or fee accepted in a tariff book.
pub const MAX_RATE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Rates keyed by port.
pub type PortTable<T> = BTreeMap<Port, T>;

/// Metadata about the tariff book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffBookMetadata {
    /// The title of the tariff book.
    pub name: String,
    /// The authority publishing the tariffs.
    pub issuer: String,
    /// The edition (financial year) of the book.
    pub edition: String,
    /// ISO currency code all rates are expressed in.
    pub currency: String,
    /// First day the rates apply.
    pub effective_from: NaiveDate,
    /// Last day the rates apply.
    pub effective_to: NaiveDate,
    /// URL to the published tariff book.
    pub source_url: String,
}

/// One tariff category of the book.
///
/// `C` is the category-specific calculation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TariffSection<C> {
    /// Tariff book section reference (e.g. "3.6").
    pub section: String,
    /// What the charge covers.
    pub description: String,
    /// Formula parameters.
    pub calculation: C,
}

/// Light dues parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightDuesCalculation {
    /// Rate per 100 GT or part thereof.
    pub formula_rate: Decimal,
}

/// Port dues parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortDuesCalculation {
    /// One-off charge per 100 GT on entering the port.
    pub entry_fee: Decimal,
    /// Charge per 100 GT for every day or part day alongside.
    pub daily_fee: Decimal,
}

/// VTS rate for a group of ports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VtsRate {
    /// Charge per GT.
    pub rate_per_gt: Decimal,
}

/// VTS dues parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VtsDuesCalculation {
    /// Rate applied at Durban and Saldanha.
    #[serde(rename = "Durban_Saldanha")]
    pub durban_saldanha: VtsRate,
    /// Rate applied at every other port.
    pub other_ports: VtsRate,
    /// Minimum charge per call.
    pub minimum_fee: Decimal,
}

impl VtsDuesCalculation {
    /// Returns the rate group a port belongs to.
    pub fn rate_for(&self, port: Port) -> &VtsRate {
        if port.is_major_vts_port() {
            &self.durban_saldanha
        } else {
            &self.other_ports
        }
    }
}

/// Pilotage parameters for one port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PilotageRate {
    /// Basic fee per service.
    pub base_fee: Decimal,
    /// Charge per 100 GT or part thereof.
    pub per_100_gt: Decimal,
}

/// Towage parameters for one port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowageRate {
    /// Fee for the 2,001 to 10,000 GT band, always charged.
    pub base_fee_2001_to_10000: Decimal,
    /// Increment per 100 GT between 10,001 and 50,000 GT.
    #[serde(rename = "increment_per_100_gt_10001+")]
    pub increment_10001_plus: Decimal,
    /// Increment per 100 GT between 50,001 and 100,000 GT.
    #[serde(rename = "increment_per_100_gt_50001+")]
    pub increment_50001_plus: Decimal,
    /// Increment per 100 GT above 100,000 GT.
    #[serde(rename = "increment_per_100_gt_100001+")]
    pub increment_100001_plus: Decimal,
}

/// Running of vessel lines parameters for one port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRunningRate {
    /// Flat fee per service.
    pub flat_fee: Decimal,
}

/// All tariff categories of the book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tariffs {
    /// Light dues.
    pub light_dues: TariffSection<LightDuesCalculation>,
    /// Port dues.
    pub port_dues: TariffSection<PortDuesCalculation>,
    /// VTS dues.
    pub vts_dues: TariffSection<VtsDuesCalculation>,
    /// Pilotage dues by port.
    pub pilotage_dues: TariffSection<PortTable<PilotageRate>>,
    /// Towage dues by port.
    pub towage_dues: TariffSection<PortTable<TowageRate>>,
    /// Running of vessel lines by port.
    pub running_of_vessel_lines_dues: TariffSection<PortTable<LineRunningRate>>,
}

/// Root of `tariffs.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TariffsFile {
    /// The tariff categories.
    pub tariffs: Tariffs,
}

/// The complete tariff configuration loaded from YAML files.
///
/// A `TariffConfig` can only be built through [`TariffConfig::new`], which
/// validates that every port has a rate in each port-specific category and
/// that every rate lies between zero and [`MAX_RATE`].
#[derive(Debug, Clone)]
pub struct TariffConfig {
    metadata: TariffBookMetadata,
    tariffs: Tariffs,
}

impl TariffConfig {
    /// Creates a new TariffConfig, validating its contents.
    pub fn new(metadata: TariffBookMetadata, tariffs: Tariffs) -> EngineResult<Self> {
        validate(&tariffs)?;
        Ok(Self { metadata, tariffs })
    }

    /// Returns the tariff book metadata.
    pub fn metadata(&self) -> &TariffBookMetadata {
        &self.metadata
    }

    /// Returns the tariff categories.
    pub fn tariffs(&self) -> &Tariffs {
        &self.tariffs
    }

    /// Gets the pilotage rate for a port.
    pub fn pilotage_rate(&self, port: Port) -> EngineResult<&PilotageRate> {
        port_rate(&self.tariffs.pilotage_dues.calculation, "pilotage_dues", port)
    }

    /// Gets the towage rate for a port.
    pub fn towage_rate(&self, port: Port) -> EngineResult<&TowageRate> {
        port_rate(&self.tariffs.towage_dues.calculation, "towage_dues", port)
    }

    /// Gets the running of vessel lines rate for a port.
    pub fn line_running_rate(&self, port: Port) -> EngineResult<&LineRunningRate> {
        port_rate(
            &self.tariffs.running_of_vessel_lines_dues.calculation,
            "running_of_vessel_lines_dues",
            port,
        )
    }

    /// Builds a config without validation, for exercising runtime lookups.
    #[cfg(test)]
    pub(crate) fn new_unchecked(metadata: TariffBookMetadata, tariffs: Tariffs) -> Self {
        Self { metadata, tariffs }
    }
}

/// Looks up a port-specific rate.
///
/// Returns `PortNotConfigured` if the table has no entry for the port.
pub fn port_rate<'a, T>(table: &'a PortTable<T>, category: &str, port: Port) -> EngineResult<&'a T> {
    table.get(&port).ok_or_else(|| EngineError::PortNotConfigured {
        category: category.to_string(),
        port,
    })
}

fn validate(tariffs: &Tariffs) -> EngineResult<()> {
    for port in Port::ALL {
        port_rate(&tariffs.pilotage_dues.calculation, "pilotage_dues", port)
            .map_err(missing_port)?;
        port_rate(&tariffs.towage_dues.calculation, "towage_dues", port).map_err(missing_port)?;
        port_rate(
            &tariffs.running_of_vessel_lines_dues.calculation,
            "running_of_vessel_lines_dues",
            port,
        )
        .map_err(missing_port)?;
    }

    let mut rates: Vec<(String, Decimal)> = vec![
        (
            "light_dues.formula_rate".to_string(),
            tariffs.light_dues.calculation.formula_rate,
        ),
        (
            "port_dues.entry_fee".to_string(),
            tariffs.port_dues.calculation.entry_fee,
        ),
        (
            "port_dues.daily_fee".to_string(),
            tariffs.port_dues.calculation.daily_fee,
        ),
        (
            "vts_dues.Durban_Saldanha.rate_per_gt".to_string(),
            tariffs.vts_dues.calculation.durban_saldanha.rate_per_gt,
        ),
        (
            "vts_dues.other_ports.rate_per_gt".to_string(),
            tariffs.vts_dues.calculation.other_ports.rate_per_gt,
        ),
        (
            "vts_dues.minimum_fee".to_string(),
            tariffs.vts_dues.calculation.minimum_fee,
        ),
    ];
    for (port, rate) in &tariffs.pilotage_dues.calculation {
        rates.push((format!("pilotage_dues.{port}.base_fee"), rate.base_fee));
        rates.push((format!("pilotage_dues.{port}.per_100_gt"), rate.per_100_gt));
    }
    for (port, rate) in &tariffs.towage_dues.calculation {
        rates.push((
            format!("towage_dues.{port}.base_fee_2001_to_10000"),
            rate.base_fee_2001_to_10000,
        ));
        rates.push((
            format!("towage_dues.{port}.increment_per_100_gt_10001+"),
            rate.increment_10001_plus,
        ));
        rates.push((
            format!("towage_dues.{port}.increment_per_100_gt_50001+"),
            rate.increment_50001_plus,
        ));
        rates.push((
            format!("towage_dues.{port}.increment_per_100_gt_100001+"),
            rate.increment_100001_plus,
        ));
    }
    for (port, rate) in &tariffs.running_of_vessel_lines_dues.calculation {
        rates.push((
            format!("running_of_vessel_lines_dues.{port}.flat_fee"),
            rate.flat_fee,
        ));
    }

    if let Some((key, value)) = rates.iter().find(|(_, value)| *value < Decimal::ZERO) {
        return Err(EngineError::ConfigValidation {
            message: format!("{} must not be negative, got {}", key, value),
        });
    }
    if let Some((key, value)) = rates.iter().find(|(_, value)| *value > MAX_RATE) {
        return Err(EngineError::ConfigValidation {
            message: format!("{} must not exceed {}, got {}", key, MAX_RATE, value),
        });
    }

    Ok(())
}

fn missing_port(error: EngineError) -> EngineError {
    EngineError::ConfigValidation {
        message: error.to_string(),
    }
}
