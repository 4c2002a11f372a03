//! Tariff result models for the Port Tariff Engine.
//!
//! This module contains the [`TariffAssessment`] type and its associated
//! structures that capture all outputs from a tariff calculation: the
//! itemized dues, their total and an audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::VesselParticulars;

/// The tariff categories charged on a port call.
///
/// # Example
///
/// ```
/// use port_tariff_engine::models::DueCategory;
///
/// assert_eq!(DueCategory::Towage.rule_id(), "towage_dues");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueCategory {
    /// Light dues.
    Light,
    /// Port dues.
    Port,
    /// Vessel traffic services dues.
    Vts,
    /// Pilotage dues.
    Pilotage,
    /// Towage dues.
    Towage,
    /// Running of vessel lines.
    LineRunning,
}

impl DueCategory {
    /// All categories, in the order they are calculated.
    pub const ALL: [DueCategory; 6] = [
        DueCategory::Light,
        DueCategory::Port,
        DueCategory::Vts,
        DueCategory::Pilotage,
        DueCategory::Towage,
        DueCategory::LineRunning,
    ];

    /// Identifier used for audit steps and rule lookups.
    pub fn rule_id(&self) -> &'static str {
        match self {
            DueCategory::Light => "light_dues",
            DueCategory::Port => "port_dues",
            DueCategory::Vts => "vts_dues",
            DueCategory::Pilotage => "pilotage_dues",
            DueCategory::Towage => "towage_dues",
            DueCategory::LineRunning => "running_of_vessel_lines_dues",
        }
    }

    /// Human-readable name of the category.
    pub fn rule_name(&self) -> &'static str {
        match self {
            DueCategory::Light => "Light Dues",
            DueCategory::Port => "Port Dues",
            DueCategory::Vts => "VTS Dues",
            DueCategory::Pilotage => "Pilotage Dues",
            DueCategory::Towage => "Towage Dues",
            DueCategory::LineRunning => "Running of Vessel Lines",
        }
    }
}

/// The itemized dues for one port call.
///
/// Every amount is rounded to cents. `total` is the sum of the six amounts,
/// rounded once more.
///
/// # Example
///
/// ```
/// use port_tariff_engine::models::TariffBreakdown;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dues = TariffBreakdown {
///     light_dues: Decimal::from_str("60062.04").unwrap(),
///     port_dues: Decimal::from_str("217455.57").unwrap(),
///     vts_dues: Decimal::from_str("33345.00").unwrap(),
///     pilotage_dues: Decimal::from_str("23594.97").unwrap(),
///     towage_dues: Decimal::from_str("39315.38").unwrap(),
///     line_running_dues: Decimal::from_str("1654.56").unwrap(),
///     total: Decimal::from_str("375427.52").unwrap(),
/// };
/// assert_eq!(dues.sum_of_items(), dues.total);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffBreakdown {
    /// Light dues.
    pub light_dues: Decimal,
    /// Port dues.
    pub port_dues: Decimal,
    /// VTS dues.
    pub vts_dues: Decimal,
    /// Pilotage dues.
    pub pilotage_dues: Decimal,
    /// Towage dues.
    pub towage_dues: Decimal,
    /// Running of vessel lines dues.
    pub line_running_dues: Decimal,
    /// Sum of all dues.
    pub total: Decimal,
}

impl TariffBreakdown {
    /// Returns the amount charged for a category.
    pub fn amount(&self, category: DueCategory) -> Decimal {
        match category {
            DueCategory::Light => self.light_dues,
            DueCategory::Port => self.port_dues,
            DueCategory::Vts => self.vts_dues,
            DueCategory::Pilotage => self.pilotage_dues,
            DueCategory::Towage => self.towage_dues,
            DueCategory::LineRunning => self.line_running_dues,
        }
    }

    /// Sums the six itemized amounts without rounding.
    pub fn sum_of_items(&self) -> Decimal {
        DueCategory::ALL.iter().map(|c| self.amount(*c)).sum()
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the tariff book section for this rule.
    pub section_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a tariff calculation.
///
/// Identifies the calculation, the tariff book edition used, the inputs and
/// the itemized dues, with an audit trace of every rule applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffAssessment {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The tariff book edition the rates were taken from.
    pub tariff_edition: String,
    /// Currency of all amounts.
    pub currency: String,
    /// The vessel inputs that were priced.
    pub vessel: VesselParticulars,
    /// The itemized dues.
    pub dues: TariffBreakdown,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
