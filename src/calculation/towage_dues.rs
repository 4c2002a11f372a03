//! Towage dues calculation.
//!
//! Towage is the most involved tariff: a base fee for the 2,001-10,000 GT
//! band is always charged, a tiered per-100-GT increment is added for the
//! tonnage above 10,000 GT, and the sum is multiplied by a tug factor.
//!
//! The tug factor switches to two tugs strictly above 10,000 GT, while the
//! first increment bracket starts strictly above 10,000 GT as well but
//! treats 10,000 GT itself as the last increment-free tonnage. A vessel of
//! exactly 10,000 GT therefore pays `base x 1`, and one of 10,000.01 GT pays
//! `(base + 1 unit) x 2`.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{TariffConfig, TowageRate};
use crate::error::EngineResult;
use crate::models::{DueCategory, Port};

use super::DueResult;
use super::units::{ceil_units, gt_block_size, round_currency};

/// A tonnage band priced at one increment rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TowageTier {
    /// 10,001 to 50,000 GT.
    From10001,
    /// 50,001 to 100,000 GT.
    From50001,
    /// Above 100,000 GT.
    From100001,
}

impl TowageTier {
    /// Returns the increment per 100 GT charged in this tier.
    pub fn rate(&self, rates: &TowageRate) -> Decimal {
        match self {
            TowageTier::From10001 => rates.increment_10001_plus,
            TowageTier::From50001 => rates.increment_50001_plus,
            TowageTier::From100001 => rates.increment_100001_plus,
        }
    }
}

/// One increment bracket: tonnage in `(lower, upper]` is charged at `tier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TowageBracket {
    /// Tonnage above which the bracket applies.
    pub lower: Decimal,
    /// Tonnage at which the bracket is exhausted, if any.
    pub upper: Option<Decimal>,
    /// The increment rate used for the bracket.
    pub tier: TowageTier,
}

impl TowageBracket {
    /// Number of 100 GT units this bracket charges for a vessel.
    ///
    /// A fully passed bracket charges its whole width; the bracket holding
    /// the vessel charges the part-blocks above its lower bound.
    pub fn units_for(&self, gross_tonnage: Decimal) -> Decimal {
        if gross_tonnage <= self.lower {
            return Decimal::ZERO;
        }
        match self.upper {
            Some(upper) if gross_tonnage > upper => (upper - self.lower) / gt_block_size(),
            _ => ceil_units(gross_tonnage - self.lower, gt_block_size()),
        }
    }
}

/// Returns the increment brackets, ordered by tonnage.
pub fn towage_brackets() -> [TowageBracket; 3] {
    [
        TowageBracket {
            lower: Decimal::from(10_000),
            upper: Some(Decimal::from(50_000)),
            tier: TowageTier::From10001,
        },
        TowageBracket {
            lower: Decimal::from(50_000),
            upper: Some(Decimal::from(100_000)),
            tier: TowageTier::From50001,
        },
        TowageBracket {
            lower: Decimal::from(100_000),
            upper: None,
            tier: TowageTier::From100001,
        },
    ]
}

/// Returns the tug factor for a vessel.
///
/// Two tugs above 10,000 GT, one above 2,000 GT, half otherwise.
pub fn tug_multiplier(gross_tonnage: Decimal) -> Decimal {
    if gross_tonnage > Decimal::from(10_000) {
        Decimal::TWO
    } else if gross_tonnage > Decimal::from(2_000) {
        Decimal::ONE
    } else {
        Decimal::new(5, 1)
    }
}

#[derive(Debug, Serialize)]
struct BracketCharge {
    tier: TowageTier,
    units: String,
    rate: String,
    charge: String,
}

/// Sums the per-bracket increments for a vessel.
pub fn towage_increment(gross_tonnage: Decimal, rates: &TowageRate) -> Decimal {
    bracket_charges(gross_tonnage, rates)
        .iter()
        .fold(Decimal::ZERO, |total, (_, charge)| total + charge)
}

fn bracket_charges(gross_tonnage: Decimal, rates: &TowageRate) -> Vec<(TowageBracket, Decimal)> {
    towage_brackets()
        .into_iter()
        .filter(|bracket| gross_tonnage > bracket.lower)
        .map(|bracket| {
            let charge = bracket.units_for(gross_tonnage) * bracket.tier.rate(rates);
            (bracket, charge)
        })
        .collect()
}

/// Calculates towage dues for a vessel.
///
/// `amount = (base_fee_2001_to_10000 + increment) * tug_multiplier`,
/// rounded to cents.
///
/// # Returns
///
/// Returns `PortNotConfigured` if the tariff book has no towage rate for
/// the port.
pub fn calculate_towage_dues(
    gross_tonnage: Decimal,
    port: Port,
    config: &TariffConfig,
    step_number: u32,
) -> EngineResult<DueResult> {
    let rates = config.towage_rate(port)?;

    let multiplier = tug_multiplier(gross_tonnage);
    let base = rates.base_fee_2001_to_10000;
    let increment = towage_increment(gross_tonnage, rates);
    let amount = round_currency((base + increment) * multiplier);

    let brackets: Vec<BracketCharge> = bracket_charges(gross_tonnage, rates)
        .iter()
        .map(|(bracket, charge)| BracketCharge {
            tier: bracket.tier,
            units: bracket.units_for(gross_tonnage).normalize().to_string(),
            rate: bracket.tier.rate(rates).to_string(),
            charge: charge.normalize().to_string(),
        })
        .collect();

    Ok(DueResult::new(
        DueCategory::Towage,
        amount,
        &config.tariffs().towage_dues.section,
        step_number,
        serde_json::json!({
            "gross_tonnage": gross_tonnage.normalize().to_string(),
            "port": port.as_str(),
            "base_fee": base.to_string()
        }),
        serde_json::json!({
            "tug_multiplier": multiplier.normalize().to_string(),
            "brackets": brackets,
            "increment": increment.normalize().to_string(),
            "amount": amount.to_string()
        }),
        format!(
            "{}: (base R{} + increment R{}) x {} tug(s) = R{}",
            port,
            base.normalize(),
            increment.normalize(),
            multiplier.normalize(),
            amount
        ),
    ))
}
