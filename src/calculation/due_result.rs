//! Shared result type for the per-category calculators.

use rust_decimal::Decimal;

use crate::models::{AuditStep, DueCategory};

/// The result of pricing one tariff category, including the audit step.
#[derive(Debug, Clone)]
pub struct DueResult {
    /// The category that was priced.
    pub category: DueCategory,
    /// The amount due, rounded to cents.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

impl DueResult {
    pub(crate) fn new(
        category: DueCategory,
        amount: Decimal,
        section_ref: &str,
        step_number: u32,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) -> Self {
        Self {
            category,
            amount,
            audit_step: AuditStep {
                step_number,
                rule_id: category.rule_id().to_string(),
                rule_name: category.rule_name().to_string(),
                section_ref: section_ref.to_string(),
                input,
                output,
                reasoning,
            },
        }
    }
}
