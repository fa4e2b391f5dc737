//! Common utility functions for deduction calculations.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::ContributionRate;
use crate::models::{AuditStep, DeductionKind, DeductionLine};

/// Rounds a currency amount down to whole cents.
///
/// Deductions never round up: a partial cent owed is not withheld.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_down_to_cents;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_down_to_cents(dec!(8605.575)), dec!(8605.57));
/// assert_eq!(round_down_to_cents(dec!(2887.5)), dec!(2887.50));
/// ```
pub fn round_down_to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::ToZero)
}

/// Applies a flat rate to earnings, capped at a maximum.
///
/// Returns the earnings the rate applies to and the uncapped result.
pub fn capped_contribution(
    earnings: Decimal,
    maximum_earnings: Decimal,
    rate: Decimal,
) -> (Decimal, Decimal) {
    let contributory = earnings.max(Decimal::ZERO).min(maximum_earnings);
    (contributory, contributory * rate)
}

/// The result of a flat-rate contribution calculation.
#[derive(Debug, Clone)]
pub struct ContributionResult {
    /// The contribution deduction line.
    pub line: DeductionLine,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Identifies a contribution for [`contribution_line`].
pub(crate) struct ContributionRule<'a> {
    pub kind: DeductionKind,
    pub rule_id: &'a str,
    pub rule_name: &'a str,
    pub description: &'a str,
    pub schedule_ref: String,
}

/// Builds a capped flat-rate contribution line and its audit step.
pub(crate) fn contribution_line(
    rule: ContributionRule<'_>,
    gross_income: Decimal,
    contribution: &ContributionRate,
    step_number: u32,
) -> ContributionResult {
    let (contributory, raw) =
        capped_contribution(gross_income, contribution.maximum_earnings, contribution.rate);
    let amount = round_down_to_cents(raw);

    let audit_step = AuditStep {
        step_number,
        rule_id: rule.rule_id.to_string(),
        rule_name: rule.rule_name.to_string(),
        schedule_ref: rule.schedule_ref.clone(),
        input: serde_json::json!({
            "gross_income": gross_income.to_string(),
            "rate": contribution.rate.to_string(),
            "maximum_earnings": contribution.maximum_earnings.to_string(),
        }),
        output: serde_json::json!({
            "contributory_earnings": contributory.to_string(),
            "capped": gross_income > contribution.maximum_earnings,
            "amount": amount.to_string(),
        }),
        reasoning: format!(
            "${} of earnings (capped at ${}) at {}: ${}",
            contributory, contribution.maximum_earnings, contribution.rate, amount
        ),
    };

    ContributionResult {
        line: DeductionLine {
            kind: rule.kind,
            description: rule.description.to_string(),
            taxable_amount: contributory,
            rate: contribution.rate,
            amount,
            schedule_ref: rule.schedule_ref,
        },
        audit_step,
    }
}
