//! Provincial tax calculation.
//!
//! This module provides [`compute_tax`], the bracket tax over the built-in
//! provincial tables, and [`calculate_provincial_tax`], which produces the
//! provincial deduction line for an employee against any loaded schedule.
//!
//! Unknown jurisdictions, and recognised jurisdictions without a bracket
//! table, owe no provincial tax. That is a defined default, not an error.

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::{TaxSchedule, provincial_brackets};
use crate::models::{AuditStep, AuditWarning, DeductionKind, DeductionLine, Employee, Jurisdiction};

use super::bracket::{compute_bracket_tax, marginal_tax};
use super::common::round_down_to_cents;

/// Warning code for a province name outside the recognised set.
pub const UNKNOWN_JURISDICTION: &str = "UNKNOWN_JURISDICTION";

/// Warning code for a recognised province with no bracket table.
pub const JURISDICTION_NOT_IMPLEMENTED: &str = "JURISDICTION_NOT_IMPLEMENTED";

/// Computes provincial tax on `gross_income` using the built-in tables.
///
/// The jurisdiction name is matched case-insensitively. Unknown or
/// unimplemented jurisdictions return zero. The result is unrounded.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_tax;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(compute_tax(dec!(50000), "british columbia"), dec!(2748.46));
/// assert_eq!(compute_tax(dec!(55000), "Alberta"), dec!(5500.00));
/// assert_eq!(compute_tax(dec!(80000), "quebec"), dec!(0));
/// ```
pub fn compute_tax(gross_income: Decimal, jurisdiction: &str) -> Decimal {
    Jurisdiction::parse(jurisdiction)
        .and_then(provincial_brackets)
        .map(|brackets| marginal_tax(gross_income, brackets))
        .unwrap_or(Decimal::ZERO)
}

/// Computes provincial tax on `gross_income` using a loaded schedule.
///
/// Same contract as [`compute_tax`], but jurisdictions the schedule adds
/// tables for are taxed too.
pub fn compute_scheduled_tax(
    schedule: &TaxSchedule,
    gross_income: Decimal,
    jurisdiction: &str,
) -> Decimal {
    Jurisdiction::parse(jurisdiction)
        .and_then(|j| schedule.provincial(j))
        .map(|table| marginal_tax(gross_income, table.brackets()))
        .unwrap_or(Decimal::ZERO)
}

/// The result of the provincial tax calculation for an employee.
#[derive(Debug, Clone)]
pub struct ProvincialTaxResult {
    /// The provincial deduction line (zero when no table applies).
    pub line: DeductionLine,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Set when the province was unknown or had no table.
    pub warning: Option<AuditWarning>,
}

/// Calculates the provincial tax deduction for an employee.
///
/// # Arguments
///
/// * `employee` - The employee whose gross income and province are used
/// * `schedule` - The tax schedule holding the provincial tables
/// * `step_number` - The step number for audit trail sequencing
pub fn calculate_provincial_tax(
    employee: &Employee,
    schedule: &TaxSchedule,
    step_number: u32,
) -> ProvincialTaxResult {
    let gross_income = employee.gross_income;

    let Some(jurisdiction) = employee.jurisdiction() else {
        warn!(
            employee_id = %employee.id,
            province = %employee.province,
            "Unknown jurisdiction, no provincial tax applied"
        );
        return untaxed(
            employee,
            step_number,
            "unknown",
            AuditWarning {
                code: UNKNOWN_JURISDICTION.to_string(),
                message: format!(
                    "Province '{}' is not a recognised jurisdiction; provincial tax is zero",
                    employee.province
                ),
                severity: "medium".to_string(),
            },
        );
    };

    let schedule_ref = schedule.provincial_ref(jurisdiction);
    let Some(table) = schedule.provincial(jurisdiction) else {
        warn!(
            employee_id = %employee.id,
            jurisdiction = %jurisdiction,
            "No bracket table for jurisdiction, no provincial tax applied"
        );
        return untaxed(
            employee,
            step_number,
            &schedule_ref,
            AuditWarning {
                code: JURISDICTION_NOT_IMPLEMENTED.to_string(),
                message: format!(
                    "No provincial bracket table is configured for '{}'; provincial tax is zero",
                    jurisdiction
                ),
                severity: "high".to_string(),
            },
        );
    };

    let walk = compute_bracket_tax(gross_income, table.brackets());
    let (amount, rate) = walk
        .map(|w| (round_down_to_cents(w.tax), w.marginal_rate))
        .unwrap_or((Decimal::ZERO, Decimal::ZERO));

    let audit_step = AuditStep {
        step_number,
        rule_id: "provincial_tax".to_string(),
        rule_name: "Provincial Bracket Tax".to_string(),
        schedule_ref: schedule_ref.clone(),
        input: serde_json::json!({
            "gross_income": gross_income.to_string(),
            "jurisdiction": jurisdiction.as_str(),
        }),
        output: serde_json::json!({
            "bracket_index": walk.map(|w| w.bracket_index),
            "marginal_rate": rate.to_string(),
            "lower_brackets_tax": walk.map(|w| w.lower_brackets_tax.to_string()),
            "amount": amount.to_string(),
        }),
        reasoning: match walk {
            Some(w) => format!(
                "{} of income above {} at {} plus {} on lower brackets: ${}",
                w.taxable_in_bracket, w.lower_bound, w.marginal_rate, w.lower_brackets_tax, amount
            ),
            None => "No bracket applies to this income".to_string(),
        },
    };

    ProvincialTaxResult {
        line: DeductionLine {
            kind: DeductionKind::ProvincialTax,
            description: format!("Provincial income tax ({})", jurisdiction),
            taxable_amount: gross_income,
            rate,
            amount,
            schedule_ref,
        },
        audit_step,
        warning: None,
    }
}

fn untaxed(
    employee: &Employee,
    step_number: u32,
    schedule_ref: &str,
    warning: AuditWarning,
) -> ProvincialTaxResult {
    ProvincialTaxResult {
        line: DeductionLine {
            kind: DeductionKind::ProvincialTax,
            description: format!("Provincial income tax ({})", employee.province),
            taxable_amount: employee.gross_income,
            rate: Decimal::ZERO,
            amount: Decimal::ZERO,
            schedule_ref: schedule_ref.to_string(),
        },
        audit_step: AuditStep {
            step_number,
            rule_id: "provincial_tax".to_string(),
            rule_name: "Provincial Bracket Tax".to_string(),
            schedule_ref: schedule_ref.to_string(),
            input: serde_json::json!({
                "gross_income": employee.gross_income.to_string(),
                "jurisdiction": employee.province,
            }),
            output: serde_json::json!({
                "amount": "0",
                "warning": warning.code,
            }),
            reasoning: warning.message.clone(),
        },
        warning: Some(warning),
    }
}
