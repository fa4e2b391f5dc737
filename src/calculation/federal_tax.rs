//! Federal tax calculation.
//!
//! Federal tax uses the same bracket walk as provincial tax, against the
//! schedule's federal table.

use rust_decimal::Decimal;

use crate::config::TaxSchedule;
use crate::models::{AuditStep, DeductionKind, DeductionLine, Employee};

use super::bracket::compute_bracket_tax;
use super::common::round_down_to_cents;

/// The result of the federal tax calculation, including the line and audit step.
#[derive(Debug, Clone)]
pub struct FederalTaxResult {
    /// The federal deduction line.
    pub line: DeductionLine,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the federal tax deduction for an employee.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_federal_tax;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::Employee;
/// use rust_decimal_macros::dec;
///
/// let employee = Employee::new("emp_001", "Opeyemi Adesina", 22, dec!(55000), "alberta")?;
/// let config = ConfigLoader::builtin();
///
/// let result = calculate_federal_tax(&employee, config.schedule(), 1);
/// assert_eq!(result.line.amount, dec!(8605.57));
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn calculate_federal_tax(
    employee: &Employee,
    schedule: &TaxSchedule,
    step_number: u32,
) -> FederalTaxResult {
    let gross_income = employee.gross_income;
    let schedule_ref = schedule.federal_ref();

    let walk = compute_bracket_tax(gross_income, schedule.federal().brackets());
    let (amount, rate) = walk
        .map(|w| (round_down_to_cents(w.tax), w.marginal_rate))
        .unwrap_or((Decimal::ZERO, Decimal::ZERO));

    let audit_step = AuditStep {
        step_number,
        rule_id: "federal_tax".to_string(),
        rule_name: "Federal Bracket Tax".to_string(),
        schedule_ref: schedule_ref.clone(),
        input: serde_json::json!({
            "gross_income": gross_income.to_string(),
        }),
        output: serde_json::json!({
            "bracket_index": walk.map(|w| w.bracket_index),
            "marginal_rate": rate.to_string(),
            "amount": amount.to_string(),
        }),
        reasoning: format!(
            "Federal tax on ${} at a marginal rate of {}: ${}",
            gross_income, rate, amount
        ),
    };

    FederalTaxResult {
        line: DeductionLine {
            kind: DeductionKind::FederalTax,
            description: "Federal income tax".to_string(),
            taxable_amount: gross_income,
            rate,
            amount,
            schedule_ref,
        },
        audit_step,
    }
}
