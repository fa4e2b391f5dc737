//! Canada Pension Plan contribution.
//!
//! The contribution is a flat rate on gross income up to the schedule's
//! maximum pensionable earnings. No basic exemption is subtracted.

use crate::config::TaxSchedule;
use crate::models::{DeductionKind, Employee};

use super::common::{ContributionResult, ContributionRule, contribution_line};

/// Calculates the Canada Pension Plan contribution for an employee.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_pension_contribution;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::Employee;
/// use rust_decimal_macros::dec;
///
/// let employee = Employee::new("emp_001", "Opeyemi Adesina", 22, dec!(55000), "alberta")?;
/// let result = calculate_pension_contribution(&employee, ConfigLoader::builtin().schedule(), 1);
/// assert_eq!(result.line.amount, dec!(2887.50));
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn calculate_pension_contribution(
    employee: &Employee,
    schedule: &TaxSchedule,
    step_number: u32,
) -> ContributionResult {
    contribution_line(
        ContributionRule {
            kind: DeductionKind::CanadaPensionPlan,
            rule_id: "canada_pension_plan",
            rule_name: "Canada Pension Plan Contribution",
            description: "Canada Pension Plan contribution",
            schedule_ref: schedule.contributions_ref("pension"),
        },
        employee.gross_income,
        schedule.pension(),
        step_number,
    )
}
