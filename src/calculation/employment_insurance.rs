//! Employment Insurance premium.

use crate::config::TaxSchedule;
use crate::models::{DeductionKind, Employee};

use super::common::{ContributionResult, ContributionRule, contribution_line};

/// Calculates the Employment Insurance premium for an employee.
///
/// Flat rate on gross income up to the schedule's maximum insurable earnings.
pub fn calculate_employment_insurance(
    employee: &Employee,
    schedule: &TaxSchedule,
    step_number: u32,
) -> ContributionResult {
    contribution_line(
        ContributionRule {
            kind: DeductionKind::EmploymentInsurance,
            rule_id: "employment_insurance",
            rule_name: "Employment Insurance Premium",
            description: "Employment Insurance premium",
            schedule_ref: schedule.contributions_ref("insurance"),
        },
        employee.gross_income,
        schedule.insurance(),
        step_number,
    )
}
