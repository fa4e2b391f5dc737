//! Payroll deduction orchestration.
//!
//! Runs every deduction rule for one employee in a fixed order (provincial
//! tax, federal tax, pension, insurance) and assembles a [`DeductionReport`].

use std::time::Instant;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::config::TaxSchedule;
use crate::error::EngineResult;
use crate::models::{AuditTrace, DeductionReport, DeductionTotals, Employee};

use super::employment_insurance::calculate_employment_insurance;
use super::federal_tax::calculate_federal_tax;
use super::pension_plan::calculate_pension_contribution;
use super::provincial_tax::calculate_provincial_tax;

/// Calculates every payroll deduction for an employee.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidEmployee`] when the employee
/// record fails validation. An unknown or unimplemented province is not an
/// error; it produces a zero provincial line and an audit warning.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_deductions;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::Employee;
/// use rust_decimal_macros::dec;
///
/// let employee = Employee::new("emp_001", "Opeyemi Adesina", 22, dec!(55000.00), "alberta")?;
/// let report = calculate_deductions(&employee, ConfigLoader::builtin().schedule())?;
///
/// assert_eq!(report.totals.total_deductions, dec!(17849.43));
/// assert_eq!(report.totals.net_income, dec!(37150.57));
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn calculate_deductions(
    employee: &Employee,
    schedule: &TaxSchedule,
) -> EngineResult<DeductionReport> {
    employee.validate()?;

    let start_time = Instant::now();
    let mut step_number: u32 = 1;

    let provincial = calculate_provincial_tax(employee, schedule, step_number);
    step_number += 1;
    let federal = calculate_federal_tax(employee, schedule, step_number);
    step_number += 1;
    let pension = calculate_pension_contribution(employee, schedule, step_number);
    step_number += 1;
    let insurance = calculate_employment_insurance(employee, schedule, step_number);

    let warnings = provincial.warning.into_iter().collect();
    let steps = vec![
        provincial.audit_step,
        federal.audit_step,
        pension.audit_step,
        insurance.audit_step,
    ];
    let deductions = vec![provincial.line, federal.line, pension.line, insurance.line];
    let totals = DeductionTotals::from_lines(employee.gross_income, &deductions);

    debug!(
        employee_id = %employee.id,
        total_deductions = %totals.total_deductions,
        net_income = %totals.net_income,
        "Deductions calculated"
    );

    Ok(DeductionReport {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: employee.id.clone(),
        jurisdiction: employee.province.clone(),
        deductions,
        totals,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}
