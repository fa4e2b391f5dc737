//! Deduction report models for the Payroll Deduction Engine.
//!
//! This module contains the [`DeductionReport`] type and its associated
//! structures that capture all outputs of a payroll calculation: the
//! individual deduction lines, the totals, and an audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of a payroll deduction.
///
/// # Example
///
/// ```
/// use payroll_engine::models::DeductionKind;
///
/// assert!(DeductionKind::FederalTax.is_tax());
/// assert!(!DeductionKind::EmploymentInsurance.is_tax());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    /// Provincial income tax.
    ProvincialTax,
    /// Federal income tax.
    FederalTax,
    /// Canada Pension Plan contribution.
    CanadaPensionPlan,
    /// Employment Insurance premium.
    EmploymentInsurance,
}

impl DeductionKind {
    /// Returns true for income taxes, false for contributions.
    pub fn is_tax(&self) -> bool {
        matches!(self, Self::ProvincialTax | Self::FederalTax)
    }
}

/// A single deduction line item.
///
/// For taxes `rate` is the marginal rate of the bracket the income fell in;
/// for contributions it is the flat contribution rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// What is being deducted.
    pub kind: DeductionKind,
    /// A human-readable description of the line.
    pub description: String,
    /// The portion of gross income the rate was applied to.
    pub taxable_amount: Decimal,
    /// The marginal or flat rate applied.
    pub rate: Decimal,
    /// The deducted amount, rounded down to whole cents.
    pub amount: Decimal,
    /// Reference to the schedule table that produced this line.
    pub schedule_ref: String,
}

/// Aggregated totals for a deduction report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionTotals {
    /// Annual gross income the deductions were computed from.
    pub gross_income: Decimal,
    /// Provincial plus federal tax.
    pub total_tax: Decimal,
    /// Pension plus insurance contributions.
    pub total_contributions: Decimal,
    /// Sum of every deduction line.
    pub total_deductions: Decimal,
    /// Gross income less total deductions.
    pub net_income: Decimal,
}

impl DeductionTotals {
    /// Sums a set of deduction lines against a gross income.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::DeductionTotals;
    /// use rust_decimal_macros::dec;
    ///
    /// let totals = DeductionTotals::from_lines(dec!(1000.00), &[]);
    /// assert_eq!(totals.net_income, dec!(1000.00));
    /// ```
    pub fn from_lines(gross_income: Decimal, lines: &[DeductionLine]) -> Self {
        let total_tax: Decimal = lines
            .iter()
            .filter(|line| line.kind.is_tax())
            .map(|line| line.amount)
            .sum();
        let total_contributions: Decimal = lines
            .iter()
            .filter(|line| !line.kind.is_tax())
            .map(|line| line.amount)
            .sum();
        let total_deductions = total_tax + total_contributions;

        Self {
            gross_income,
            total_tax,
            total_contributions,
            total_deductions,
            net_income: gross_income - total_deductions,
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the schedule table used by this rule.
    pub schedule_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate conditions that don't prevent calculation but may
/// require attention, such as a province with no bracket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a payroll deduction calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The ID of the employee the calculation is for.
    pub employee_id: String,
    /// The province name as supplied on the employee record.
    pub jurisdiction: String,
    /// Individual deduction lines.
    pub deductions: Vec<DeductionLine>,
    /// Aggregated totals.
    pub totals: DeductionTotals,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl DeductionReport {
    /// Returns the line of the given kind, if present.
    pub fn deduction(&self, kind: DeductionKind) -> Option<&DeductionLine> {
        self.deductions.iter().find(|line| line.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn create_line(kind: DeductionKind, amount: Decimal) -> DeductionLine {
        DeductionLine {
            kind,
            description: "test".to_string(),
            taxable_amount: dec!(55000.00),
            rate: dec!(0.10),
            amount,
            schedule_ref: "canada_2020".to_string(),
        }
    }

    fn create_sample_lines() -> Vec<DeductionLine> {
        vec![
            create_line(DeductionKind::ProvincialTax, dec!(5500.00)),
            create_line(DeductionKind::FederalTax, dec!(8605.57)),
            create_line(DeductionKind::CanadaPensionPlan, dec!(2887.50)),
            create_line(DeductionKind::EmploymentInsurance, dec!(856.36)),
        ]
    }

    #[test]
    fn test_totals_split_tax_and_contributions() {
        let totals = DeductionTotals::from_lines(dec!(55000.00), &create_sample_lines());

        assert_eq!(totals.total_tax, dec!(14105.57));
        assert_eq!(totals.total_contributions, dec!(3743.86));
        assert_eq!(totals.total_deductions, dec!(17849.43));
        assert_eq!(totals.net_income, dec!(37150.57));
    }

    #[test]
    fn test_totals_with_no_lines() {
        let totals = DeductionTotals::from_lines(dec!(1234.56), &[]);

        assert_eq!(totals.total_deductions, Decimal::ZERO);
        assert_eq!(totals.net_income, dec!(1234.56));
    }

    #[test]
    fn test_deduction_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&DeductionKind::CanadaPensionPlan).unwrap(),
            "\"canada_pension_plan\""
        );
        assert_eq!(
            serde_json::to_string(&DeductionKind::ProvincialTax).unwrap(),
            "\"provincial_tax\""
        );
    }

    #[test]
    fn test_report_lookup_by_kind() {
        let lines = create_sample_lines();
        let report = DeductionReport {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            employee_id: "emp_001".to_string(),
            jurisdiction: "alberta".to_string(),
            totals: DeductionTotals::from_lines(dec!(55000.00), &lines),
            deductions: lines,
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![],
                duration_us: 0,
            },
        };

        let federal = report.deduction(DeductionKind::FederalTax).unwrap();
        assert_eq!(federal.amount, dec!(8605.57));
    }

    #[test]
    fn test_report_serialization_round_trip() {
        let lines = create_sample_lines();
        let report = DeductionReport {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            employee_id: "emp_001".to_string(),
            jurisdiction: "alberta".to_string(),
            totals: DeductionTotals::from_lines(dec!(55000.00), &lines),
            deductions: lines,
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![],
                duration_us: 42,
            },
        };

        let json = serde_json::to_string(&report).unwrap();
        let deserialized: DeductionReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, deserialized);
    }
}
