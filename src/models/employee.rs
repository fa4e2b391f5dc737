//! Employee model.
//!
//! This module defines the [`Employee`] struct whose gross income and work
//! province drive every deduction the engine computes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::Jurisdiction;

/// The youngest age at which an employee record is accepted.
pub const MINIMUM_WORKING_AGE: u32 = 14;

/// Represents an employee subject to payroll deductions.
///
/// Fields are public for reading, but records should be built with
/// [`Employee::new`] so that validation runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// The employee's age in years.
    pub age: u32,
    /// Annual gross income before any deduction.
    pub gross_income: Decimal,
    /// The province the employee works in, as supplied by the caller.
    pub province: String,
}

impl Employee {
    /// Creates a validated employee.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidEmployee`] when the id or province is
    /// blank, the age is below [`MINIMUM_WORKING_AGE`], or the gross income
    /// is negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    /// use rust_decimal_macros::dec;
    ///
    /// let employee = Employee::new("emp_001", "Opeyemi Adesina", 22, dec!(55000.00), "alberta")?;
    /// assert_eq!(employee.gross_income, dec!(55000.00));
    ///
    /// assert!(Employee::new("emp_002", "Jim", 12, dec!(13000.00), "alberta").is_err());
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        age: u32,
        gross_income: Decimal,
        province: impl Into<String>,
    ) -> EngineResult<Self> {
        let employee = Self {
            id: id.into(),
            name: name.into(),
            age,
            gross_income,
            province: province.into(),
        };
        employee.validate()?;
        Ok(employee)
    }

    /// Checks the record's invariants.
    pub fn validate(&self) -> EngineResult<()> {
        if self.id.trim().is_empty() {
            return Err(invalid("id", "must not be blank"));
        }
        if self.age < MINIMUM_WORKING_AGE {
            return Err(invalid(
                "age",
                format!("must be at least {}", MINIMUM_WORKING_AGE),
            ));
        }
        if self.gross_income < Decimal::ZERO {
            return Err(invalid("gross_income", "must not be negative"));
        }
        if self.province.trim().is_empty() {
            return Err(invalid("province", "must not be blank"));
        }
        Ok(())
    }

    /// Returns the recognised jurisdiction for the employee's province, if any.
    pub fn jurisdiction(&self) -> Option<Jurisdiction> {
        Jurisdiction::parse(&self.province)
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidEmployee {
        field: field.to_string(),
        message: message.into(),
    }
}
