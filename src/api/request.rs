//! Request types for the Payroll Deduction Engine API.
//!
//! This module defines the JSON request structures for the `/deductions`
//! and `/tax/provincial` endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

/// Request body for the `/deductions` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionRequest {
    /// The employee information.
    pub employee: EmployeeRequest,
}

/// Employee information in a deduction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    #[serde(default)]
    pub name: String,
    /// The employee's age in years.
    pub age: u32,
    /// Annual gross income.
    pub gross_income: Decimal,
    /// The province the employee works in.
    #[serde(default)]
    pub province: Option<String>,
}

impl TryFrom<EmployeeRequest> for Employee {
    type Error = EngineError;

    fn try_from(req: EmployeeRequest) -> EngineResult<Self> {
        let province = req.province.ok_or_else(|| EngineError::InvalidEmployee {
            field: "province".to_string(),
            message: "is required".to_string(),
        })?;
        Employee::new(req.id, req.name, req.age, req.gross_income, province)
    }
}

/// Request body for the `/tax/provincial` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvincialTaxRequest {
    /// Annual gross income.
    pub gross_income: Decimal,
    /// Jurisdiction name, matched case-insensitively.
    pub jurisdiction: String,
}

impl ProvincialTaxRequest {
    /// Rejects negative gross income.
    pub fn validate(&self) -> EngineResult<()> {
        if self.gross_income < Decimal::ZERO {
            return Err(EngineError::InvalidIncome {
                amount: self.gross_income,
            });
        }
        Ok(())
    }
}
