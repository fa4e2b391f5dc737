//! Calculation logic for the Payroll Deduction Engine.
//!
//! This module contains the generic marginal bracket walk, the provincial
//! and federal tax rules built on it, the flat-rate pension and insurance
//! contributions, and the orchestration that combines them into a
//! deduction report.

mod bracket;
mod common;
mod employment_insurance;
mod federal_tax;
mod payroll;
mod pension_plan;
mod provincial_tax;

pub use bracket::{
    BracketTaxResult, compute_bracket_tax, cumulative_tax_below, locate_bracket, marginal_tax,
};
pub use common::{ContributionResult, capped_contribution, round_down_to_cents};
pub use employment_insurance::calculate_employment_insurance;
pub use federal_tax::{FederalTaxResult, calculate_federal_tax};
pub use payroll::calculate_deductions;
pub use pension_plan::calculate_pension_contribution;
pub use provincial_tax::{
    JURISDICTION_NOT_IMPLEMENTED, ProvincialTaxResult, UNKNOWN_JURISDICTION,
    calculate_provincial_tax, compute_scheduled_tax, compute_tax,
};
