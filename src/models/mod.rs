//! Core data models for the Payroll Deduction Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod deduction;
mod employee;
mod jurisdiction;

pub use deduction::{
    AuditStep, AuditTrace, AuditWarning, DeductionKind, DeductionLine, DeductionReport,
    DeductionTotals,
};
pub use employee::{Employee, MINIMUM_WORKING_AGE};
pub use jurisdiction::Jurisdiction;
