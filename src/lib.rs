//! Payroll Deduction Engine for Canadian tax schedules
//!
//! This crate computes per-employee payroll deductions (provincial tax,
//! federal tax, Canada Pension Plan and Employment Insurance) from gross
//! income, using marginal-rate bracket tables per jurisdiction.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
