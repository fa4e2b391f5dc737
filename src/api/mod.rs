//! HTTP API module for the Payroll Deduction Engine.
//!
//! This module provides the REST API endpoints for calculating Canadian
//! payroll deductions and standalone provincial tax.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DeductionRequest, EmployeeRequest, ProvincialTaxRequest};
pub use response::{ApiError, ProvincialTaxResponse};
pub use state::AppState;
