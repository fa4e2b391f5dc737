//! HTTP request handlers for the Payroll Deduction Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_deductions, compute_scheduled_tax, round_down_to_cents};
use crate::models::{Employee, Jurisdiction};

use super::request::{DeductionRequest, ProvincialTaxRequest};
use super::response::{ApiError, ApiErrorResponse, ProvincialTaxResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/deductions", post(deductions_handler))
        .route("/tax/provincial", post(provincial_tax_handler))
        .with_state(state)
}

/// Handler for POST /deductions.
///
/// Accepts an employee and returns the full deduction report.
async fn deductions_handler(
    State(state): State<AppState>,
    payload: Result<Json<DeductionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing deduction request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_error(correlation_id, rejection),
            );
        }
    };

    let employee = match Employee::try_from(request.employee) {
        Ok(employee) => employee,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid employee");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    match calculate_deductions(&employee, state.config().schedule()) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee.id,
                province = %employee.province,
                total_deductions = %report.totals.total_deductions,
                duration_us = report.audit_trace.duration_us,
                "Deductions calculated successfully"
            );
            json_response(StatusCode::OK, report)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Calculation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /tax/provincial.
///
/// Returns the provincial tax for a gross income in a named jurisdiction.
/// Unknown or unimplemented jurisdictions answer with a zero amount.
async fn provincial_tax_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProvincialTaxRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_error(correlation_id, rejection),
            );
        }
    };

    if let Err(err) = request.validate() {
        warn!(correlation_id = %correlation_id, error = %err, "Invalid income");
        return ApiErrorResponse::from(err).into_response();
    }

    let schedule = state.config().schedule();
    let implemented = Jurisdiction::parse(&request.jurisdiction)
        .is_some_and(|j| schedule.provincial(j).is_some());
    let amount = round_down_to_cents(compute_scheduled_tax(
        schedule,
        request.gross_income,
        &request.jurisdiction,
    ));

    if !implemented {
        warn!(
            correlation_id = %correlation_id,
            jurisdiction = %request.jurisdiction,
            "No provincial table for jurisdiction"
        );
    }
    info!(
        correlation_id = %correlation_id,
        jurisdiction = %request.jurisdiction,
        amount = %amount,
        "Provincial tax calculated"
    );

    json_response(
        StatusCode::OK,
        ProvincialTaxResponse {
            jurisdiction: request.jurisdiction,
            implemented,
            gross_income: request.gross_income,
            amount,
        },
    )
}

fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
