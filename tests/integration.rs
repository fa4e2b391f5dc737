//! Integration tests for the Payroll Deduction Engine.
//!
//! This test suite drives the HTTP API end to end against the shipped
//! `canada_2020` schedule directory:
//! - Provincial tax reference values (British Columbia, Alberta)
//! - Recognised but unimplemented jurisdictions
//! - Full employee deduction reports
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::compute_tax;
use payroll_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/canada_2020").expect("Failed to load config");
    create_router(AppState::new(config))
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn provincial_tax(gross_income: &str, jurisdiction: &str) -> (StatusCode, Value) {
    post_json(
        create_router_for_test(),
        "/tax/provincial",
        json!({ "gross_income": gross_income, "jurisdiction": jurisdiction }),
    )
    .await
}

fn create_employee(id: &str, age: u32, gross_income: &str, province: &str) -> Value {
    json!({
        "employee": {
            "id": id,
            "name": "Test Employee",
            "age": age,
            "gross_income": gross_income,
            "province": province
        }
    })
}

fn assert_decimal_eq(actual: &Value, expected: &str) {
    let actual = actual.as_str().unwrap();
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

fn deduction<'a>(report: &'a Value, kind: &str) -> &'a Value {
    report["deductions"]
        .as_array()
        .unwrap()
        .iter()
        .find(|line| line["kind"] == kind)
        .unwrap_or_else(|| panic!("No {} deduction in report", kind))
}

// =============================================================================
// SECTION 1: Provincial Tax Reference Values
// =============================================================================

#[tokio::test]
async fn test_british_columbia_reference_values() {
    let cases = [
        ("50000", "2748.46"),
        ("90000", "6011.83"),
        ("100000", "7136.79"),
        ("150000", "14092.90"),
        ("200000", "22330.19"),
        ("300000", "42090.19"),
    ];

    for (gross, expected) in cases {
        let (status, result) = provincial_tax(gross, "british columbia").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(result["implemented"], json!(true));
        assert_decimal_eq(&result["amount"], expected);
    }
}

#[tokio::test]
async fn test_jurisdiction_name_is_case_insensitive() {
    let (status, result) = provincial_tax("30000", "British Columbia").await;
    assert_eq!(status, StatusCode::OK);
    assert_decimal_eq(&result["amount"], "1518.00");
}

#[tokio::test]
async fn test_alberta_flat_first_bracket() {
    let (status, result) = provincial_tax("55000", "alberta").await;
    assert_eq!(status, StatusCode::OK);
    assert_decimal_eq(&result["amount"], "5500.00");
}

#[tokio::test]
async fn test_zero_income_is_untaxed() {
    for jurisdiction in ["alberta", "british columbia"] {
        let (_, result) = provincial_tax("0", jurisdiction).await;
        assert_decimal_eq(&result["amount"], "0");
    }
}

// =============================================================================
// SECTION 2: Unimplemented and Unknown Jurisdictions
// =============================================================================

#[tokio::test]
async fn test_quebec_is_zero() {
    let (status, result) = provincial_tax("80000", "quebec").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["implemented"], json!(false));
    assert_decimal_eq(&result["amount"], "0");
}

#[tokio::test]
async fn test_unknown_jurisdiction_is_zero() {
    let (status, result) = provincial_tax("80000", "atlantis").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["jurisdiction"], "atlantis");
    assert_decimal_eq(&result["amount"], "0");
}

// =============================================================================
// SECTION 3: Employee Deduction Reports
// =============================================================================

#[tokio::test]
async fn test_alberta_reference_employee() {
    let request = create_employee("emp_001", 22, "55000.00", "alberta");

    let (status, report) = post_json(create_router_for_test(), "/deductions", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["employee_id"], "emp_001");
    assert_decimal_eq(&deduction(&report, "provincial_tax")["amount"], "5500.00");
    assert_decimal_eq(&deduction(&report, "federal_tax")["amount"], "8605.57");
    assert_decimal_eq(&deduction(&report, "canada_pension_plan")["amount"], "2887.50");
    assert_decimal_eq(&deduction(&report, "employment_insurance")["amount"], "856.36");
    assert_decimal_eq(&report["totals"]["total_deductions"], "17849.43");
    assert_decimal_eq(&report["totals"]["net_income"], "37150.57");
}

#[tokio::test]
async fn test_high_earner_contributions_are_capped() {
    let request = create_employee("emp_002", 45, "150000.00", "british columbia");

    let (status, report) = post_json(create_router_for_test(), "/deductions", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_eq(&deduction(&report, "provincial_tax")["amount"], "14092.90");
    assert_decimal_eq(&deduction(&report, "canada_pension_plan")["amount"], "3081.75");
    assert_decimal_eq(&deduction(&report, "employment_insurance")["amount"], "856.36");
}

#[tokio::test]
async fn test_audit_trace_has_one_step_per_deduction() {
    let request = create_employee("emp_003", 30, "42000.00", "alberta");

    let (_, report) = post_json(create_router_for_test(), "/deductions", request).await;

    let steps = report["audit_trace"]["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[0]["schedule_ref"], "canada_2020/provinces/alberta");
    assert_eq!(steps[1]["schedule_ref"], "canada_2020/federal");
    assert!(report["audit_trace"]["warnings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unimplemented_province_reports_warning() {
    let request = create_employee("emp_004", 21, "40000.00", "Saskatchewan");

    let (status, report) = post_json(create_router_for_test(), "/deductions", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal_eq(&deduction(&report, "provincial_tax")["amount"], "0");
    let warnings = report["audit_trace"]["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["code"], "JURISDICTION_NOT_IMPLEMENTED");
}

// =============================================================================
// SECTION 4: Error Cases
// =============================================================================

#[tokio::test]
async fn test_underage_employee_rejected() {
    let request = create_employee("emp_005", 12, "1000.00", "alberta");

    let (status, error) = post_json(create_router_for_test(), "/deductions", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_EMPLOYEE");
}

#[tokio::test]
async fn test_negative_income_rejected() {
    let request = create_employee("emp_006", 30, "-10.00", "alberta");

    let (status, error) = post_json(create_router_for_test(), "/deductions", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_EMPLOYEE");

    let (status, error) = provincial_tax("-10.00", "alberta").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_INCOME");
}

#[tokio::test]
async fn test_blank_province_rejected() {
    let request = create_employee("emp_007", 30, "50000.00", "  ");

    let (status, error) = post_json(create_router_for_test(), "/deductions", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_EMPLOYEE");
}

#[tokio::test]
async fn test_missing_content_type_rejected() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tax/provincial")
                .body(Body::from(r#"{"gross_income": "1", "jurisdiction": "alberta"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "MISSING_CONTENT_TYPE");
}

// =============================================================================
// SECTION 5: Properties
// =============================================================================

proptest! {
    #[test]
    fn compute_tax_is_monotonic(a in 0u64..50_000_000, b in 0u64..50_000_000) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low = Decimal::new(low as i64, 2);
        let high = Decimal::new(high as i64, 2);

        for jurisdiction in ["alberta", "british columbia"] {
            prop_assert!(compute_tax(low, jurisdiction) <= compute_tax(high, jurisdiction));
        }
    }
}
