//! Integration tests for the Payslip Engine.
//!
//! This suite drives the HTTP router end to end and covers:
//! - Attendance proration into other deductions
//! - Payslip totals and negative net payable
//! - Edits, edit mode and both attendance change policies
//! - Payslip layout and rendered snapshots
//! - Employee CSV export and filtering
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payslip_engine::api::{AppState, create_router};
use payslip_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/payslip").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Vec<u8>) {
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
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn post_payslip(body: Value) -> (StatusCode, Value) {
    let (status, bytes) = post(create_router_for_test(), "/payslip", body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_export(body: Value) -> (StatusCode, String) {
    let (status, bytes) = post(create_router_for_test(), "/employees/export", body).await;
    (status, String::from_utf8(bytes).unwrap())
}

fn create_employee(name: &str, basic: u32, hra: u32, allowances: u32) -> Value {
    json!({
        "id": format!("emp_{}", name.to_lowercase().replace(' ', "_")),
        "name": name,
        "code": "EMP001",
        "designation": "Accountant",
        "department": "Accounts",
        "company": "GAP",
        "date_of_birth": "1990-05-07",
        "bank_name": "State Bank",
        "uan_number": "100200300",
        "basic_salary": basic,
        "hra": hra,
        "other_allowances": allowances,
        "pf_deduction": 1800,
        "esi_deduction": 0,
        "professional_tax": 200,
        "other_deductions": 0
    })
}

fn create_request(month: &str, year: i32, attendance: Value) -> Value {
    json!({
        "employee": create_employee("Asha Raman", 20000, 8000, 2000),
        "period": { "month": month, "year": year },
        "attendance": attendance
    })
}

fn assert_amount(result: &Value, path: &[&str], expected: &str) {
    let mut value = result;
    for key in path {
        value = &value[*key];
    }
    let actual = value
        .as_str()
        .unwrap_or_else(|| panic!("Expected decimal string at {:?}, got {}", path, value));
    assert_eq!(
        decimal(actual),
        decimal(expected),
        "Amount at {:?}: expected {}, got {}",
        path,
        expected,
        actual
    );
}

fn detail(result: &Value, section: &str, label: &str) -> String {
    result["layout"][section]
        .as_array()
        .unwrap()
        .iter()
        .find(|entry| entry["label"] == label)
        .and_then(|entry| entry["value"].as_str())
        .unwrap_or_else(|| panic!("No {} entry labelled {}", section, label))
        .to_string()
}

// =============================================================================
// Attendance Proration
// =============================================================================

#[tokio::test]
async fn test_three_missing_days_in_thirty_day_month() {
    let (status, result) =
        post_payslip(create_request("June", 2025, json!({ "worked_days": 23, "weekly_off": 4 })))
            .await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&result, &["proration", "per_day_rate"], "1000");
    assert_amount(&result, &["proration", "missing_days"], "3");
    assert_amount(&result, &["proration", "deduction"], "3000.00");
    assert_eq!(result["other_deductions"]["source"], "automatic");
}

#[tokio::test]
async fn test_full_attendance_has_no_deduction() {
    let (_, result) = post_payslip(create_request(
        "June",
        2025,
        json!({ "worked_days": 22, "weekly_off": 4, "holiday": 2, "paid_leaves": 2 }),
    ))
    .await;

    assert_amount(&result, &["proration", "deduction"], "0");
    assert_amount(&result, &["computation", "net_payable"], "28000");
}

#[tokio::test]
async fn test_overcount_is_clamped_silently() {
    let (status, result) = post_payslip(create_request(
        "June",
        2025,
        json!({ "worked_days": 30, "weekly_off": 8, "holiday": 3 }),
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&result, &["proration", "missing_days"], "0");
    assert_eq!(
        result["proration"]["audit_step"]["output"]["overcount_clamped"],
        true
    );
}

#[tokio::test]
async fn test_half_days_count_half() {
    let (_, result) = post_payslip(create_request(
        "June",
        2025,
        json!({ "worked_full_days": 24, "worked_half_days": 2, "weekly_off": 4 }),
    ))
    .await;

    // 24 + 1 + 4 = 29 of 30 days
    assert_amount(&result, &["proration", "deduction"], "1000.00");
    assert_eq!(detail(&result, "payable_days", "Worked Days"), "25");
}

#[tokio::test]
async fn test_leap_february_has_29_days() {
    let (_, result) =
        post_payslip(create_request("February", 2024, json!({ "worked_days": 25, "weekly_off": 4 })))
            .await;

    assert_eq!(result["proration"]["total_days"], 29);
    assert_amount(&result, &["proration", "deduction"], "0");
}

#[tokio::test]
async fn test_common_february_has_28_days() {
    let (_, result) =
        post_payslip(create_request("feb", 2023, json!({ "worked_days": 20, "weekly_off": 4 })))
            .await;

    assert_eq!(result["proration"]["total_days"], 28);
    // 4 missing days at 30000 / 28
    assert_amount(&result, &["proration", "deduction"], "4285.71");
}

#[tokio::test]
async fn test_rounding_midpoint_away_from_zero() {
    let mut request = create_request("July", 2025, json!({ "worked_days": 25, "weekly_off": 4 }));
    request["employee"]["basic_salary"] = json!(15000);
    request["employee"]["hra"] = json!(10000);
    request["employee"]["other_allowances"] = json!(0);

    let (_, result) = post_payslip(request).await;

    // 2 missing days at 25000 / 31 = 1612.903...
    assert_amount(&result, &["proration", "deduction"], "1612.90");
}

// =============================================================================
// Payslip Totals
// =============================================================================

#[tokio::test]
async fn test_totals_and_net_payable() {
    let (_, result) =
        post_payslip(create_request("June", 2025, json!({ "worked_days": 23, "weekly_off": 4 })))
            .await;

    assert_amount(&result, &["computation", "total_earnings"], "30000");
    assert_amount(&result, &["computation", "total_deductions"], "5000");
    assert_amount(&result, &["computation", "net_payable"], "25000");
    assert_eq!(result["computation"]["earnings"].as_array().unwrap().len(), 3);
    assert_eq!(result["computation"]["deductions"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_net_payable_may_be_negative() {
    let mut request = create_request("June", 2025, json!({ "worked_days": 26, "weekly_off": 4 }));
    request["deductions"] = json!({ "pf_deduction": "40000" });

    let (status, result) = post_payslip(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&result, &["computation", "net_payable"], "-10200");
    assert_eq!(result["layout"]["net_payable"], "Total Net Payable : ₹ -10200.00");
}

#[tokio::test]
async fn test_invalid_salary_fields_normalize_to_zero() {
    let mut request = create_request("June", 2025, json!({ "worked_days": 26, "weekly_off": 4 }));
    request["employee"]["hra"] = json!("not a number");
    request["employee"]["other_allowances"] = json!(-500);
    request["employee"]["esi_deduction"] = Value::Null;

    let (status, result) = post_payslip(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&result, &["computation", "total_earnings"], "20000");
}

#[tokio::test]
async fn test_amounts_at_decimal_max_do_not_overflow() {
    let mut request = create_request("June", 2025, json!({ "worked_days": 20 }));
    request["employee"]["basic_salary"] = json!("79228162514264337593543950335");
    request["employee"]["hra"] = json!("79228162514264337593543950335");

    let (status, result) = post_payslip(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(
        &result,
        &["computation", "total_earnings"],
        "79228162514264337593543950335",
    );
    assert_amount(
        &result,
        &["proration", "gross_monthly"],
        "79228162514264337593543950335",
    );
}

#[tokio::test]
async fn test_identical_requests_give_identical_computations() {
    let request = create_request("June", 2025, json!({ "worked_days": 21, "weekly_off": 4 }));

    let (_, first) = post_payslip(request.clone()).await;
    let (_, second) = post_payslip(request).await;

    assert_eq!(first["computation"], second["computation"]);
    assert_ne!(first["payslip_id"], second["payslip_id"]);
}

// =============================================================================
// Edits and Other Deductions Ownership
// =============================================================================

#[tokio::test]
async fn test_edit_recomputes_in_same_request() {
    let mut request = create_request("June", 2025, json!({ "worked_days": 26, "weekly_off": 4 }));
    request["edits"] = json!({ "basic_salary": "abc", "hra": 9000 });

    let (_, result) = post_payslip(request).await;

    assert_amount(&result, &["computation", "total_earnings"], "11000");
    assert_amount(&result, &["computation", "net_payable"], "9000");
}

#[tokio::test]
async fn test_manual_other_deductions_edit() {
    let mut request = create_request("June", 2025, json!({ "worked_days": 23, "weekly_off": 4 }));
    request["editing"] = json!(true);
    request["edits"] = json!({ "other_deductions": "750.5" });

    let (_, result) = post_payslip(request).await;

    assert_eq!(result["edit_mode"], "editing");
    assert_eq!(result["other_deductions"]["source"], "manual");
    assert_amount(&result, &["computation", "total_deductions"], "2750.50");
    // the proration is still reported underneath the manual value
    assert_amount(&result, &["proration", "deduction"], "3000.00");
}

#[tokio::test]
async fn test_entering_edit_mode_keeps_values() {
    let base = create_request("June", 2025, json!({ "worked_days": 23, "weekly_off": 4 }));
    let mut editing = base.clone();
    editing["editing"] = json!(true);

    let (_, viewing_result) = post_payslip(base).await;
    let (_, editing_result) = post_payslip(editing).await;

    assert_eq!(viewing_result["computation"], editing_result["computation"]);
    assert_eq!(editing_result["other_deductions"]["source"], "manual");
}

#[tokio::test]
async fn test_typed_other_deductions_before_generation() {
    let mut request = create_request("June", 2025, json!({ "worked_days": 23, "weekly_off": 4 }));
    request["deductions"] = json!({ "other_deductions": 100, "professional_tax": "" });

    let (_, result) = post_payslip(request).await;

    assert_eq!(result["other_deductions"]["source"], "manual");
    assert_amount(&result, &["computation", "total_deductions"], "1900");
}

#[tokio::test]
async fn test_earning_is_not_a_deduction_input() {
    let mut request = create_request("June", 2025, json!({ "worked_days": 23 }));
    request["deductions"] = json!({ "basic_salary": 100 });

    let (status, result) = post_payslip(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "UNKNOWN_FIELD");
}

// =============================================================================
// Layout and Snapshot
// =============================================================================

#[tokio::test]
async fn test_layout_header_and_details() {
    let (_, result) =
        post_payslip(create_request("March", 2025, json!({ "worked_days": 31 }))).await;

    let layout = &result["layout"];
    assert_eq!(layout["company"], "GAP");
    assert_eq!(layout["title"], "Payslip from - March 2025");
    assert!(layout["address"].as_str().unwrap().contains("Chennai"));
    assert_eq!(layout["logo_sources"][0], "/gap-logo.png");
    assert_eq!(detail(&result, "employee_details", "Date of Birth"), "07-05-1990");
    assert_eq!(detail(&result, "employee_details", "Date of Joining"), "100200300");
    assert_eq!(detail(&result, "employee_details", "IFSC Code"), "-");
    assert_eq!(
        layout["footer"],
        "This PDF is system-generated, no signature required"
    );
}

#[tokio::test]
async fn test_unknown_company_uses_default_address_and_no_logo() {
    let mut request = create_request("March", 2025, json!({ "worked_days": 31 }));
    request["employee"]["company"] = json!("Northwind");

    let (_, result) = post_payslip(request).await;

    assert!(result["layout"]["address"].as_str().unwrap().contains("Besant Nagar"));
    assert!(result["layout"]["logo_sources"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_snapshot_renders_text_document() {
    let request = create_request("March", 2025, json!({ "worked_days": 31 }));

    let (status, bytes) = post(create_router_for_test(), "/payslip/snapshot", request).await;

    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("Payslip from - March 2025"));
    assert!(text.contains("Total Net Payable : ₹ 28000.00"));
}

// =============================================================================
// Employee Export
// =============================================================================

#[tokio::test]
async fn test_export_empty_list_is_header_only() {
    let (status, csv) = post_export(json!({ "employees": [] })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(csv.lines().count(), 1);
    assert_eq!(csv.split(',').count(), 19);
    assert!(!csv.ends_with('\n'));
}

#[tokio::test]
async fn test_export_escapes_quotes_and_line_breaks() {
    let mut employee = create_employee("O\"Brien", 25000, 0, 0);
    employee["designation"] = json!("Senior\nAccountant");

    let (_, csv) = post_export(json!({ "employees": [employee] })).await;

    let row = csv.lines().nth(1).unwrap();
    assert!(row.starts_with("\"O\"\"Brien\",\"EMP001\",\"Senior Accountant\""));
    assert!(row.contains("\"25000.00\""));
}

#[tokio::test]
async fn test_export_applies_filter_in_order() {
    let mut ravi = create_employee("Ravi Kumar", 18000, 0, 0);
    ravi["department"] = json!("Operations");
    let body = json!({
        "employees": [
            create_employee("Asha Raman", 20000, 0, 0),
            ravi,
            create_employee("Meena Iyer", 22000, 0, 0)
        ],
        "filter": { "search": "", "department": "Accounts" }
    });

    let (_, csv) = post_export(body).await;

    let names: Vec<&str> = csv
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap())
        .collect();
    assert_eq!(names, vec!["\"Asha Raman\"", "\"Meena Iyer\""]);
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/employees/export")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"employees\": ["))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_invalid_year_returns_400() {
    let (status, result) =
        post_payslip(create_request("June", 25, json!({ "worked_days": 26 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_YEAR");
}

#[tokio::test]
async fn test_unparseable_periods_are_rejected_not_defaulted() {
    let unknown_month = create_request("Smarch", 2025, json!({ "worked_days": 26 }));
    let (status, result) = post_payslip(unknown_month).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "UNKNOWN_MONTH");
    assert!(result.get("computation").is_none());

    let mut word_year = create_request("July", 2025, json!({ "worked_days": 26 }));
    word_year["period"]["year"] = json!("twenty");
    let (status, result) = post_payslip(word_year).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_YEAR");
}
