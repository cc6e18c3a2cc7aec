//! Integration tests for the Personnel Reconciliation Engine API.
//!
//! This test suite drives the router end to end and covers:
//! - Attendance and leave submission with mutual exclusivity
//! - Submission-window enforcement
//! - Payroll runs, idempotence and salary statements
//! - Role-scoped evaluation updates with prior-period history
//! - Authentication and error mapping

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{NaiveDate, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use personnel_engine::api::{AppState, create_router};
use personnel_engine::config::EngineConfig;
use personnel_engine::models::{Employee, Role, YearMonth};
use personnel_engine::store::MemoryStore;

// =============================================================================
// Test Helpers
// =============================================================================

const STAFF_ID: u32 = 12345;
const OTHER_STAFF_ID: u32 = 12346;
const MANAGER_ID: u32 = 20001;

fn seed_employee(store: &MemoryStore, id: u32, name: &str, role: Role) {
    store
        .insert_employee(Employee {
            id,
            name: name.to_string(),
            credential_hash: "$argon2$stub".to_string(),
            role,
        })
        .expect("seeding employee");
}

fn create_test_state() -> AppState {
    let store = MemoryStore::new();
    seed_employee(&store, STAFF_ID, "Aoi Sato", Role::Staff);
    seed_employee(&store, OTHER_STAFF_ID, "Ren Watanabe", Role::Staff);
    seed_employee(&store, MANAGER_ID, "Yui Takahashi", Role::Manager);
    AppState::new(store, EngineConfig::default())
}

fn create_test_router() -> Router {
    create_router(create_test_state())
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn today_string() -> String {
    today().format("%Y-%m-%d").to_string()
}

fn current_month() -> String {
    YearMonth::from_date(today()).to_string()
}

fn previous_month() -> String {
    YearMonth::from_date(today()).pred().to_string()
}

/// A date guaranteed to be outside any submission window: the first day
/// of the month before the previous month.
fn long_closed_date() -> String {
    YearMonth::from_date(today())
        .pred()
        .pred()
        .first_day()
        .format("%Y-%m-%d")
        .to_string()
}

async fn send(
    router: Router,
    method: &str,
    uri: &str,
    caller: Option<u32>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(employee_id) = caller {
        builder = builder.header("x-employee-id", employee_id.to_string());
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn attendance_body(employee_id: u32, date: &str, start: &str, end: &str) -> Value {
    json!({
        "employee_id": employee_id,
        "date": date,
        "start_time": start,
        "end_time": end,
    })
}

fn leave_body(employee_id: u32, date: &str, leave_type: u8) -> Value {
    json!({
        "employee_id": employee_id,
        "date": date,
        "leave_type": leave_type,
    })
}

// =============================================================================
// Attendance and leave
// =============================================================================

#[tokio::test]
async fn test_attendance_day_round_trip() {
    let router = create_test_router();

    let (status, _) = send(
        router.clone(),
        "PUT",
        "/attendance",
        Some(STAFF_ID),
        Some(attendance_body(STAFF_ID, &today_string(), "09:00", "18:00")),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let uri = format!("/days/{STAFF_ID}?month={}", current_month());
    let (status, body) = send(router, "GET", &uri, Some(STAFF_ID), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["attendance_days"].as_array().unwrap().len(), 1);
    assert_eq!(body["attendance_days"][0]["date"], today_string());
    assert!(body["leave_days"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_leave_then_attendance_keeps_only_attendance() {
    let router = create_test_router();
    let date = today_string();

    let (status, _) = send(
        router.clone(),
        "PUT",
        "/leave",
        Some(STAFF_ID),
        Some(leave_body(STAFF_ID, &date, 1)),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        router.clone(),
        "PUT",
        "/attendance",
        Some(STAFF_ID),
        Some(attendance_body(STAFF_ID, &date, "09:00", "18:00")),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let uri = format!("/days/{STAFF_ID}?month={}", current_month());
    let (_, body) = send(router, "GET", &uri, Some(STAFF_ID), None).await;
    assert_eq!(body["attendance_days"].as_array().unwrap().len(), 1);
    assert!(body["leave_days"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_attendance_then_leave_keeps_only_leave() {
    let router = create_test_router();
    let date = today_string();

    send(
        router.clone(),
        "PUT",
        "/attendance",
        Some(STAFF_ID),
        Some(attendance_body(STAFF_ID, &date, "09:00", "18:00")),
    )
    .await;
    send(
        router.clone(),
        "PUT",
        "/leave",
        Some(STAFF_ID),
        Some(leave_body(STAFF_ID, &date, 4)),
    )
    .await;

    let uri = format!("/days/{STAFF_ID}?month={}", current_month());
    let (_, body) = send(router, "GET", &uri, Some(STAFF_ID), None).await;
    assert!(body["attendance_days"].as_array().unwrap().is_empty());
    assert_eq!(body["leave_days"].as_array().unwrap().len(), 1);
    assert_eq!(body["leave_days"][0]["leave_type"], "childcare");
}

#[tokio::test]
async fn test_closed_period_returns_out_of_window() {
    let router = create_test_router();

    let (status, body) = send(
        router,
        "PUT",
        "/attendance",
        Some(STAFF_ID),
        Some(attendance_body(
            STAFF_ID,
            &long_closed_date(),
            "09:00",
            "18:00",
        )),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "OUT_OF_WINDOW");
    // The caller is told the concrete boundary.
    assert!(body["details"].as_str().unwrap().contains("editable until"));
}

#[tokio::test]
async fn test_undefined_leave_code_is_rejected() {
    let router = create_test_router();

    let (status, body) = send(
        router,
        "PUT",
        "/leave",
        Some(STAFF_ID),
        Some(leave_body(STAFF_ID, &today_string(), 9)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_attendance_without_clock_times_is_rejected() {
    let router = create_test_router();

    let (status, body) = send(
        router,
        "PUT",
        "/attendance",
        Some(STAFF_ID),
        Some(json!({ "employee_id": STAFF_ID, "date": today_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_date_is_rejected() {
    let router = create_test_router();

    let (status, body) = send(
        router,
        "PUT",
        "/attendance",
        Some(STAFF_ID),
        Some(attendance_body(STAFF_ID, "2024-13-40", "09:00", "18:00")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Payroll
// =============================================================================

#[tokio::test]
async fn test_payroll_run_reference_values() {
    let router = create_test_router();

    // Two hours past the 18:00 boundary.
    send(
        router.clone(),
        "PUT",
        "/attendance",
        Some(STAFF_ID),
        Some(attendance_body(STAFF_ID, &today_string(), "09:00", "20:00")),
    )
    .await;

    let (status, body) = send(
        router,
        "POST",
        "/payroll/run",
        Some(MANAGER_ID),
        Some(json!({ "employee_id": STAFF_ID, "month": current_month() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["basic_salary"], 250_000);
    assert_eq!(body["overtime_pay"], 3_000);
    assert_eq!(body["health_insurance"], 12_500);
    assert_eq!(body["nursing_care_insurance"], 4_500);
    assert_eq!(body["pension"], 22_875);
    assert_eq!(body["employment_insurance"], 1_250);
    assert_eq!(body["income_tax"], 25_000);
    assert_eq!(body["resident_tax"], 25_000);
    assert_eq!(body["total_deduction"], 91_125);
    assert_eq!(body["net_salary"], 250_000 + 3_000 - 91_125);
}

#[tokio::test]
async fn test_payroll_rerun_is_idempotent() {
    let router = create_test_router();
    send(
        router.clone(),
        "PUT",
        "/attendance",
        Some(STAFF_ID),
        Some(attendance_body(STAFF_ID, &today_string(), "09:00", "19:30")),
    )
    .await;

    let run_body = json!({ "employee_id": STAFF_ID, "month": current_month() });
    let (_, first) = send(
        router.clone(),
        "POST",
        "/payroll/run",
        Some(MANAGER_ID),
        Some(run_body.clone()),
    )
    .await;
    let (_, second) = send(
        router,
        "POST",
        "/payroll/run",
        Some(MANAGER_ID),
        Some(run_body),
    )
    .await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_salary_statement_identity_on_read() {
    let router = create_test_router();
    send(
        router.clone(),
        "POST",
        "/payroll/run",
        Some(MANAGER_ID),
        Some(json!({ "employee_id": STAFF_ID, "month": current_month() })),
    )
    .await;

    let uri = format!("/salary/{STAFF_ID}?month={}", current_month());
    let (status, body) = send(router, "GET", &uri, Some(STAFF_ID), None).await;
    assert_eq!(status, StatusCode::OK);

    let deductions = body["health_insurance"].as_i64().unwrap()
        + body["nursing_care_insurance"].as_i64().unwrap()
        + body["pension"].as_i64().unwrap()
        + body["employment_insurance"].as_i64().unwrap()
        + body["income_tax"].as_i64().unwrap()
        + body["resident_tax"].as_i64().unwrap();
    assert_eq!(body["total_deduction"].as_i64().unwrap(), deductions);
    assert_eq!(
        body["net_salary"].as_i64().unwrap(),
        body["basic_salary"].as_i64().unwrap() + body["overtime_pay"].as_i64().unwrap()
            - deductions
    );
}

#[tokio::test]
async fn test_salary_without_month_lists_history() {
    let router = create_test_router();
    send(
        router.clone(),
        "POST",
        "/payroll/run",
        Some(MANAGER_ID),
        Some(json!({ "employee_id": STAFF_ID, "month": previous_month() })),
    )
    .await;
    send(
        router.clone(),
        "POST",
        "/payroll/run",
        Some(MANAGER_ID),
        Some(json!({ "employee_id": STAFF_ID, "month": current_month() })),
    )
    .await;

    let uri = format!("/salary/{STAFF_ID}");
    let (status, body) = send(router, "GET", &uri, Some(STAFF_ID), None).await;
    assert_eq!(status, StatusCode::OK);
    let statements = body.as_array().unwrap();
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0]["year_month"], previous_month());
    assert_eq!(statements[1]["year_month"], current_month());
}

#[tokio::test]
async fn test_salary_for_unknown_month_is_not_found() {
    let router = create_test_router();

    let uri = format!("/salary/{STAFF_ID}?month=199901");
    let (status, body) = send(router, "GET", &uri, Some(STAFF_ID), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

// =============================================================================
// Evaluations
// =============================================================================

#[tokio::test]
async fn test_staff_evaluation_scoped_to_comment() {
    let router = create_test_router();

    let (status, body) = send(
        router,
        "POST",
        "/performance",
        Some(STAFF_ID),
        Some(json!({
            "employee_id": STAFF_ID,
            "month": current_month(),
            "comment": "Ship the June release",
            "skill_score": 4,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comment"], "Ship the June release");
    // The unauthorized score was silently ignored.
    assert!(body["skill_score"].is_null());
}

#[tokio::test]
async fn test_manager_scores_preserve_employee_comment() {
    let router = create_test_router();

    send(
        router.clone(),
        "POST",
        "/performance",
        Some(STAFF_ID),
        Some(json!({
            "employee_id": STAFF_ID,
            "month": current_month(),
            "comment": "My goals",
        })),
    )
    .await;

    let (status, body) = send(
        router,
        "POST",
        "/performance",
        Some(MANAGER_ID),
        Some(json!({
            "employee_id": STAFF_ID,
            "month": current_month(),
            "skill_score": 4,
            "behavior_score": 3,
            "attitude_score": 5,
            "manager_comment": "Solid quarter",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comment"], "My goals");
    assert_eq!(body["skill_score"], 4);
    assert_eq!(body["behavior_score"], 3);
    assert_eq!(body["attitude_score"], 5);
    assert_eq!(body["manager_comment"], "Solid quarter");
}

#[tokio::test]
async fn test_staff_cannot_touch_another_employees_evaluation() {
    let router = create_test_router();

    let (status, body) = send(
        router,
        "POST",
        "/performance",
        Some(OTHER_STAFF_ID),
        Some(json!({
            "employee_id": STAFF_ID,
            "month": current_month(),
            "comment": "peeking",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_score_out_of_range_is_rejected() {
    let router = create_test_router();

    let (status, body) = send(
        router,
        "POST",
        "/performance",
        Some(MANAGER_ID),
        Some(json!({
            "employee_id": STAFF_ID,
            "month": current_month(),
            "skill_score": 6,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_evaluation_history_carries_previous_period() {
    let router = create_test_router();

    send(
        router.clone(),
        "POST",
        "/performance",
        Some(MANAGER_ID),
        Some(json!({
            "employee_id": STAFF_ID,
            "month": previous_month(),
            "skill_score": 3,
            "manager_comment": "Prior period",
        })),
    )
    .await;
    send(
        router.clone(),
        "POST",
        "/performance",
        Some(STAFF_ID),
        Some(json!({
            "employee_id": STAFF_ID,
            "month": current_month(),
            "comment": "Current goals",
        })),
    )
    .await;

    let uri = format!("/performance/{STAFF_ID}?month={}", current_month());
    let (status, body) = send(router, "GET", &uri, Some(STAFF_ID), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current"]["comment"], "Current goals");
    assert_eq!(body["previous"]["manager_comment"], "Prior period");
    assert_eq!(body["previous"]["skill_score"], 3);
}

#[tokio::test]
async fn test_evaluation_history_missing_records_is_empty() {
    let router = create_test_router();

    let uri = format!("/performance/{STAFF_ID}?month={}", current_month());
    let (status, body) = send(router, "GET", &uri, Some(STAFF_ID), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["current"].is_null());
    assert!(body["previous"].is_null());
}

// =============================================================================
// Authentication and error mapping
// =============================================================================

#[tokio::test]
async fn test_missing_auth_header_is_unauthorized() {
    let router = create_test_router();

    let (status, body) = send(
        router,
        "PUT",
        "/attendance",
        None,
        Some(attendance_body(STAFF_ID, &today_string(), "09:00", "18:00")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_unknown_employee_header_is_unauthorized() {
    let router = create_test_router();

    let (status, body) = send(
        router,
        "PUT",
        "/attendance",
        Some(99_999),
        Some(attendance_body(STAFF_ID, &today_string(), "09:00", "18:00")),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let router = create_test_router();

    let request = Request::builder()
        .method("PUT")
        .uri("/attendance")
        .header("x-employee-id", STAFF_ID.to_string())
        .header("Content-Type", "application/json")
        .body(Body::from("{invalid json"))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_field_returns_validation_error() {
    let router = create_test_router();

    let (status, body) = send(
        router,
        "POST",
        "/payroll/run",
        Some(MANAGER_ID),
        Some(json!({ "month": current_month() })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("missing field"),
        "Expected a missing-field message, got: {}",
        body["message"]
    );
}

#[tokio::test]
async fn test_days_listing_requires_month_parameter() {
    let router = create_test_router();

    let uri = format!("/days/{STAFF_ID}");
    let (status, body) = send(router, "GET", &uri, Some(STAFF_ID), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_bad_month_parameter_is_rejected() {
    let router = create_test_router();

    let uri = format!("/days/{STAFF_ID}?month=2024-06");
    let (status, body) = send(router, "GET", &uri, Some(STAFF_ID), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
