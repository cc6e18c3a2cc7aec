//! HTTP request handlers for the personnel engine API.
//!
//! This module contains the handler functions for all API endpoints. The
//! caller's identity is resolved from the `x-employee-id` header against
//! the employee table, standing in for the authentication collaborator;
//! no credential verification happens here.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::{AttendanceReconciler, EvaluationAuthorizer, PayrollCalculator};
use crate::models::{AuthContext, YearMonth};

use super::request::{AttendanceRequest, LeaveRequest, PerformanceRequest, RunPayrollRequest};
use super::response::{ApiError, ApiErrorResponse, DaysResponse};
use super::state::AppState;

/// Header carrying the authenticated caller's employee id.
const EMPLOYEE_ID_HEADER: &str = "x-employee-id";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance", put(record_attendance))
        .route("/leave", put(record_leave))
        .route("/days/:employee_id", get(list_days))
        .route("/payroll/run", post(run_payroll))
        .route("/salary/:employee_id", get(get_salary))
        .route("/performance", post(upsert_evaluation))
        .route("/performance/:employee_id", get(evaluation_history))
        .with_state(state)
}

/// Query string carrying an optional `month=YYYYMM` parameter.
#[derive(Debug, Deserialize)]
struct MonthQuery {
    month: Option<String>,
}

/// Handler for PUT /attendance: records a worked day.
async fn record_attendance(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AttendanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let caller = match authenticate(&state, &headers) {
        Ok(caller) => caller,
        Err(response) => return response.into_response(),
    };
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_error(correlation_id, rejection).into_response(),
    };

    let (employee_id, date, record) = match request.into_parts() {
        Ok(parts) => parts,
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Attendance request rejected");
            return ApiErrorResponse::from(error).into_response();
        }
    };

    let reconciler = AttendanceReconciler::new(state.store(), state.calendar_policy());
    match reconciler.record_day(employee_id, date, record, Utc::now().date_naive()) {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                caller = caller.employee_id,
                employee_id,
                date = %date,
                "Attendance day recorded"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Attendance update failed");
            ApiErrorResponse::from(error).into_response()
        }
    }
}

/// Handler for PUT /leave: records a leave day.
async fn record_leave(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<LeaveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let caller = match authenticate(&state, &headers) {
        Ok(caller) => caller,
        Err(response) => return response.into_response(),
    };
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_error(correlation_id, rejection).into_response(),
    };

    let (employee_id, date, record) = match request.into_parts() {
        Ok(parts) => parts,
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Leave request rejected");
            return ApiErrorResponse::from(error).into_response();
        }
    };

    let reconciler = AttendanceReconciler::new(state.store(), state.calendar_policy());
    match reconciler.record_day(employee_id, date, record, Utc::now().date_naive()) {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                caller = caller.employee_id,
                employee_id,
                date = %date,
                "Leave day recorded"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Leave update failed");
            ApiErrorResponse::from(error).into_response()
        }
    }
}

/// Handler for GET /days/{employee_id}?month=YYYYMM: lists both record
/// kinds for the month.
async fn list_days(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(employee_id): Path<u32>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    if let Err(response) = authenticate(&state, &headers) {
        return response.into_response();
    }
    let month = match required_month(query) {
        Ok(month) => month,
        Err(response) => return response.into_response(),
    };

    let reconciler = AttendanceReconciler::new(state.store(), state.calendar_policy());
    match reconciler.list_days(employee_id, month) {
        Ok((attendance_days, leave_days)) => Json(DaysResponse {
            attendance_days,
            leave_days,
        })
        .into_response(),
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Day listing failed");
            ApiErrorResponse::from(error).into_response()
        }
    }
}

/// Handler for POST /payroll/run: computes and stores a month's payroll.
async fn run_payroll(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RunPayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let caller = match authenticate(&state, &headers) {
        Ok(caller) => caller,
        Err(response) => return response.into_response(),
    };
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_error(correlation_id, rejection).into_response(),
    };

    let calculator = PayrollCalculator::new(state.store(), state.payroll_config());
    match calculator.run_payroll(request.employee_id, request.month) {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                caller = caller.employee_id,
                employee_id = request.employee_id,
                month = %request.month,
                net_salary = record.net_salary(),
                "Payroll computed"
            );
            Json(record.statement()).into_response()
        }
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Payroll run failed");
            ApiErrorResponse::from(error).into_response()
        }
    }
}

/// Handler for GET /salary/{employee_id}: one statement when `month` is
/// given, the full history otherwise.
async fn get_salary(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(employee_id): Path<u32>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    if let Err(response) = authenticate(&state, &headers) {
        return response.into_response();
    }

    let calculator = PayrollCalculator::new(state.store(), state.payroll_config());
    let result = match query.month {
        Some(raw) => match raw.parse::<YearMonth>() {
            Ok(month) => calculator
                .get_salary(employee_id, month)
                .map(|statement| Json(statement).into_response()),
            Err(error) => return ApiErrorResponse::from(error).into_response(),
        },
        None => calculator
            .get_salaries(employee_id)
            .map(|statements| Json(statements).into_response()),
    };

    match result {
        Ok(response) => response,
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Salary lookup failed");
            ApiErrorResponse::from(error).into_response()
        }
    }
}

/// Handler for POST /performance: role-scoped evaluation upsert.
async fn upsert_evaluation(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PerformanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let caller = match authenticate(&state, &headers) {
        Ok(caller) => caller,
        Err(response) => return response.into_response(),
    };
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_error(correlation_id, rejection).into_response(),
    };

    let authorizer = EvaluationAuthorizer::new(state.store());
    match authorizer.upsert_evaluation(&caller, request.into()) {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                caller = caller.employee_id,
                employee_id = record.employee_id,
                month = %record.year_month,
                "Evaluation updated"
            );
            Json(record).into_response()
        }
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Evaluation update failed");
            ApiErrorResponse::from(error).into_response()
        }
    }
}

/// Handler for GET /performance/{employee_id}?month=YYYYMM: the month's
/// evaluation plus the prior period's record.
async fn evaluation_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(employee_id): Path<u32>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    if let Err(response) = authenticate(&state, &headers) {
        return response.into_response();
    }
    let month = match required_month(query) {
        Ok(month) => month,
        Err(response) => return response.into_response(),
    };

    let authorizer = EvaluationAuthorizer::new(state.store());
    match authorizer.get_evaluation_with_history(employee_id, month) {
        Ok(history) => Json(history).into_response(),
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Evaluation lookup failed");
            ApiErrorResponse::from(error).into_response()
        }
    }
}

/// Resolves the caller from the employee-id header against the store.
fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthContext, ApiErrorResponse> {
    let employee_id = headers
        .get(EMPLOYEE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u32>().ok())
        .ok_or_else(|| ApiErrorResponse {
            status: StatusCode::UNAUTHORIZED,
            error: ApiError::new(
                "UNAUTHENTICATED",
                format!("missing or malformed {EMPLOYEE_ID_HEADER} header"),
            ),
        })?;

    let employee = state
        .store()
        .with_view(|view| Ok(view.employee(employee_id)))
        .map_err(ApiErrorResponse::from)?
        .ok_or_else(|| ApiErrorResponse {
            status: StatusCode::UNAUTHORIZED,
            error: ApiError::new("UNAUTHENTICATED", format!("unknown employee {employee_id}")),
        })?;

    Ok(AuthContext::for_employee(&employee))
}

/// Pulls a required `month` parameter out of the query string.
fn required_month(query: MonthQuery) -> Result<YearMonth, ApiErrorResponse> {
    match query.month {
        Some(raw) => raw.parse().map_err(ApiErrorResponse::from),
        None => Err(ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::new(
                "VALIDATION_ERROR",
                "month query parameter (YYYYMM) is required",
            ),
        }),
    }
}

/// Maps a JSON body rejection onto the API error shape.
fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed error from serde
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {err}"))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
}
