//! HTTP request handlers for the Payslip Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Datelike, Local};
use tracing::{info, warn};
use uuid::Uuid;

use crate::document::{EditMode, PayslipDocument, PayslipLayout, PayslipSession, export_snapshot};
use crate::error::{EngineError, EngineResult};
use crate::export::{ALL_DEPARTMENTS, csv_file_name, departments, export_employees_csv};
use crate::models::{Month, PayPeriod, year_options};

use super::request::{DepartmentsRequest, ExportRequest, PayslipRequest};
use super::response::{
    ApiError, ApiErrorResponse, DepartmentsResponse, PayslipResponse, PeriodsResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payslip", post(payslip_handler))
        .route("/payslip/snapshot", post(snapshot_handler))
        .route("/employees/export", post(export_handler))
        .route("/employees/departments", post(departments_handler))
        .route("/periods", get(periods_handler))
        .with_state(state)
}

/// Handler for POST /payslip endpoint.
///
/// Generates a payslip, applies any edits and returns the computation and
/// its layout.
async fn payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    let employee_id = request.employee.id.clone();
    match build_document(request) {
        Ok(Some(document)) => {
            let layout = PayslipLayout::from_document(&document, state.config().config());
            let response = PayslipResponse::new(&document, layout);
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                period = %document.period().label(),
                net_payable = %document.computation().net_payable,
                duration_us = start_time.elapsed().as_micros(),
                "Payslip generated successfully"
            );
            json_response(StatusCode::OK, response)
        }
        Ok(None) => no_employee_response(correlation_id),
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /payslip/snapshot endpoint.
///
/// Generates a payslip as for `/payslip` and returns the rendered document.
async fn snapshot_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing snapshot request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let document = match build_document(request) {
        Ok(Some(document)) => document,
        Ok(None) => return no_employee_response(correlation_id),
        Err(err) => return engine_error_response(err, correlation_id),
    };

    match export_snapshot(state.exporter(), &document, state.config().config()).await {
        Ok(artifact) => {
            info!(
                correlation_id = %correlation_id,
                file_name = %artifact.file_name,
                size = artifact.bytes.len(),
                "Snapshot rendered"
            );
            let disposition = attachment(&artifact.file_name);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, HeaderValue::from_static("application/octet-stream")),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                artifact.bytes,
            )
                .into_response()
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /employees/export endpoint.
///
/// Filters the supplied employees and returns them as a CSV download.
async fn export_handler(payload: Result<Json<ExportRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing export request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let matched = request.filter.apply(&request.employees);
    match export_employees_csv(matched) {
        Ok(csv) => {
            let date = request
                .generated_on
                .unwrap_or_else(|| Local::now().date_naive());
            let file_name = csv_file_name(date);
            info!(
                correlation_id = %correlation_id,
                employees = request.employees.len(),
                file_name = %file_name,
                "Employee export completed"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8")),
                    (header::CONTENT_DISPOSITION, attachment(&file_name)),
                ],
                csv,
            )
                .into_response()
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /employees/departments endpoint.
///
/// Lists the department filter options for the supplied employees.
async fn departments_handler(payload: Result<Json<DepartmentsRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let response = DepartmentsResponse {
        departments: departments(&request.employees),
        all: ALL_DEPARTMENTS.to_string(),
    };
    info!(
        correlation_id = %correlation_id,
        departments = response.departments.len(),
        "Listed departments"
    );
    json_response(StatusCode::OK, response)
}

/// Handler for GET /periods endpoint.
///
/// Lists the months and the years offered in the period picker.
async fn periods_handler(State(state): State<AppState>) -> Response {
    let today = Local::now().date_naive();
    let response = PeriodsResponse {
        months: Month::ALL.iter().map(|m| m.name().to_string()).collect(),
        years: year_options(today.year(), state.config().settings().year_window),
        current: PayPeriod::containing(today),
    };
    json_response(StatusCode::OK, response)
}

/// Runs a payslip request through a session and applies its edits.
///
/// Returns `None` when the session had no employee to generate for.
fn build_document(request: PayslipRequest) -> EngineResult<Option<PayslipDocument>> {
    let period = PayPeriod::parse(&request.period.month, &request.period.year.as_text())?;

    let mut session = PayslipSession::new(period, request.attendance_policy);
    session.select_employee(Some(request.employee));
    session.set_attendance(request.attendance);
    for (name, value) in &request.deductions {
        session.set_deduction_input(name.parse()?, &value.as_text())?;
    }
    session.generate();

    let Some(mut document) = session.into_document() else {
        return Ok(None);
    };

    if request.editing {
        document.set_edit_mode(EditMode::Editing);
    }
    for (name, value) in &request.edits {
        document.set_field_by_name(name, &value.as_text())?;
    }
    Ok(Some(document))
}

fn no_employee_response(correlation_id: Uuid) -> Response {
    warn!(correlation_id = %correlation_id, "No employee selected");
    json_response(
        StatusCode::BAD_REQUEST,
        ApiError::validation_error("No employee selected"),
    )
}

/// `Content-Disposition` for a download. Quotes, backslashes and control
/// characters cannot appear inside the quoted filename, so they are dropped.
fn attachment(file_name: &str) -> HeaderValue {
    let safe: String = file_name
        .chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .collect();
    HeaderValue::from_str(&format!("attachment; filename=\"{}\"", safe))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
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
    };
    json_response(StatusCode::BAD_REQUEST, error)
}
