//! Response types for the Payslip Engine API.
//!
//! This module defines the success bodies and the error response structures
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::ProrationResult;
use crate::document::{EditMode, OtherDeductions, PayslipDocument, PayslipLayout};
use crate::error::EngineError;
use crate::models::{PayPeriod, PayslipComputation};

/// Response body for the `/payslip` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PayslipResponse {
    /// Unique identifier for this generation.
    pub payslip_id: Uuid,
    /// When the payslip was generated.
    pub generated_at: DateTime<Utc>,
    /// Version of the engine that produced it.
    pub engine_version: String,
    /// The employee the payslip is for.
    pub employee_id: String,
    /// The payslip period.
    pub period: PayPeriod,
    /// Who owns the other-deductions figure after the edits.
    pub other_deductions: OtherDeductions,
    /// Edit mode after the edits.
    pub edit_mode: EditMode,
    /// The attendance proration behind the automatic other deductions.
    pub proration: ProrationResult,
    /// Earnings, deductions and totals.
    pub computation: PayslipComputation,
    /// The payslip laid out for rendering.
    pub layout: PayslipLayout,
    /// Name of the rendered document.
    pub file_name: String,
}

impl PayslipResponse {
    /// Builds the response for a generated document and its layout.
    pub fn new(document: &PayslipDocument, layout: PayslipLayout) -> Self {
        Self {
            payslip_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            employee_id: document.employee().id.clone(),
            period: document.period(),
            other_deductions: document.other_deductions(),
            edit_mode: document.edit_mode(),
            proration: document.proration().clone(),
            computation: document.computation().clone(),
            file_name: layout.file_name.clone(),
            layout,
        }
    }
}

/// Response body for the `/periods` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodsResponse {
    /// Month names in calendar order.
    pub months: Vec<String>,
    /// Selectable years.
    pub years: Vec<i32>,
    /// The period containing today.
    pub current: PayPeriod,
}

/// Response body for the `/employees/departments` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentsResponse {
    /// Distinct departments in first-seen order.
    pub departments: Vec<String>,
    /// Filter value that selects every department.
    pub all: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            EngineError::UnknownMonth { name } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "UNKNOWN_MONTH",
                    message,
                    format!("'{}' is not a month name or three-letter abbreviation", name),
                ),
            ),
            EngineError::InvalidYear { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details("INVALID_YEAR", message, "Years must have four digits"),
            ),
            EngineError::UnknownField { name } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "UNKNOWN_FIELD",
                    message,
                    format!("'{}' is not an editable salary or deduction field", name),
                ),
            ),
            EngineError::ExportError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("EXPORT_ERROR", message),
            ),
            EngineError::SnapshotFailed { .. } => (
                StatusCode::BAD_GATEWAY,
                ApiError::new("SNAPSHOT_FAILED", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}
