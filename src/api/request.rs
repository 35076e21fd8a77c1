//! Request types for the Payslip Engine API.
//!
//! This module defines the JSON request structures for the `/payslip` and
//! `/employees/export` endpoints.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::document::AttendanceChangePolicy;
use crate::export::EmployeeFilter;
use crate::models::{AttendanceInput, Employee};

/// A form value that may arrive as JSON text or a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Text as typed.
    Text(String),
    /// A numeric literal.
    Number(serde_json::Number),
}

impl RawValue {
    /// The value as the text an operator would have typed.
    pub fn as_text(&self) -> String {
        match self {
            RawValue::Text(text) => text.clone(),
            RawValue::Number(number) => number.to_string(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

/// Month and year as chosen in the period picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// Month name or three-letter abbreviation.
    pub month: String,
    /// Four-digit year, as a number or text.
    pub year: RawValue,
}

/// Request body for the `/payslip` and `/payslip/snapshot` endpoints.
///
/// Generates a payslip for one employee, then applies any edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipRequest {
    /// The employee record.
    pub employee: Employee,
    /// The payslip period.
    pub period: PeriodRequest,
    /// Attendance figures for the period.
    #[serde(default)]
    pub attendance: AttendanceInput,
    /// Deduction inputs entered before generation, keyed by field name.
    #[serde(default)]
    pub deductions: BTreeMap<String, RawValue>,
    /// Whether the payslip is put into edit mode before `edits` are applied.
    #[serde(default)]
    pub editing: bool,
    /// Edits applied to the generated payslip, keyed by field name.
    #[serde(default)]
    pub edits: BTreeMap<String, RawValue>,
    /// How manual other deductions react to attendance changes.
    #[serde(default)]
    pub attendance_policy: AttendanceChangePolicy,
}

/// Request body for the `/employees/export` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    /// Employee records in display order.
    pub employees: Vec<Employee>,
    /// Search and department filter; keeps everyone when absent.
    #[serde(default)]
    pub filter: EmployeeFilter,
    /// Date used for the download name; today when absent.
    #[serde(default)]
    pub generated_on: Option<NaiveDate>,
}

/// Request body for the `/employees/departments` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentsRequest {
    /// Employee records in display order.
    pub employees: Vec<Employee>,
}
