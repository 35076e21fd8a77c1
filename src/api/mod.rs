//! HTTP API module for the Payslip Engine.
//!
//! This module provides the REST endpoints for generating payslips,
//! rendering payslip documents, exporting employee lists and listing the
//! selectable departments and pay periods.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DepartmentsRequest, ExportRequest, PayslipRequest, PeriodRequest, RawValue};
pub use response::{ApiError, DepartmentsResponse, PayslipResponse, PeriodsResponse};
pub use state::AppState;
