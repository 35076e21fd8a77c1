//! Core data models for the Payslip Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod computation;
mod employee;
mod pay_period;
mod salary;

pub use attendance::AttendanceInput;
pub use computation::{AuditStep, DeductionOverrides, PayslipComputation, PayslipLine};
pub use employee::Employee;
pub use pay_period::{Month, PayPeriod, year_options};
pub use salary::{SalaryComponents, SalaryField};
