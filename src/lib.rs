//! Payslip Engine
//!
//! This crate derives monthly payslips from employee salary records: it
//! prorates pay for unaccounted attendance days, totals earnings and
//! deductions, keeps an editable payslip document in step with every change,
//! lays the result out for rendering, and exports employee lists as CSV.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod format;
pub mod models;
