//! Calculation logic for the Payslip Engine.
//!
//! This module contains the attendance proration that derives the automatic
//! other-deductions amount, and the payslip calculator that turns salary
//! components and deduction figures into earnings, deductions and net
//! payable totals. Both are pure functions.

mod payslip;
mod proration;

pub use payslip::calculate_payslip;
pub use proration::{ProrationResult, calculate_proration};
