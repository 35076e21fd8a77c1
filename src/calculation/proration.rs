//! Attendance proration.
//!
//! This module converts the attendance counters of a pay period into the
//! deduction for days that are neither worked nor otherwise paid.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::format::round_money;
use crate::models::{AttendanceInput, AuditStep, SalaryComponents};

/// The outcome of prorating a month's attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProrationResult {
    /// Calendar days in the pay period.
    pub total_days: u32,
    /// Worked, weekly-off, holiday and paid-leave days, capped at `total_days`.
    pub accounted_days: Decimal,
    /// Days not covered by attendance.
    pub missing_days: Decimal,
    /// Gross monthly earnings from the employee's baseline salary.
    pub gross_monthly: Decimal,
    /// Gross monthly earnings divided by the days in the month.
    pub per_day_rate: Decimal,
    /// `missing_days * per_day_rate`, rounded to two decimal places.
    pub deduction: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the deduction for unaccounted days in a pay period.
///
/// Accounted days are the worked payable days (half days count as half) plus
/// weekly offs, holidays and paid leaves, capped at `total_days` without
/// complaint. Each missing day is charged at the per-day rate of the
/// employee's gross monthly earnings. The result is the only value the engine
/// rounds during calculation.
///
/// # Arguments
///
/// * `total_days` - Calendar days in the pay period
/// * `attendance` - The attendance counters for the period
/// * `salary` - The employee's baseline salary components
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_proration;
/// use payslip_engine::models::{AttendanceInput, SalaryComponents};
/// use rust_decimal::Decimal;
///
/// let salary = SalaryComponents {
///     basic_salary: Decimal::new(30000, 0),
///     ..SalaryComponents::default()
/// };
/// let attendance = AttendanceInput::worked_days(22, 4, 1, 0);
///
/// let result = calculate_proration(30, &attendance, &salary, 1);
/// assert_eq!(result.missing_days, Decimal::new(3, 0));
/// assert_eq!(result.per_day_rate, Decimal::new(1000, 0));
/// assert_eq!(result.deduction, Decimal::new(3000, 0));
/// ```
pub fn calculate_proration(
    total_days: u32,
    attendance: &AttendanceInput,
    salary: &SalaryComponents,
    step_number: u32,
) -> ProrationResult {
    let days = Decimal::from(total_days);
    let counted_days = attendance.counted_days();
    let accounted_days = counted_days.min(days);
    let missing_days = (days - accounted_days).max(Decimal::ZERO);

    let gross_monthly = salary.gross_monthly();
    let per_day_rate = if total_days > 0 {
        gross_monthly / days
    } else {
        Decimal::ZERO
    };
    let deduction = round_money(missing_days.saturating_mul(per_day_rate));

    let audit_step = AuditStep {
        step_number,
        rule_id: "attendance_proration".to_string(),
        rule_name: "Attendance Proration".to_string(),
        input: serde_json::json!({
            "total_days": total_days,
            "worked_full_days": attendance.worked_full_days,
            "worked_half_days": attendance.worked_half_days,
            "weekly_off": attendance.weekly_off,
            "holiday": attendance.holiday,
            "paid_leaves": attendance.paid_leaves,
            "gross_monthly": gross_monthly.to_string()
        }),
        output: serde_json::json!({
            "accounted_days": accounted_days.normalize().to_string(),
            "missing_days": missing_days.normalize().to_string(),
            "per_day_rate": per_day_rate.to_string(),
            "deduction": deduction.to_string(),
            "overcount_clamped": counted_days > days
        }),
        reasoning: format!(
            "{} missing of {} days x {} per day = {}",
            missing_days.normalize(),
            total_days,
            round_money(per_day_rate),
            deduction
        ),
    };

    ProrationResult {
        total_days,
        accounted_days,
        missing_days,
        gross_monthly,
        per_day_rate,
        deduction,
        audit_step,
    }
}
