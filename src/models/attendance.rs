//! Attendance counters for a pay period.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::{deserialize_count, format_days};

/// Attendance figures entered for one pay period.
///
/// Worked days are split into full and half days; the simpler form with a
/// single worked-day count is [`AttendanceInput::worked_days`], which records
/// every worked day as a full day. The field `worked_days` is accepted as an
/// alias of `worked_full_days` when deserializing.
///
/// # Example
///
/// ```
/// use payslip_engine::models::AttendanceInput;
/// use rust_decimal::Decimal;
///
/// let attendance = AttendanceInput {
///     worked_full_days: 20,
///     worked_half_days: 1,
///     weekly_off: 4,
///     holiday: 1,
///     paid_leaves: 0,
/// };
///
/// assert_eq!(attendance.worked_payable_days(), Decimal::new(205, 1));
/// assert_eq!(attendance.worked_payable_days_label(), "20.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttendanceInput {
    /// Days worked in full.
    #[serde(default, alias = "worked_days", deserialize_with = "deserialize_count")]
    pub worked_full_days: u32,
    /// Days worked as half days.
    #[serde(default, deserialize_with = "deserialize_count")]
    pub worked_half_days: u32,
    /// Weekly off days.
    #[serde(default, deserialize_with = "deserialize_count")]
    pub weekly_off: u32,
    /// Public holidays.
    #[serde(default, deserialize_with = "deserialize_count")]
    pub holiday: u32,
    /// Paid leave days.
    #[serde(default, deserialize_with = "deserialize_count")]
    pub paid_leaves: u32,
}

impl AttendanceInput {
    /// Attendance with a single worked-day count and no half days.
    pub fn worked_days(worked_days: u32, weekly_off: u32, holiday: u32, paid_leaves: u32) -> Self {
        Self {
            worked_full_days: worked_days,
            worked_half_days: 0,
            weekly_off,
            holiday,
            paid_leaves,
        }
    }

    /// Caps every counter at the number of days in the month.
    pub fn clamped(&self, total_days: u32) -> Self {
        Self {
            worked_full_days: self.worked_full_days.min(total_days),
            worked_half_days: self.worked_half_days.min(total_days),
            weekly_off: self.weekly_off.min(total_days),
            holiday: self.holiday.min(total_days),
            paid_leaves: self.paid_leaves.min(total_days),
        }
    }

    /// Full days plus half of the half days.
    pub fn worked_payable_days(&self) -> Decimal {
        Decimal::from(self.worked_full_days) + Decimal::from(self.worked_half_days) / Decimal::TWO
    }

    /// Worked payable days, with one decimal place only when fractional.
    pub fn worked_payable_days_label(&self) -> String {
        format_days(self.worked_payable_days())
    }

    /// Worked, weekly-off, holiday and paid-leave days before any capping.
    pub fn counted_days(&self) -> Decimal {
        self.worked_payable_days()
            + Decimal::from(self.weekly_off)
            + Decimal::from(self.holiday)
            + Decimal::from(self.paid_leaves)
    }
}
