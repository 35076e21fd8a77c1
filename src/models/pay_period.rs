//! Pay period model.
//!
//! A payslip covers one calendar month. This module contains the [`Month`]
//! enum and the [`PayPeriod`] selection, which derives the number of days
//! used by attendance proration.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Day count used when the calendar cannot represent a period.
const DEFAULT_DAYS_IN_MONTH: u32 = 30;

/// A calendar month.
///
/// # Example
///
/// ```
/// use payslip_engine::models::Month;
///
/// let month: Month = "feb".parse().unwrap();
/// assert_eq!(month, Month::February);
/// assert_eq!(month.to_string(), "February");
/// assert_eq!(month.number(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    /// January.
    January,
    /// February.
    February,
    /// March.
    March,
    /// April.
    April,
    /// May.
    May,
    /// June.
    June,
    /// July.
    July,
    /// August.
    August,
    /// September.
    September,
    /// October.
    October,
    /// November.
    November,
    /// December.
    December,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// The month number, 1 for January through 12 for December.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Looks a month up by its number (1-12).
    pub fn from_number(number: u32) -> Option<Month> {
        number
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index as usize).copied())
    }

    /// The English month name.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = EngineError;

    /// Accepts full names and three-letter abbreviations, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|month| {
                let name = month.name().to_lowercase();
                name == wanted || (wanted.len() == 3 && name.starts_with(&wanted))
            })
            .ok_or_else(|| EngineError::UnknownMonth {
                name: s.to_string(),
            })
    }
}

/// The month and year a payslip is generated for.
///
/// # Example
///
/// ```
/// use payslip_engine::models::{Month, PayPeriod};
///
/// let leap = PayPeriod::new(Month::February, 2024).unwrap();
/// assert_eq!(leap.total_days_in_month(), 29);
///
/// let common = PayPeriod::parse("February", "2023").unwrap();
/// assert_eq!(common.total_days_in_month(), 28);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The payslip month.
    pub month: Month,
    /// The four-digit payslip year.
    pub year: i32,
}

impl PayPeriod {
    /// Creates a pay period, rejecting years outside 1000..=9999.
    pub fn new(month: Month, year: i32) -> EngineResult<Self> {
        if !(1000..=9999).contains(&year) {
            return Err(EngineError::InvalidYear {
                value: year.to_string(),
            });
        }
        Ok(Self { month, year })
    }

    /// Parses a month name and a year string as chosen in a period picker.
    pub fn parse(month: &str, year: &str) -> EngineResult<Self> {
        let month = month.parse::<Month>()?;
        let year = year
            .trim()
            .parse::<i32>()
            .map_err(|_| EngineError::InvalidYear {
                value: year.to_string(),
            })?;
        Self::new(month, year)
    }

    /// The pay period containing the given date.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            month: Month::from_number(date.month()).unwrap_or(Month::January),
            year: date.year(),
        }
    }

    /// Calendar days in this month, accounting for leap years.
    pub fn total_days_in_month(&self) -> u32 {
        let first = NaiveDate::from_ymd_opt(self.year, self.month.number(), 1);
        let next = match self.month {
            Month::December => NaiveDate::from_ymd_opt(self.year + 1, 1, 1),
            month => NaiveDate::from_ymd_opt(self.year, month.number() + 1, 1),
        };

        match (first, next) {
            (Some(first), Some(next)) => (next - first).num_days() as u32,
            _ => DEFAULT_DAYS_IN_MONTH,
        }
    }

    /// Display form used in payslip headers, e.g. `March 2025`.
    pub fn label(&self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

/// Selectable years centred on `current_year`, `window` years either side.
///
/// # Example
///
/// ```
/// use payslip_engine::models::year_options;
///
/// let years = year_options(2025, 2);
/// assert_eq!(years, vec![2023, 2024, 2025, 2026, 2027]);
/// ```
pub fn year_options(current_year: i32, window: u32) -> Vec<i32> {
    let window = window as i32;
    ((current_year - window)..=(current_year + window)).collect()
}
