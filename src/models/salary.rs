//! Salary components and the fields that can be edited on a payslip.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::format::{deserialize_amount, normalize_amount};

/// One of the seven monetary fields of [`SalaryComponents`].
///
/// # Example
///
/// ```
/// use payslip_engine::models::SalaryField;
///
/// let field: SalaryField = "basic_salary".parse().unwrap();
/// assert_eq!(field, SalaryField::BasicSalary);
/// assert_eq!(field.label(), "Basic Salary");
/// assert!(field.is_earning());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryField {
    /// Basic salary (earning).
    BasicSalary,
    /// House rent allowance (earning).
    Hra,
    /// Other allowances (earning).
    OtherAllowances,
    /// Provident fund deduction.
    PfDeduction,
    /// Employee state insurance deduction.
    EsiDeduction,
    /// Professional tax deduction.
    ProfessionalTax,
    /// Other deductions, including attendance proration.
    OtherDeductions,
}

impl SalaryField {
    /// All fields in payslip order.
    pub const ALL: [SalaryField; 7] = [
        SalaryField::BasicSalary,
        SalaryField::Hra,
        SalaryField::OtherAllowances,
        SalaryField::PfDeduction,
        SalaryField::EsiDeduction,
        SalaryField::ProfessionalTax,
        SalaryField::OtherDeductions,
    ];

    /// The earning fields in payslip order.
    pub const EARNINGS: [SalaryField; 3] = [
        SalaryField::BasicSalary,
        SalaryField::Hra,
        SalaryField::OtherAllowances,
    ];

    /// The deduction fields in payslip order.
    pub const DEDUCTIONS: [SalaryField; 4] = [
        SalaryField::PfDeduction,
        SalaryField::EsiDeduction,
        SalaryField::ProfessionalTax,
        SalaryField::OtherDeductions,
    ];

    /// The record key for this field.
    pub fn as_str(self) -> &'static str {
        match self {
            SalaryField::BasicSalary => "basic_salary",
            SalaryField::Hra => "hra",
            SalaryField::OtherAllowances => "other_allowances",
            SalaryField::PfDeduction => "pf_deduction",
            SalaryField::EsiDeduction => "esi_deduction",
            SalaryField::ProfessionalTax => "professional_tax",
            SalaryField::OtherDeductions => "other_deductions",
        }
    }

    /// The label printed on the payslip table.
    pub fn label(self) -> &'static str {
        match self {
            SalaryField::BasicSalary => "Basic Salary",
            SalaryField::Hra => "HRA",
            SalaryField::OtherAllowances => "Other Allowances",
            SalaryField::PfDeduction => "PF",
            SalaryField::EsiDeduction => "ESI",
            SalaryField::ProfessionalTax => "Professional Tax",
            SalaryField::OtherDeductions => "Other Deductions",
        }
    }

    /// Returns true for basic salary, HRA and other allowances.
    pub fn is_earning(self) -> bool {
        Self::EARNINGS.contains(&self)
    }
}

impl fmt::Display for SalaryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SalaryField {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| EngineError::UnknownField {
                name: s.to_string(),
            })
    }
}

/// The fixed per-employee pay figures.
///
/// Every field is a non-negative amount. Deserialization accepts numbers,
/// numeric strings or null, and normalizes anything invalid to zero, so no
/// malformed value can reach the calculator.
///
/// # Example
///
/// ```
/// use payslip_engine::models::SalaryComponents;
/// use rust_decimal::Decimal;
///
/// let salary: SalaryComponents = serde_json::from_str(r#"{
///     "basic_salary": 20000,
///     "hra": "8000",
///     "other_allowances": null,
///     "pf_deduction": "abc"
/// }"#).unwrap();
///
/// assert_eq!(salary.gross_monthly(), Decimal::new(28000, 0));
/// assert_eq!(salary.pf_deduction, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SalaryComponents {
    /// Basic salary.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub basic_salary: Decimal,
    /// House rent allowance.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub hra: Decimal,
    /// Other allowances.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub other_allowances: Decimal,
    /// Default provident fund deduction.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub pf_deduction: Decimal,
    /// Default employee state insurance deduction.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub esi_deduction: Decimal,
    /// Default professional tax.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub professional_tax: Decimal,
    /// Default other deductions.
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub other_deductions: Decimal,
}

impl SalaryComponents {
    /// Sum of basic salary, HRA and other allowances, saturating at
    /// `Decimal::MAX`.
    pub fn gross_monthly(&self) -> Decimal {
        self.basic_salary
            .saturating_add(self.hra)
            .saturating_add(self.other_allowances)
    }

    /// Returns the value of a single field.
    pub fn get(&self, field: SalaryField) -> Decimal {
        match field {
            SalaryField::BasicSalary => self.basic_salary,
            SalaryField::Hra => self.hra,
            SalaryField::OtherAllowances => self.other_allowances,
            SalaryField::PfDeduction => self.pf_deduction,
            SalaryField::EsiDeduction => self.esi_deduction,
            SalaryField::ProfessionalTax => self.professional_tax,
            SalaryField::OtherDeductions => self.other_deductions,
        }
    }

    /// Sets a single field; negative values are stored as zero.
    pub fn set(&mut self, field: SalaryField, value: Decimal) {
        let value = normalize_amount(value);
        let slot = match field {
            SalaryField::BasicSalary => &mut self.basic_salary,
            SalaryField::Hra => &mut self.hra,
            SalaryField::OtherAllowances => &mut self.other_allowances,
            SalaryField::PfDeduction => &mut self.pf_deduction,
            SalaryField::EsiDeduction => &mut self.esi_deduction,
            SalaryField::ProfessionalTax => &mut self.professional_tax,
            SalaryField::OtherDeductions => &mut self.other_deductions,
        };
        *slot = value;
    }
}
