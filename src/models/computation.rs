//! Payslip computation result models.
//!
//! This module contains the [`PayslipComputation`] type produced by the
//! calculator, the [`DeductionOverrides`] it consumes, and the [`AuditStep`]
//! records that explain how each figure was derived.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{SalaryComponents, SalaryField};

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The deduction figures used for one payslip run.
///
/// PF, ESI and professional tax are entered by the operator and default to
/// the employee record. Other deductions is normally the attendance
/// proration amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeductionOverrides {
    /// Provident fund deduction.
    pub pf_deduction: Decimal,
    /// Employee state insurance deduction.
    pub esi_deduction: Decimal,
    /// Professional tax.
    pub professional_tax: Decimal,
    /// Other deductions.
    pub other_deductions: Decimal,
}

impl DeductionOverrides {
    /// The employee's default deductions.
    pub fn from_components(salary: &SalaryComponents) -> Self {
        Self {
            pf_deduction: salary.pf_deduction,
            esi_deduction: salary.esi_deduction,
            professional_tax: salary.professional_tax,
            other_deductions: salary.other_deductions,
        }
    }

    /// Returns the value for a deduction field, or `None` for an earning.
    pub fn get(&self, field: SalaryField) -> Option<Decimal> {
        match field {
            SalaryField::PfDeduction => Some(self.pf_deduction),
            SalaryField::EsiDeduction => Some(self.esi_deduction),
            SalaryField::ProfessionalTax => Some(self.professional_tax),
            SalaryField::OtherDeductions => Some(self.other_deductions),
            _ => None,
        }
    }
}

/// One labelled amount on the earnings or deductions side of a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipLine {
    /// The salary field this line shows.
    pub field: SalaryField,
    /// The label printed on the payslip.
    pub label: String,
    /// The amount at full precision.
    pub amount: Decimal,
}

/// The totals of one payslip run.
///
/// `net_payable` is exactly `total_earnings - total_deductions` and is not
/// clamped, so it may be negative.
///
/// # Example
///
/// ```
/// use payslip_engine::calculation::calculate_payslip;
/// use payslip_engine::models::{DeductionOverrides, SalaryComponents};
/// use rust_decimal::Decimal;
///
/// let salary = SalaryComponents {
///     basic_salary: Decimal::new(20000, 0),
///     hra: Decimal::new(8000, 0),
///     ..SalaryComponents::default()
/// };
/// let deductions = DeductionOverrides {
///     pf_deduction: Decimal::new(1800, 0),
///     ..DeductionOverrides::default()
/// };
///
/// let computation = calculate_payslip(&salary, &deductions);
/// assert_eq!(computation.net_payable, Decimal::new(26200, 0));
/// assert_eq!(computation.earnings.len(), 3);
/// assert_eq!(computation.deductions.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipComputation {
    /// Basic salary, HRA and other allowances, in payslip order.
    pub earnings: Vec<PayslipLine>,
    /// PF, ESI, professional tax and other deductions, in payslip order.
    pub deductions: Vec<PayslipLine>,
    /// Sum of the earnings lines.
    pub total_earnings: Decimal,
    /// Sum of the deduction lines.
    pub total_deductions: Decimal,
    /// Earnings minus deductions.
    pub net_payable: Decimal,
    /// How the totals were derived.
    pub audit_steps: Vec<AuditStep>,
}

impl PayslipComputation {
    /// The amount shown for a field, if it appears on the payslip.
    pub fn amount(&self, field: SalaryField) -> Option<Decimal> {
        self.earnings
            .iter()
            .chain(&self.deductions)
            .find(|line| line.field == field)
            .map(|line| line.amount)
    }
}
