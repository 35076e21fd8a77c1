//! The live payslip document and its edit contract.
//!
//! A [`PayslipDocument`] holds the employee identity fields, the period and
//! attendance figures, and the salary figures for one run. Every change goes
//! through a method that re-runs the proration and the calculator, so the
//! computation is never stale.
//!
//! Ownership of the other-deductions figure is explicit: it is either
//! [`OtherDeductions::Automatic`], tracking the attendance proration, or
//! [`OtherDeductions::Manual`], holding an operator value. How a manual value
//! reacts to attendance or period changes is set by the
//! [`AttendanceChangePolicy`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculation::{ProrationResult, calculate_payslip, calculate_proration};
use crate::error::EngineResult;
use crate::format::parse_amount;
use crate::models::{
    AttendanceInput, DeductionOverrides, Employee, PayPeriod, PayslipComputation,
    SalaryComponents, SalaryField,
};

/// Who currently owns the other-deductions figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "source", content = "value", rename_all = "snake_case")]
pub enum OtherDeductions {
    /// Follows the attendance proration deduction.
    #[default]
    Automatic,
    /// Holds an operator-entered value.
    Manual(Decimal),
}

impl OtherDeductions {
    /// The amount in effect, given the current proration deduction.
    pub fn resolve(self, automatic: Decimal) -> Decimal {
        match self {
            OtherDeductions::Automatic => automatic,
            OtherDeductions::Manual(value) => value,
        }
    }
}

/// Whether the payslip is being viewed or edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// Figures are displayed; attendance drives other deductions.
    #[default]
    Viewing,
    /// Figures are editable; other deductions is frozen at its current value.
    Editing,
}

/// What happens to a manual other-deductions value when attendance or the
/// period changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceChangePolicy {
    /// Any attendance or period change returns other deductions to the
    /// automatic proration amount, even mid-edit.
    #[default]
    AutoWins,
    /// While editing, a manual value survives attendance and period changes.
    /// Once editing ends, the next change returns it to automatic.
    ManualFreezes,
}

/// A generated payslip for one employee and period.
///
/// # Example
///
/// ```
/// use payslip_engine::document::{AttendanceChangePolicy, OtherDeductions, PayslipDocument};
/// use payslip_engine::models::{
///     AttendanceInput, DeductionOverrides, Employee, Month, PayPeriod, SalaryComponents,
///     SalaryField,
/// };
/// use rust_decimal::Decimal;
///
/// let salary = SalaryComponents {
///     basic_salary: Decimal::new(30000, 0),
///     ..SalaryComponents::default()
/// };
/// let employee = Employee::new("e-1", "Asha Raman", salary);
/// let period = PayPeriod::new(Month::June, 2025).unwrap();
///
/// let mut document = PayslipDocument::new(
///     employee,
///     period,
///     AttendanceInput::worked_days(23, 4, 0, 0),
///     DeductionOverrides::from_components(&salary),
///     OtherDeductions::Automatic,
///     AttendanceChangePolicy::AutoWins,
/// );
/// assert_eq!(document.computation().total_deductions, Decimal::new(3000, 0));
///
/// let computation = document.set_field(SalaryField::BasicSalary, "abc");
/// assert_eq!(computation.total_earnings, Decimal::ZERO);
/// ```
#[derive(Debug, Clone)]
pub struct PayslipDocument {
    employee: Employee,
    period: PayPeriod,
    attendance: AttendanceInput,
    salary: SalaryComponents,
    other_deductions: OtherDeductions,
    edit_mode: EditMode,
    policy: AttendanceChangePolicy,
    proration: ProrationResult,
    computation: PayslipComputation,
}

impl PayslipDocument {
    /// Generates a payslip document.
    ///
    /// Earnings start from the employee record. PF, ESI and professional tax
    /// come from `deductions`; its `other_deductions` is used only when
    /// `other_deductions` is [`OtherDeductions::Manual`].
    pub fn new(
        employee: Employee,
        period: PayPeriod,
        attendance: AttendanceInput,
        deductions: DeductionOverrides,
        other_deductions: OtherDeductions,
        policy: AttendanceChangePolicy,
    ) -> Self {
        let total_days = period.total_days_in_month();
        let attendance = attendance.clamped(total_days);
        let proration = calculate_proration(total_days, &attendance, &employee.salary, 1);

        let mut salary = employee.salary;
        salary.pf_deduction = deductions.pf_deduction;
        salary.esi_deduction = deductions.esi_deduction;
        salary.professional_tax = deductions.professional_tax;
        salary.other_deductions = other_deductions.resolve(proration.deduction);

        let computation =
            calculate_payslip(&salary, &DeductionOverrides::from_components(&salary));

        Self {
            employee,
            period,
            attendance,
            salary,
            other_deductions,
            edit_mode: EditMode::Viewing,
            policy,
            proration,
            computation,
        }
    }

    /// Sets a salary field from raw operator text and recomputes.
    ///
    /// Text that is empty, non-numeric or negative is stored as zero. Setting
    /// other deductions takes manual ownership of it.
    pub fn set_field(&mut self, field: SalaryField, raw: &str) -> &PayslipComputation {
        let value = parse_amount(raw);
        if field == SalaryField::OtherDeductions {
            self.other_deductions = OtherDeductions::Manual(value);
        } else {
            self.salary.set(field, value);
        }
        debug!(field = %field, value = %value, "Payslip field edited");
        self.recompute();
        &self.computation
    }

    /// Sets a salary field by its record name, e.g. `"basic_salary"`.
    ///
    /// Returns `UnknownField` for names that are not salary fields.
    pub fn set_field_by_name(&mut self, name: &str, raw: &str) -> EngineResult<&PayslipComputation> {
        let field = name.parse::<SalaryField>()?;
        Ok(self.set_field(field, raw))
    }

    /// Switches between viewing and editing. Values are never altered.
    ///
    /// Entering edit mode freezes an automatic other-deductions amount as a
    /// manual value equal to the current one.
    pub fn set_edit_mode(&mut self, mode: EditMode) {
        if mode == EditMode::Editing && self.other_deductions == OtherDeductions::Automatic {
            self.other_deductions = OtherDeductions::Manual(self.proration.deduction);
        }
        self.edit_mode = mode;
        debug!(mode = ?mode, "Payslip edit mode changed");
    }

    /// Flips the edit mode and returns the new mode.
    pub fn toggle_edit_mode(&mut self) -> EditMode {
        let next = match self.edit_mode {
            EditMode::Viewing => EditMode::Editing,
            EditMode::Editing => EditMode::Viewing,
        };
        self.set_edit_mode(next);
        next
    }

    /// Replaces the attendance figures and recomputes.
    pub fn set_attendance(&mut self, attendance: AttendanceInput) -> &PayslipComputation {
        self.attendance = attendance;
        self.on_attendance_changed();
        &self.computation
    }

    /// Replaces the pay period and recomputes.
    pub fn set_period(&mut self, period: PayPeriod) -> &PayslipComputation {
        self.period = period;
        self.on_attendance_changed();
        &self.computation
    }

    fn on_attendance_changed(&mut self) {
        let total_days = self.period.total_days_in_month();
        self.attendance = self.attendance.clamped(total_days);
        self.proration = calculate_proration(total_days, &self.attendance, &self.employee.salary, 1);

        let keep_manual = self.policy == AttendanceChangePolicy::ManualFreezes
            && self.edit_mode == EditMode::Editing;
        if !keep_manual {
            self.other_deductions = OtherDeductions::Automatic;
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        let other = self.effective_other_deductions();
        self.salary.other_deductions = other;

        let deductions = DeductionOverrides::from_components(&self.salary);
        self.computation = calculate_payslip(&self.salary, &deductions);

        debug!(
            employee_id = %self.employee.id,
            period = %self.period.label(),
            total_earnings = %self.computation.total_earnings,
            total_deductions = %self.computation.total_deductions,
            net_payable = %self.computation.net_payable,
            "Payslip recomputed"
        );
    }

    /// The other-deductions amount currently in effect.
    pub fn effective_other_deductions(&self) -> Decimal {
        self.other_deductions.resolve(self.proration.deduction)
    }

    /// The employee identity fields, unchanged from the record.
    pub fn employee(&self) -> &Employee {
        &self.employee
    }

    /// The pay period.
    pub fn period(&self) -> PayPeriod {
        self.period
    }

    /// The attendance figures, capped at the days in the month.
    pub fn attendance(&self) -> &AttendanceInput {
        &self.attendance
    }

    /// The salary figures for this run, including edits.
    pub fn salary(&self) -> &SalaryComponents {
        &self.salary
    }

    /// Current ownership of other deductions.
    pub fn other_deductions(&self) -> OtherDeductions {
        self.other_deductions
    }

    /// The current edit mode.
    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    /// The attendance change policy.
    pub fn policy(&self) -> AttendanceChangePolicy {
        self.policy
    }

    /// The latest attendance proration.
    pub fn proration(&self) -> &ProrationResult {
        &self.proration
    }

    /// The latest computation.
    pub fn computation(&self) -> &PayslipComputation {
        &self.computation
    }

    /// File name for the rendered document,
    /// `Payslip_<employeeName>_<month>_<year>.pdf`.
    pub fn file_name(&self) -> String {
        format!(
            "Payslip_{}_{}_{}.pdf",
            self.employee.name, self.period.month, self.period.year
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::Month;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn employee() -> Employee {
        let salary = SalaryComponents {
            basic_salary: dec("20000"),
            hra: dec("8000"),
            other_allowances: dec("2000"),
            pf_deduction: dec("1800"),
            esi_deduction: dec("0"),
            professional_tax: dec("200"),
            other_deductions: dec("999"),
        };
        Employee::new("e-1", "Asha Raman", salary)
    }

    fn june_2025() -> PayPeriod {
        PayPeriod::new(Month::June, 2025).unwrap()
    }

    fn document(attendance: AttendanceInput, policy: AttendanceChangePolicy) -> PayslipDocument {
        let employee = employee();
        let deductions = DeductionOverrides::from_components(&employee.salary);
        PayslipDocument::new(
            employee,
            june_2025(),
            attendance,
            deductions,
            OtherDeductions::Automatic,
            policy,
        )
    }

    // 30 days in June, gross 30000 -> 1000 per day
    fn three_days_missing() -> AttendanceInput {
        AttendanceInput::worked_days(23, 4, 0, 0)
    }

    fn full_month() -> AttendanceInput {
        AttendanceInput::worked_days(26, 4, 0, 0)
    }

    #[test]
    fn test_generation_uses_proration_for_other_deductions() {
        let doc = document(three_days_missing(), AttendanceChangePolicy::AutoWins);

        assert_eq!(doc.other_deductions(), OtherDeductions::Automatic);
        assert_eq!(doc.effective_other_deductions(), dec("3000"));
        assert_eq!(doc.computation().total_earnings, dec("30000"));
        assert_eq!(doc.computation().total_deductions, dec("5000"));
        assert_eq!(doc.computation().net_payable, dec("25000"));
    }

    #[test]
    fn test_generation_computes_from_resolved_other_deductions() {
        let doc = document(three_days_missing(), AttendanceChangePolicy::AutoWins);

        let mut expected_salary = employee().salary;
        expected_salary.other_deductions = dec("3000");
        let expected = calculate_payslip(
            &expected_salary,
            &DeductionOverrides::from_components(&expected_salary),
        );

        // the record's 999 never reaches the computation in automatic mode
        assert_eq!(doc.computation(), &expected);
        assert_eq!(
            doc.computation().amount(SalaryField::OtherDeductions),
            Some(dec("3000"))
        );
    }

    #[test]
    fn test_resolve_other_deductions() {
        assert_eq!(OtherDeductions::Automatic.resolve(dec("42.50")), dec("42.50"));
        assert_eq!(
            OtherDeductions::Manual(dec("10")).resolve(dec("42.50")),
            dec("10")
        );
    }

    #[test]
    fn test_generation_with_manual_other_deductions() {
        let employee = employee();
        let deductions = DeductionOverrides {
            other_deductions: dec("150"),
            ..DeductionOverrides::from_components(&employee.salary)
        };
        let doc = PayslipDocument::new(
            employee,
            june_2025(),
            three_days_missing(),
            deductions,
            OtherDeductions::Manual(dec("150")),
            AttendanceChangePolicy::AutoWins,
        );

        assert_eq!(doc.effective_other_deductions(), dec("150"));
        assert_eq!(doc.computation().total_deductions, dec("2150"));
    }

    #[test]
    fn test_invalid_edit_sets_zero_and_recomputes_in_same_call() {
        let mut doc = document(full_month(), AttendanceChangePolicy::AutoWins);
        assert_eq!(doc.computation().net_payable, dec("28000"));

        let computation = doc.set_field(SalaryField::BasicSalary, "abc");

        assert_eq!(computation.amount(SalaryField::BasicSalary), Some(Decimal::ZERO));
        assert_eq!(computation.total_earnings, dec("10000"));
        assert_eq!(computation.net_payable, dec("8000"));
        assert_eq!(doc.salary().basic_salary, Decimal::ZERO);
    }

    #[test]
    fn test_edit_by_name() {
        let mut doc = document(full_month(), AttendanceChangePolicy::AutoWins);

        let computation = doc.set_field_by_name("professional_tax", "250.50").unwrap();
        assert_eq!(computation.total_deductions, dec("2050.50"));
    }

    #[test]
    fn test_edit_by_unknown_name_is_rejected_without_change() {
        let mut doc = document(full_month(), AttendanceChangePolicy::AutoWins);
        let before = doc.computation().clone();

        match doc.set_field_by_name("bonus", "5000") {
            Err(EngineError::UnknownField { name }) => assert_eq!(name, "bonus"),
            other => panic!("Expected UnknownField, got {:?}", other),
        }
        assert_eq!(doc.computation(), &before);
    }

    #[test]
    fn test_editing_other_deductions_takes_manual_ownership() {
        let mut doc = document(three_days_missing(), AttendanceChangePolicy::AutoWins);

        doc.set_field(SalaryField::OtherDeductions, "500");

        assert_eq!(doc.other_deductions(), OtherDeductions::Manual(dec("500")));
        assert_eq!(doc.computation().total_deductions, dec("2500"));
    }

    #[test]
    fn test_toggling_edit_mode_does_not_change_values() {
        let mut doc = document(three_days_missing(), AttendanceChangePolicy::AutoWins);
        let before = doc.computation().clone();

        assert_eq!(doc.toggle_edit_mode(), EditMode::Editing);
        assert_eq!(doc.computation(), &before);
        assert_eq!(doc.other_deductions(), OtherDeductions::Manual(dec("3000")));

        assert_eq!(doc.toggle_edit_mode(), EditMode::Viewing);
        assert_eq!(doc.computation(), &before);
    }

    #[test]
    fn test_attendance_change_in_automatic_mode_recomputes() {
        let mut doc = document(three_days_missing(), AttendanceChangePolicy::AutoWins);

        let computation = doc.set_attendance(full_month());

        assert_eq!(computation.amount(SalaryField::OtherDeductions), Some(Decimal::ZERO));
        assert_eq!(computation.net_payable, dec("28000"));
    }

    #[test]
    fn test_auto_wins_attendance_change_overrides_active_manual_edit() {
        let mut doc = document(three_days_missing(), AttendanceChangePolicy::AutoWins);
        doc.set_edit_mode(EditMode::Editing);
        doc.set_field(SalaryField::OtherDeductions, "750");
        assert_eq!(doc.effective_other_deductions(), dec("750"));

        doc.set_attendance(AttendanceInput::worked_days(24, 4, 0, 0));

        assert_eq!(doc.other_deductions(), OtherDeductions::Automatic);
        assert_eq!(doc.effective_other_deductions(), dec("2000"));
        assert_eq!(doc.edit_mode(), EditMode::Editing);
    }

    #[test]
    fn test_manual_freezes_while_editing() {
        let mut doc = document(three_days_missing(), AttendanceChangePolicy::ManualFreezes);
        doc.set_edit_mode(EditMode::Editing);
        doc.set_field(SalaryField::OtherDeductions, "750");

        doc.set_attendance(AttendanceInput::worked_days(24, 4, 0, 0));

        assert_eq!(doc.other_deductions(), OtherDeductions::Manual(dec("750")));
        assert_eq!(doc.computation().total_deductions, dec("2750"));
        // proration still tracks attendance underneath the frozen value
        assert_eq!(doc.proration().deduction, dec("2000"));
    }

    #[test]
    fn test_manual_freezes_entering_edit_freezes_automatic_value() {
        let mut doc = document(three_days_missing(), AttendanceChangePolicy::ManualFreezes);
        doc.set_edit_mode(EditMode::Editing);

        doc.set_attendance(full_month());

        assert_eq!(doc.effective_other_deductions(), dec("3000"));
    }

    #[test]
    fn test_manual_freezes_returns_to_automatic_after_edit_exit() {
        let mut doc = document(three_days_missing(), AttendanceChangePolicy::ManualFreezes);
        doc.set_edit_mode(EditMode::Editing);
        doc.set_field(SalaryField::OtherDeductions, "750");
        doc.set_edit_mode(EditMode::Viewing);

        // leaving edit mode keeps the value until attendance changes
        assert_eq!(doc.effective_other_deductions(), dec("750"));

        doc.set_attendance(full_month());
        assert_eq!(doc.other_deductions(), OtherDeductions::Automatic);
        assert_eq!(doc.effective_other_deductions(), Decimal::ZERO);
    }

    #[test]
    fn test_period_change_recomputes_days_and_proration() {
        let mut doc = document(AttendanceInput::worked_days(26, 4, 0, 0), AttendanceChangePolicy::AutoWins);
        assert_eq!(doc.effective_other_deductions(), Decimal::ZERO);

        // July has 31 days: one day missing at 30000 / 31
        doc.set_period(PayPeriod::new(Month::July, 2025).unwrap());

        assert_eq!(doc.proration().total_days, 31);
        assert_eq!(doc.effective_other_deductions(), dec("967.74"));
    }

    #[test]
    fn test_attendance_is_clamped_to_month() {
        let doc = document(AttendanceInput::worked_days(40, 0, 0, 0), AttendanceChangePolicy::AutoWins);
        assert_eq!(doc.attendance().worked_full_days, 30);
    }

    #[test]
    fn test_earning_edit_does_not_change_proration_base() {
        let mut doc = document(three_days_missing(), AttendanceChangePolicy::AutoWins);

        doc.set_field(SalaryField::Hra, "0");

        assert_eq!(doc.proration().gross_monthly, dec("30000"));
        assert_eq!(doc.effective_other_deductions(), dec("3000"));
    }

    #[test]
    fn test_identity_fields_pass_through() {
        let doc = document(full_month(), AttendanceChangePolicy::AutoWins);
        assert_eq!(doc.employee(), &employee());
    }

    #[test]
    fn test_file_name() {
        let doc = document(full_month(), AttendanceChangePolicy::AutoWins);
        assert_eq!(doc.file_name(), "Payslip_Asha Raman_June_2025.pdf");
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let a = document(three_days_missing(), AttendanceChangePolicy::AutoWins);
        let b = document(three_days_missing(), AttendanceChangePolicy::AutoWins);
        assert_eq!(a.computation(), b.computation());
        assert_eq!(a.proration(), b.proration());
    }

    #[test]
    fn test_other_deductions_serialization() {
        assert_eq!(
            serde_json::to_string(&OtherDeductions::Automatic).unwrap(),
            r#"{"source":"automatic"}"#
        );
        assert_eq!(
            serde_json::to_string(&OtherDeductions::Manual(dec("12.50"))).unwrap(),
            r#"{"source":"manual","value":"12.50"}"#
        );
    }
}
