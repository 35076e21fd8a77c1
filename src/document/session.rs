//! Operator session state for payslip generation.

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::format::parse_amount;
use crate::models::{AttendanceInput, DeductionOverrides, Employee, PayPeriod, SalaryField};

use super::payslip_document::{AttendanceChangePolicy, OtherDeductions, PayslipDocument};

/// The selections an operator makes before and after generating a payslip.
///
/// A session owns the selected employee, the period, the attendance figures
/// and the deduction inputs. Attendance and period changes are forwarded to
/// the generated document, if there is one.
///
/// # Example
///
/// ```
/// use payslip_engine::document::{AttendanceChangePolicy, PayslipSession};
/// use payslip_engine::models::{Employee, Month, PayPeriod, SalaryComponents};
///
/// let period = PayPeriod::new(Month::March, 2025).unwrap();
/// let mut session = PayslipSession::new(period, AttendanceChangePolicy::AutoWins);
/// assert!(session.generate().is_none());
///
/// session.select_employee(Some(Employee::new("e-1", "Asha Raman", SalaryComponents::default())));
/// assert!(session.generate().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct PayslipSession {
    employee: Option<Employee>,
    period: PayPeriod,
    attendance: AttendanceInput,
    deductions: DeductionOverrides,
    other_deductions: OtherDeductions,
    policy: AttendanceChangePolicy,
    document: Option<PayslipDocument>,
}

impl PayslipSession {
    /// Starts a session with no employee selected.
    pub fn new(period: PayPeriod, policy: AttendanceChangePolicy) -> Self {
        Self {
            employee: None,
            period,
            attendance: AttendanceInput::default(),
            deductions: DeductionOverrides::default(),
            other_deductions: OtherDeductions::Automatic,
            policy,
            document: None,
        }
    }

    /// Selects an employee, or clears the selection.
    ///
    /// Any generated document is discarded and the deduction inputs reset to
    /// the new employee's defaults.
    pub fn select_employee(&mut self, employee: Option<Employee>) {
        self.deductions = employee
            .as_ref()
            .map(|employee| DeductionOverrides::from_components(&employee.salary))
            .unwrap_or_default();
        self.other_deductions = OtherDeductions::Automatic;
        self.document = None;

        debug!(
            employee_id = employee.as_ref().map(|e| e.id.as_str()).unwrap_or(""),
            "Employee selected"
        );
        self.employee = employee;
    }

    /// Sets a deduction input from raw operator text.
    ///
    /// Only PF, ESI, professional tax and other deductions are inputs; an
    /// earning field returns `UnknownField`. Typing an other-deductions value
    /// takes manual ownership of it until the next attendance or period change.
    pub fn set_deduction_input(&mut self, field: SalaryField, raw: &str) -> EngineResult<()> {
        let value = parse_amount(raw);
        match field {
            SalaryField::PfDeduction => self.deductions.pf_deduction = value,
            SalaryField::EsiDeduction => self.deductions.esi_deduction = value,
            SalaryField::ProfessionalTax => self.deductions.professional_tax = value,
            SalaryField::OtherDeductions => {
                self.deductions.other_deductions = value;
                self.other_deductions = OtherDeductions::Manual(value);
            }
            earning => {
                return Err(EngineError::UnknownField {
                    name: earning.as_str().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Replaces the attendance figures.
    pub fn set_attendance(&mut self, attendance: AttendanceInput) {
        self.attendance = attendance;
        self.other_deductions = OtherDeductions::Automatic;
        if let Some(document) = self.document.as_mut() {
            document.set_attendance(attendance);
        }
    }

    /// Replaces the pay period.
    pub fn set_period(&mut self, period: PayPeriod) {
        self.period = period;
        self.other_deductions = OtherDeductions::Automatic;
        if let Some(document) = self.document.as_mut() {
            document.set_period(period);
        }
    }

    /// Generates the payslip document for the selected employee.
    ///
    /// Returns `None` without touching state when no employee is selected.
    pub fn generate(&mut self) -> Option<&mut PayslipDocument> {
        let employee = self.employee.clone()?;
        debug!(employee_id = %employee.id, period = %self.period.label(), "Generating payslip");

        let document = PayslipDocument::new(
            employee,
            self.period,
            self.attendance,
            self.deductions,
            self.other_deductions,
            self.policy,
        );
        self.document = Some(document);
        self.document.as_mut()
    }

    /// Ends the session, keeping the generated document if there is one.
    pub fn into_document(self) -> Option<PayslipDocument> {
        self.document
    }

    /// The selected employee.
    pub fn employee(&self) -> Option<&Employee> {
        self.employee.as_ref()
    }

    /// The selected period.
    pub fn period(&self) -> PayPeriod {
        self.period
    }

    /// The current deduction inputs.
    pub fn deductions(&self) -> &DeductionOverrides {
        &self.deductions
    }

    /// The generated document, if any.
    pub fn document(&self) -> Option<&PayslipDocument> {
        self.document.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Month, SalaryComponents};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn employee(id: &str, pf: &str) -> Employee {
        let salary = SalaryComponents {
            basic_salary: dec("30000"),
            pf_deduction: dec(pf),
            ..SalaryComponents::default()
        };
        Employee::new(id, format!("Employee {}", id), salary)
    }

    fn session() -> PayslipSession {
        PayslipSession::new(
            PayPeriod::new(Month::June, 2025).unwrap(),
            AttendanceChangePolicy::AutoWins,
        )
    }

    #[test]
    fn test_generate_without_employee_is_noop() {
        let mut session = session();
        assert!(session.generate().is_none());
        assert!(session.document().is_none());
    }

    #[test]
    fn test_select_employee_resets_deduction_inputs() {
        let mut session = session();
        session.select_employee(Some(employee("a", "1800")));
        session.set_deduction_input(SalaryField::PfDeduction, "500").unwrap();
        assert_eq!(session.deductions().pf_deduction, dec("500"));

        session.select_employee(Some(employee("b", "1200")));
        assert_eq!(session.deductions().pf_deduction, dec("1200"));
    }

    #[test]
    fn test_select_employee_discards_document() {
        let mut session = session();
        session.select_employee(Some(employee("a", "0")));
        session.generate();
        assert!(session.document().is_some());

        session.select_employee(Some(employee("b", "0")));
        assert!(session.document().is_none());
    }

    #[test]
    fn test_deduction_inputs_flow_into_document() {
        let mut session = session();
        session.select_employee(Some(employee("a", "1800")));
        session.set_attendance(AttendanceInput::worked_days(26, 4, 0, 0));
        session.set_deduction_input(SalaryField::ProfessionalTax, "200").unwrap();

        let document = session.generate().unwrap();
        assert_eq!(document.computation().total_deductions, dec("2000"));
        assert_eq!(document.computation().net_payable, dec("28000"));
    }

    #[test]
    fn test_earning_is_not_a_deduction_input() {
        let mut session = session();
        let result = session.set_deduction_input(SalaryField::Hra, "100");
        assert!(matches!(result, Err(EngineError::UnknownField { name }) if name == "hra"));
    }

    #[test]
    fn test_typed_other_deductions_reset_by_attendance_change() {
        let mut session = session();
        session.select_employee(Some(employee("a", "0")));
        session.set_deduction_input(SalaryField::OtherDeductions, "100").unwrap();
        session.set_attendance(AttendanceInput::worked_days(23, 4, 0, 0));

        let document = session.generate().unwrap();
        assert_eq!(document.effective_other_deductions(), dec("3000"));
    }

    #[test]
    fn test_typed_other_deductions_used_when_generated() {
        let mut session = session();
        session.select_employee(Some(employee("a", "0")));
        session.set_attendance(AttendanceInput::worked_days(23, 4, 0, 0));
        session.set_deduction_input(SalaryField::OtherDeductions, "100").unwrap();

        let document = session.generate().unwrap();
        assert_eq!(document.effective_other_deductions(), dec("100"));
    }

    #[test]
    fn test_attendance_change_forwarded_to_document() {
        let mut session = session();
        session.select_employee(Some(employee("a", "0")));
        session.set_attendance(AttendanceInput::worked_days(26, 4, 0, 0));
        session.generate();

        session.set_attendance(AttendanceInput::worked_days(25, 4, 0, 0));

        let document = session.document().unwrap();
        assert_eq!(document.effective_other_deductions(), dec("1000"));
    }

    #[test]
    fn test_period_change_forwarded_to_document() {
        let mut session = session();
        session.select_employee(Some(employee("a", "0")));
        session.generate();

        session.set_period(PayPeriod::new(Month::February, 2024).unwrap());

        let document = session.document().unwrap();
        assert_eq!(document.proration().total_days, 29);
    }
}
