//! Employee record model.
//!
//! Employee records are owned by the persistence collaborator; the engine
//! only reads them. Text fields that arrive as empty strings are treated as
//! absent, and the salary figures are normalized by [`SalaryComponents`].

use serde::{Deserialize, Serialize};

use super::SalaryComponents;
use crate::format::deserialize_text;

/// An employee record as supplied by the persistence layer.
///
/// The salary figures are flattened into the record, so the JSON shape is a
/// single flat object of named text and numeric fields.
///
/// # Example
///
/// ```
/// use payslip_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let employee: Employee = serde_json::from_str(r#"{
///     "id": "e-1",
///     "name": "Asha Raman",
///     "code": "",
///     "department": "Accounts",
///     "basic_salary": 25000
/// }"#).unwrap();
///
/// assert_eq!(employee.code, None);
/// assert_eq!(employee.department.as_deref(), Some("Accounts"));
/// assert_eq!(employee.salary.basic_salary, Decimal::new(25000, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Identifier assigned by the persistence layer.
    #[serde(default)]
    pub id: String,
    /// Full name.
    pub name: String,
    /// Employee code.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub code: Option<String>,
    /// Job title.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub designation: Option<String>,
    /// Department name.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub department: Option<String>,
    /// Date of birth as stored (ISO or free-form).
    #[serde(default, deserialize_with = "deserialize_text")]
    pub date_of_birth: Option<String>,
    /// Company the employee is paid by; selects the payslip header profile.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub company: Option<String>,
    /// Work location.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub work_location: Option<String>,
    /// Bank name.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub bank_name: Option<String>,
    /// Bank account number.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub bank_account_no: Option<String>,
    /// IFSC code of the bank branch.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub ifsc_code: Option<String>,
    /// Bank branch name.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub branch_name: Option<String>,
    /// Provident fund number.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub pf_number: Option<String>,
    /// ESIC number.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub esic_number: Option<String>,
    /// UAN number column. The payslip prints this as the Date of Joining.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub uan_number: Option<String>,
    /// Baseline salary figures.
    #[serde(flatten)]
    pub salary: SalaryComponents,
}

impl Employee {
    /// Creates an employee with only a name and salary figures set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, salary: SalaryComponents) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: None,
            designation: None,
            department: None,
            date_of_birth: None,
            company: None,
            work_location: None,
            bank_name: None,
            bank_account_no: None,
            ifsc_code: None,
            branch_name: None,
            pf_number: None,
            esic_number: None,
            uan_number: None,
            salary,
        }
    }

    /// The name shown in employee pickers, e.g. `Asha Raman (EMP001)`.
    pub fn display_name(&self) -> String {
        match &self.code {
            Some(code) => format!("{} ({})", self.name, code),
            None => self.name.clone(),
        }
    }
}
