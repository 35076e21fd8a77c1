//! Employee list filtering ahead of export.

use serde::{Deserialize, Serialize};

use crate::models::Employee;

/// Department filter value that matches every employee.
pub const ALL_DEPARTMENTS: &str = "all";

/// Search and department filter over an employee list.
///
/// # Example
///
/// ```
/// use payslip_engine::export::EmployeeFilter;
/// use payslip_engine::models::{Employee, SalaryComponents};
///
/// let mut asha = Employee::new("e-1", "Asha Raman", SalaryComponents::default());
/// asha.department = Some("Accounts".to_string());
/// let ravi = Employee::new("e-2", "Ravi Kumar", SalaryComponents::default());
/// let employees = vec![asha, ravi];
///
/// let filter = EmployeeFilter {
///     search: "  ASHA ".to_string(),
///     department: None,
/// };
/// let matched: Vec<_> = filter.apply(&employees).collect();
/// assert_eq!(matched.len(), 1);
/// assert_eq!(matched[0].name, "Asha Raman");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFilter {
    /// Free-text search over name, code, designation and department.
    #[serde(default)]
    pub search: String,
    /// Exact department to keep; `None` or `"all"` keeps every department.
    #[serde(default)]
    pub department: Option<String>,
}

impl EmployeeFilter {
    /// Returns true if the employee passes both the search and the department filter.
    pub fn matches(&self, employee: &Employee) -> bool {
        let term = self.search.trim().to_lowercase();
        let search_matches = term.is_empty()
            || [
                Some(employee.name.as_str()),
                employee.code.as_deref(),
                employee.designation.as_deref(),
                employee.department.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|value| value.to_lowercase().contains(&term));

        let department_matches = match self.department.as_deref() {
            None | Some(ALL_DEPARTMENTS) => true,
            Some(department) => employee.department.as_deref() == Some(department),
        };

        search_matches && department_matches
    }

    /// The matching employees, in input order.
    pub fn apply<'a>(&'a self, employees: &'a [Employee]) -> impl Iterator<Item = &'a Employee> + 'a {
        employees.iter().filter(move |employee| self.matches(employee))
    }
}

/// Distinct non-empty departments in first-seen order.
pub fn departments(employees: &[Employee]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for department in employees.iter().filter_map(|e| e.department.as_deref()) {
        if !department.is_empty() && !seen.iter().any(|d| d == department) {
            seen.push(department.to_string());
        }
    }
    seen
}
