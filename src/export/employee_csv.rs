//! Employee list CSV export.
//!
//! Every cell is quoted, embedded quotes are doubled and line breaks inside a
//! cell become a single space. Rows end with `\n` and the last row has no
//! terminator.

use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::format::format_money;
use crate::models::{Employee, SalaryField};

/// Export column headings in output order.
pub const EMPLOYEE_CSV_COLUMNS: [&str; 19] = [
    "Name",
    "Code",
    "Designation",
    "Department",
    "Basic Salary",
    "HRA",
    "Other Allowances",
    "PF Deduction",
    "ESI Deduction",
    "Professional Tax",
    "Other Deductions",
    "Bank Name",
    "Bank A/C No.",
    "IFSC Code",
    "Branch Name",
    "UAN Number",
    "PF Number",
    "ESIC Number",
    "Work Location",
];

/// One employee's formatted export cells, in [`EMPLOYEE_CSV_COLUMNS`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeCsvRow {
    cells: Vec<String>,
}

impl EmployeeCsvRow {
    /// Formats an employee record. Money has two decimals and absent text is empty.
    pub fn from_employee(employee: &Employee) -> Self {
        let text = |value: &Option<String>| clean_cell(value.as_deref().unwrap_or_default());
        let money = |field: SalaryField| format_money(employee.salary.get(field));

        let cells = vec![
            clean_cell(&employee.name),
            text(&employee.code),
            text(&employee.designation),
            text(&employee.department),
            money(SalaryField::BasicSalary),
            money(SalaryField::Hra),
            money(SalaryField::OtherAllowances),
            money(SalaryField::PfDeduction),
            money(SalaryField::EsiDeduction),
            money(SalaryField::ProfessionalTax),
            money(SalaryField::OtherDeductions),
            text(&employee.bank_name),
            text(&employee.bank_account_no),
            text(&employee.ifsc_code),
            text(&employee.branch_name),
            text(&employee.uan_number),
            text(&employee.pf_number),
            text(&employee.esic_number),
            text(&employee.work_location),
        ];
        Self { cells }
    }

    /// The cell for a column heading.
    pub fn get(&self, column: &str) -> Option<&str> {
        EMPLOYEE_CSV_COLUMNS
            .iter()
            .position(|c| *c == column)
            .and_then(|index| self.cells.get(index))
            .map(String::as_str)
    }

    /// All cells in column order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

fn clean_cell(value: &str) -> String {
    value.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Renders employees as CSV text, header first, preserving input order.
///
/// An empty list yields the header line alone.
///
/// # Example
///
/// ```
/// use payslip_engine::export::export_employees_csv;
/// use payslip_engine::models::{Employee, SalaryComponents};
///
/// let employees = vec![Employee::new("e-1", "O\"Brien", SalaryComponents::default())];
/// let csv = export_employees_csv(&employees).unwrap();
///
/// let row = csv.lines().nth(1).unwrap();
/// assert!(row.starts_with("\"O\"\"Brien\",\"\",\"\",\"\",\"0.00\""));
/// ```
pub fn export_employees_csv<'a, I>(employees: I) -> EngineResult<String>
where
    I: IntoIterator<Item = &'a Employee>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(EMPLOYEE_CSV_COLUMNS).map_err(export_error)?;

    let mut rows = 0usize;
    for employee in employees {
        writer
            .write_record(EmployeeCsvRow::from_employee(employee).cells())
            .map_err(export_error)?;
        rows += 1;
    }

    let bytes = writer.into_inner().map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;
    let mut text = String::from_utf8(bytes).map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;
    if text.ends_with('\n') {
        text.pop();
    }

    debug!(rows, "Employee CSV exported");
    Ok(text)
}

fn export_error(err: csv::Error) -> EngineError {
    EngineError::ExportError {
        message: err.to_string(),
    }
}

/// Download name for an export generated on `date`: `employees_YYYYMMDD.csv`.
pub fn csv_file_name(date: NaiveDate) -> String {
    format!("employees_{}.csv", date.format("%Y%m%d"))
}
