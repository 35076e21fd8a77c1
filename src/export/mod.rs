//! Employee list export.
//!
//! Filtering narrows the employee list; the CSV writer renders whatever is
//! left with a fixed header.

mod employee_csv;
mod filter;

pub use employee_csv::{EMPLOYEE_CSV_COLUMNS, EmployeeCsvRow, csv_file_name, export_employees_csv};
pub use filter::{ALL_DEPARTMENTS, EmployeeFilter, departments};
