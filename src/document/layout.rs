//! Tabular projection of a payslip document.
//!
//! [`PayslipLayout`] is what gets handed to the snapshot collaborator: every
//! value is already formatted, so rendering is a pure layout concern.

use serde::{Deserialize, Serialize};

use crate::config::PayslipConfig;
use crate::format::{EMPTY_DISPLAY, format_dmy, format_money};
use crate::models::SalaryField;

use super::payslip_document::PayslipDocument;

const NET_PAYABLE_NOTE: &str = "Total Net Payable = Gross Earnings - Total Deductions";

/// A label and its formatted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledValue {
    /// Printed label.
    pub label: String,
    /// Formatted value; `-` when absent.
    pub value: String,
}

impl LabeledValue {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }

    fn optional(label: &str, value: Option<&str>) -> Self {
        Self::new(label, value.unwrap_or(EMPTY_DISPLAY))
    }
}

/// One row of the earnings and deductions table.
///
/// Earnings has fewer lines than deductions, so the earning side of the
/// last row is blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountRow {
    /// Earning label, empty for a blank cell.
    pub earning_label: String,
    /// Earning amount, empty for a blank cell.
    pub earning_amount: String,
    /// Deduction label.
    pub deduction_label: String,
    /// Deduction amount.
    pub deduction_amount: String,
}

/// A payslip laid out as labelled rows, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipLayout {
    /// Company name, when the employee has one.
    pub company: Option<String>,
    /// Logo images to try in order; empty when the company has no profile.
    pub logo_sources: Vec<String>,
    /// Address printed under the company name.
    pub address: String,
    /// `Payslip from - <Month> <Year>`.
    pub title: String,
    /// Employee details in reading order, two per printed row.
    pub employee_details: Vec<LabeledValue>,
    /// Column headings of the amount table.
    pub amount_headings: [String; 4],
    /// Earning and deduction lines.
    pub amount_rows: Vec<AmountRow>,
    /// Totals row.
    pub totals_row: AmountRow,
    /// Attendance summary.
    pub payable_days: Vec<LabeledValue>,
    /// `Total Net Payable : <symbol> <amount>`.
    pub net_payable: String,
    /// How the net payable is derived.
    pub net_payable_note: String,
    /// Footer line.
    pub footer: String,
    /// Name of the rendered artifact.
    pub file_name: String,
}

impl PayslipLayout {
    /// Lays out a document using the company profiles and settings in `config`.
    pub fn from_document(document: &PayslipDocument, config: &PayslipConfig) -> Self {
        let employee = document.employee();
        let computation = document.computation();
        let attendance = document.attendance();
        let settings = config.settings();
        let company = employee.company.as_deref();

        let employee_details = vec![
            LabeledValue::new("Name", employee.name.clone()),
            LabeledValue::optional("Bank Name", employee.bank_name.as_deref()),
            LabeledValue::optional("Code", employee.code.as_deref()),
            LabeledValue::optional("Bank A/C No.", employee.bank_account_no.as_deref()),
            LabeledValue::optional("Designation", employee.designation.as_deref()),
            LabeledValue::optional("IFSC Code", employee.ifsc_code.as_deref()),
            LabeledValue::optional("Department", employee.department.as_deref()),
            LabeledValue::optional("Branch Name", employee.branch_name.as_deref()),
            LabeledValue::optional("Date of Joining", employee.uan_number.as_deref()),
            LabeledValue::new("Date of Birth", format_dmy(employee.date_of_birth.as_deref())),
            LabeledValue::optional("PF Number", employee.pf_number.as_deref()),
            LabeledValue::optional("Work Location", employee.work_location.as_deref()),
            LabeledValue::optional("ESIC Number", employee.esic_number.as_deref()),
        ];

        let amount_rows = SalaryField::DEDUCTIONS
            .iter()
            .enumerate()
            .map(|(index, deduction)| {
                let earning = SalaryField::EARNINGS.get(index);
                AmountRow {
                    earning_label: earning.map(|f| f.label().to_string()).unwrap_or_default(),
                    earning_amount: earning
                        .and_then(|f| computation.amount(*f))
                        .map(format_money)
                        .unwrap_or_default(),
                    deduction_label: deduction.label().to_string(),
                    deduction_amount: computation
                        .amount(*deduction)
                        .map(format_money)
                        .unwrap_or_default(),
                }
            })
            .collect();

        let totals_row = AmountRow {
            earning_label: "Total Gross Earnings".to_string(),
            earning_amount: format_money(computation.total_earnings),
            deduction_label: "Total Deductions".to_string(),
            deduction_amount: format_money(computation.total_deductions),
        };

        let payable_days = vec![
            LabeledValue::new("Worked Full Day", attendance.worked_full_days.to_string()),
            LabeledValue::new("Worked Half Day", attendance.worked_half_days.to_string()),
            LabeledValue::new("Worked Days", attendance.worked_payable_days_label()),
            LabeledValue::new("Holiday", attendance.holiday.to_string()),
            LabeledValue::new("Paid Leaves", attendance.paid_leaves.to_string()),
            LabeledValue::new("Weekly Off", attendance.weekly_off.to_string()),
        ];

        let amount_heading = format!("Amount ({})", settings.currency_label);

        Self {
            company: employee.company.clone(),
            logo_sources: config.logo_sources_for(company).to_vec(),
            address: config.address_for(company).to_string(),
            title: format!("Payslip from - {}", document.period().label()),
            employee_details,
            amount_headings: [
                "Earnings".to_string(),
                amount_heading.clone(),
                "Deductions".to_string(),
                amount_heading,
            ],
            amount_rows,
            totals_row,
            payable_days,
            net_payable: format!(
                "Total Net Payable : {} {}",
                settings.currency_symbol,
                format_money(computation.net_payable)
            ),
            net_payable_note: NET_PAYABLE_NOTE.to_string(),
            footer: settings.footer.clone(),
            file_name: document.file_name(),
        }
    }

    /// Renders the layout as fixed-width plain text.
    pub fn render_text(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        if let Some(company) = &self.company {
            lines.push(company.clone());
        }
        lines.push(self.address.clone());
        lines.push(self.title.clone());
        lines.push(String::new());

        let label_width = column_width(self.employee_details.iter().map(|d| d.label.as_str()));
        let value_width = column_width(self.employee_details.iter().map(|d| d.value.as_str()));
        for pair in self.employee_details.chunks(2) {
            let left = format!("{:<label_width$} : {:<value_width$}", pair[0].label, pair[0].value);
            let line = match pair.get(1) {
                Some(right) => format!("{}   {:<label_width$} : {}", left, right.label, right.value),
                None => left,
            };
            lines.push(line.trim_end().to_string());
        }
        lines.push(String::new());

        let rows: Vec<[&str; 4]> = std::iter::once([
            self.amount_headings[0].as_str(),
            self.amount_headings[1].as_str(),
            self.amount_headings[2].as_str(),
            self.amount_headings[3].as_str(),
        ])
        .chain(self.amount_rows.iter().chain(std::iter::once(&self.totals_row)).map(|row| {
            [
                row.earning_label.as_str(),
                row.earning_amount.as_str(),
                row.deduction_label.as_str(),
                row.deduction_amount.as_str(),
            ]
        }))
        .collect();
        let widths: Vec<usize> = (0..4)
            .map(|col| column_width(rows.iter().map(|row| row[col])))
            .collect();
        let rule = format!(
            "+{}+",
            widths
                .iter()
                .map(|w| "-".repeat(w + 2))
                .collect::<Vec<_>>()
                .join("+")
        );
        lines.push(rule.clone());
        for (index, row) in rows.iter().enumerate() {
            lines.push(format!(
                "| {:<w0$} | {:>w1$} | {:<w2$} | {:>w3$} |",
                row[0],
                row[1],
                row[2],
                row[3],
                w0 = widths[0],
                w1 = widths[1],
                w2 = widths[2],
                w3 = widths[3],
            ));
            if index == 0 || index == rows.len() - 2 {
                lines.push(rule.clone());
            }
        }
        lines.push(rule);
        lines.push(String::new());

        lines.push("Total Payable Days".to_string());
        lines.push(
            self.payable_days
                .iter()
                .map(|d| format!("{}: {}", d.label, d.value))
                .collect::<Vec<_>>()
                .join(" | "),
        );
        lines.push(String::new());

        lines.push(self.net_payable.clone());
        lines.push(self.net_payable_note.clone());
        lines.push(String::new());
        lines.push(self.footer.clone());

        lines.join("\n")
    }
}

fn column_width<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.map(|v| v.chars().count()).max().unwrap_or(0)
}
