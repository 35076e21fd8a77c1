//! Payslip totals calculation.
//!
//! This module combines an employee's salary components with the deduction
//! figures for one run into earnings, deductions and net payable totals.

use rust_decimal::Decimal;

use crate::models::{
    AuditStep, DeductionOverrides, PayslipComputation, PayslipLine, SalaryComponents, SalaryField,
};

/// Calculates the payslip totals.
///
/// Earnings come from `salary`; deductions come from `deductions`, so the
/// deduction fields of `salary` are ignored. The function is pure: calling
/// it twice with the same inputs yields identical output. No rounding is
/// applied; amounts are rounded only when displayed.
///
/// # Arguments
///
/// * `salary` - Basic salary, HRA and other allowances for the run
/// * `deductions` - PF, ESI, professional tax and other deductions for the run
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::calculate_payslip;
/// use payslip_engine::models::{DeductionOverrides, SalaryComponents};
/// use rust_decimal::Decimal;
///
/// let salary = SalaryComponents {
///     basic_salary: Decimal::new(1000, 0),
///     ..SalaryComponents::default()
/// };
/// let deductions = DeductionOverrides {
///     other_deductions: Decimal::new(1500, 0),
///     ..DeductionOverrides::default()
/// };
///
/// // net payable is not clamped at zero
/// let computation = calculate_payslip(&salary, &deductions);
/// assert_eq!(computation.net_payable, Decimal::new(-500, 0));
/// ```
pub fn calculate_payslip(
    salary: &SalaryComponents,
    deductions: &DeductionOverrides,
) -> PayslipComputation {
    let earnings: Vec<PayslipLine> = SalaryField::EARNINGS
        .into_iter()
        .map(|field| PayslipLine {
            field,
            label: field.label().to_string(),
            amount: salary.get(field),
        })
        .collect();

    let deduction_lines: Vec<PayslipLine> = SalaryField::DEDUCTIONS
        .into_iter()
        .map(|field| PayslipLine {
            field,
            label: field.label().to_string(),
            amount: deductions.get(field).unwrap_or(Decimal::ZERO),
        })
        .collect();

    let total_earnings = saturating_total(&earnings);
    let total_deductions = saturating_total(&deduction_lines);
    let net_payable = total_earnings.saturating_sub(total_deductions);

    let audit_steps = vec![
        total_step(1, "total_earnings", "Total Earnings", &earnings, total_earnings),
        total_step(
            2,
            "total_deductions",
            "Total Deductions",
            &deduction_lines,
            total_deductions,
        ),
        AuditStep {
            step_number: 3,
            rule_id: "net_payable".to_string(),
            rule_name: "Net Payable".to_string(),
            input: serde_json::json!({
                "total_earnings": total_earnings.to_string(),
                "total_deductions": total_deductions.to_string()
            }),
            output: serde_json::json!({
                "net_payable": net_payable.to_string()
            }),
            reasoning: format!(
                "${} - ${} = ${}",
                total_earnings, total_deductions, net_payable
            ),
        },
    ];

    PayslipComputation {
        earnings,
        deductions: deduction_lines,
        total_earnings,
        total_deductions,
        net_payable,
        audit_steps,
    }
}

/// Sums line amounts, pinning at `Decimal::MAX` instead of overflowing.
fn saturating_total(lines: &[PayslipLine]) -> Decimal {
    lines
        .iter()
        .fold(Decimal::ZERO, |total, line| total.saturating_add(line.amount))
}

fn total_step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    lines: &[PayslipLine],
    total: Decimal,
) -> AuditStep {
    let input: serde_json::Map<String, serde_json::Value> = lines
        .iter()
        .map(|line| {
            (
                line.field.as_str().to_string(),
                serde_json::Value::String(line.amount.to_string()),
            )
        })
        .collect();
    let terms: Vec<String> = lines.iter().map(|line| format!("${}", line.amount)).collect();

    let mut output = serde_json::Map::new();
    output.insert(
        rule_id.to_string(),
        serde_json::Value::String(total.to_string()),
    );

    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::Value::Object(input),
        output: serde_json::Value::Object(output),
        reasoning: format!("{} = ${}", terms.join(" + "), total),
    }
}
