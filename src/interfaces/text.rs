//! Human-readable rendering of estimates.

use crate::domain::currency::Currency;
use crate::domain::loan::{BreakdownRow, LoanEstimate};

const HEADERS: [&str; 4] = ["Month", "Amount Paid", "Interest Paid", "Remaining Amount"];

/// The two result sentences shown under the form.
pub fn render_summary(estimate: &LoanEstimate, currency: &Currency) -> String {
    let inputs = &estimate.inputs;
    format!(
        "You can borrow up to {} with your stated net income of {} a month, at an interest rate of {}%.\n\
         With these estimations, you would make payment installments of about {} monthly over {} months.",
        currency.format(estimate.summary.max_loan_amount),
        currency.format(inputs.monthly_salary),
        inputs.annual_rate_percent.normalize(),
        currency.format(estimate.summary.monthly_payment),
        inputs.tenor_months,
    )
}

/// Payment breakdown as an aligned table, one line per month.
pub fn render_breakdown(rows: &[BreakdownRow], currency: &Currency) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|row| {
            [
                row.month.to_string(),
                currency.format(row.amount_paid),
                currency.format(row.interest_paid),
                currency.format(row.remaining_amount),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for line in &cells {
        push_line(&mut out, line, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(column, (cell, &width))| {
            if column == 0 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}
