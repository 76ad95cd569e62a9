use crate::domain::loan::{BreakdownRow, LoanEstimate};
use crate::error::{LoanError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::io::Write;

/// Rounds to cents and drops trailing zeros, e.g. `374.3775` -> `374.38`.
pub fn money(amount: Decimal) -> Decimal {
    amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

#[derive(Serialize)]
struct SummaryRecord {
    salary: Decimal,
    rate: Decimal,
    tenor: u32,
    max_loan_amount: Decimal,
    monthly_payment: Decimal,
    total_interest: Decimal,
}

impl TryFrom<&LoanEstimate> for SummaryRecord {
    type Error = LoanError;

    fn try_from(estimate: &LoanEstimate) -> Result<Self> {
        Ok(Self {
            salary: estimate.inputs.monthly_salary.normalize(),
            rate: estimate.inputs.annual_rate_percent.normalize(),
            tenor: estimate.inputs.tenor_months,
            max_loan_amount: money(estimate.summary.max_loan_amount),
            monthly_payment: money(estimate.summary.monthly_payment),
            total_interest: money(estimate.total_interest()?),
        })
    }
}

#[derive(Serialize)]
struct BreakdownRecord {
    month: u32,
    amount_paid: Decimal,
    interest_paid: Decimal,
    remaining_amount: Decimal,
}

impl From<&BreakdownRow> for BreakdownRecord {
    fn from(row: &BreakdownRow) -> Self {
        Self {
            month: row.month,
            amount_paid: money(row.amount_paid),
            interest_paid: money(row.interest_paid),
            remaining_amount: money(row.remaining_amount),
        }
    }
}

/// Writes one summary line per estimate.
pub struct SummaryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SummaryWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Fails without writing anything when the totals overflow.
    pub fn write(&mut self, estimate: &LoanEstimate) -> Result<()> {
        let record = SummaryRecord::try_from(estimate)?;
        self.writer.serialize(record)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes the month-by-month schedule of a single estimate.
pub fn write_breakdown<W: Write>(sink: W, rows: &[BreakdownRow]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);
    for row in rows {
        writer.serialize(BreakdownRecord::from(row))?;
    }
    writer.flush()?;
    Ok(())
}
