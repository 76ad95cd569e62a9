use crate::error::{LoanError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Borrow limit as a multiple of the net monthly salary.
pub const SALARY_MULTIPLIER: Decimal = dec!(4);

pub const DEFAULT_RATE_PERCENT: Decimal = dec!(22);
pub const DEFAULT_TENOR_MONTHS: u32 = 12;

/// The three values a user adjusts.
///
/// Nothing is computed while `monthly_salary` is zero or negative; the rate
/// and tenor are taken as-is, range constraints belong to the input surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanInputs {
    #[serde(rename = "salary")]
    pub monthly_salary: Decimal,
    #[serde(rename = "rate")]
    pub annual_rate_percent: Decimal,
    #[serde(rename = "tenor")]
    pub tenor_months: u32,
}

impl Default for LoanInputs {
    fn default() -> Self {
        Self {
            monthly_salary: Decimal::ZERO,
            annual_rate_percent: DEFAULT_RATE_PERCENT,
            tenor_months: DEFAULT_TENOR_MONTHS,
        }
    }
}

impl LoanInputs {
    pub fn new(monthly_salary: Decimal, annual_rate_percent: Decimal, tenor_months: u32) -> Self {
        Self {
            monthly_salary,
            annual_rate_percent,
            tenor_months,
        }
    }

    /// Whether the salary is high enough for an estimate to be produced.
    pub fn is_computable(&self) -> bool {
        self.monthly_salary > Decimal::ZERO
    }

    /// Annual percentage converted to a per-month fraction.
    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate_percent / dec!(100) / dec!(12)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub max_loan_amount: Decimal,
    pub monthly_payment: Decimal,
}

/// One month of the amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub month: u32,
    pub amount_paid: Decimal,
    pub interest_paid: Decimal,
    /// Clamped to zero for display; the schedule keeps the raw balance.
    pub remaining_amount: Decimal,
}

/// Everything produced by one computation. Replaced wholesale on every
/// input change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanEstimate {
    pub inputs: LoanInputs,
    pub summary: LoanSummary,
    pub breakdown: Vec<BreakdownRow>,
}

impl LoanEstimate {
    pub fn total_interest(&self) -> Result<Decimal> {
        checked_total(
            self.breakdown.iter().map(|row| Some(row.interest_paid)),
            "total interest",
        )
    }

    /// Principal plus interest actually paid across the schedule.
    pub fn total_repayment(&self) -> Result<Decimal> {
        checked_total(
            self.breakdown
                .iter()
                .map(|row| row.amount_paid.checked_add(row.interest_paid)),
            "total repayment",
        )
    }
}

fn checked_total(
    mut amounts: impl Iterator<Item = Option<Decimal>>,
    what: &'static str,
) -> Result<Decimal> {
    amounts
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount?))
        .ok_or(LoanError::ArithmeticOverflow(what))
}
