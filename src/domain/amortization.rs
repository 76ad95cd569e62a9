//! Fixed-installment amortization.
//!
//! The borrow limit is a fixed multiple of salary and the installment comes
//! from the annuity formula `P·r·(1+r)^n / ((1+r)^n − 1)`. The schedule then
//! splits each installment into interest on the running balance and principal.
//!
//! The displayed remaining amount is clamped at zero, but interest is always
//! charged on the raw running balance. With an exact installment the two only
//! differ by rounding noise; once a perturbed installment overshoots, later
//! rows show zero remaining while interest goes negative.

use super::loan::{BreakdownRow, LoanEstimate, LoanInputs, LoanSummary, SALARY_MULTIPLIER};
use super::ports::{NoJitter, PaymentJitter};
use crate::error::{LoanError, Result};
use rust_decimal::{Decimal, MathematicalOps};
use tracing::debug;

/// Deterministic estimate for `inputs`.
///
/// Callers are expected to skip this entirely when salary is not positive;
/// it is not an error to call it anyway.
pub fn compute_loan(inputs: &LoanInputs) -> Result<LoanEstimate> {
    compute_loan_with(inputs, &mut NoJitter)
}

/// Same as [`compute_loan`], but every month's installment is scaled by a
/// factor drawn from `jitter`. The summary keeps the unscaled installment.
pub fn compute_loan_with(
    inputs: &LoanInputs,
    jitter: &mut dyn PaymentJitter,
) -> Result<LoanEstimate> {
    validate(inputs)?;

    let rate = inputs.monthly_rate();
    let tenor = inputs.tenor_months;
    let principal = inputs
        .monthly_salary
        .checked_mul(SALARY_MULTIPLIER)
        .ok_or(LoanError::ArithmeticOverflow("maximum loan amount"))?;
    let payment = annuity_payment(principal, rate, tenor)?;

    let mut remaining = principal;
    let mut breakdown = Vec::with_capacity(tenor as usize);
    for month in 1..=tenor {
        let installment = payment
            .checked_mul(jitter.next_factor())
            .ok_or(LoanError::ArithmeticOverflow("installment"))?;
        let interest_paid = remaining
            .checked_mul(rate)
            .ok_or(LoanError::ArithmeticOverflow("interest"))?;
        let amount_paid = installment
            .checked_sub(interest_paid)
            .ok_or(LoanError::ArithmeticOverflow("principal repaid"))?;
        remaining = remaining
            .checked_sub(amount_paid)
            .ok_or(LoanError::ArithmeticOverflow("remaining balance"))?;

        breakdown.push(BreakdownRow {
            month,
            amount_paid,
            interest_paid,
            remaining_amount: remaining.max(Decimal::ZERO),
        });
    }

    debug!(
        salary = %inputs.monthly_salary,
        rate = %inputs.annual_rate_percent,
        tenor,
        max_loan = %principal,
        payment = %payment,
        "computed loan estimate"
    );

    Ok(LoanEstimate {
        inputs: *inputs,
        summary: LoanSummary {
            max_loan_amount: principal,
            monthly_payment: payment,
        },
        breakdown,
    })
}

fn validate(inputs: &LoanInputs) -> Result<()> {
    if inputs.tenor_months == 0 {
        return Err(LoanError::InvalidInput(
            "tenor must be at least one month".to_string(),
        ));
    }
    if inputs.monthly_rate() <= Decimal::NEGATIVE_ONE {
        return Err(LoanError::InvalidInput(format!(
            "annual rate of {}% leaves no balance to compound",
            inputs.annual_rate_percent
        )));
    }
    Ok(())
}

/// Installment that retires `principal` over `tenor` months at `rate`.
///
/// A zero rate (or one too small to move the growth factor) falls back to
/// straight-line repayment instead of dividing zero by zero.
fn annuity_payment(principal: Decimal, rate: Decimal, tenor: u32) -> Result<Decimal> {
    let straight_line = || principal / Decimal::from(tenor);
    if rate.is_zero() {
        return Ok(straight_line());
    }

    let growth = (Decimal::ONE + rate)
        .checked_powu(u64::from(tenor))
        .ok_or(LoanError::ArithmeticOverflow("compound growth factor"))?;
    if growth == Decimal::ONE {
        return Ok(straight_line());
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(growth))
        .and_then(|v| v.checked_div(growth - Decimal::ONE))
        .ok_or(LoanError::ArithmeticOverflow("monthly payment"))
}
