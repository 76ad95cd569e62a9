//! Line-oriented session standing in for the calculator form.
//!
//! Each accepted command changes one input and the calculator republishes
//! the summary through its sink. `breakdown` prints the monthly table for
//! the current estimate.

use super::console::NO_ESTIMATE_HINT;
use super::text::{render_breakdown, render_summary};
use crate::application::calculator::LoanCalculator;
use crate::config::CalculatorConfig;
use crate::domain::range::SliderRange;
use crate::error::{LoanError, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

pub const HELP: &str = "\
Commands:
  salary <amount>   set the net monthly salary
  rate <percent>    set the annual interest rate (0-50, step 0.5)
  tenor <months>    set the loan tenor (3-36)
  breakdown         show the month-by-month payment breakdown
  show              repeat the current estimate
  help              show this message
  quit              leave the session";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Salary(Decimal),
    Rate(Decimal),
    Tenor(Decimal),
    Breakdown,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = LoanError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let keyword = words
            .next()
            .ok_or_else(|| LoanError::ParseError("empty command".to_string()))?
            .to_lowercase();
        let argument = words.next();
        if words.next().is_some() {
            return Err(LoanError::ParseError(format!(
                "too many arguments for '{keyword}'"
            )));
        }

        let number = |name: &str| -> Result<Decimal> {
            let raw = argument
                .ok_or_else(|| LoanError::ParseError(format!("'{name}' needs a value")))?;
            Decimal::from_str(raw)
                .map_err(|_| LoanError::ParseError(format!("'{raw}' is not a number")))
        };

        match keyword.as_str() {
            "salary" => Ok(Command::Salary(number("salary")?)),
            "rate" => Ok(Command::Rate(number("rate")?)),
            "tenor" => Ok(Command::Tenor(number("tenor")?)),
            "breakdown" => Ok(Command::Breakdown),
            "show" => Ok(Command::Show),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(LoanError::ParseError(format!("unknown command '{other}'"))),
        }
    }
}

/// Reads commands from `input` until end of input or `quit`.
///
/// Bad commands and rejected inputs are reported on `out` and the session
/// carries on.
pub async fn run_session<R, W>(
    input: R,
    mut out: W,
    calculator: &mut LoanCalculator,
    config: &CalculatorConfig,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    calculator.refresh().await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "Error: {e}")?;
                continue;
            }
        };
        debug!(?command, "interactive command");

        let outcome = match command {
            Command::Salary(salary) => calculator.set_salary(salary).await,
            Command::Rate(rate) => {
                let rate = snap_noting(&mut out, "Interest rate", "%", rate, &config.rate_range)?;
                calculator.set_rate(rate).await
            }
            Command::Tenor(tenor) => {
                let tenor =
                    snap_noting(&mut out, "Loan tenor", " months", tenor, &config.tenor_range)?;
                match tenor.to_u32() {
                    Some(months) => calculator.set_tenor(months).await,
                    None => Err(LoanError::InvalidInput(format!(
                        "tenor {tenor} is not a whole number of months"
                    ))),
                }
            }
            Command::Breakdown => {
                match calculator.latest() {
                    Some(estimate) => {
                        writeln!(out, "Payment Breakdown")?;
                        write!(out, "{}", render_breakdown(&estimate.breakdown, &config.currency))?;
                    }
                    None => writeln!(out, "{NO_ESTIMATE_HINT}")?,
                }
                Ok(())
            }
            Command::Show => {
                match calculator.latest() {
                    Some(estimate) => writeln!(out, "{}", render_summary(estimate, &config.currency))?,
                    None => writeln!(out, "{NO_ESTIMATE_HINT}")?,
                }
                Ok(())
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                Ok(())
            }
            Command::Quit => break,
        };

        if let Err(e) = outcome {
            writeln!(out, "Error: {e}")?;
        }
        out.flush()?;
    }

    Ok(())
}

/// Applies the slider constraint, telling the user when the value moved.
fn snap_noting<W: Write>(
    out: &mut W,
    label: &str,
    unit: &str,
    value: Decimal,
    range: &SliderRange,
) -> Result<Decimal> {
    let snapped = range.snap(value);
    if snapped != value {
        let reason = if range.contains(value) {
            "rounded to the nearest step"
        } else {
            "kept within range"
        };
        writeln!(out, "{label} adjusted to {snapped}{unit} ({reason}).")?;
    }
    Ok(snapped)
}
