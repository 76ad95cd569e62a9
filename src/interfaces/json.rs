use crate::domain::currency::Currency;
use crate::domain::loan::LoanEstimate;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct EstimateDocument<'a> {
    currency: &'a str,
    #[serde(flatten)]
    estimate: &'a LoanEstimate,
}

/// Pretty-prints `estimate` tagged with the display currency code.
pub fn write_estimate<W: Write>(mut out: W, estimate: &LoanEstimate, currency: &Currency) -> Result<()> {
    let document = EstimateDocument {
        currency: &currency.code,
        estimate,
    };
    serde_json::to_writer_pretty(&mut out, &document)?;
    writeln!(out)?;
    Ok(())
}
