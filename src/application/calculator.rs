use crate::domain::amortization::{compute_loan, compute_loan_with};
use crate::domain::loan::{LoanEstimate, LoanInputs};
use crate::domain::ports::{EstimateSinkBox, PaymentJitterBox};
use crate::error::Result;
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Holds the current inputs and keeps the published estimate in step with
/// them.
///
/// Every setter triggers a full recomputation. While salary is not positive
/// no estimate exists and the sink is told to clear whatever it shows.
pub struct LoanCalculator {
    inputs: LoanInputs,
    sink: EstimateSinkBox,
    jitter: Option<PaymentJitterBox>,
    latest: Option<LoanEstimate>,
}

impl LoanCalculator {
    /// Creates a calculator with the given starting inputs. Nothing is
    /// published until the first change or an explicit [`refresh`](Self::refresh).
    pub fn new(inputs: LoanInputs, sink: EstimateSinkBox) -> Self {
        Self {
            inputs,
            sink,
            jitter: None,
            latest: None,
        }
    }

    /// Perturbs each month's installment with factors from `jitter`.
    /// Estimates produced this way are not reproducible unless the jitter is.
    pub fn with_jitter(mut self, jitter: PaymentJitterBox) -> Self {
        self.jitter = Some(jitter);
        self
    }

    pub fn inputs(&self) -> &LoanInputs {
        &self.inputs
    }

    /// The estimate for the current inputs, if any.
    pub fn latest(&self) -> Option<&LoanEstimate> {
        self.latest.as_ref()
    }

    pub async fn set_salary(&mut self, salary: Decimal) -> Result<()> {
        self.inputs.monthly_salary = salary;
        self.refresh().await
    }

    pub async fn set_rate(&mut self, annual_rate_percent: Decimal) -> Result<()> {
        self.inputs.annual_rate_percent = annual_rate_percent;
        self.refresh().await
    }

    pub async fn set_tenor(&mut self, tenor_months: u32) -> Result<()> {
        self.inputs.tenor_months = tenor_months;
        self.refresh().await
    }

    pub async fn set_inputs(&mut self, inputs: LoanInputs) -> Result<()> {
        self.inputs = inputs;
        self.refresh().await
    }

    /// Recomputes from the current inputs and notifies the sink.
    ///
    /// A failed computation leaves no estimate behind.
    pub async fn refresh(&mut self) -> Result<()> {
        if !self.inputs.is_computable() {
            debug!(salary = %self.inputs.monthly_salary, "salary not positive, clearing estimate");
            self.latest = None;
            return self.sink.clear().await;
        }

        let computed = match self.jitter.as_mut() {
            Some(jitter) => compute_loan_with(&self.inputs, &mut **jitter),
            None => compute_loan(&self.inputs),
        };

        match computed {
            Ok(estimate) => {
                self.sink.publish(&estimate).await?;
                self.latest = Some(estimate);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "loan estimate failed");
                self.latest = None;
                self.sink.clear().await?;
                Err(e)
            }
        }
    }

    /// Consumes the calculator and returns the last estimate.
    pub fn into_latest(self) -> Option<LoanEstimate> {
        self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::PaymentJitter;
    use crate::error::LoanError;
    use crate::infrastructure::in_memory::{InMemoryEstimateSink, SinkEvent};
    use rust_decimal_macros::dec;

    fn calculator(sink: &InMemoryEstimateSink) -> LoanCalculator {
        LoanCalculator::new(LoanInputs::default(), Box::new(sink.clone()))
    }

    #[tokio::test]
    async fn test_salary_change_publishes_estimate() {
        let sink = InMemoryEstimateSink::new();
        let mut calc = calculator(&sink);

        calc.set_salary(dec!(1000)).await.unwrap();

        let latest = calc.latest().unwrap();
        assert_eq!(latest.summary.max_loan_amount, dec!(4000));
        assert_eq!(latest.breakdown.len(), 12);
        assert_eq!(sink.events().await, vec![SinkEvent::Published(latest.clone())]);
    }

    #[tokio::test]
    async fn test_every_input_change_recomputes() {
        let sink = InMemoryEstimateSink::new();
        let mut calc = calculator(&sink);

        calc.set_salary(dec!(1000)).await.unwrap();
        calc.set_rate(dec!(10)).await.unwrap();
        calc.set_tenor(24).await.unwrap();

        let published = sink.published().await;
        assert_eq!(published.len(), 3);
        assert_eq!(published[1].inputs.annual_rate_percent, dec!(10));
        assert_eq!(published[2].breakdown.len(), 24);
        assert_eq!(calc.latest(), published.last());
    }

    #[tokio::test]
    async fn test_rate_change_without_salary_publishes_nothing() {
        let sink = InMemoryEstimateSink::new();
        let mut calc = calculator(&sink);

        calc.set_rate(dec!(30)).await.unwrap();

        assert!(calc.latest().is_none());
        assert!(sink.published().await.is_empty());
        assert_eq!(sink.events().await, vec![SinkEvent::Cleared]);
    }

    #[tokio::test]
    async fn test_dropping_salary_clears_previous_estimate() {
        let sink = InMemoryEstimateSink::new();
        let mut calc = calculator(&sink);

        calc.set_salary(dec!(1000)).await.unwrap();
        calc.set_salary(Decimal::ZERO).await.unwrap();

        assert!(calc.latest().is_none());
        assert_eq!(sink.events().await.last(), Some(&SinkEvent::Cleared));
    }

    #[tokio::test]
    async fn test_invalid_tenor_surfaces_error_and_clears() {
        let sink = InMemoryEstimateSink::new();
        let mut calc = calculator(&sink);

        calc.set_salary(dec!(1000)).await.unwrap();
        let result = calc.set_tenor(0).await;

        assert!(matches!(result, Err(LoanError::InvalidInput(_))));
        assert!(calc.latest().is_none());
        assert_eq!(sink.events().await.last(), Some(&SinkEvent::Cleared));
    }

    #[tokio::test]
    async fn test_jitter_is_applied_when_configured() {
        struct Double;
        impl PaymentJitter for Double {
            fn next_factor(&mut self) -> Decimal {
                dec!(2)
            }
        }

        let sink = InMemoryEstimateSink::new();
        let mut calc = calculator(&sink).with_jitter(Box::new(Double));
        calc.set_inputs(LoanInputs::new(dec!(300), dec!(0), 4)).await.unwrap();

        let estimate = calc.into_latest().unwrap();
        assert_eq!(estimate.summary.monthly_payment, dec!(300));
        assert_eq!(estimate.breakdown[0].amount_paid, dec!(600));
        assert_eq!(estimate.breakdown[1].remaining_amount, Decimal::ZERO);
    }
}
