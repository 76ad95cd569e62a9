use super::loan::LoanEstimate;
use crate::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Presentation collaborator that receives every recomputed estimate.
#[async_trait]
pub trait EstimateSink: Send + Sync {
    async fn publish(&self, estimate: &LoanEstimate) -> Result<()>;
    /// Called when inputs no longer produce an estimate.
    async fn clear(&self) -> Result<()>;
}

/// Source of a multiplicative factor applied to each month's payment.
pub trait PaymentJitter: Send {
    fn next_factor(&mut self) -> Decimal;
}

pub type EstimateSinkBox = Box<dyn EstimateSink>;
pub type PaymentJitterBox = Box<dyn PaymentJitter>;

/// Leaves every payment untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoJitter;

impl PaymentJitter for NoJitter {
    fn next_factor(&mut self) -> Decimal {
        Decimal::ONE
    }
}
