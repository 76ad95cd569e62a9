use crate::domain::loan::LoanEstimate;
use crate::domain::ports::EstimateSink;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Published(LoanEstimate),
    Cleared,
}

/// Records every notification it receives, in order.
///
/// Clones share the same log, so a test can hand one clone to a
/// `LoanCalculator` and inspect the other.
#[derive(Default, Clone)]
pub struct InMemoryEstimateSink {
    events: Arc<RwLock<Vec<SinkEvent>>>,
}

impl InMemoryEstimateSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events(&self) -> Vec<SinkEvent> {
        self.events.read().await.clone()
    }

    /// Published estimates only, oldest first.
    pub async fn published(&self) -> Vec<LoanEstimate> {
        self.events
            .read()
            .await
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Published(estimate) => Some(estimate.clone()),
                SinkEvent::Cleared => None,
            })
            .collect()
    }
}

#[async_trait]
impl EstimateSink for InMemoryEstimateSink {
    async fn publish(&self, estimate: &LoanEstimate) -> Result<()> {
        let mut events = self.events.write().await;
        events.push(SinkEvent::Published(estimate.clone()));
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut events = self.events.write().await;
        events.push(SinkEvent::Cleared);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::amortization::compute_loan;
    use crate::domain::loan::LoanInputs;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_in_memory_sink_records_in_order() {
        let sink = InMemoryEstimateSink::new();
        let estimate = compute_loan(&LoanInputs::new(dec!(500), dec!(20), 6)).unwrap();

        sink.publish(&estimate).await.unwrap();
        sink.clear().await.unwrap();

        assert_eq!(
            sink.events().await,
            vec![SinkEvent::Published(estimate.clone()), SinkEvent::Cleared]
        );
        assert_eq!(sink.published().await, vec![estimate]);
    }

    #[tokio::test]
    async fn test_clones_share_the_log() {
        let sink = InMemoryEstimateSink::new();
        let other = sink.clone();

        other.clear().await.unwrap();

        assert_eq!(sink.events().await, vec![SinkEvent::Cleared]);
    }
}
