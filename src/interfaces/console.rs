use super::text::render_summary;
use crate::domain::currency::Currency;
use crate::domain::loan::LoanEstimate;
use crate::domain::ports::EstimateSink;
use crate::error::{LoanError, Result};
use async_trait::async_trait;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

pub const NO_ESTIMATE_HINT: &str = "Enter a net monthly salary above zero to see an estimate.";

/// Prints the summary sentences of every published estimate.
#[derive(Clone)]
pub struct ConsoleSink<W: Write + Send> {
    out: Arc<Mutex<W>>,
    currency: Currency,
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(out: W, currency: Currency) -> Self {
        Self {
            out: Arc::new(Mutex::new(out)),
            currency,
        }
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| LoanError::IoError(io::Error::other("console writer poisoned")))?;
        writeln!(out, "{text}")?;
        out.flush()?;
        Ok(())
    }
}

#[async_trait]
impl<W: Write + Send> EstimateSink for ConsoleSink<W> {
    async fn publish(&self, estimate: &LoanEstimate) -> Result<()> {
        self.write_text(&render_summary(estimate, &self.currency))
    }

    async fn clear(&self) -> Result<()> {
        self.write_text(NO_ESTIMATE_HINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::amortization::compute_loan;
    use crate::domain::loan::LoanInputs;
    use rust_decimal_macros::dec;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[tokio::test]
    async fn test_console_sink_prints_summary_and_hint() {
        let buffer = SharedBuffer::default();
        let sink = ConsoleSink::new(buffer.clone(), Currency::default());
        let estimate = compute_loan(&LoanInputs::new(dec!(1000), dec!(22), 12)).unwrap();

        sink.publish(&estimate).await.unwrap();
        sink.clear().await.unwrap();

        let output = buffer.contents();
        assert!(output.contains("You can borrow up to GH₵4,000.00"));
        assert!(output.ends_with(&format!("{NO_ESTIMATE_HINT}\n")));
    }
}
