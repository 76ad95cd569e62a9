use crate::domain::currency::Currency;
use crate::domain::loan::{DEFAULT_RATE_PERCENT, DEFAULT_TENOR_MONTHS, LoanInputs};
use crate::domain::range::SliderRange;
use crate::infrastructure::jitter::DEFAULT_SPREAD_BPS;
use rust_decimal::Decimal;

/// Settings shared by every front end.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorConfig {
    pub default_rate_percent: Decimal,
    pub default_tenor_months: u32,
    pub rate_range: SliderRange,
    pub tenor_range: SliderRange,
    /// Spread of the optional payment perturbation, in basis points.
    pub jitter_spread_bps: u32,
    pub currency: Currency,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            default_rate_percent: DEFAULT_RATE_PERCENT,
            default_tenor_months: DEFAULT_TENOR_MONTHS,
            rate_range: SliderRange::RATE_PERCENT,
            tenor_range: SliderRange::TENOR_MONTHS,
            jitter_spread_bps: DEFAULT_SPREAD_BPS,
            currency: Currency::default(),
        }
    }
}

impl CalculatorConfig {
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_jitter_spread(mut self, spread_bps: u32) -> Self {
        self.jitter_spread_bps = spread_bps;
        self
    }

    /// Inputs a fresh session starts from: no salary, default rate and tenor.
    pub fn initial_inputs(&self) -> LoanInputs {
        LoanInputs::new(
            Decimal::ZERO,
            self.default_rate_percent,
            self.default_tenor_months,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config() {
        let config = CalculatorConfig::default();
        assert_eq!(config.default_rate_percent, dec!(22));
        assert_eq!(config.default_tenor_months, 12);
        assert_eq!(config.rate_range.max(), dec!(50));
        assert_eq!(config.tenor_range.min(), dec!(3));
        assert_eq!(config.jitter_spread_bps, 500);
        assert_eq!(config.currency.code, "GHS");
        assert_eq!(config.initial_inputs(), LoanInputs::default());
    }

    #[test]
    fn test_builders() {
        let config = CalculatorConfig::default()
            .with_currency(Currency::new("USD", "$"))
            .with_jitter_spread(100);
        assert_eq!(config.currency.symbol, "$");
        assert_eq!(config.jitter_spread_bps, 100);
    }
}
