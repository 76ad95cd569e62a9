use crate::domain::ports::PaymentJitter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// Default spread of the payment perturbation: ±5 %.
pub const DEFAULT_SPREAD_BPS: u32 = 500;

/// Uniform multiplicative noise on each installment, drawn in whole basis
/// points from `1 - spread` to `1 + spread`.
///
/// Output is non-deterministic unless built with [`RandomJitter::seeded`].
/// Never use it where estimates must be reproducible.
pub struct RandomJitter {
    rng: StdRng,
    spread_bps: i64,
}

impl RandomJitter {
    pub fn new(spread_bps: u32) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            spread_bps: i64::from(spread_bps),
        }
    }

    pub fn seeded(spread_bps: u32, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            spread_bps: i64::from(spread_bps),
        }
    }
}

impl PaymentJitter for RandomJitter {
    fn next_factor(&mut self) -> Decimal {
        let offset = self.rng.gen_range(-self.spread_bps..=self.spread_bps);
        Decimal::ONE + Decimal::new(offset, 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_factors_stay_within_spread() {
        let mut jitter = RandomJitter::new(DEFAULT_SPREAD_BPS);
        for _ in 0..1000 {
            let factor = jitter.next_factor();
            assert!(factor >= dec!(0.95) && factor <= dec!(1.05), "{factor}");
        }
    }

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let mut a = RandomJitter::seeded(DEFAULT_SPREAD_BPS, 7);
        let mut b = RandomJitter::seeded(DEFAULT_SPREAD_BPS, 7);
        let first: Vec<Decimal> = (0..12).map(|_| a.next_factor()).collect();
        let second: Vec<Decimal> = (0..12).map(|_| b.next_factor()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_spread_is_identity() {
        let mut jitter = RandomJitter::seeded(0, 1);
        assert_eq!(jitter.next_factor(), Decimal::ONE);
    }
}
