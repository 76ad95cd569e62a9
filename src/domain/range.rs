use crate::error::{LoanError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Bounded, stepped input such as the rate and tenor sliders.
///
/// Only obtainable through `new` or the built-in constants, so `step` is
/// always positive and `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    min: Decimal,
    max: Decimal,
    step: Decimal,
}

impl SliderRange {
    pub const RATE_PERCENT: Self = Self {
        min: dec!(0),
        max: dec!(50),
        step: dec!(0.5),
    };

    pub const TENOR_MONTHS: Self = Self {
        min: dec!(3),
        max: dec!(36),
        step: dec!(1),
    };

    pub fn new(min: Decimal, max: Decimal, step: Decimal) -> Result<Self> {
        if min > max {
            return Err(LoanError::InvalidInput(format!(
                "range minimum {min} exceeds maximum {max}"
            )));
        }
        if step <= Decimal::ZERO {
            return Err(LoanError::InvalidInput(format!(
                "range step must be positive, got {step}"
            )));
        }
        Ok(Self { min, max, step })
    }

    pub fn min(&self) -> Decimal {
        self.min
    }

    pub fn max(&self) -> Decimal {
        self.max
    }

    pub fn step(&self) -> Decimal {
        self.step
    }

    /// Clamps `value` into the range and moves it to the nearest step,
    /// counting steps from `min`.
    pub fn snap(&self, value: Decimal) -> Decimal {
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        (self.min + steps * self.step).min(self.max).normalize()
    }

    pub fn contains(&self, value: Decimal) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_snaps_to_half_percent() {
        let rate = SliderRange::RATE_PERCENT;
        assert_eq!(rate.snap(dec!(22)), dec!(22));
        assert_eq!(rate.snap(dec!(22.2)), dec!(22));
        assert_eq!(rate.snap(dec!(22.25)), dec!(22.5));
        assert_eq!(rate.snap(dec!(22.7)), dec!(22.5));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        assert_eq!(SliderRange::RATE_PERCENT.snap(dec!(-3)), dec!(0));
        assert_eq!(SliderRange::RATE_PERCENT.snap(dec!(75)), dec!(50));
        assert_eq!(SliderRange::TENOR_MONTHS.snap(dec!(1)), dec!(3));
        assert_eq!(SliderRange::TENOR_MONTHS.snap(dec!(48)), dec!(36));
    }

    #[test]
    fn test_step_that_does_not_divide_span_stays_inside() {
        let range = SliderRange::new(dec!(0), dec!(10), dec!(4)).unwrap();
        assert_eq!(range.snap(dec!(9.9)), dec!(8));
        assert_eq!(range.snap(dec!(10)), dec!(10));
    }

    #[test]
    fn test_invalid_ranges_are_rejected() {
        assert!(matches!(
            SliderRange::new(dec!(5), dec!(1), dec!(1)),
            Err(LoanError::InvalidInput(_))
        ));
        assert!(matches!(
            SliderRange::new(dec!(0), dec!(1), dec!(0)),
            Err(LoanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validated_range_exposes_its_bounds() {
        let range = SliderRange::new(dec!(1), dec!(9), dec!(2)).unwrap();
        assert_eq!((range.min(), range.max(), range.step()), (dec!(1), dec!(9), dec!(2)));
        assert_eq!(range.snap(dec!(4.2)), dec!(5));

        let tenor = SliderRange::TENOR_MONTHS;
        assert_eq!((tenor.min(), tenor.max(), tenor.step()), (dec!(3), dec!(36), dec!(1)));
    }

    #[test]
    fn test_negative_step_is_rejected() {
        assert!(matches!(
            SliderRange::new(dec!(0), dec!(10), dec!(-0.5)),
            Err(LoanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_contains() {
        assert!(SliderRange::TENOR_MONTHS.contains(dec!(3)));
        assert!(SliderRange::TENOR_MONTHS.contains(dec!(36)));
        assert!(!SliderRange::TENOR_MONTHS.contains(dec!(37)));
    }
}
