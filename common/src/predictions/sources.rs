use chrono::{Datelike, Local};
use rand::Rng;

/// Inclusive lower and exclusive upper bound of the base unit draw.
pub const BASE_UNITS_RANGE: std::ops::Range<u32> = 5..20;

/// Bounds of the real-world variability multiplier.
pub const RANDOM_FACTOR_RANGE: std::ops::Range<f64> = 0.85..1.15;

/// The two random draws a prediction makes.
pub trait RandomSource {
    /// Uniform integer in `BASE_UNITS_RANGE`.
    fn base_units(&mut self) -> u32;

    /// Uniform float in `RANDOM_FACTOR_RANGE`.
    fn random_factor(&mut self) -> f64;
}

impl<R: Rng> RandomSource for R {
    fn base_units(&mut self) -> u32 {
        self.random_range(BASE_UNITS_RANGE)
    }

    fn random_factor(&mut self) -> f64 {
        self.random_range(RANDOM_FACTOR_RANGE)
    }
}

/// Pins both draws, for reproducible predictions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDraws {
    pub base_units: u32,
    pub random_factor: f64,
}

impl FixedDraws {
    pub fn new(base_units: u32, random_factor: f64) -> Self {
        FixedDraws {
            base_units,
            random_factor,
        }
    }
}

// Not an `Rng`, so this does not overlap the blanket impl.
impl RandomSource for FixedDraws {
    fn base_units(&mut self) -> u32 {
        self.base_units
    }

    fn random_factor(&mut self) -> f64 {
        self.random_factor
    }
}

/// Source of the current calendar month (1-12).
pub trait Clock {
    fn current_month(&self) -> u32;
}

/// Reads the local wall clock at call time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_month(&self) -> u32 {
        Local::now().month()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    month: u32,
}

impl FixedClock {
    /// `month` is clamped into 1-12.
    pub fn new(month: u32) -> Self {
        FixedClock {
            month: month.clamp(1, 12),
        }
    }
}

impl Clock for FixedClock {
    fn current_month(&self) -> u32 {
        self.month
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_rng_draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let units = rng.base_units();
            assert!(BASE_UNITS_RANGE.contains(&units));
            let factor = rng.random_factor();
            assert!(RANDOM_FACTOR_RANGE.contains(&factor));
        }
    }

    #[test]
    fn test_fixed_draws_repeat() {
        let mut draws = FixedDraws::new(12, 1.0);
        assert_eq!(draws.base_units(), 12);
        assert_eq!(draws.base_units(), 12);
        assert_eq!(draws.random_factor(), 1.0);
    }

    #[test]
    fn test_clocks_report_calendar_months() {
        assert!((1..=12).contains(&SystemClock.current_month()));
        assert_eq!(FixedClock::new(11).current_month(), 11);
        assert_eq!(FixedClock::new(0).current_month(), 1);
        assert_eq!(FixedClock::new(13).current_month(), 12);
    }
}
