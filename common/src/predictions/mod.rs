pub mod factors;
pub mod sources;

pub use factors::*;
pub use sources::*;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{validate_form, FormValues, PredictionError, PredictionRequest};

/// A finished prediction together with its inputs and factor breakdown.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Prediction {
    pub units: u32,
    pub request: PredictionRequest,
    pub factors: Factors,
}

/// The unit sales heuristic with an injected clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct Predictor<C: Clock = SystemClock> {
    clock: C,
}

impl Predictor<SystemClock> {
    pub fn new() -> Self {
        Predictor { clock: SystemClock }
    }
}

impl<C: Clock> Predictor<C> {
    pub fn with_clock(clock: C) -> Self {
        Predictor { clock }
    }

    /// Predicts units sold, drawing randomness from `source`.
    pub fn predict<S: RandomSource>(
        &self,
        request: &PredictionRequest,
        source: &mut S,
    ) -> Result<u32, PredictionError> {
        self.predict_with_breakdown(request, source)
            .map(|prediction| prediction.units)
    }

    /// Validates raw form input, then predicts from it.
    pub fn submit<S: RandomSource>(
        &self,
        form: &FormValues,
        source: &mut S,
    ) -> Result<Prediction, PredictionError> {
        let request = validate_form(form)?;
        self.predict_with_breakdown(&request, source)
    }

    pub fn predict_with_breakdown<S: RandomSource>(
        &self,
        request: &PredictionRequest,
        source: &mut S,
    ) -> Result<Prediction, PredictionError> {
        check_request(request)?;

        // Draw order matters for seeded sources: base units first, variability last.
        let base_units = source.base_units();
        let price_ratio = request.price_ratio();
        let mut factors = Factors {
            base_units,
            store_multiplier: store_multiplier(request.store_id),
            sku_multiplier: sku_multiplier(request.sku_id),
            price_ratio,
            price_elasticity: price_elasticity(price_ratio),
            featured_bonus: featured_bonus(request.is_featured_sku),
            display_bonus: display_bonus(request.is_display_sku),
            seasonal_factor: seasonal_factor(self.clock.current_month()),
            random_factor: 1.0,
        };
        factors.random_factor = source.random_factor();

        let units = factors.units();
        debug!(
            "Predicted {} units for store {} sku {}: {:?}",
            units, request.store_id, request.sku_id, factors
        );

        Ok(Prediction {
            units,
            request: *request,
            factors,
        })
    }
}

/// Predicts with the system clock and the thread-local RNG.
#[cfg(feature = "thread_rng")]
pub fn predict(request: &PredictionRequest) -> Result<u32, PredictionError> {
    Predictor::new().predict(request, &mut rand::rng())
}

/// Preconditions the predictor enforces on its own, independent of form
/// validation.
pub fn check_request(request: &PredictionRequest) -> Result<(), PredictionError> {
    if request.store_id <= 0 || request.sku_id <= 0 {
        return Err(PredictionError::computation(
            "Store ID and SKU ID must be positive numbers",
        ));
    }

    let prices_positive = request.total_price.is_finite()
        && request.base_price.is_finite()
        && request.total_price > 0.0
        && request.base_price > 0.0;
    if !prices_positive {
        return Err(PredictionError::computation(
            "Prices must be positive numbers",
        ));
    }

    if request.base_price > request.total_price {
        return Err(PredictionError::computation(
            "Base price should not exceed total price",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn request(store_id: i64, sku_id: i64, total_price: f64, base_price: f64) -> PredictionRequest {
        PredictionRequest {
            store_id,
            sku_id,
            total_price,
            base_price,
            is_featured_sku: false,
            is_display_sku: false,
        }
    }

    #[test]
    fn test_pinned_prediction_is_exact() {
        let predictor = Predictor::with_clock(FixedClock::new(6));
        let mut draws = FixedDraws::new(10, 1.0);
        let req = PredictionRequest {
            is_featured_sku: true,
            ..request(3, 12, 100.0, 90.0)
        };

        let prediction = predictor.predict_with_breakdown(&req, &mut draws).unwrap();
        assert_eq!(prediction.factors.store_multiplier, 1.5);
        assert_eq!(prediction.factors.sku_multiplier, 2.5);
        assert_eq!(prediction.factors.price_elasticity, 1.2);
        assert_eq!(prediction.factors.featured_bonus, 1.5);
        assert_eq!(prediction.factors.display_bonus, 1.0);
        assert!((prediction.factors.seasonal_factor - 1.02).abs() < 1e-12);
        // 10 * 1.5 * 2.5 * 1.2 * 1.5 * 1.0 * 1.02 = 68.85
        assert_eq!(prediction.units, 69);
        assert_eq!(prediction.request, req);
    }

    #[test]
    fn test_random_factor_scales_result() {
        let predictor = Predictor::with_clock(FixedClock::new(12));
        let req = request(2, 5, 10.0, 5.0);
        // 5 * 0.9 * 0.5 * 0.9 * 0.9 = 1.8225
        let low = predictor.predict(&req, &mut FixedDraws::new(5, 0.85)).unwrap();
        let high = predictor.predict(&req, &mut FixedDraws::new(5, 1.15)).unwrap();
        assert_eq!(low, 2);
        assert_eq!(high, 2);

        let busy = PredictionRequest {
            is_featured_sku: true,
            is_display_sku: true,
            ..request(3, 4, 10.0, 9.0)
        };
        // 19 * 1.5 * 4.5 * 1.2 * 1.5 * 1.3 * 0.9 = 270.0945
        assert_eq!(predictor.predict(&busy, &mut FixedDraws::new(19, 1.0)).unwrap(), 270);
    }

    #[test]
    fn test_submit_validates_first() {
        let predictor = Predictor::with_clock(FixedClock::new(1));
        let mut draws = FixedDraws::new(10, 1.0);

        let error = predictor
            .submit(&FormValues::new("0", "1", "100", "50"), &mut draws)
            .unwrap_err();
        assert!(error.is_validation());

        let prediction = predictor
            .submit(&FormValues::new("1", "1", "100", "50"), &mut draws)
            .unwrap();
        // 10 * 1.2 * 1.5 * 0.9 * 0.92 = 14.904
        assert_eq!(prediction.units, 15);
    }

    #[test]
    fn test_rejects_bad_identifiers() {
        let predictor = Predictor::new();
        let error = predictor
            .predict(&request(0, 1, 10.0, 5.0), &mut FixedDraws::new(5, 1.0))
            .unwrap_err();
        assert_eq!(
            error,
            PredictionError::computation("Store ID and SKU ID must be positive numbers")
        );
        assert!(!error.is_validation());

        assert!(predictor
            .predict(&request(1, -3, 10.0, 5.0), &mut FixedDraws::new(5, 1.0))
            .is_err());
    }

    #[test]
    fn test_rejects_bad_prices() {
        let predictor = Predictor::new();
        let mut draws = FixedDraws::new(5, 1.0);
        for req in [
            request(1, 1, 0.0, 5.0),
            request(1, 1, 10.0, -1.0),
            request(1, 1, f64::NAN, 5.0),
            request(1, 1, f64::INFINITY, 5.0),
        ] {
            assert_eq!(
                predictor.predict(&req, &mut draws).unwrap_err(),
                PredictionError::computation("Prices must be positive numbers")
            );
        }

        assert_eq!(
            predictor
                .predict(&request(1, 1, 10.0, 10.5), &mut draws)
                .unwrap_err(),
            PredictionError::computation("Base price should not exceed total price")
        );
    }

    #[test]
    fn test_seeded_predictions_stay_in_bounds() {
        let lower = (5.0_f64 * 0.7 * 0.5 * 0.9 * 1.0 * 1.0 * 0.9 * 0.85).round() as u32;
        let upper = (19.0_f64 * 1.7 * 4.5 * 1.2 * 1.5 * 1.3 * 1.12 * 1.15).round() as u32;

        let mut rng = StdRng::seed_from_u64(7);
        for month in 1..=12 {
            let predictor = Predictor::with_clock(FixedClock::new(month));
            for store_id in 1..=20 {
                for sku_id in 1..=10 {
                    let req = PredictionRequest {
                        is_featured_sku: sku_id % 2 == 0,
                        is_display_sku: store_id % 3 == 0,
                        ..request(store_id, sku_id, 100.0, 50.0 + sku_id as f64 * 5.0)
                    };
                    let units = predictor.predict(&req, &mut rng).unwrap();
                    assert!(
                        (lower..=upper).contains(&units),
                        "{units} outside [{lower}, {upper}] for {req:?}"
                    );
                }
            }
        }
    }

    #[cfg(feature = "thread_rng")]
    #[test]
    fn test_default_predict_uses_system_sources() {
        let req = request(1, 1, 100.0, 50.0);
        for _ in 0..50 {
            let units = predict(&req).unwrap();
            // 19 * 1.2 * 1.5 * 0.9 * 1.12 * 1.15 rounds to 40
            assert!(units <= 40);
        }
    }
}
