use serde::{Deserialize, Serialize};

/// Known store performance multipliers. Stores not listed fall back to
/// `0.8 + (store_id mod 10) * 0.1`.
pub const STORE_FACTORS: &[(i64, f64)] = &[
    (1, 1.2), // high performing
    (2, 0.9), // average
    (3, 1.5), // top performing
    (4, 0.7), // underperforming
    (5, 1.1), // good performing
];

/// Price ratio above which demand is treated as price-insensitive.
pub const ELASTIC_RATIO_THRESHOLD: f64 = 0.8;
pub const INELASTIC_MULTIPLIER: f64 = 1.2;
pub const ELASTIC_MULTIPLIER: f64 = 0.9;

pub const FEATURED_BONUS: f64 = 1.5;
pub const DISPLAY_BONUS: f64 = 1.3;

pub fn store_multiplier(store_id: i64) -> f64 {
    STORE_FACTORS
        .iter()
        .find(|(id, _)| *id == store_id)
        .map(|(_, factor)| *factor)
        .unwrap_or_else(|| 0.8 + store_id.rem_euclid(10) as f64 * 0.1)
}

pub fn sku_multiplier(sku_id: i64) -> f64 {
    sku_id.rem_euclid(5) as f64 + 0.5
}

/// A smaller discount (higher base/total ratio) means less price sensitivity.
pub fn price_elasticity(price_ratio: f64) -> f64 {
    if price_ratio > ELASTIC_RATIO_THRESHOLD {
        INELASTIC_MULTIPLIER
    } else {
        ELASTIC_MULTIPLIER
    }
}

pub fn featured_bonus(is_featured_sku: bool) -> f64 {
    if is_featured_sku {
        FEATURED_BONUS
    } else {
        1.0
    }
}

pub fn display_bonus(is_display_sku: bool) -> f64 {
    if is_display_sku {
        DISPLAY_BONUS
    } else {
        1.0
    }
}

/// `month` is 1-12; December wraps to the lowest factor.
pub fn seasonal_factor(month: u32) -> f64 {
    0.9 + (month % 12) as f64 * 0.02
}

/// Every intermediate value of one prediction, in evaluation order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Factors {
    pub base_units: u32,
    pub store_multiplier: f64,
    pub sku_multiplier: f64,
    pub price_ratio: f64,
    pub price_elasticity: f64,
    pub featured_bonus: f64,
    pub display_bonus: f64,
    pub seasonal_factor: f64,
    pub random_factor: f64,
}

impl Factors {
    /// Product of the base units and the six deterministic multipliers.
    pub fn raw(&self) -> f64 {
        self.base_units as f64
            * self.store_multiplier
            * self.sku_multiplier
            * self.price_elasticity
            * self.featured_bonus
            * self.display_bonus
            * self.seasonal_factor
    }

    pub fn units(&self) -> u32 {
        (self.raw() * self.random_factor).round() as u32
    }
}
