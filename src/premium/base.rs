//! Shared premium arithmetic for every device category

use crate::error::{PremiumError, Result};
use crate::rates::RateConfig;

/// Category-specific parameters fed into the shared formula
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryTerms {
    /// Multiplier read from the rate config for this category
    pub multiplier: f64,

    /// Additive category term (altitude risk, lens value, ...)
    pub extra: f64,
}

impl CategoryTerms {
    pub fn new(multiplier: f64, extra: f64) -> Self {
        Self { multiplier, extra }
    }
}

/// Base premium for one device
///
/// (per_kg * weight + per_price * price + extra) * multiplier * tier factor
///
/// Fails with `Configuration` if `rates` does not validate. Input errors carry
/// an empty device id; calculators attach theirs with `PremiumError::for_device`.
pub fn compute_base(weight_kg: f64, price: f64, terms: CategoryTerms, rates: &RateConfig) -> Result<f64> {
    rates.validate()?;
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(PremiumError::invalid_input(
            "",
            format!("weight must be positive, got {}", weight_kg),
        ));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(PremiumError::invalid_input(
            "",
            format!("price must be non-negative, got {}", price),
        ));
    }

    let weight_term = rates.base_rate_per_kg * weight_kg;
    let price_term = rates.base_rate_per_price * price;
    let tier_factor = rates.weight_tier_factor(weight_kg);

    Ok((weight_term + price_term + terms.extra) * terms.multiplier * tier_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::WeightTier;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn scenario_rates() -> RateConfig {
        RateConfig::new(2.0, 0.01, 1.5, 1.2)
    }

    #[test]
    fn test_scenario_drone_base() {
        // (2.0 * 10 + 0.01 * 5000) * 1.5 = 105
        let premium = compute_base(10.0, 5000.0, CategoryTerms::new(1.5, 0.0), &scenario_rates()).unwrap();
        assert_relative_eq!(premium, 105.0, epsilon = 1e-9);
    }

    #[test]
    fn test_extra_term_and_tier() {
        let rates = scenario_rates().with_weight_tiers(vec![
            WeightTier { up_to_kg: Some(5.0), factor: 1.0 },
            WeightTier { up_to_kg: None, factor: 1.2 },
        ]);
        // (20 + 50 + 6) * 1.5 * 1.2
        let premium = compute_base(10.0, 5000.0, CategoryTerms::new(1.5, 6.0), &rates).unwrap();
        assert_relative_eq!(premium, 136.8, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_price_is_allowed() {
        let premium = compute_base(2.0, 0.0, CategoryTerms::new(1.0, 0.0), &scenario_rates()).unwrap();
        assert_relative_eq!(premium, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_dimensions() {
        let rates = scenario_rates();
        let terms = CategoryTerms::new(1.5, 0.0);

        assert!(matches!(compute_base(0.0, 100.0, terms, &rates), Err(PremiumError::InvalidInput { .. })));
        assert!(matches!(compute_base(-1.0, 100.0, terms, &rates), Err(PremiumError::InvalidInput { .. })));
        assert!(matches!(compute_base(1.0, -0.01, terms, &rates), Err(PremiumError::InvalidInput { .. })));
        assert!(matches!(compute_base(f64::NAN, 100.0, terms, &rates), Err(PremiumError::InvalidInput { .. })));
        assert!(matches!(compute_base(1.0, f64::INFINITY, terms, &rates), Err(PremiumError::InvalidInput { .. })));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let terms = CategoryTerms::new(1.5, 0.0);

        let negative = RateConfig::new(-2.0, 0.01, 1.5, 1.2);
        assert!(matches!(compute_base(10.0, 100.0, terms, &negative), Err(PremiumError::Configuration(_))));

        let mut nan_price_rate = scenario_rates();
        nan_price_rate.base_rate_per_price = f64::NAN;
        assert!(matches!(compute_base(10.0, 100.0, terms, &nan_price_rate), Err(PremiumError::Configuration(_))));
    }

    fn tiered_rates() -> RateConfig {
        scenario_rates().with_weight_tiers(vec![
            WeightTier { up_to_kg: Some(5.0), factor: 1.0 },
            WeightTier { up_to_kg: Some(10.0), factor: 1.2 },
            WeightTier { up_to_kg: Some(20.0), factor: 1.6 },
            WeightTier { up_to_kg: None, factor: 2.5 },
        ])
    }

    proptest! {
        #[test]
        fn prop_monotone_in_weight(w in 0.01f64..100.0, dw in 0.0f64..50.0, price in 0.0f64..100_000.0) {
            let rates = tiered_rates();
            let terms = CategoryTerms::new(1.5, 3.0);
            let lower = compute_base(w, price, terms, &rates).unwrap();
            let higher = compute_base(w + dw, price, terms, &rates).unwrap();
            prop_assert!(higher >= lower);
        }

        #[test]
        fn prop_monotone_in_price(w in 0.01f64..100.0, price in 0.0f64..100_000.0, dp in 0.0f64..50_000.0) {
            let rates = tiered_rates();
            let terms = CategoryTerms::new(1.2, 0.0);
            let lower = compute_base(w, price, terms, &rates).unwrap();
            let higher = compute_base(w, price + dp, terms, &rates).unwrap();
            prop_assert!(higher >= lower);
        }

        #[test]
        fn prop_deterministic(w in 0.01f64..100.0, price in 0.0f64..100_000.0) {
            let rates = tiered_rates();
            let terms = CategoryTerms::new(1.5, 0.0);
            let first = compute_base(w, price, terms, &rates).unwrap();
            let second = compute_base(w, price, terms, &rates).unwrap();
            prop_assert_eq!(first.to_bits(), second.to_bits());
        }
    }
}
