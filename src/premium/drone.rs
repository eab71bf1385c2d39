//! Drone premium calculator

use super::base::{compute_base, CategoryTerms};
use super::liability;
use super::result::PremiumResult;
use crate::device::{DeviceCategory, DeviceRecord};
use crate::error::Result;
use crate::rates::RateConfig;

/// Drone multiplier plus the altitude-risk term
pub fn category_terms(record: &DeviceRecord, rates: &RateConfig) -> Result<CategoryTerms> {
    let altitude = record.optional_amount("max_altitude_m", record.max_altitude_m)?;
    Ok(CategoryTerms::new(
        rates.drone_multiplier,
        rates.drone_altitude_rate * altitude,
    ))
}

/// Price a single drone record
pub fn compute(record: &DeviceRecord, rates: &RateConfig) -> Result<PremiumResult> {
    super::expect_category(record, DeviceCategory::Drone)?;

    let terms = category_terms(record, rates)?;
    let base = compute_base(record.weight_kg, record.price, terms, rates)
        .map_err(|e| e.for_device(&record.id))?;

    let result = PremiumResult::new(&record.id, DeviceCategory::Drone, base)
        .with_liability_layer(liability::price_layer(record, rates)?);

    log::debug!(
        "Drone {}: base premium {:.2}, TPL layer {:?}",
        record.id,
        result.base_premium,
        result.liability_premium
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PremiumError;
    use crate::rates::{load_default_rates, WeightTier};
    use approx::assert_relative_eq;

    #[test]
    fn test_scenario_drone() {
        let rates = RateConfig::new(2.0, 0.01, 1.5, 1.0);
        let record = DeviceRecord::drone("SCN-001", 10.0, 5000.0);

        let result = compute(&record, &rates).unwrap();
        assert_eq!(result.device_id, "SCN-001");
        assert_eq!(result.category, DeviceCategory::Drone);
        assert_relative_eq!(result.base_premium, 105.0, epsilon = 1e-9);
        assert!(result.adjustments.is_empty());
        assert_eq!(result.liability_premium, None);
        assert_eq!(result.liability_layer, None);
    }

    #[test]
    fn test_altitude_term() {
        let mut rates = RateConfig::new(2.0, 0.01, 1.5, 1.0);
        rates.drone_altitude_rate = 0.05;
        let record = DeviceRecord::drone("ALT-001", 10.0, 5000.0).with_max_altitude(120.0);

        // (20 + 50 + 6) * 1.5
        let result = compute(&record, &rates).unwrap();
        assert_relative_eq!(result.base_premium, 114.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bundled_rates() {
        let rates = load_default_rates().unwrap();

        // (8 + 100 + 6) * 1.5 * 1.0
        let aaa = DeviceRecord::drone("AAA-111", 4.0, 10_000.0)
            .with_max_altitude(120.0)
            .with_tpl(1_000_000.0, 0.0);
        let result = compute(&aaa, &rates).unwrap();
        assert_relative_eq!(result.base_premium, 171.0, epsilon = 1e-9);
        assert_eq!(result.liability_premium, Some(200.0));
        let layer = result.liability_layer.unwrap();
        assert_relative_eq!(layer.base_layer_premium, 200.0, epsilon = 1e-9);
        assert_relative_eq!(layer.ilf, 1.0, epsilon = 1e-12);

        // (30 + 120 + 7.5) * 1.5 * 1.6
        let bbb = DeviceRecord::drone("BBB-222", 15.0, 12_000.0)
            .with_max_altitude(150.0)
            .with_tpl(4_000_000.0, 1_000_000.0);
        let result = compute(&bbb, &rates).unwrap();
        assert_relative_eq!(result.base_premium, 378.0, epsilon = 1e-9);
        assert_eq!(result.liability_premium, Some(126.0));
    }

    #[test]
    fn test_rejects_camera_record() {
        let rates = RateConfig::new(2.0, 0.01, 1.5, 1.0);
        let record = DeviceRecord::camera("ZZZ-999", 0.8, 5000.0);
        assert!(matches!(compute(&record, &rates), Err(PremiumError::InvalidInput { .. })));
    }

    #[test]
    fn test_unknown_category() {
        let rates = RateConfig::new(2.0, 0.01, 1.5, 1.0);
        let record = DeviceRecord::new("ZEP-001", "blimp", 300.0, 90_000.0);
        assert!(matches!(compute(&record, &rates), Err(PremiumError::UnknownCategory { .. })));
    }

    #[test]
    fn test_rejects_unvalidated_config() {
        let record = DeviceRecord::drone("NEG-001", 10.0, 100.0);

        let negative_rate = RateConfig::new(-2.0, 0.01, 1.5, 1.2);
        assert!(matches!(compute(&record, &negative_rate), Err(PremiumError::Configuration(_))));

        let falling_tiers = RateConfig::new(2.0, 0.01, 1.5, 1.2).with_weight_tiers(vec![
            WeightTier { up_to_kg: Some(5.0), factor: 2.0 },
            WeightTier { up_to_kg: None, factor: 0.5 },
        ]);
        assert!(matches!(compute(&record, &falling_tiers), Err(PremiumError::Configuration(_))));
    }

    #[test]
    fn test_invalid_weight_names_device() {
        let rates = RateConfig::new(2.0, 0.01, 1.5, 1.0);
        let record = DeviceRecord::drone("BAD-001", 0.0, 5000.0);
        match compute(&record, &rates) {
            Err(PremiumError::InvalidInput { device, .. }) => assert_eq!(device, "BAD-001"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }
}
