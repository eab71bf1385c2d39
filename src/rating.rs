//! Rating runner for whole fleets
//!
//! Holds a validated rate config and runs pricing, adjustments and totals for
//! any number of fleets without re-reading the config.

use crate::adjustments::{AdjustmentEngine, EnabledAdjustments};
use crate::device::{DeviceRecord, Fleet};
use crate::error::Result;
use crate::premium::{self, FleetTotals, PremiumResult};
use crate::rates::{self, FleetLimits, RateConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Outcome of rating one fleet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumReport {
    /// Per-device results in fleet order
    pub results: Vec<PremiumResult>,

    /// Brokerage used for the gross totals
    pub brokerage: f64,

    pub net: FleetTotals,
    pub gross: FleetTotals,
}

/// Pre-loaded rating runner
///
/// # Example
/// ```ignore
/// let runner = RatingRun::from_json()?;
/// let fleet = load_default_fleet()?;
/// let report = runner.run(&fleet, &EnabledAdjustments::all())?;
/// ```
#[derive(Debug, Clone)]
pub struct RatingRun {
    rates: RateConfig,
}

impl RatingRun {
    /// Create runner from an in-memory config, validating it first
    pub fn new(rates: RateConfig) -> Result<Self> {
        rates.validate()?;
        Ok(Self { rates })
    }

    /// Create runner by loading the default rate config
    pub fn from_json() -> std::result::Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            rates: rates::load_default_rates()?,
        })
    }

    /// Create runner from a specific rate config file
    pub fn from_json_path(path: &Path) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            rates: RateConfig::from_json_path(path)?,
        })
    }

    pub fn rates(&self) -> &RateConfig {
        &self.rates
    }

    /// Base premiums for every record; the first bad record fails the batch
    pub fn price_fleet(&self, records: &[DeviceRecord]) -> Result<Vec<PremiumResult>> {
        premium::compute_all(records, &self.rates)
    }

    /// Fleet limits after applying the fleet's own drone cap, if it has one
    pub fn limits_for(&self, fleet: &Fleet) -> FleetLimits {
        match fleet.max_drones_in_air {
            Some(cap) => FleetLimits {
                max_drones_in_air: Some(cap),
                ..self.rates.fleet_limits
            },
            None => self.rates.fleet_limits,
        }
    }

    /// Price, adjust and total one fleet
    pub fn run(&self, fleet: &Fleet, enabled: &EnabledAdjustments) -> Result<PremiumReport> {
        let priced = self.price_fleet(&fleet.devices)?;

        let engine = AdjustmentEngine::new(self.limits_for(fleet), enabled.clone());
        let results = engine.apply(&priced)?;

        let net = FleetTotals::net(&results);
        let gross = FleetTotals::gross(&results, fleet.brokerage)?;

        log::info!(
            "Rated {} devices: net total {:.0}, gross total {:.0}",
            results.len(),
            net.total,
            gross.total
        );

        Ok(PremiumReport {
            results,
            brokerage: fleet.brokerage,
            net,
            gross,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjustments::AdjustmentKind;
    use crate::device::load_default_fleet;
    use crate::error::PremiumError;
    use approx::assert_relative_eq;

    fn runner() -> RatingRun {
        RatingRun::from_json().expect("bundled rates")
    }

    #[test]
    fn test_bundled_fleet_without_adjustments() {
        let fleet = load_default_fleet().unwrap();
        let report = runner().run(&fleet, &EnabledAdjustments::none()).unwrap();

        assert_eq!(report.results.len(), 7);
        assert!(report.results.iter().all(|r| r.adjustments.is_empty()));

        // 171 + 378 + 307.8
        assert_eq!(report.net.drones_hull, 857.0);
        // 200 + 126 + 92
        assert_eq!(report.net.drones_tpl, 418.0);
        // 90.72 + 41.04 + 18.96 + 32.4
        assert_eq!(report.net.cameras_hull, 183.0);
        assert_eq!(report.net.total, 1458.0);

        assert_eq!(report.gross.drones_tpl, 597.0);
        assert_eq!(report.brokerage, 0.3);
    }

    #[test]
    fn test_bundled_fleet_with_adjustments() {
        let fleet = load_default_fleet().unwrap();
        let report = runner().run(&fleet, &EnabledAdjustments::all()).unwrap();

        // 3 drones over a cap of 2: +10% on every drone
        // 4 cameras over min(2, 3): +5% on every camera
        for result in &report.results {
            assert_eq!(result.adjustments.len(), 1);
            let expected = match result.category {
                crate::device::DeviceCategory::Drone => 0.1,
                crate::device::DeviceCategory::Camera => 0.05,
            };
            assert_relative_eq!(result.adjustments[0].delta, result.base_premium * expected, epsilon = 1e-9);
        }

        // 856.8 * 1.1 = 942.48
        assert_eq!(report.net.drones_hull, 942.0);
        // 183.12 * 1.05 = 192.276
        assert_eq!(report.net.cameras_hull, 192.0);
        // Liability is never adjusted
        assert_eq!(report.net.drones_tpl, 418.0);
    }

    #[test]
    fn test_fleet_cap_overrides_config() {
        let mut fleet = load_default_fleet().unwrap();
        fleet.max_drones_in_air = Some(3);

        let enabled = EnabledAdjustments::none().enable(AdjustmentKind::LimitedDronesInUse);
        let report = runner().run(&fleet, &enabled).unwrap();
        assert!(report.results.iter().all(|r| r.adjustments.is_empty()));
    }

    #[test]
    fn test_unknown_category_fails_run() {
        let mut fleet = load_default_fleet().unwrap();
        fleet.devices.push(DeviceRecord::new("ZEP-001", "blimp", 300.0, 90_000.0));

        let result = runner().run(&fleet, &EnabledAdjustments::all());
        assert!(matches!(result, Err(PremiumError::UnknownCategory { .. })));
    }

    #[test]
    fn test_empty_fleet() {
        let fleet = Fleet::new(Vec::new()).with_brokerage(0.3);
        let report = runner().run(&fleet, &EnabledAdjustments::all()).unwrap();
        assert!(report.results.is_empty());
        assert_eq!(report.brokerage, 0.3);
        assert_eq!(report.net, FleetTotals::default());
    }

    #[test]
    fn test_new_validates_config() {
        let bad = RateConfig::new(2.0, 0.01, 0.0, 1.2);
        assert!(matches!(RatingRun::new(bad), Err(PremiumError::Configuration(_))));
    }
}
