//! Rate parameters for drone and camera rating
//!
//! A `RateConfig` is loaded once per run and only ever read afterwards.

mod ilf;
pub mod loader;

pub use ilf::RiebesellCurve;
pub use loader::{load_rate_config, load_rate_config_from_reader, load_default_rates};

use crate::error::{PremiumError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One band of the weight-tier table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightTier {
    /// Inclusive upper bound in kilograms (None = open-ended top tier)
    #[serde(default)]
    pub up_to_kg: Option<f64>,

    /// Multiplier applied to the base premium for weights in this tier
    pub factor: f64,
}

/// Third-party liability layer rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiabilityRates {
    /// Base layer rate applied to the drone value
    pub base_rate: f64,

    /// Increased limit factor curve
    pub ilf_riebesell_curve: RiebesellCurve,
}

/// Fleet-level thresholds read by the adjustment engine
///
/// Every field is optional at load time. The adjustment that needs a value
/// checks it when it runs, so a config without limits can still price devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetLimits {
    /// Maximum number of drones flying at the same time
    #[serde(default)]
    pub max_drones_in_air: Option<i64>,

    /// Drone surcharge (positive) or discount (negative) rate
    #[serde(default)]
    pub adjustment_factor: Option<f64>,

    /// Camera rate; falls back to `adjustment_factor` when absent
    #[serde(default)]
    pub camera_adjustment_factor: Option<f64>,
}

impl FleetLimits {
    /// Drone cap, rejecting a missing or non-positive threshold
    pub fn drone_cap(&self) -> Result<usize> {
        match self.max_drones_in_air {
            None => Err(PremiumError::config("max_drones_in_air is missing")),
            Some(cap) if cap <= 0 => Err(PremiumError::config(format!(
                "max_drones_in_air must be positive, got {}",
                cap
            ))),
            Some(cap) => Ok(cap as usize),
        }
    }

    pub fn drone_factor(&self) -> Result<f64> {
        let factor = self
            .adjustment_factor
            .ok_or_else(|| PremiumError::config("adjustment_factor is missing"))?;
        check_factor("adjustment_factor", factor)
    }

    pub fn camera_factor(&self) -> Result<f64> {
        match self.camera_adjustment_factor {
            Some(factor) => check_factor("camera_adjustment_factor", factor),
            None => self.drone_factor(),
        }
    }
}

/// A factor of -1 or below would drive a premium to zero or negative
fn check_factor(name: &str, factor: f64) -> Result<f64> {
    if !factor.is_finite() || factor <= -1.0 {
        return Err(PremiumError::config(format!(
            "{} must be a finite value above -1, got {}",
            name, factor
        )));
    }
    Ok(factor)
}

/// Container for all rating parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateConfig {
    /// Rate charged per kilogram of device weight
    #[serde(alias = "per_kg")]
    pub base_rate_per_kg: f64,

    /// Rate charged per unit of device price
    #[serde(alias = "per_price", alias = "base_rate_per_dollar")]
    pub base_rate_per_price: f64,

    pub drone_multiplier: f64,
    pub camera_multiplier: f64,

    /// Drone altitude-risk rate, per metre of rated ceiling
    #[serde(default)]
    pub drone_altitude_rate: f64,

    /// Camera lens-value rate, per unit of lens value
    #[serde(default)]
    pub camera_lens_rate: f64,

    /// Weight-tier table, ascending by upper bound
    #[serde(default)]
    pub weight_tiers: Vec<WeightTier>,

    #[serde(flatten)]
    pub fleet_limits: FleetLimits,

    #[serde(default)]
    pub liability: Option<LiabilityRates>,
}

impl RateConfig {
    /// Create a config with the core rates only (no tiers, limits or liability)
    pub fn new(
        base_rate_per_kg: f64,
        base_rate_per_price: f64,
        drone_multiplier: f64,
        camera_multiplier: f64,
    ) -> Self {
        Self {
            base_rate_per_kg,
            base_rate_per_price,
            drone_multiplier,
            camera_multiplier,
            drone_altitude_rate: 0.0,
            camera_lens_rate: 0.0,
            weight_tiers: Vec::new(),
            fleet_limits: FleetLimits::default(),
            liability: None,
        }
    }

    /// Load and validate a config from a JSON file
    pub fn from_json_path(path: &Path) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        load_rate_config(path)
    }

    pub fn with_weight_tiers(mut self, tiers: Vec<WeightTier>) -> Self {
        self.weight_tiers = tiers;
        self
    }

    pub fn with_fleet_limits(mut self, limits: FleetLimits) -> Self {
        self.fleet_limits = limits;
        self
    }

    pub fn with_liability(mut self, liability: LiabilityRates) -> Self {
        self.liability = Some(liability);
        self
    }

    /// Multiplier for the weight tier containing `weight_kg`
    ///
    /// Upper bounds are inclusive. Weights above every bounded tier fall into
    /// the open-ended tier, or the last tier if none is open-ended.
    pub fn weight_tier_factor(&self, weight_kg: f64) -> f64 {
        for tier in &self.weight_tiers {
            match tier.up_to_kg {
                Some(limit) if weight_kg <= limit => return tier.factor,
                Some(_) => continue,
                None => return tier.factor,
            }
        }
        self.weight_tiers.last().map(|t| t.factor).unwrap_or(1.0)
    }

    /// Check signs and ranges of every loaded parameter
    pub fn validate(&self) -> Result<()> {
        non_negative("base_rate_per_kg", self.base_rate_per_kg)?;
        non_negative("base_rate_per_price", self.base_rate_per_price)?;
        positive("drone_multiplier", self.drone_multiplier)?;
        positive("camera_multiplier", self.camera_multiplier)?;
        non_negative("drone_altitude_rate", self.drone_altitude_rate)?;
        non_negative("camera_lens_rate", self.camera_lens_rate)?;
        self.validate_weight_tiers()?;

        if self.fleet_limits.max_drones_in_air.is_some() {
            self.fleet_limits.drone_cap()?;
        }
        if self.fleet_limits.adjustment_factor.is_some() {
            self.fleet_limits.drone_factor()?;
        }
        if self.fleet_limits.camera_adjustment_factor.is_some() {
            self.fleet_limits.camera_factor()?;
        }

        if let Some(liability) = &self.liability {
            non_negative("liability.base_rate", liability.base_rate)?;
            liability.ilf_riebesell_curve.validate()?;
        }

        Ok(())
    }

    /// Tiers must ascend, only the last may be open-ended, and factors may
    /// not fall as weight rises (keeps premiums monotone in weight)
    fn validate_weight_tiers(&self) -> Result<()> {
        let mut previous: Option<&WeightTier> = None;

        for (idx, tier) in self.weight_tiers.iter().enumerate() {
            positive("weight_tiers.factor", tier.factor)?;

            match tier.up_to_kg {
                Some(limit) => positive("weight_tiers.up_to_kg", limit)?,
                None if idx + 1 != self.weight_tiers.len() => {
                    return Err(PremiumError::config(
                        "only the last weight tier may be open-ended",
                    ));
                }
                None => {}
            }

            if let Some(prev) = previous {
                if let (Some(prev_limit), Some(limit)) = (prev.up_to_kg, tier.up_to_kg) {
                    if limit <= prev_limit {
                        return Err(PremiumError::config(format!(
                            "weight tiers must ascend: {} kg follows {} kg",
                            limit, prev_limit
                        )));
                    }
                }
                if tier.factor < prev.factor {
                    return Err(PremiumError::config(format!(
                        "weight tier factors must not decrease: {} follows {}",
                        tier.factor, prev.factor
                    )));
                }
            }
            previous = Some(tier);
        }

        Ok(())
    }
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PremiumError::config(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

fn positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PremiumError::config(format!(
            "{} must be a positive number, got {}",
            name, value
        )));
    }
    Ok(())
}
