//! UAV Rating - Premium engine for drones and detachable cameras
//!
//! This library provides:
//! - Base premium calculation from weight, price and category rates
//! - Third-party liability layers priced on a Riebesell ILF curve
//! - Fleet-level adjustments when more devices are listed than can fly at once
//! - Net and gross (brokerage-loaded) premium totals

pub mod error;
pub mod rates;
pub mod device;
pub mod premium;
pub mod adjustments;
pub mod rating;

// Re-export commonly used types
pub use error::{PremiumError, Result};
pub use rates::{RateConfig, FleetLimits, WeightTier, LiabilityRates, RiebesellCurve};
pub use device::{DeviceRecord, DeviceCategory, Fleet};
pub use premium::{PremiumResult, Adjustment, AdjustmentKind, FleetTotals, LiabilityLayer, compute_base};
pub use adjustments::{AdjustmentEngine, EnabledAdjustments};
pub use rating::{RatingRun, PremiumReport};
