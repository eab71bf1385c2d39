//! Per-device premium calculation
//!
//! Dispatch is a plain match on the resolved category. Each category module
//! supplies its own `CategoryTerms` and shares `base::compute_base`.

pub mod base;
pub mod drone;
pub mod camera;
pub mod liability;
mod result;
mod totals;

pub use base::{compute_base, CategoryTerms};
pub use liability::LiabilityLayer;
pub use result::{Adjustment, AdjustmentKind, PremiumResult};
pub use totals::{FleetTotals, InsuranceLine, total_net, total_gross};

use crate::device::{DeviceCategory, DeviceRecord};
use crate::error::{PremiumError, Result};
use crate::rates::RateConfig;

/// Price a single record with the calculator matching its category tag
pub fn compute(record: &DeviceRecord, rates: &RateConfig) -> Result<PremiumResult> {
    match record.category()? {
        DeviceCategory::Drone => drone::compute(record, rates),
        DeviceCategory::Camera => camera::compute(record, rates),
    }
}

/// Price every record, failing on the first error with no partial result
pub fn compute_all(records: &[DeviceRecord], rates: &RateConfig) -> Result<Vec<PremiumResult>> {
    records.iter().map(|record| compute(record, rates)).collect()
}

/// Reject records whose tag is unknown or belongs to another calculator
pub(crate) fn expect_category(record: &DeviceRecord, expected: DeviceCategory) -> Result<()> {
    let category = record.category()?;
    if category != expected {
        return Err(PremiumError::invalid_input(
            &record.id,
            format!(
                "{} record passed to the {} calculator",
                category.as_str(),
                expected.as_str()
            ),
        ));
    }
    Ok(())
}
