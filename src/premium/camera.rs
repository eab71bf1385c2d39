//! Camera premium calculator

use super::base::{compute_base, CategoryTerms};
use super::result::PremiumResult;
use crate::device::{DeviceCategory, DeviceRecord};
use crate::error::{PremiumError, Result};
use crate::rates::RateConfig;

/// Camera multiplier plus the lens-value term
pub fn category_terms(record: &DeviceRecord, rates: &RateConfig) -> Result<CategoryTerms> {
    let lens_value = record.optional_amount("lens_value", record.lens_value)?;
    Ok(CategoryTerms::new(
        rates.camera_multiplier,
        rates.camera_lens_rate * lens_value,
    ))
}

/// Price a single camera record
pub fn compute(record: &DeviceRecord, rates: &RateConfig) -> Result<PremiumResult> {
    super::expect_category(record, DeviceCategory::Camera)?;

    if record.tpl_limit.is_some() {
        return Err(PremiumError::invalid_input(
            &record.id,
            "TPL cover applies to drones only",
        ));
    }

    let terms = category_terms(record, rates)?;
    let base = compute_base(record.weight_kg, record.price, terms, rates)
        .map_err(|e| e.for_device(&record.id))?;

    log::debug!("Camera {}: base premium {:.2}", record.id, base);

    Ok(PremiumResult::new(&record.id, DeviceCategory::Camera, base))
}
