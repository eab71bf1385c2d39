//! Third-party liability layer premium for drones

use crate::device::DeviceRecord;
use crate::error::{PremiumError, Result};
use crate::rates::RateConfig;
use serde::{Deserialize, Serialize};

/// Priced TPL layer with the intermediate figures kept for audit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiabilityLayer {
    /// Liability rate applied to the drone value, before the ILF
    pub base_layer_premium: f64,

    /// Increased limit factor for the layer
    pub ilf: f64,

    /// Layer premium, rounded to whole currency units
    pub premium: f64,
}

fn base_layer_premium(price: f64, base_rate: f64) -> f64 {
    base_rate * price
}

/// Price the TPL layer for `record`
///
/// Returns `None` when the record carries no TPL limit, or when the drone has
/// no insured value.
pub fn price_layer(record: &DeviceRecord, rates: &RateConfig) -> Result<Option<LiabilityLayer>> {
    let limit = match record.tpl_limit {
        Some(limit) => limit,
        None => return Ok(None),
    };

    let liability = rates.liability.as_ref().ok_or_else(|| {
        PremiumError::config(format!(
            "device {} has a TPL limit but no liability rates are configured",
            record.id
        ))
    })?;
    rates.validate()?;

    if !limit.is_finite() || limit <= 0.0 {
        return Err(PremiumError::invalid_input(
            &record.id,
            format!("tpl_limit must be positive, got {}", limit),
        ));
    }
    let excess = record.optional_amount("tpl_excess", record.tpl_excess)?;

    if record.price == 0.0 {
        log::warn!("Device {} has no insured value; skipping TPL layer", record.id);
        return Ok(None);
    }

    let base = base_layer_premium(record.price, liability.base_rate);
    let ilf = liability.ilf_riebesell_curve.layer_ilf(limit, excess);

    Ok(Some(LiabilityLayer {
        base_layer_premium: base,
        ilf,
        premium: (base * ilf).round(),
    }))
}

/// TPL layer premium for `record`, rounded to whole currency units
pub fn layer_premium(record: &DeviceRecord, rates: &RateConfig) -> Result<Option<f64>> {
    Ok(price_layer(record, rates)?.map(|layer| layer.premium))
}
