//! Riebesell increased limit factor curve for liability layers

use crate::error::{PremiumError, Result};
use serde::{Deserialize, Serialize};

/// Riebesell curve parameters
///
/// Doubling the limit multiplies the loss cost by (1 + z).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiebesellCurve {
    /// Limit at which the factor is 1.0
    pub base_limit: f64,

    /// Loading per doubling of the limit
    pub z: f64,
}

impl RiebesellCurve {
    pub fn new(base_limit: f64, z: f64) -> Self {
        Self { base_limit, z }
    }

    /// Curve value at `amount`: (amount / base_limit) ^ log2(1 + z)
    pub fn factor(&self, amount: f64) -> f64 {
        (amount / self.base_limit).powf((1.0 + self.z).log2())
    }

    /// ILF for the layer `limit` xs `excess`
    pub fn layer_ilf(&self, limit: f64, excess: f64) -> f64 {
        self.factor(limit + excess) - self.factor(excess)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.base_limit.is_finite() || self.base_limit <= 0.0 {
            return Err(PremiumError::config(format!(
                "ilf_riebesell_curve.base_limit must be positive, got {}",
                self.base_limit
            )));
        }
        if !self.z.is_finite() || self.z <= 0.0 {
            return Err(PremiumError::config(format!(
                "ilf_riebesell_curve.z must be positive, got {}",
                self.z
            )));
        }
        Ok(())
    }
}
