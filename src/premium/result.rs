//! Premium output structures

use super::liability::LiabilityLayer;
use crate::device::DeviceCategory;
use serde::{Deserialize, Serialize};

/// Fleet-level adjustment rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// More drones than may fly at once
    LimitedDronesInUse,
    /// More cameras than there are drones to carry them
    LimitedCamerasInUse,
}

impl AdjustmentKind {
    pub fn name(&self) -> &'static str {
        match self {
            AdjustmentKind::LimitedDronesInUse => "limited_drones_in_use",
            AdjustmentKind::LimitedCamerasInUse => "limited_cameras_in_use",
        }
    }
}

/// An applied adjustment: which rule fired and how much it moved the premium
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub kind: AdjustmentKind,
    pub delta: f64,
}

/// Premium for a single device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumResult {
    /// Device identifier
    pub device_id: String,

    /// Resolved device category
    pub category: DeviceCategory,

    /// Base (hull) premium before any adjustment
    pub base_premium: f64,

    /// Third-party liability layer premium, drones only
    pub liability_premium: Option<f64>,

    /// Base layer premium and ILF behind `liability_premium`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liability_layer: Option<LiabilityLayer>,

    /// Adjustments applied so far, in order
    pub adjustments: Vec<Adjustment>,
}

impl PremiumResult {
    pub fn new(device_id: impl Into<String>, category: DeviceCategory, base_premium: f64) -> Self {
        Self {
            device_id: device_id.into(),
            category,
            base_premium,
            liability_premium: None,
            liability_layer: None,
            adjustments: Vec::new(),
        }
    }

    /// Base premium plus every adjustment delta
    pub fn final_premium(&self) -> f64 {
        self.base_premium + self.adjustments.iter().map(|a| a.delta).sum::<f64>()
    }

    /// Final hull premium plus the liability layer
    pub fn total_premium(&self) -> f64 {
        self.final_premium() + self.liability_premium.unwrap_or(0.0)
    }

    /// Attach a priced TPL layer
    pub fn with_liability_layer(mut self, layer: Option<LiabilityLayer>) -> Self {
        self.liability_premium = layer.map(|l| l.premium);
        self.liability_layer = layer;
        self
    }

    pub fn has_adjustment(&self, kind: AdjustmentKind) -> bool {
        self.adjustments.iter().any(|a| a.kind == kind)
    }

    /// Copy of this result with one more adjustment appended
    pub fn with_adjustment(&self, kind: AdjustmentKind, delta: f64) -> Self {
        let mut adjusted = self.clone();
        adjusted.adjustments.push(Adjustment { kind, delta });
        adjusted
    }
}
