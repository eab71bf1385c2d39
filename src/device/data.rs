//! Device records as delivered by the fleet data files

use crate::error::{PremiumError, Result};
use serde::{Deserialize, Serialize};

/// Rated device classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceCategory {
    Drone,
    Camera,
}

impl DeviceCategory {
    /// Resolve a raw category tag (case-insensitive)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "drone" => Some(DeviceCategory::Drone),
            "camera" | "detachable_camera" => Some(DeviceCategory::Camera),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceCategory::Drone => "drone",
            DeviceCategory::Camera => "camera",
        }
    }
}

/// A single drone or camera subject to premium calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Serial number or other unique identifier
    #[serde(alias = "serial_number")]
    pub id: String,

    /// Raw category tag, resolved by `category()`
    pub category: String,

    /// Maximum take-off weight in kilograms
    #[serde(alias = "weight")]
    pub weight_kg: f64,

    /// Insured value
    #[serde(alias = "value")]
    pub price: f64,

    /// Rated ceiling of a drone in metres
    #[serde(default)]
    pub max_altitude_m: Option<f64>,

    /// Value of a camera's lens kit
    #[serde(default)]
    pub lens_value: Option<f64>,

    /// Third-party liability limit for a drone
    #[serde(default)]
    pub tpl_limit: Option<f64>,

    /// Third-party liability excess (attachment point) for a drone
    #[serde(default)]
    pub tpl_excess: Option<f64>,
}

impl DeviceRecord {
    /// Create a record with an arbitrary category tag
    pub fn new(id: impl Into<String>, category: impl Into<String>, weight_kg: f64, price: f64) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            weight_kg,
            price,
            max_altitude_m: None,
            lens_value: None,
            tpl_limit: None,
            tpl_excess: None,
        }
    }

    pub fn drone(id: impl Into<String>, weight_kg: f64, price: f64) -> Self {
        Self::new(id, DeviceCategory::Drone.as_str(), weight_kg, price)
    }

    pub fn camera(id: impl Into<String>, weight_kg: f64, price: f64) -> Self {
        Self::new(id, DeviceCategory::Camera.as_str(), weight_kg, price)
    }

    pub fn with_max_altitude(mut self, metres: f64) -> Self {
        self.max_altitude_m = Some(metres);
        self
    }

    pub fn with_lens_value(mut self, lens_value: f64) -> Self {
        self.lens_value = Some(lens_value);
        self
    }

    pub fn with_tpl(mut self, limit: f64, excess: f64) -> Self {
        self.tpl_limit = Some(limit);
        self.tpl_excess = Some(excess);
        self
    }

    /// Resolve the category tag, failing on tags with no calculator
    pub fn category(&self) -> Result<DeviceCategory> {
        DeviceCategory::from_tag(&self.category).ok_or_else(|| PremiumError::UnknownCategory {
            device: self.id.clone(),
            tag: self.category.clone(),
        })
    }

    /// Read an optional non-negative attribute, treating absence as zero
    pub(crate) fn optional_amount(&self, name: &str, value: Option<f64>) -> Result<f64> {
        match value {
            None => Ok(0.0),
            Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
            Some(v) => Err(PremiumError::invalid_input(
                &self.id,
                format!("{} must be non-negative, got {}", name, v),
            )),
        }
    }
}

/// A fleet as delivered by the data-loading collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fleet {
    /// Broker's share of the gross premium
    #[serde(default)]
    pub brokerage: f64,

    /// Drone cap carried by the dataset; overrides the rate config when present
    #[serde(default)]
    pub max_drones_in_air: Option<i64>,

    pub devices: Vec<DeviceRecord>,
}

impl Fleet {
    pub fn new(devices: Vec<DeviceRecord>) -> Self {
        Self {
            brokerage: 0.0,
            max_drones_in_air: None,
            devices,
        }
    }

    pub fn with_brokerage(mut self, brokerage: f64) -> Self {
        self.brokerage = brokerage;
        self
    }
}
