//! Error taxonomy for premium rating
//!
//! All three kinds surface immediately to the caller. The caller decides
//! whether to abort the batch or skip the offending record.

use thiserror::Error;

/// Result type alias using PremiumError
pub type Result<T> = std::result::Result<T, PremiumError>;

/// Unified error type for rating operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PremiumError {
    /// A device attribute violates its domain constraint
    #[error("Invalid input for device {device}: {reason}")]
    InvalidInput { device: String, reason: String },

    /// A device record's category tag has no matching calculator
    #[error("Unknown category '{tag}' for device {device}")]
    UnknownCategory { device: String, tag: String },

    /// A required rate/threshold is absent or out of range
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PremiumError {
    pub fn invalid_input(device: impl Into<String>, reason: impl Into<String>) -> Self {
        PremiumError::InvalidInput {
            device: device.into(),
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        PremiumError::Configuration(message.into())
    }

    /// Attach a device id to an input error raised before the id was known
    pub fn for_device(self, device: &str) -> Self {
        match self {
            PremiumError::InvalidInput { device: current, reason } if current.is_empty() => {
                PremiumError::InvalidInput {
                    device: device.to_string(),
                    reason,
                }
            }
            other => other,
        }
    }
}
