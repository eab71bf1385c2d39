//! Net and gross premium totals by device class and insurance line

use super::result::PremiumResult;
use crate::device::DeviceCategory;
use crate::error::{PremiumError, Result};
use serde::{Deserialize, Serialize};

/// Insurance line a premium belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceLine {
    /// Physical damage cover (base premium plus adjustments)
    Hull,
    /// Third-party liability layer
    Liability,
}

impl InsuranceLine {
    fn premium(&self, result: &PremiumResult) -> f64 {
        match self {
            InsuranceLine::Hull => result.final_premium(),
            InsuranceLine::Liability => result.liability_premium.unwrap_or(0.0),
        }
    }
}

/// Sum of one line's premiums, rounded to whole currency units
pub fn total_net(results: &[PremiumResult], line: InsuranceLine) -> f64 {
    results.iter().map(|r| line.premium(r)).sum::<f64>().round()
}

/// Net total grossed up for brokerage, rounded to whole currency units
pub fn total_gross(results: &[PremiumResult], brokerage: f64, line: InsuranceLine) -> Result<f64> {
    check_brokerage(brokerage)?;
    Ok((total_net(results, line) / (1.0 - brokerage)).round())
}

fn check_brokerage(brokerage: f64) -> Result<()> {
    if !brokerage.is_finite() || !(0.0..1.0).contains(&brokerage) {
        return Err(PremiumError::config(format!(
            "brokerage must be in [0, 1), got {}",
            brokerage
        )));
    }
    Ok(())
}

/// Premium totals for a fleet
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetTotals {
    pub drones_hull: f64,
    pub drones_tpl: f64,
    pub cameras_hull: f64,
    pub total: f64,
}

impl FleetTotals {
    /// Net totals across a mixed list of results
    pub fn net(results: &[PremiumResult]) -> Self {
        let (drones, cameras) = split_by_category(results);
        Self::from_lines(
            total_net(&drones, InsuranceLine::Hull),
            total_net(&drones, InsuranceLine::Liability),
            total_net(&cameras, InsuranceLine::Hull),
        )
    }

    /// Gross totals; each line is grossed up and rounded before summing
    pub fn gross(results: &[PremiumResult], brokerage: f64) -> Result<Self> {
        let (drones, cameras) = split_by_category(results);
        Ok(Self::from_lines(
            total_gross(&drones, brokerage, InsuranceLine::Hull)?,
            total_gross(&drones, brokerage, InsuranceLine::Liability)?,
            total_gross(&cameras, brokerage, InsuranceLine::Hull)?,
        ))
    }

    fn from_lines(drones_hull: f64, drones_tpl: f64, cameras_hull: f64) -> Self {
        Self {
            drones_hull,
            drones_tpl,
            cameras_hull,
            total: drones_hull + drones_tpl + cameras_hull,
        }
    }
}

fn split_by_category(results: &[PremiumResult]) -> (Vec<PremiumResult>, Vec<PremiumResult>) {
    results
        .iter()
        .cloned()
        .partition(|r| r.category == DeviceCategory::Drone)
}
