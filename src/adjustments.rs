//! Fleet-level premium adjustments
//!
//! Each rule reads the whole list of results it is given, returns a new list
//! and leaves its input untouched. Applied adjustments are recorded on the
//! result, and a result already carrying a rule's descriptor is skipped by
//! that rule, so re-running the engine is a no-op.

pub use crate::premium::{Adjustment, AdjustmentKind};

use crate::device::DeviceCategory;
use crate::error::{PremiumError, Result};
use crate::premium::PremiumResult;
use crate::rates::FleetLimits;
use std::collections::BTreeSet;

/// Adjustment rules the caller has switched on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnabledAdjustments {
    kinds: BTreeSet<AdjustmentKind>,
}

impl EnabledAdjustments {
    /// No adjustments: premiums are reported as priced
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self::only([AdjustmentKind::LimitedDronesInUse, AdjustmentKind::LimitedCamerasInUse])
    }

    pub fn only(kinds: impl IntoIterator<Item = AdjustmentKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    pub fn enable(mut self, kind: AdjustmentKind) -> Self {
        self.kinds.insert(kind);
        self
    }

    pub fn is_enabled(&self, kind: AdjustmentKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Surcharge every drone when more drones are listed than may fly at once
///
/// A count equal to the cap is within limits. Above it, each drone gets
/// `base_premium * adjustment_factor`, whatever the size of the excess.
pub fn limited_drones_in_use(drones: &[PremiumResult], limits: &FleetLimits) -> Result<Vec<PremiumResult>> {
    if drones.is_empty() {
        return Ok(Vec::new());
    }
    ensure_category(drones, DeviceCategory::Drone, AdjustmentKind::LimitedDronesInUse)?;

    let cap = limits.drone_cap()?;
    let factor = limits.drone_factor()?;

    if drones.len() <= cap {
        return Ok(drones.to_vec());
    }

    log::info!(
        "{} drones listed against {} allowed in the air; applying factor {}",
        drones.len(),
        cap,
        factor
    );
    Ok(apply_factor(drones, AdjustmentKind::LimitedDronesInUse, factor))
}

/// Surcharge every camera when there are more cameras than can be flown
///
/// Cameras in use are capped by the drones that carry them: the cap is the
/// smaller of `max_drones_in_air` and the number of drones in `drones`.
pub fn limited_cameras_in_use(
    cameras: &[PremiumResult],
    limits: &FleetLimits,
    drones: &[PremiumResult],
) -> Result<Vec<PremiumResult>> {
    if cameras.is_empty() {
        return Ok(Vec::new());
    }
    ensure_category(cameras, DeviceCategory::Camera, AdjustmentKind::LimitedCamerasInUse)?;
    ensure_category(drones, DeviceCategory::Drone, AdjustmentKind::LimitedCamerasInUse)?;

    let cap = limits.drone_cap()?.min(drones.len());
    let factor = limits.camera_factor()?;

    if cameras.len() <= cap {
        return Ok(cameras.to_vec());
    }

    log::info!(
        "{} cameras listed against {} flyable on {} drones; applying factor {}",
        cameras.len(),
        cap,
        drones.len(),
        factor
    );
    Ok(apply_factor(cameras, AdjustmentKind::LimitedCamerasInUse, factor))
}

fn apply_factor(results: &[PremiumResult], kind: AdjustmentKind, factor: f64) -> Vec<PremiumResult> {
    results
        .iter()
        .map(|result| {
            if result.has_adjustment(kind) {
                result.clone()
            } else {
                result.with_adjustment(kind, result.base_premium * factor)
            }
        })
        .collect()
}

fn ensure_category(results: &[PremiumResult], expected: DeviceCategory, kind: AdjustmentKind) -> Result<()> {
    match results.iter().find(|r| r.category != expected) {
        Some(stray) => Err(PremiumError::invalid_input(
            &stray.device_id,
            format!(
                "{} result passed to {} which expects {} results",
                stray.category.as_str(),
                kind.name(),
                expected.as_str()
            ),
        )),
        None => Ok(()),
    }
}

/// Runs the enabled adjustment stages over a mixed fleet
#[derive(Debug, Clone)]
pub struct AdjustmentEngine {
    limits: FleetLimits,
    enabled: EnabledAdjustments,
}

impl AdjustmentEngine {
    pub fn new(limits: FleetLimits, enabled: EnabledAdjustments) -> Self {
        Self { limits, enabled }
    }

    /// Apply drone then camera stages, keeping the input order of results
    ///
    /// The camera stage sees the drones as adjusted by the drone stage.
    pub fn apply(&self, results: &[PremiumResult]) -> Result<Vec<PremiumResult>> {
        let mut adjusted = results.to_vec();

        let drone_positions = positions(results, DeviceCategory::Drone);
        let camera_positions = positions(results, DeviceCategory::Camera);

        let mut drones: Vec<PremiumResult> = drone_positions.iter().map(|&i| results[i].clone()).collect();
        if self.enabled.is_enabled(AdjustmentKind::LimitedDronesInUse) {
            drones = limited_drones_in_use(&drones, &self.limits)?;
        }

        let mut cameras: Vec<PremiumResult> = camera_positions.iter().map(|&i| results[i].clone()).collect();
        if self.enabled.is_enabled(AdjustmentKind::LimitedCamerasInUse) {
            cameras = limited_cameras_in_use(&cameras, &self.limits, &drones)?;
        }

        for (&i, result) in drone_positions.iter().zip(drones) {
            adjusted[i] = result;
        }
        for (&i, result) in camera_positions.iter().zip(cameras) {
            adjusted[i] = result;
        }

        Ok(adjusted)
    }
}

fn positions(results: &[PremiumResult], category: DeviceCategory) -> Vec<usize> {
    results
        .iter()
        .enumerate()
        .filter(|(_, r)| r.category == category)
        .map(|(i, _)| i)
        .collect()
}
