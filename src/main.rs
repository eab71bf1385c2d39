//! UAV Rating CLI
//!
//! Rates a fleet file against a rate config and prints the report as JSON

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use uav_rating::device::{load_devices_csv, load_fleet, Fleet};
use uav_rating::{
    Adjustment, AdjustmentKind, DeviceCategory, EnabledAdjustments, FleetTotals, PremiumReport, RatingRun,
};

/// Adjustment rules selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AdjustArg {
    Drones,
    Cameras,
}

impl From<AdjustArg> for AdjustmentKind {
    fn from(arg: AdjustArg) -> Self {
        match arg {
            AdjustArg::Drones => AdjustmentKind::LimitedDronesInUse,
            AdjustArg::Cameras => AdjustmentKind::LimitedCamerasInUse,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "uav_rating", version, about = "Rate drone and camera fleets")]
struct Cli {
    /// Rate config (JSON)
    #[arg(long, default_value = "data/rates.json")]
    rates: PathBuf,

    /// Fleet file: JSON fleet, or CSV device list
    #[arg(long, default_value = "data/fleet.json")]
    fleet: PathBuf,

    /// Brokerage for CSV fleets (JSON fleets carry their own)
    #[arg(long)]
    brokerage: Option<f64>,

    /// Adjustment to apply; repeat for several (default: all)
    #[arg(long = "adjust", value_enum)]
    adjust: Vec<AdjustArg>,

    /// Report premiums as priced, with no fleet adjustments
    #[arg(long, conflicts_with = "adjust")]
    no_adjustments: bool,
}

impl Cli {
    fn enabled_adjustments(&self) -> EnabledAdjustments {
        if self.no_adjustments {
            EnabledAdjustments::none()
        } else if self.adjust.is_empty() {
            EnabledAdjustments::all()
        } else {
            EnabledAdjustments::only(self.adjust.iter().map(|&a| AdjustmentKind::from(a)))
        }
    }

    fn load_fleet(&self) -> anyhow::Result<Fleet> {
        let is_csv = self
            .fleet
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        let mut fleet = if is_csv {
            let devices = load_devices_csv(&self.fleet)
                .map_err(|e| anyhow::anyhow!("{}", e))
                .with_context(|| format!("loading devices from {}", self.fleet.display()))?;
            Fleet::new(devices)
        } else {
            load_fleet(&self.fleet)
                .map_err(|e| anyhow::anyhow!("{}", e))
                .with_context(|| format!("loading fleet from {}", self.fleet.display()))?
        };

        if let Some(brokerage) = self.brokerage {
            fleet.brokerage = brokerage;
        }
        Ok(fleet)
    }
}

/// One device in the printed report
#[derive(Debug, Serialize)]
struct DeviceRow<'a> {
    device_id: &'a str,
    category: DeviceCategory,
    base_premium: f64,
    adjustments: &'a [Adjustment],
    final_premium: f64,
    liability_premium: Option<f64>,
    tpl_base_layer_premium: Option<f64>,
    tpl_ilf: Option<f64>,
    total_premium: f64,
}

#[derive(Debug, Serialize)]
struct ReportOutput<'a> {
    devices: Vec<DeviceRow<'a>>,
    brokerage: f64,
    net_premium: FleetTotals,
    gross_premium: FleetTotals,
}

impl<'a> From<&'a PremiumReport> for ReportOutput<'a> {
    fn from(report: &'a PremiumReport) -> Self {
        let devices = report
            .results
            .iter()
            .map(|r| DeviceRow {
                device_id: &r.device_id,
                category: r.category,
                base_premium: r.base_premium,
                adjustments: &r.adjustments,
                final_premium: r.final_premium(),
                liability_premium: r.liability_premium,
                tpl_base_layer_premium: r.liability_layer.map(|l| l.base_layer_premium),
                tpl_ilf: r.liability_layer.map(|l| l.ilf),
                total_premium: r.total_premium(),
            })
            .collect();

        Self {
            devices,
            brokerage: report.brokerage,
            net_premium: report.net,
            gross_premium: report.gross,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let runner = RatingRun::from_json_path(&cli.rates)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("loading rates from {}", cli.rates.display()))?;
    let fleet = cli.load_fleet()?;

    let report = runner
        .run(&fleet, &cli.enabled_adjustments())
        .context("rating fleet")?;

    println!("{}", serde_json::to_string_pretty(&ReportOutput::from(&report))?);
    Ok(())
}
