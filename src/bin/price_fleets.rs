//! Rate many fleet files against one rate config
//!
//! Usage: cargo run --bin price_fleets -- data/rates.json fleet_a.json fleet_b.json
//!
//! Each fleet is rated independently, so files are processed in parallel.
//! Writes one summary line per fleet to stdout as CSV.

use anyhow::Context;
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use uav_rating::device::load_fleet;
use uav_rating::{EnabledAdjustments, PremiumReport, RatingRun};

/// One CSV line of the batch summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SummaryRow {
    fleet: String,
    devices: Option<usize>,
    net_total: Option<f64>,
    gross_total: Option<f64>,
    error: Option<String>,
}

impl SummaryRow {
    fn new(path: &Path, report: &anyhow::Result<PremiumReport>) -> Self {
        let fleet = path.display().to_string();
        match report {
            Ok(report) => Self {
                fleet,
                devices: Some(report.results.len()),
                net_total: Some(report.net.total),
                gross_total: Some(report.gross.total),
                error: None,
            },
            Err(err) => Self {
                fleet,
                devices: None,
                net_total: None,
                gross_total: None,
                error: Some(format!("{:#}", err)),
            },
        }
    }
}

fn rate_file(runner: &RatingRun, path: &Path) -> anyhow::Result<PremiumReport> {
    let fleet = load_fleet(path).map_err(|e| anyhow::anyhow!("{}", e))?;
    let report = runner.run(&fleet, &EnabledAdjustments::all())?;
    Ok(report)
}

fn write_summary<W: Write>(out: W, rows: &[SummaryRow]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let rates_path = args.next().context("usage: price_fleets <rates.json> <fleet.json>...")?;
    let fleet_paths: Vec<PathBuf> = args.collect();

    let start = Instant::now();
    let runner = RatingRun::from_json_path(&rates_path)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("loading rates from {}", rates_path.display()))?;

    let rows: Vec<SummaryRow> = fleet_paths
        .par_iter()
        .map(|path| SummaryRow::new(path, &rate_file(&runner, path)))
        .collect();

    let failures = rows.iter().filter(|row| row.error.is_some()).count();
    write_summary(std::io::stdout().lock(), &rows)?;

    log::info!(
        "Rated {} fleets ({} failed) in {:?}",
        rows.len(),
        failures,
        start.elapsed()
    );
    Ok(())
}
