//! JSON rate config loader
//!
//! Loads rating parameters from data/rates.json

use super::RateConfig;
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Default path to the rate config
pub const DEFAULT_RATES_PATH: &str = "data/rates.json";

/// Load and validate a rate config from a JSON file
pub fn load_rate_config(path: &Path) -> Result<RateConfig, Box<dyn Error>> {
    let file = File::open(path)?;
    let config = load_rate_config_from_reader(BufReader::new(file))?;
    log::debug!("Loaded rate config from {}", path.display());
    Ok(config)
}

/// Load and validate a rate config from any reader
pub fn load_rate_config_from_reader<R: Read>(reader: R) -> Result<RateConfig, Box<dyn Error>> {
    let config: RateConfig = serde_json::from_reader(reader)?;
    config.validate()?;
    Ok(config)
}

/// Load the rate config from the default location
pub fn load_default_rates() -> Result<RateConfig, Box<dyn Error>> {
    load_rate_config(Path::new(DEFAULT_RATES_PATH))
}
