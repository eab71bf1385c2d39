//! Load fleets from fleet.json or device lists from CSV

use super::{DeviceRecord, Fleet};
use csv::Reader;
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Default path to the example fleet
pub const DEFAULT_FLEET_PATH: &str = "data/fleet.json";

/// Load a fleet (brokerage, drone cap, devices) from a JSON file
pub fn load_fleet<P: AsRef<Path>>(path: P) -> Result<Fleet, Box<dyn Error>> {
    let file = File::open(path.as_ref())?;
    load_fleet_from_reader(BufReader::new(file))
}

/// Load a fleet from any reader
pub fn load_fleet_from_reader<R: Read>(reader: R) -> Result<Fleet, Box<dyn Error>> {
    let fleet: Fleet = serde_json::from_reader(reader)?;
    Ok(fleet)
}

/// Load device records from a CSV file
pub fn load_devices_csv<P: AsRef<Path>>(path: P) -> Result<Vec<DeviceRecord>, Box<dyn Error>> {
    let file = File::open(path.as_ref())?;
    load_devices_from_reader(file)
}

/// Load device records from any CSV reader
///
/// Empty optional columns deserialize to `None`.
pub fn load_devices_from_reader<R: Read>(reader: R) -> Result<Vec<DeviceRecord>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut devices = Vec::new();

    for result in csv_reader.deserialize() {
        let record: DeviceRecord = result?;
        devices.push(record);
    }

    Ok(devices)
}

/// Load the example fleet from the default location
pub fn load_default_fleet() -> Result<Fleet, Box<dyn Error>> {
    load_fleet(DEFAULT_FLEET_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceCategory;

    #[test]
    fn test_load_default_fleet() {
        let fleet = load_default_fleet().expect("Failed to load fleet");
        assert_eq!(fleet.devices.len(), 7);
        assert_eq!(fleet.brokerage, 0.3);
        assert_eq!(fleet.max_drones_in_air, Some(2));

        let first = &fleet.devices[0];
        assert_eq!(first.id, "AAA-111");
        assert_eq!(first.category(), Ok(DeviceCategory::Drone));
        assert_eq!(first.tpl_limit, Some(1_000_000.0));

        let cameras = fleet
            .devices
            .iter()
            .filter(|d| d.category() == Ok(DeviceCategory::Camera))
            .count();
        assert_eq!(cameras, 4);
    }

    #[test]
    fn test_load_devices_csv() {
        let devices = load_devices_csv("data/fleet.csv").expect("Failed to load CSV");
        assert_eq!(devices.len(), 7);

        let bbb = devices.iter().find(|d| d.id == "BBB-222").unwrap();
        assert_eq!(bbb.weight_kg, 15.0);
        assert_eq!(bbb.tpl_excess, Some(1_000_000.0));
        assert_eq!(bbb.lens_value, None);
    }

    #[test]
    fn test_csv_accepts_original_column_names() {
        let csv = "serial_number,category,weight,value,max_altitude_m,lens_value,tpl_limit,tpl_excess\n\
                   ZZZ-999,detachable_camera,0.8,5000,,1200,,\n";
        let devices = load_devices_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].id, "ZZZ-999");
        assert_eq!(devices[0].price, 5000.0);
        assert_eq!(devices[0].lens_value, Some(1200.0));
        assert_eq!(devices[0].max_altitude_m, None);
    }

    #[test]
    fn test_fleet_json_defaults() {
        let json = r#"{ "devices": [ { "id": "D1", "category": "drone", "weight_kg": 2.0, "price": 800.0 } ] }"#;
        let fleet = load_fleet_from_reader(json.as_bytes()).unwrap();
        assert_eq!(fleet.brokerage, 0.0);
        assert_eq!(fleet.max_drones_in_air, None);
        assert_eq!(fleet.devices[0].tpl_limit, None);
    }
}
