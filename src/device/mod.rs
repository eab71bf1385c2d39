//! Device data structures and fleet loading

mod data;
pub mod loader;

pub use data::{DeviceRecord, DeviceCategory, Fleet};
pub use loader::{load_fleet, load_fleet_from_reader, load_devices_csv, load_devices_from_reader, load_default_fleet};
