pub mod data_files;
/// The single-line machine form of a vehicle.
pub mod record;

pub use data_files::{DataFiles, LoadError, Loaded, Origin, load_config};
pub use record::{RecordError, VehicleRecord};
