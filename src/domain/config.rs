use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for a fleet and its data files.
///
/// Stored as `fleet.toml` in the fleet's root directory. Every field is
/// optional in the file and falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct FleetConfig {
    /// The most vehicles the fleet may hold.
    fleet_capacity: usize,

    /// The most bookings a single vehicle may have awaiting completion.
    active_booking_limit: usize,

    /// File name of the primary data file, relative to the fleet root.
    pub primary_file: String,

    /// File name of the backup data file, relative to the fleet root.
    pub backup_file: String,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            fleet_capacity: default_fleet_capacity(),
            active_booking_limit: default_active_booking_limit(),
            primary_file: default_primary_file(),
            backup_file: default_backup_file(),
        }
    }
}

impl FleetConfig {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the most vehicles the fleet may hold.
    #[must_use]
    pub const fn fleet_capacity(&self) -> usize {
        self.fleet_capacity
    }

    /// Returns the per-vehicle limit on bookings awaiting completion.
    #[must_use]
    pub const fn active_booking_limit(&self) -> usize {
        self.active_booking_limit
    }

    /// Sets the most vehicles the fleet may hold.
    ///
    /// A capacity of zero is raised to one.
    pub fn set_fleet_capacity(&mut self, capacity: usize) {
        self.fleet_capacity = capacity.max(1);
    }

    /// Sets the per-vehicle limit on bookings awaiting completion.
    ///
    /// A limit of zero is raised to one.
    pub fn set_active_booking_limit(&mut self, limit: usize) {
        self.active_booking_limit = limit.max(1);
    }
}

const fn default_fleet_capacity() -> usize {
    15
}

const fn default_active_booking_limit() -> usize {
    5
}

fn default_primary_file() -> String {
    "MainData.txt".to_string()
}

fn default_backup_file() -> String {
    "BackUpData.txt".to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_fleet_capacity")]
        fleet_capacity: usize,

        /// Bookings a vehicle may hold before it stops accepting more.
        #[serde(default = "default_active_booking_limit")]
        active_booking_limit: usize,

        #[serde(default = "default_primary_file")]
        primary_file: String,

        #[serde(default = "default_backup_file")]
        backup_file: String,
    },
}

impl From<Versions> for FleetConfig {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                fleet_capacity,
                active_booking_limit,
                primary_file,
                backup_file,
            } => Self {
                fleet_capacity: fleet_capacity.max(1),
                active_booking_limit: active_booking_limit.max(1),
                primary_file,
                backup_file,
            },
        }
    }
}

impl From<FleetConfig> for Versions {
    fn from(config: FleetConfig) -> Self {
        Self::V1 {
            fleet_capacity: config.fleet_capacity,
            active_booking_limit: config.active_booking_limit,
            primary_file: config.primary_file,
            backup_file: config.backup_file,
        }
    }
}
