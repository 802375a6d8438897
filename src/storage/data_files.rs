//! The primary and backup data files
//!
//! A fleet is stored as two byte-identical text files, one
//! [`VehicleRecord`] per line in fleet order. Loading prefers the primary
//! file and falls back to the backup only when the primary is absent.
//! Bookings are not stored, so a reloaded fleet has no bookings.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::{
    domain::{Fleet, FleetConfig, NewVehicle, fleet::CreateVehicleError},
    storage::record::{RecordError, VehicleRecord},
};

/// Name of the configuration file in a fleet root.
pub const CONFIG_FILE: &str = "fleet.toml";

/// Loads the configuration in `root`, falling back to the defaults.
#[must_use]
pub fn load_config(root: &Path) -> FleetConfig {
    let path = root.join(CONFIG_FILE);
    FleetConfig::load(&path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        FleetConfig::default()
    })
}

/// The pair of files a fleet is saved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    primary: PathBuf,
    backup: PathBuf,
}

impl DataFiles {
    /// Uses the given primary and backup paths.
    #[must_use]
    pub const fn new(primary: PathBuf, backup: PathBuf) -> Self {
        Self { primary, backup }
    }

    /// The data files named by `config`, inside `root`.
    #[must_use]
    pub fn in_root(root: &Path, config: &FleetConfig) -> Self {
        Self::new(root.join(&config.primary_file), root.join(&config.backup_file))
    }

    /// Path of the primary file.
    #[must_use]
    pub fn primary(&self) -> &Path {
        &self.primary
    }

    /// Path of the backup file.
    #[must_use]
    pub fn backup(&self) -> &Path {
        &self.backup
    }

    /// Loads the fleet, never failing.
    ///
    /// The primary file is read if it exists, otherwise the backup. If
    /// neither exists the fleet starts empty. A file that exists but cannot
    /// be read in full is reported in the returned [`Origin`] and an empty
    /// fleet is returned in its place; a partially loaded fleet is never
    /// returned.
    pub fn load(&self, config: &FleetConfig) -> Loaded {
        let (path, is_backup) = if self.primary.exists() {
            (self.primary(), false)
        } else if self.backup.exists() {
            tracing::info!(
                "Primary data file {} not found, using backup",
                self.primary.display()
            );
            (self.backup(), true)
        } else {
            tracing::info!("No data files found, starting with an empty fleet");
            return Loaded {
                fleet: Fleet::new(config),
                origin: Origin::Fresh,
            };
        };

        match read(path, config) {
            Ok(fleet) => {
                tracing::info!("Loaded {} vehicles from {}", fleet.len(), path.display());
                let path = path.to_path_buf();
                Loaded {
                    fleet,
                    origin: if is_backup {
                        Origin::Backup(path)
                    } else {
                        Origin::Primary(path)
                    },
                }
            }
            Err(error) => {
                tracing::warn!("Failed to load {}: {error}", path.display());
                Loaded {
                    fleet: Fleet::new(config),
                    origin: Origin::Unreadable {
                        path: path.to_path_buf(),
                        error,
                    },
                }
            }
        }
    }

    /// Writes the fleet to both files.
    ///
    /// Each file is written to a temporary file in the same directory and
    /// then moved over the target, so neither is ever left half-written.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be written.
    pub fn save(&self, fleet: &Fleet) -> io::Result<()> {
        for path in [&self.primary, &self.backup] {
            save_to_path(fleet, path)?;
        }
        tracing::info!(
            "Saved {} vehicles to {} and {}",
            fleet.len(),
            self.primary.display(),
            self.backup.display()
        );
        Ok(())
    }
}

/// Reads a fleet from a single data file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is empty, contains a
/// malformed line, or describes a vehicle the fleet rejects.
pub fn read(path: &Path, config: &FleetConfig) -> Result<Fleet, LoadError> {
    let file = File::open(path)?;
    read_from(&mut BufReader::new(file), config)
}

/// Reads a fleet from lines of machine-form text.
///
/// # Errors
///
/// See [`read`].
pub fn read_from<R: BufRead>(reader: &mut R, config: &FleetConfig) -> Result<Fleet, LoadError> {
    let mut fleet = Fleet::new(config);
    let mut seen_any = false;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        if line.trim().is_empty() {
            tracing::debug!("Skipping blank line {number}");
            continue;
        }
        seen_any = true;

        let record = VehicleRecord::parse(&line).map_err(|source| LoadError::Corrupted {
            line: number,
            source,
        })?;
        fleet
            .create_vehicle(NewVehicle::from(record))
            .map_err(|source| LoadError::Vehicle {
                line: number,
                source,
            })?;
    }

    if seen_any { Ok(fleet) } else { Err(LoadError::Empty) }
}

/// Writes the machine form of every vehicle, one per line.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write<W: Write>(fleet: &Fleet, writer: &mut W) -> io::Result<()> {
    for vehicle in fleet.vehicles() {
        writeln!(writer, "{}", VehicleRecord::from(vehicle))?;
    }
    Ok(())
}

fn save_to_path(fleet: &Fleet, path: &Path) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    write(fleet, &mut file)?;
    file.as_file().sync_all()?;
    file.persist(path)?;
    Ok(())
}

/// A loaded fleet and where it came from.
#[derive(Debug)]
pub struct Loaded {
    /// The fleet, empty unless a data file was read in full.
    pub fleet: Fleet,
    /// Which file, if any, the fleet was read from.
    pub origin: Origin,
}

/// Where a fleet was loaded from.
#[derive(Debug)]
pub enum Origin {
    /// The primary data file.
    Primary(PathBuf),
    /// The backup data file, because the primary was absent.
    Backup(PathBuf),
    /// Neither file existed.
    Fresh,
    /// A data file existed but could not be loaded.
    Unreadable {
        /// The file that failed.
        path: PathBuf,
        /// Why it failed.
        error: LoadError,
    },
}

/// Errors reading a data file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read data file: {0}")]
    Io(#[from] io::Error),

    /// The file contains no vehicles.
    #[error("data file is empty")]
    Empty,

    /// A line is not a valid machine-form vehicle.
    #[error("corrupted data file at line {line}: {source}")]
    Corrupted {
        /// One-based line number.
        line: usize,
        /// What is wrong with the line.
        source: RecordError,
    },

    /// A line describes a vehicle the fleet rejects.
    #[error("invalid vehicle at line {line}: {source}")]
    Vehicle {
        /// One-based line number.
        line: usize,
        /// Why the vehicle was rejected.
        source: CreateVehicleError,
    },
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use tempfile::TempDir;

    use super::*;
    use crate::domain::VehicleKind;

    fn fleet() -> Fleet {
        let mut fleet = Fleet::default();
        fleet
            .create_vehicle(NewVehicle::standard(
                "ABC123", "Toyota", "Corolla", "Jane Doe", 4,
            ))
            .unwrap();
        fleet
            .create_vehicle(NewVehicle::premium(
                "LUX001",
                "Holden",
                "Commodore",
                "Nath Walker",
                3,
                4.0,
                ["Mints", "Orange Juice", "Water"],
            ))
            .unwrap();
        fleet
    }

    fn files(tmp: &TempDir) -> DataFiles {
        DataFiles::in_root(tmp.path(), &FleetConfig::default())
    }

    #[test]
    fn writes_machine_form() {
        let mut buffer = Vec::new();
        write(&fleet(), &mut buffer).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "ABC123:Toyota:Corolla:Jane Doe:4:YES:1.5\n\
             LUX001:Holden:Commodore:Nath Walker:3:YES:4.0:Item 1 Mints:Item 2 Orange Juice:Item 3 Water\n"
        );
    }

    #[test]
    fn save_then_load_primary() {
        let tmp = TempDir::new().unwrap();
        let files = files(&tmp);
        let original = fleet();

        files.save(&original).unwrap();
        assert_eq!(
            std::fs::read(files.primary()).unwrap(),
            std::fs::read(files.backup()).unwrap()
        );

        let loaded = files.load(&FleetConfig::default());
        assert!(matches!(loaded.origin, Origin::Primary(ref p) if p == files.primary()));
        assert_eq!(loaded.fleet, original);
    }

    #[test]
    fn falls_back_to_backup() {
        let tmp = TempDir::new().unwrap();
        let files = files(&tmp);
        files.save(&fleet()).unwrap();
        std::fs::remove_file(files.primary()).unwrap();

        let loaded = files.load(&FleetConfig::default());
        assert!(matches!(loaded.origin, Origin::Backup(_)));
        assert_eq!(loaded.fleet.len(), 2);
        assert_eq!(
            loaded.fleet.vehicle("LUX001").map(|v| v.kind()),
            Some(VehicleKind::Premium)
        );
    }

    #[test]
    fn no_files_gives_fresh_fleet() {
        let tmp = TempDir::new().unwrap();
        let loaded = files(&tmp).load(&FleetConfig::default());

        assert!(matches!(loaded.origin, Origin::Fresh));
        assert!(loaded.fleet.is_empty());
    }

    #[test]
    fn corrupted_primary_gives_empty_fleet() {
        let tmp = TempDir::new().unwrap();
        let files = files(&tmp);
        files.save(&fleet()).unwrap();
        std::fs::write(
            files.primary(),
            "ABC123:Toyota:Corolla:Jane Doe:4:YES:1.5\nXYZ789:Kia:Rio\n",
        )
        .unwrap();

        let loaded = files.load(&FleetConfig::default());
        assert!(loaded.fleet.is_empty());
        assert!(matches!(
            loaded.origin,
            Origin::Unreadable {
                error: LoadError::Corrupted {
                    line: 2,
                    source: RecordError::TooFewFields(3)
                },
                ..
            }
        ));
    }

    #[test]
    fn empty_primary_is_reported() {
        let tmp = TempDir::new().unwrap();
        let files = files(&tmp);
        std::fs::write(files.primary(), "").unwrap();

        let loaded = files.load(&FleetConfig::default());
        assert!(loaded.fleet.is_empty());
        assert!(matches!(
            loaded.origin,
            Origin::Unreadable {
                error: LoadError::Empty,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_line_is_rejected() {
        let text = "ABC123:Toyota:Corolla:Jane Doe:4:YES:1.5\nabc123:Kia:Rio:Sam Li:2:NO:1.5\n";
        let result = read_from(&mut Cursor::new(text), &FleetConfig::default());

        assert!(matches!(
            result,
            Err(LoadError::Vehicle {
                line: 2,
                source: CreateVehicleError::Duplicate(_)
            })
        ));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = "\nABC123:Toyota:Corolla:Jane Doe:4:NO:1.5\n\n";
        let fleet = read_from(&mut Cursor::new(text), &FleetConfig::default()).unwrap();

        assert_eq!(fleet.len(), 1);
        assert!(fleet.vehicle("ABC123").unwrap().is_available());
    }

    #[test]
    fn load_config_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(load_config(tmp.path()), FleetConfig::default());

        let mut config = FleetConfig::default();
        config.primary_file = "fleet.txt".to_string();
        config.save(&tmp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(load_config(tmp.path()), config);
    }
}
