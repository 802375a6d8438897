use std::path::{Path, PathBuf};

mod add;
mod available;
mod list;
mod status;
mod terminal;

use add::Add;
use available::Available;
use clap::ArgAction;
use list::List;
use ridefleet::{
    DataFiles, FleetConfig, Loaded, Origin, RegNo, VehicleKind, storage::load_config,
};
use status::Status;
use terminal::{Tone, paint};
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The directory holding the fleet's configuration and data files
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or(Command::Status(Status::default()))
            .run(&self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show where the fleet was loaded from and how many vehicles it has
    /// (default)
    Status(Status),

    /// Write a default configuration file
    Init,

    /// Add a vehicle to the fleet
    Add(Add),

    /// List vehicles sorted by registration number
    List(List),

    /// Show the full report for one vehicle
    Show(Show),

    /// List vehicles free on a given date
    Available(Available),

    /// Check whether a registration number is valid and in the fleet
    Check(Check),
}

impl Command {
    fn run(self, root: &Path) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(root)?,
            Self::Init => Init::run(root)?,
            Self::Add(command) => command.run(root)?,
            Self::List(command) => command.run(root)?,
            Self::Show(command) => command.run(root)?,
            Self::Available(command) => command.run(root)?,
            Self::Check(command) => command.run(root)?,
        }
        Ok(())
    }
}

/// The loaded fleet together with the files it was loaded from.
struct Session {
    files: DataFiles,
    loaded: Loaded,
}

impl Session {
    fn open(root: &Path) -> Self {
        let config = load_config(root);
        let files = DataFiles::in_root(root, &config);
        let loaded = files.load(&config);

        if let Origin::Unreadable { path, error } = &loaded.origin {
            eprintln!(
                "{} {}: {error}",
                paint("warning:", Tone::Bad),
                path.display()
            );
        }

        Self { files, loaded }
    }

    /// Writes the fleet back to both data files.
    ///
    /// Refuses when a data file exists but could not be read, so that its
    /// contents are not silently replaced.
    fn save(&self) -> anyhow::Result<()> {
        if let Origin::Unreadable { path, .. } = &self.loaded.origin {
            anyhow::bail!(
                "refusing to overwrite unreadable data file {}; fix or remove it first",
                path.display()
            );
        }
        self.files.save(&self.loaded.fleet)?;
        Ok(())
    }
}

fn parse_kind(s: &str) -> Result<VehicleKind, String> {
    match s.to_ascii_lowercase().as_str() {
        "standard" => Ok(VehicleKind::Standard),
        "premium" => Ok(VehicleKind::Premium),
        _ => Err(format!("unknown vehicle kind '{s}': expected standard or premium")),
    }
}

#[derive(Debug, clap::Parser)]
pub struct Init {}

impl Init {
    #[instrument]
    fn run(root: &Path) -> anyhow::Result<()> {
        let path = root.join(ridefleet::storage::data_files::CONFIG_FILE);
        if path.exists() {
            anyhow::bail!("Fleet already initialized (found {})", path.display());
        }

        std::fs::create_dir_all(root)?;
        let config = FleetConfig::default();
        config
            .save(&path)
            .map_err(|e| anyhow::anyhow!("Failed to create fleet.toml: {e}"))?;

        println!("Initialized fleet in {}", root.display());
        println!("  Created: {}", path.display());
        println!("  Data files: {} / {}", config.primary_file, config.backup_file);
        println!();
        println!("Next steps:");
        println!("  ride add standard ABC123 Toyota Corolla \"Jane Doe\" 4");
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Show {
    /// Registration number of the vehicle
    reg_no: String,
}

impl Show {
    #[instrument(level = "debug", skip(root))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let session = Session::open(root);
        let details = session.loaded.fleet.details(&self.reg_no)?;
        print!("{details}");
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Check {
    /// Registration number to check
    reg_no: String,
}

impl Check {
    #[instrument(level = "debug", skip(root))]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        let reg_no = match RegNo::new(&self.reg_no) {
            Ok(reg_no) => reg_no,
            Err(e) => {
                println!("{}", paint(e, Tone::Bad));
                std::process::exit(2);
            }
        };

        let session = Session::open(root);
        if session.loaded.fleet.vehicle_exists(&reg_no) {
            println!("{} is in the fleet", paint(&reg_no, Tone::Good));
            Ok(())
        } else {
            println!("{} is not in the fleet", paint(&reg_no, Tone::Bad));
            std::process::exit(1);
        }
    }
}
