use std::path::Path;

use clap::Parser;
use ridefleet::{Origin, VehicleKind};
use tracing::instrument;

use super::{
    Session,
    terminal::{Tone, paint},
};

#[derive(Debug, Parser, Default)]
#[command(about = "Show where the fleet was loaded from and vehicle counts")]
pub struct Status {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Status {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let session = Session::open(root);
        let fleet = &session.loaded.fleet;

        let count = |kind: VehicleKind| {
            fleet
                .vehicles()
                .iter()
                .filter(|vehicle| vehicle.kind() == kind)
                .count()
        };
        let standard = count(VehicleKind::Standard);
        let premium = count(VehicleKind::Premium);
        let source = describe(&session.loaded.origin);

        match self.output {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "source": source,
                    "vehicles": {
                        "standard": standard,
                        "premium": premium,
                        "total": fleet.len(),
                        "capacity": fleet.capacity(),
                    },
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                println!("Loaded from: {}", paint(&source, Tone::Note));
                println!();
                if fleet.is_empty() {
                    println!("No vehicles yet. Add one with 'ride add'.");
                    return Ok(());
                }
                println!("{:<10} {:>5}", "Kind", "Count");
                println!("{}", paint("────────────────", Tone::Muted));
                println!("{:<10} {standard:>5}", "Standard");
                println!("{:<10} {premium:>5}", "Premium");
                println!(
                    "{:<10} {:>5} {}",
                    "Total",
                    fleet.len(),
                    paint(format!("(of {})", fleet.capacity()), Tone::Muted)
                );
            }
        }

        Ok(())
    }
}

fn describe(origin: &Origin) -> String {
    match origin {
        Origin::Primary(path) => path.display().to_string(),
        Origin::Backup(path) => format!("{} (backup)", path.display()),
        Origin::Fresh => "nothing (no data files)".to_string(),
        Origin::Unreadable { path, error } => {
            format!("nothing ({} is unreadable: {error})", path.display())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn describes_backup_origin() {
        let origin = Origin::Backup(PathBuf::from("fleet/BackUpData.txt"));
        assert_eq!(describe(&origin), "fleet/BackUpData.txt (backup)");
    }

    #[test]
    fn describes_fresh_origin() {
        assert_eq!(describe(&Origin::Fresh), "nothing (no data files)");
    }
}
