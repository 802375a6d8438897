use std::path::Path;

use clap::Parser;
use ridefleet::{Date, VehicleKind};
use tracing::instrument;

use super::{
    Session,
    list::{OutputFormat, render},
    terminal::{Tone, paint},
};

#[derive(Debug, Parser)]
#[command(about = "List vehicles with no booking on a date")]
pub struct Available {
    /// The date to check, as DD/MM/YYYY
    date: Date,

    /// Only list vehicles of this kind (standard, premium)
    #[arg(long, value_parser = super::parse_kind)]
    kind: Option<VehicleKind>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl Available {
    #[instrument(level = "debug", skip(root))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let session = Session::open(root);
        let fleet = &session.loaded.fleet;

        let vehicles = match self.kind {
            Some(kind) => fleet.find_available_of_kind(kind, self.date),
            None => fleet.find_available(self.date),
        };

        if vehicles.is_empty() && matches!(self.output, OutputFormat::Table) {
            println!(
                "{}",
                paint(format!("No vehicles available on {}.", self.date), Tone::Bad)
            );
            return Ok(());
        }

        render(&vehicles, self.output)
    }
}
