use std::path::Path;

use clap::{Args, Parser, Subcommand};
use ridefleet::NewVehicle;
use tracing::instrument;

use super::{
    Session,
    terminal::{Tone, paint},
};

#[derive(Debug, Parser)]
#[command(about = "Add a vehicle to the fleet and save it")]
pub struct Add {
    #[command(subcommand)]
    kind: Kind,
}

#[derive(Debug, Subcommand)]
enum Kind {
    /// A standard vehicle at the fixed base fee
    Standard(Details),

    /// A premium vehicle with its own base fee and refreshments
    Premium {
        #[command(flatten)]
        details: Details,

        /// Base fee (bookings are refused below 3.00)
        #[arg(long)]
        fee: f64,

        /// Three to five refreshments, comma-separated
        #[arg(long, value_delimiter = ',', required = true)]
        refreshments: Vec<String>,
    },
}

#[derive(Debug, Args)]
struct Details {
    /// Registration number: three letters then three digits
    reg_no: String,

    /// Manufacturer
    make: String,

    /// Model name
    model: String,

    /// Driver's full name (quote it)
    driver: String,

    /// Number of passenger seats (1 to 9)
    capacity: u32,
}

impl Add {
    #[instrument(level = "debug", skip(root))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let new = match self.kind {
            Kind::Standard(d) => NewVehicle::standard(d.reg_no, d.make, d.model, d.driver, d.capacity),
            Kind::Premium {
                details: d,
                fee,
                refreshments,
            } => NewVehicle::premium(
                d.reg_no,
                d.make,
                d.model,
                d.driver,
                d.capacity,
                fee,
                refreshments,
            ),
        };

        let mut session = Session::open(root);
        let reg_no = session.loaded.fleet.create_vehicle(new)?;
        session.save()?;

        println!("Added {}", paint(&reg_no, Tone::Good));
        Ok(())
    }
}
