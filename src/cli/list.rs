use std::path::Path;

use anyhow::Context;
use clap::Parser;
use ridefleet::{
    RegNo, Vehicle, VehicleKind,
    domain::{Refreshments, SortOrder},
};
use serde::Serialize;
use tracing::instrument;

use super::{
    Session,
    terminal::{Tone, availability, paint},
};

#[derive(Debug, Parser)]
#[command(about = "List vehicles sorted by registration number")]
pub struct List {
    /// Only list vehicles of this kind (standard, premium)
    #[arg(long, value_parser = super::parse_kind)]
    kind: Option<VehicleKind>,

    /// Sort order
    #[arg(long, value_name = "ORDER", default_value = "asc")]
    order: Order,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum Order {
    #[default]
    Asc,
    Desc,
}

impl From<Order> for SortOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::Asc => Self::Ascending,
            Order::Desc => Self::Descending,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl List {
    #[instrument(level = "debug", skip(root))]
    pub fn run(self, root: &Path) -> anyhow::Result<()> {
        let session = Session::open(root);
        let fleet = &session.loaded.fleet;

        let kinds = self
            .kind
            .map_or_else(|| vec![VehicleKind::Standard, VehicleKind::Premium], |k| vec![k]);
        let vehicles: Vec<&Vehicle> = kinds
            .into_iter()
            .flat_map(|kind| fleet.list_by_kind(kind, self.order.into()))
            .collect();

        render(&vehicles, self.output)
    }
}

/// Prints vehicles in the chosen format.
pub fn render(vehicles: &[&Vehicle], output: OutputFormat) -> anyhow::Result<()> {
    match output {
        OutputFormat::Table => {
            render_table(vehicles);
            Ok(())
        }
        OutputFormat::Json => render_json(vehicles),
    }
}

fn render_table(vehicles: &[&Vehicle]) {
    if vehicles.is_empty() {
        println!("{}", paint("No vehicles found.", Tone::Muted));
        return;
    }

    println!(
        "{:<8} {:<9} {:<24} {:<20} {:>4} {:>8}  Available",
        "Reg No", "Kind", "Make & Model", "Driver", "Seats", "Fee"
    );
    println!("{}", paint("─".repeat(86), Tone::Muted));
    for vehicle in vehicles {
        let model = format!("{} {}", vehicle.make(), vehicle.model());
        println!(
            "{:<8} {:<9} {model:<24} {:<20} {:>4} {:>8}  {}",
            vehicle.reg_no().as_str(),
            vehicle.kind().as_str(),
            vehicle.driver_name(),
            vehicle.capacity(),
            format!("${:.2}", vehicle.base_fee()),
            availability(vehicle.is_available())
        );
    }
}

#[derive(Debug, Serialize)]
struct Row<'a> {
    reg_no: &'a RegNo,
    kind: VehicleKind,
    make: &'a str,
    model: &'a str,
    driver: &'a str,
    capacity: u32,
    base_fee: f64,
    available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    refreshments: Option<&'a Refreshments>,
}

impl<'a> From<&'a Vehicle> for Row<'a> {
    fn from(vehicle: &'a Vehicle) -> Self {
        Self {
            reg_no: vehicle.reg_no(),
            kind: vehicle.kind(),
            make: vehicle.make(),
            model: vehicle.model(),
            driver: vehicle.driver_name(),
            capacity: vehicle.capacity(),
            base_fee: vehicle.base_fee(),
            available: vehicle.is_available(),
            refreshments: vehicle.refreshments(),
        }
    }
}

fn render_json(vehicles: &[&Vehicle]) -> anyhow::Result<()> {
    let rows: Vec<Row> = vehicles.iter().map(|&vehicle| Row::from(vehicle)).collect();

    serde_json::to_writer_pretty(std::io::stdout(), &rows)
        .context("failed to render json output")?;
    println!();
    Ok(())
}
