//! `ride`: manage a ride-hire fleet stored as plain text.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
