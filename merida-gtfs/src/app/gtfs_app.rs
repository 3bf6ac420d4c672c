use super::GtfsOperation;
use clap::Parser;

/// command line tool for inspecting the GTFS feeds used by the indicators
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct GtfsApp {
    #[command(subcommand)]
    pub op: GtfsOperation,
}
