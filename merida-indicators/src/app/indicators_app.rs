use super::IndicatorsOperation;
use clap::Parser;

/// command line tool computing transit indicators for a base and a
/// treatment GTFS scenario of Mérida
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct IndicatorsApp {
    #[command(subcommand)]
    pub op: IndicatorsOperation,
}
