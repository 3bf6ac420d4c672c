//! inspects a GTFS archive the way the indicator engines see it.
use clap::Parser;
use merida_gtfs::app::GtfsApp;

fn main() {
    env_logger::init();
    let args = GtfsApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("{e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
