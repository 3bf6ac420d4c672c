use clap::Parser;
use merida_indicators::app::IndicatorsApp;

fn main() {
    env_logger::init();
    let args = IndicatorsApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("{e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
