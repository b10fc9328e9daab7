use clap::Parser;
use dbdelay::app::DbDelayApp;

fn main() {
    env_logger::init();
    let args = DbDelayApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("dbdelay failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
