mod args;
mod cli;
#[cfg(feature = "tui")]
mod tui;

use args::Args;
use log::error;
use std::process;

fn main() {
    env_logger::init();
    let args = Args::parse().unwrap_or_else(|e| e.exit());
    if let Err(e) = cli::run(args) {
        error!("{}", e);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
