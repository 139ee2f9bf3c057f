// File: crates/frame-plot/src/main.rs
// Summary: Shows labeled/0.txt as a pitch/yawca chart; window if possible, PNG otherwise.

use std::process::ExitCode;

use frame_plot::{Outcome, PlotConfig};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PlotConfig::default();
    log::info!("input: {}", config.input.display());

    match frame_plot::run(&config) {
        Ok(Outcome::Rendered(path)) => {
            println!("Wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Ok(Outcome::Displayed) => ExitCode::SUCCESS,
        Err(e) => {
            // Printed directly so the diagnostic survives RUST_LOG=off.
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
