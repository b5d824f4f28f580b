use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use rusty_smoother::pipeline::{self, PipelineConfig};

/// Generate a noisy sine wave, smooth it with a double moving-average pass,
/// and write both series as tab-separated text.
#[derive(Parser)]
#[command(name = "rusty-smoother", version)]
struct Cli {
    /// Output path for the raw synthetic data
    raw_output: PathBuf,

    /// Output path for the filtered data
    filtered_output: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match pipeline::run(&PipelineConfig::default(), &cli.raw_output, &cli.filtered_output) {
        Ok(summary) => {
            log::info!(
                "done: {} samples x {} channels, {} passes",
                summary.samples,
                summary.channels,
                summary.passes
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
