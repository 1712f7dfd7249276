//! Runs a command and, while it executes, measures how long a 16 ms sleep actually takes.
//!
//! Usage: `chooseprio_latency <command> [args...]`. See [`chooseprio::SamplerCfg::from_env`] for the environment
//! variables that tune the measurement.

use chooseprio::{command_from_args, measure_sleep_latency, Progress, SamplerCfg, StdLauncher};
use std::{
    env,
    io::{self, Write},
    process,
};

/// Overwrites the current console line with `progress`. Write errors are ignored.
fn print_progress(progress: &Progress) {
    let mut out = io::stdout().lock();
    _ = write!(out, "\r{progress}");
    _ = out.flush();
}

fn main() -> process::ExitCode {
    env_logger::init();

    let argv = match command_from_args(env::args()) {
        Ok(argv) => argv,
        Err(e) => {
            eprintln!("{e}");
            return process::ExitCode::FAILURE;
        }
    };

    let cfg = SamplerCfg::from_env();
    println!("Starting process...");

    match measure_sleep_latency(&StdLauncher, &argv, &cfg, print_progress) {
        Ok(report) => {
            if let Some(e) = &report.wait_error {
                eprintln!("\nError status: {e}");
            }
            println!("\n\n{report}");
            process::ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error starting process: {e}");
            process::ExitCode::FAILURE
        }
    }
}
