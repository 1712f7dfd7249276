//! Runs a command while every hardware thread is busy-looping and reports how long the command took.
//!
//! Usage: `chooseprio_fighter <command> [args...]`. Set `CHOOSEPRIO_THREADS` to change the number of load threads.

use chooseprio::{command_from_args, run_under_load, FighterCfg, StdLauncher};
use std::{
    env,
    io::{self, Write},
    process,
};

fn main() -> process::ExitCode {
    env_logger::init();

    let argv = match command_from_args(env::args()) {
        Ok(argv) => argv,
        Err(e) => {
            eprintln!("{e}");
            return process::ExitCode::FAILURE;
        }
    };

    let cfg = FighterCfg::from_env();
    let res = run_under_load(&StdLauncher, &argv, &cfg, |threads| {
        println!("Starting {threads} stress threads...");
        println!("Running command...");
        _ = io::stdout().flush();
    });

    match res {
        Ok(report) => {
            if let Some(e) = &report.wait_error {
                eprintln!("Error waiting for process: {e}");
            }
            println!("{report}");
            process::ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to start process: {e}");
            process::ExitCode::FAILURE
        }
    }
}
