//! Measures the wall-clock duration of a child process while every hardware thread is saturated with synthetic
//! load.

use crate::{
    default_load_threads, env_cfg, ChildProcess, Error, ExitCode, LaunchOptions, Launcher,
    LoadGenerator, Timeout, WaitError,
};
use std::time::{Duration, Instant};

//=================
// FighterCfg

/// Configuration for [`run_under_load`]. It is instantiated with [`FighterCfg::default`] and can be customized
/// with its other methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FighterCfg {
    pub(crate) threads: usize,
}

impl Default for FighterCfg {
    /// Uses one load thread per hardware thread (see [`default_load_threads`]).
    fn default() -> Self {
        Self {
            threads: default_load_threads(),
        }
    }
}

impl FighterCfg {
    /// Default configuration with overrides from the environment: `CHOOSEPRIO_THREADS` sets the number of load
    /// threads.
    pub fn from_env() -> Self {
        let cfg = Self::default();
        match env_cfg::var(env_cfg::ENV_THREADS) {
            Some(threads) => cfg.with_threads(threads),
            None => cfg,
        }
    }

    /// Creates a new [`FighterCfg`] configured the same as `self` but with the given number of load threads.
    /// `0` runs the child without synthetic load.
    pub fn with_threads(&self, threads: usize) -> Self {
        Self { threads }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }
}

//=================
// FighterReport

/// Result of [`run_under_load`].
#[derive(Debug)]
pub struct FighterReport {
    /// Time from just before the child was started until it was observed to exit.
    pub elapsed: Duration,
    /// Child's exit code; `0` if waiting failed.
    pub exit_code: ExitCode,
    pub wait_error: Option<WaitError>,
    /// Number of load threads that ran alongside the child.
    pub threads: usize,
    /// Total busy-loop iterations performed by the load threads.
    pub load_iterations: u64,
}

//=================
// run_under_load

/// Starts the load generator, runs `argv` to completion with inherited output and reports how long it took.
///
/// The load generator is stopped and joined before this function returns, whether or not the child could be
/// started. `on_start` is invoked once the load is running, just before the child is launched.
pub fn run_under_load<L: Launcher>(
    launcher: &L,
    argv: &[String],
    cfg: &FighterCfg,
    on_start: impl FnOnce(usize),
) -> Result<FighterReport, Error> {
    let mut load = LoadGenerator::start(cfg.threads)?;
    on_start(load.worker_count());

    let start = Instant::now();
    let mut child = match launcher.start(argv, LaunchOptions::default()) {
        Ok(child) => child,
        Err(e) => {
            load.stop_and_join();
            return Err(e.into());
        }
    };
    let waited = child.wait(Timeout::Infinite);
    let elapsed = start.elapsed();

    let load_iterations = load.stop_and_join();

    let (exit_code, wait_error) = match waited {
        Ok(code) => (code, None),
        Err(e) => {
            log::warn!("error waiting for child: {e}");
            (0, Some(e))
        }
    };
    log::debug!("child exited with {exit_code} after {elapsed:?}");

    Ok(FighterReport {
        elapsed,
        exit_code,
        wait_error,
        threads: load.worker_count(),
        load_iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::FighterCfg;

    #[test]
    fn cfg_builder() {
        let cfg = FighterCfg::default();
        assert!(cfg.threads() >= 1);
        assert_eq!(cfg.with_threads(0).threads(), 0);
    }
}
