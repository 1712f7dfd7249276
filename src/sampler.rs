//! Measures how accurately a fixed sleep quantum is honored while a child process runs.
//!
//! The child itself is the load: no synthetic load generator is started. The child is awaited on a separate
//! thread (see [`ExitWatch`]) so that the sampling loop never blocks on it.

use crate::{
    env_cfg, Error, ExitCode, ExitWatch, HighResTimer, LaunchOptions, Launcher, RunningStats,
    WaitError,
};
use std::{
    thread,
    time::{Duration, Instant},
};

//=================
// SamplerCfg

/// Configuration for [`measure_sleep_latency`]. It is instantiated with [`SamplerCfg::default`] and can be
/// customized with its other methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplerCfg {
    pub(crate) quantum: Duration,
    pub(crate) progress_interval: u64,
    pub(crate) high_res_timer: bool,
}

impl Default for SamplerCfg {
    /// The defaults are:
    /// - a sleep quantum of 16 ms, roughly one display refresh interval;
    /// - a progress report every 100 samples;
    /// - the high-resolution timer requested for the duration of the run.
    fn default() -> Self {
        Self {
            quantum: Duration::from_millis(16),
            progress_interval: 100,
            high_res_timer: true,
        }
    }
}

impl SamplerCfg {
    /// Default configuration with overrides from the environment:
    /// - `CHOOSEPRIO_QUANTUM_MS` - sleep quantum in milliseconds;
    /// - `CHOOSEPRIO_PROGRESS_EVERY` - samples between progress reports, `0` to disable them;
    /// - `CHOOSEPRIO_HIGH_RES_TIMER` - `0` to leave the host timer resolution alone.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(ms) = env_cfg::var::<u64>(env_cfg::ENV_QUANTUM_MS) {
            cfg = cfg.with_quantum(Duration::from_millis(ms));
        }
        if let Some(n) = env_cfg::var::<u64>(env_cfg::ENV_PROGRESS_EVERY) {
            cfg = cfg.with_progress_interval(n);
        }
        if let Some(raw) = env_cfg::var::<String>(env_cfg::ENV_HIGH_RES_TIMER) {
            cfg = cfg.with_high_res_timer(env_cfg::parse_flag(&raw));
        }
        cfg
    }

    /// Creates a new [`SamplerCfg`] configured the same as `self` but with the given sleep quantum.
    pub fn with_quantum(&self, quantum: Duration) -> Self {
        Self {
            quantum,
            ..self.clone()
        }
    }

    /// Creates a new [`SamplerCfg`] configured the same as `self` but reporting progress every
    /// `progress_interval` samples. `0` disables progress reports.
    pub fn with_progress_interval(&self, progress_interval: u64) -> Self {
        Self {
            progress_interval,
            ..self.clone()
        }
    }

    /// Creates a new [`SamplerCfg`] configured the same as `self` but with the high-resolution timer request
    /// turned on or off.
    pub fn with_high_res_timer(&self, high_res_timer: bool) -> Self {
        Self {
            high_res_timer,
            ..self.clone()
        }
    }

    pub fn quantum(&self) -> Duration {
        self.quantum
    }

    pub fn progress_interval(&self) -> u64 {
        self.progress_interval
    }

    pub fn high_res_timer(&self) -> bool {
        self.high_res_timer
    }
}

//=================
// Phase, Progress, LatencyReport

/// Stages of a [`measure_sleep_latency`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Launching,
    Sampling,
    Finished,
}

/// Live readout passed to the progress observer of [`measure_sleep_latency`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub count: u64,
    pub average_ms: f64,
    pub last_ms: f64,
}

/// Result of [`measure_sleep_latency`].
#[derive(Debug)]
pub struct LatencyReport {
    /// Child's exit code; `0` if waiting failed.
    pub exit_code: ExitCode,
    pub samples: u64,
    /// Mean actual duration of one sleep quantum, in milliseconds.
    pub average_ms: f64,
    pub wait_error: Option<WaitError>,
}

//=================
// measure_sleep_latency

struct PhaseTracker(Phase);

impl PhaseTracker {
    fn enter(&mut self, next: Phase) {
        log::debug!("{:?} -> {:?}", self.0, next);
        self.0 = next;
    }
}

fn elapsed_ms(start: Instant, end: Instant) -> f64 {
    end.duration_since(start).as_secs_f64() * 1000.0
}

/// Runs `argv` with inherited output and, until it exits, repeatedly sleeps for `cfg`'s quantum and records the
/// actual time each sleep took.
///
/// `on_progress` is called every `cfg.progress_interval()` samples while the child is still running. Returns
/// [`Error::Launch`] without sampling if the child can't be started.
pub fn measure_sleep_latency<L: Launcher>(
    launcher: &L,
    argv: &[String],
    cfg: &SamplerCfg,
    mut on_progress: impl FnMut(&Progress),
) -> Result<LatencyReport, Error> {
    let mut phase = PhaseTracker(Phase::NotStarted);
    let _timer = cfg.high_res_timer.then(HighResTimer::acquire);

    phase.enter(Phase::Launching);
    let child = launcher.start(argv, LaunchOptions::default()).map_err(|e| {
        phase.enter(Phase::Finished);
        e
    })?;
    let mut watch = ExitWatch::spawn(child).map_err(Error::Watch)?;

    phase.enter(Phase::Sampling);
    let mut stats = RunningStats::new();
    let outcome = loop {
        let start = Instant::now();
        thread::sleep(cfg.quantum);
        let last_ms = elapsed_ms(start, Instant::now());

        stats.update(last_ms);
        log::trace!("sample {}: {last_ms:.4} ms", stats.count());

        if let Some(outcome) = watch.poll() {
            break outcome;
        }

        if cfg.progress_interval > 0 && stats.count() % cfg.progress_interval == 0 {
            on_progress(&Progress {
                count: stats.count(),
                average_ms: stats.average(),
                last_ms,
            });
        }
    };
    phase.enter(Phase::Finished);

    let (exit_code, wait_error) = match outcome {
        Ok(code) => (code, None),
        Err(e) => {
            log::warn!("error waiting for child: {e}");
            (0, Some(e))
        }
    };

    Ok(LatencyReport {
        exit_code,
        samples: stats.count(),
        average_ms: stats.average(),
        wait_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cfg_defaults() {
        let cfg = SamplerCfg::default();
        assert_eq!(cfg.quantum(), Duration::from_millis(16));
        assert_eq!(cfg.progress_interval(), 100);
        assert!(cfg.high_res_timer());
    }

    #[test]
    fn cfg_builder_keeps_other_fields() {
        let cfg = SamplerCfg::default()
            .with_quantum(Duration::from_millis(5))
            .with_high_res_timer(false);
        assert_eq!(cfg.quantum(), Duration::from_millis(5));
        assert_eq!(cfg.progress_interval(), 100);
        assert!(!cfg.high_res_timer());
    }

    #[test]
    fn elapsed_in_millis() {
        let start = Instant::now();
        let end = start + Duration::from_micros(16_500);
        assert!((elapsed_ms(start, end) - 16.5).abs() < 1e-9);
    }
}
