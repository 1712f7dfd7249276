//! This library supports measuring how external CPU contention affects OS scheduling latency and the run time
//! of a subprocess.
//!
//! Two measurements are provided, each backing one of the crate's binaries:
//! - [`run_under_load`] saturates every hardware thread with busy-looping workers (see [`LoadGenerator`]),
//! runs a child process to completion and reports its wall-clock duration (`chooseprio_fighter`).
//! - [`measure_sleep_latency`] runs a child process and, while it executes, repeatedly sleeps for a fixed
//! quantum (16 ms by default) and records how long each sleep actually took in a [`RunningStats`]
//! (`chooseprio_latency`).
//!
//! Child processes are started through the [`Launcher`] trait; [`StdLauncher`] is the implementation on top of
//! [`std::process::Command`].
//!
//! Latencies are reported in **milliseconds**.
//!
//! ### Sleep latency example
//!
//! ```no_run
//! use chooseprio::{measure_sleep_latency, SamplerCfg, StdLauncher};
//!
//! let argv = vec!["sleep".to_owned(), "1".to_owned()];
//! let report = measure_sleep_latency(&StdLauncher, &argv, &SamplerCfg::default(), |_| {})
//!     .expect("`sleep` should be on the PATH");
//! println!("{report}");
//! ```
#![deny(clippy::unwrap_used)]

mod error;
pub use error::*;

mod running_stats;
pub use running_stats::*;

mod load_gen;
pub use load_gen::*;

mod launcher;
pub use launcher::*;

mod exit_watch;
pub use exit_watch::*;

mod timer_res;
pub use timer_res::*;

mod env_cfg;

mod fighter;
pub use fighter::*;

mod sampler;
pub use sampler::*;

mod report;
pub use report::*;

mod cli;
pub use cli::*;
