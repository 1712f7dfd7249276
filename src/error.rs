//! Error types surfaced by the launcher, the load generator and the two measurements.

use std::{io, time::Duration};
use thiserror::Error;

/// The command line did not name a command to run.
#[derive(Debug, Error)]
#[error("Usage: {program} <command> [args...]")]
pub struct UsageError {
    pub program: String,
}

/// The child process could not be started.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no command given")]
    EmptyCommand,

    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Waiting for the child process failed. Never fatal to reporting: results are still produced, with an exit code
/// of `0`.
#[derive(Debug, Error)]
pub enum WaitError {
    /// A zero-duration wait is not a valid way to poll a child. Poll an [`crate::ExitWatch`] instead.
    #[error("zero-duration wait is not supported")]
    ZeroTimeout,

    #[error("child still running after {0:?}")]
    TimedOut(Duration),

    #[error("wait failed: {0}")]
    Io(#[from] io::Error),

    /// The thread waiting on the child went away without delivering an outcome.
    #[error("exit watcher terminated without a result")]
    Abandoned,
}

/// The load generator could not be started.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to spawn load thread: {0}")]
    Spawn(#[source] io::Error),
}

/// Errors that abort a measurement run.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("failed to spawn exit watcher: {0}")]
    Watch(#[source] io::Error),
}
