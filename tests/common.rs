#![allow(dead_code)]

use chooseprio::{ChildProcess, ExitCode, LaunchError, LaunchOptions, Launcher, Timeout, WaitError};
use std::{io, thread, time::Duration};

/// Enables log output in tests, e.g. `RUST_LOG=chooseprio=debug cargo test`.
pub fn init_logging() {
    _ = env_logger::builder().is_test(true).try_init();
}

pub fn f64_are_close(left: f64, right: f64, pct: f64) -> bool {
    let avg_abs = (left.abs() + right.abs()) / 2.0;
    (left - right).abs() <= avg_abs * pct
}

pub fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

//=================
// Test doubles

/// How a [`ScriptedChild`] ends.
#[derive(Debug, Clone, Copy)]
pub enum Ending {
    Exit(ExitCode),
    WaitFails,
}

/// Child that "runs" for `runtime` and then ends as scripted.
pub struct ScriptedChild {
    runtime: Duration,
    ending: Ending,
}

impl ChildProcess for ScriptedChild {
    fn id(&self) -> u32 {
        0
    }

    fn wait(&mut self, timeout: Timeout) -> Result<ExitCode, WaitError> {
        if timeout == Timeout::After(Duration::ZERO) {
            return Err(WaitError::ZeroTimeout);
        }
        thread::sleep(self.runtime);
        match self.ending {
            Ending::Exit(code) => Ok(code),
            Ending::WaitFails => Err(WaitError::Io(io::Error::new(
                io::ErrorKind::Other,
                "scripted wait failure",
            ))),
        }
    }
}

/// Launcher whose children don't start a real process.
pub struct ScriptedLauncher {
    pub runtime: Duration,
    pub ending: Ending,
}

impl Launcher for ScriptedLauncher {
    type Child = ScriptedChild;

    fn start(&self, argv: &[String], _options: LaunchOptions) -> Result<ScriptedChild, LaunchError> {
        if argv.is_empty() {
            return Err(LaunchError::EmptyCommand);
        }
        Ok(ScriptedChild {
            runtime: self.runtime,
            ending: self.ending,
        })
    }
}

/// Launcher that never manages to start anything.
pub struct FailingLauncher;

impl Launcher for FailingLauncher {
    type Child = ScriptedChild;

    fn start(&self, argv: &[String], _options: LaunchOptions) -> Result<ScriptedChild, LaunchError> {
        Err(LaunchError::Spawn {
            program: argv.first().cloned().unwrap_or_default(),
            source: io::Error::new(io::ErrorKind::NotFound, "scripted launch failure"),
        })
    }
}
