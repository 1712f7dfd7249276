//! Starting and awaiting the child process whose execution is being observed.

use crate::{LaunchError, WaitError};
use std::{
    process::{Child, Command, ExitStatus, Stdio},
    thread,
    time::{Duration, Instant},
};

/// Exit status of a child process.
pub type ExitCode = i32;

/// How long [`ChildProcess::wait`] may block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    Infinite,
    After(Duration),
}

/// Options for [`Launcher::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOptions {
    /// If `true` the child writes directly to the caller's stdout and stderr; otherwise its output is discarded.
    pub inherit_output: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            inherit_output: true,
        }
    }
}

/// A running child process, exclusively owned by whoever started it.
pub trait ChildProcess {
    /// OS process ID.
    fn id(&self) -> u32;

    /// Waits for the child to exit for at most `timeout`.
    ///
    /// `Timeout::After(Duration::ZERO)` fails with [`WaitError::ZeroTimeout`]; to observe a child without
    /// blocking, hand it to an [`crate::ExitWatch`] and poll that instead.
    fn wait(&mut self, timeout: Timeout) -> Result<ExitCode, WaitError>;
}

/// Starts child processes.
pub trait Launcher {
    type Child: ChildProcess + Send + 'static;

    /// Starts `argv[0]` with arguments `argv[1..]`.
    fn start(&self, argv: &[String], options: LaunchOptions) -> Result<Self::Child, LaunchError>;
}

//=================
// std::process implementation

/// [`Launcher`] backed by [`std::process::Command`]. The child's stdin is always inherited.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdLauncher;

/// [`ChildProcess`] returned by [`StdLauncher`].
#[derive(Debug)]
pub struct StdChild {
    child: Child,
}

/// Interval at which a bounded wait re-checks the child.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Converts an [`ExitStatus`] to an [`ExitCode`]. On Unix a child killed by signal `s` yields `128 + s`.
fn exit_code(status: ExitStatus) -> ExitCode {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    -1
}

impl Launcher for StdLauncher {
    type Child = StdChild;

    fn start(&self, argv: &[String], options: LaunchOptions) -> Result<StdChild, LaunchError> {
        let (program, args) = argv.split_first().ok_or(LaunchError::EmptyCommand)?;

        let mut cmd = Command::new(program);
        cmd.args(args);
        if !options.inherit_output {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let child = cmd.spawn().map_err(|source| LaunchError::Spawn {
            program: program.clone(),
            source,
        })?;
        log::debug!("started `{program}` as pid {}", child.id());
        Ok(StdChild { child })
    }
}

impl ChildProcess for StdChild {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn wait(&mut self, timeout: Timeout) -> Result<ExitCode, WaitError> {
        let limit = match timeout {
            Timeout::Infinite => {
                let status = self.child.wait()?;
                return Ok(exit_code(status));
            }
            Timeout::After(limit) if limit.is_zero() => return Err(WaitError::ZeroTimeout),
            Timeout::After(limit) => limit,
        };

        let deadline = Instant::now() + limit;
        loop {
            if let Some(status) = self.child.try_wait()? {
                return Ok(exit_code(status));
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(WaitError::TimedOut(limit));
            }
            thread::sleep(WAIT_POLL_INTERVAL.min(deadline - now));
        }
    }
}
