//! Provides the ability to observe a child's exit without blocking the observing thread.

use crate::{ChildProcess, ExitCode, Timeout, WaitError};
use std::{
    io,
    thread::{self, JoinHandle},
};
use tokio::sync::oneshot::{self, error::TryRecvError};

/// Outcome of waiting for a child process.
pub type WaitOutcome = Result<ExitCode, WaitError>;

/// Waits for a child process on a dedicated thread and exposes the outcome through a single-assignment slot that
/// can be polled with [`Self::poll`].
///
/// The blocking wait is never performed on the caller's thread.
pub struct ExitWatch {
    rx: oneshot::Receiver<WaitOutcome>,
    join_handle: Option<JoinHandle<()>>,
    outcome_taken: bool,
}

impl ExitWatch {
    /// Moves `child` to a new thread that waits for it to exit.
    pub fn spawn<C>(mut child: C) -> io::Result<Self>
    where
        C: ChildProcess + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let pid = child.id();
        let join_handle = thread::Builder::new()
            .name(format!("chooseprio-wait-{pid}"))
            .spawn(move || {
                let outcome = child.wait(Timeout::Infinite);
                log::debug!("pid {pid} finished: {outcome:?}");
                // The receiver may already be gone if the observer bailed out.
                let _ = tx.send(outcome);
            })?;

        Ok(Self {
            rx,
            join_handle: Some(join_handle),
            outcome_taken: false,
        })
    }

    /// Returns the outcome if the child has finished, `None` otherwise. Never blocks.
    ///
    /// Once an outcome has been returned, subsequent calls return `None`.
    pub fn poll(&mut self) -> Option<WaitOutcome> {
        if self.outcome_taken {
            return None;
        }
        let outcome = match self.rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => Err(WaitError::Abandoned),
        };
        self.outcome_taken = true;
        self.join();
        Some(outcome)
    }

    /// Blocks until the child finishes and returns the outcome.
    ///
    /// Returns [`WaitError::Abandoned`] if the outcome was already returned by [`Self::poll`].
    pub fn wait(mut self) -> WaitOutcome {
        if self.outcome_taken {
            return Err(WaitError::Abandoned);
        }
        self.join();
        self.outcome_taken = true;
        self.rx.try_recv().unwrap_or(Err(WaitError::Abandoned))
    }

    fn join(&mut self) {
        if let Some(jh) = self.join_handle.take() {
            if jh.join().is_err() {
                log::warn!("exit watcher thread panicked");
            }
        }
    }
}
