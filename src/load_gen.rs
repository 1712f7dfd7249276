//! Synthetic CPU load: one busy-looping thread per hardware thread.

use crate::LoadError;
use std::{
    hint::black_box,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
};

/// Returns the number of hardware threads available to this process, or `1` if it can't be determined.
pub fn default_load_threads() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Decrements the live-worker count when a worker exits, including by unwinding.
struct LiveGuard(Arc<AtomicUsize>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Spins until `stop` is set and returns the number of iterations.
fn busy_loop(stop: &AtomicBool) -> u64 {
    let mut counter: u64 = 0;
    while !stop.load(Ordering::Relaxed) {
        counter = black_box(counter.wrapping_add(1));
    }
    counter
}

/// Handle to a set of busy-looping worker threads sharing one stop flag.
///
/// Lifecycle is one-shot: started by [`Self::start`], stopped by [`Self::stop_and_join`]. Dropping a generator that
/// is still running stops and joins it.
pub struct LoadGenerator {
    stop: Arc<AtomicBool>,
    live: Arc<AtomicUsize>,
    workers: Vec<JoinHandle<u64>>,
    worker_count: usize,
}

impl LoadGenerator {
    /// Spawns `n` busy-looping workers. `n == 0` yields a generator that applies no load.
    ///
    /// If a thread can't be spawned, the workers started so far are stopped and joined before the error is
    /// returned.
    pub fn start(n: usize) -> Result<Self, LoadError> {
        let mut lg = LoadGenerator {
            stop: Arc::new(AtomicBool::new(false)),
            live: Arc::new(AtomicUsize::new(0)),
            workers: Vec::with_capacity(n),
            worker_count: 0,
        };

        for i in 0..n {
            let stop = lg.stop.clone();
            let live = lg.live.clone();
            live.fetch_add(1, Ordering::Relaxed);
            let spawned = thread::Builder::new()
                .name(format!("chooseprio-load-{i}"))
                .spawn(move || {
                    let _guard = LiveGuard(live);
                    busy_loop(&stop)
                });
            match spawned {
                Ok(jh) => lg.workers.push(jh),
                Err(e) => {
                    lg.live.fetch_sub(1, Ordering::Relaxed);
                    lg.stop_and_join();
                    return Err(LoadError::Spawn(e));
                }
            }
        }

        lg.worker_count = n;
        log::debug!("started {n} load threads");
        Ok(lg)
    }

    /// Spawns one worker per hardware thread (see [`default_load_threads`]).
    pub fn start_default() -> Result<Self, LoadError> {
        Self::start(default_load_threads())
    }

    /// Number of workers that were started.
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Number of workers still executing.
    pub fn live_workers(&self) -> usize {
        self.live.load(Ordering::Relaxed)
    }

    /// Signals all workers to stop and blocks until each has exited. Returns the total number of busy-loop
    /// iterations the workers performed.
    ///
    /// Subsequent calls return `0` immediately.
    pub fn stop_and_join(&mut self) -> u64 {
        self.stop.store(true, Ordering::Relaxed);
        let mut iterations: u64 = 0;
        for jh in self.workers.drain(..) {
            match jh.join() {
                Ok(n) => iterations = iterations.saturating_add(n),
                Err(_) => log::warn!("load thread panicked"),
            }
        }
        if iterations > 0 {
            log::debug!("load threads joined after {iterations} iterations");
        }
        iterations
    }
}

impl Drop for LoadGenerator {
    fn drop(&mut self) {
        if !self.workers.is_empty() {
            self.stop_and_join();
        }
    }
}
