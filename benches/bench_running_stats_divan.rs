//! Executes benchmarks for [`chooseprio::RunningStats`] and [`chooseprio::LoadGenerator`] start/stop.

use chooseprio::{LoadGenerator, RunningStats};
use std::hint::black_box;

const SAMPLE_COUNTS: [usize; 3] = [100, 10_000, 1_000_000];

#[divan::bench(args = SAMPLE_COUNTS)]
fn running_stats_update(n: usize) -> f64 {
    let mut stats = RunningStats::new();
    for i in 0..n {
        stats.update(black_box(16.0 + (i % 7) as f64 * 0.1));
    }
    stats.average()
}

#[divan::bench(args = [0, 1, 4])]
fn load_generator_start_stop(threads: usize) -> u64 {
    let mut lg = LoadGenerator::start(threads).expect("load threads should spawn");
    lg.stop_and_join()
}

fn main() {
    // Run benchmarks:
    divan::main();
}
