/// Running mean over an unbounded stream of samples, without retaining them.
///
/// The mean is updated incrementally (`average += (value - average) / count`) rather than computed as
/// `sum / count`, so precision does not degrade as the number of samples grows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningStats {
    count: u64,
    average: f64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sample. NaN and infinite values are not validated.
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        self.average += (value - self.average) / self.count as f64;
    }

    /// Number of samples seen so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean of the samples seen so far; `0.0` if there are none.
    pub fn average(&self) -> f64 {
        self.average
    }
}
