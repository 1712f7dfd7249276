//! Console renderings of measurement results.

use crate::{FighterReport, LatencyReport, Progress};
use std::fmt::{self, Display};

impl Display for FighterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Subprocess duration :{} s", self.elapsed.as_secs_f64())?;
        write!(f, "Subprocess exit code:{}", self.exit_code)
    }
}

impl Display for Progress {
    /// Single line meant to be overwritten in place (prefix with `\r`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Count: {} | Avg Sleep: {:.4}ms | Last: {:.4}ms    ",
            self.count, self.average_ms, self.last_ms
        )
    }
}

impl Display for LatencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Process Finished ---")?;
        writeln!(f, "Exit Code: {}", self.exit_code)?;
        writeln!(f, "Total Samples: {}", self.samples)?;
        write!(f, "Average Sleep Duration: {:.4} ms", self.average_ms)
    }
}
