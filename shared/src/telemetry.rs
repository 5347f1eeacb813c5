use std::time::{Duration, Instant};

/// Wall-clock stopwatch for progress reporting.
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed time rendered as seconds with millisecond precision.
    pub fn summary(&self) -> String {
        format!("{:.3}s", self.elapsed().as_secs_f64())
    }
}
