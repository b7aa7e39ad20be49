//! Wall-clock timing of run phases

use std::time::{Duration, Instant};

/// Measures successive phases and the whole run
pub struct PhaseTimer {
    run_start: Instant,
    phase_start: Instant,
    laps: Vec<(&'static str, Duration)>,
}

impl Default for PhaseTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseTimer {
    /// Start timing now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            run_start: now,
            phase_start: now,
            laps: Vec::new(),
        }
    }

    /// Close the current phase under `name`, log it and start the next one
    pub fn lap(&mut self, name: &'static str) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.phase_start);
        self.phase_start = now;
        self.laps.push((name, elapsed));
        log::info!("{name} time: {:.1}ms", as_millis(elapsed));
        elapsed
    }

    /// Time since the timer was created
    pub fn total(&self) -> Duration {
        self.run_start.elapsed()
    }

    /// Phases recorded so far, in order
    pub fn laps(&self) -> &[(&'static str, Duration)] {
        &self.laps
    }

    /// Log the total run time and return it
    pub fn finish(&self) -> Duration {
        let total = self.total();
        log::info!("total time: {:.1}ms", as_millis(total));
        total
    }
}

/// Duration in fractional milliseconds
pub fn as_millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000.0
}
