use std::time::Duration;
use tokio::time::Instant;

/// Trait for session clocks
pub trait Timer: Clone + Send + Sync {
    type Timestamp: Copy + Clone + Send + Sync;
    fn now(&self) -> Self::Timestamp;
    fn elapsed(&self, ts: Self::Timestamp) -> Duration;
    fn record_phase(&mut self, scheduled: Duration, observed: Duration);
    fn timing_stats(&self) -> TimingStats;
}

/// How far timed phases ran past their scheduled duration.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingStats {
    pub samples: usize,
    pub mean_overrun_ns: f64,
    pub jitter_ns: f64,
    pub min_overrun_ns: f64,
    pub max_overrun_ns: f64,
}

impl TimingStats {
    fn empty() -> Self {
        Self {
            samples: 0,
            mean_overrun_ns: 0.0,
            jitter_ns: 0.0,
            min_overrun_ns: 0.0,
            max_overrun_ns: 0.0,
        }
    }
}

/// Monotonic clock built on tokio's `Instant`, so paused test runtimes
/// drive it deterministically.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    pub start: Instant,
    pub overruns_ns: Vec<f64>,
    pub max_samples: usize,
}

impl Timer for SessionTimer {
    type Timestamp = u64;
    fn now(&self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }
    fn elapsed(&self, ts: u64) -> Duration {
        Duration::from_nanos(self.now().saturating_sub(ts))
    }
    fn record_phase(&mut self, scheduled: Duration, observed: Duration) {
        if self.overruns_ns.len() >= self.max_samples {
            self.overruns_ns.remove(0);
        }
        self.overruns_ns
            .push(observed.as_nanos() as f64 - scheduled.as_nanos() as f64);
    }
    fn timing_stats(&self) -> TimingStats {
        let times = &self.overruns_ns;
        if times.is_empty() {
            return TimingStats::empty();
        }
        let n = times.len() as f64;
        let avg = times.iter().sum::<f64>() / n;
        let var = times.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / n;
        let min = times.iter().copied().fold(f64::INFINITY, f64::min);
        let max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        TimingStats {
            samples: times.len(),
            mean_overrun_ns: avg,
            jitter_ns: var.sqrt(),
            min_overrun_ns: min,
            max_overrun_ns: max,
        }
    }
}

impl SessionTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            overruns_ns: Vec::with_capacity(256),
            max_samples: 1000,
        }
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new()
    }
}
