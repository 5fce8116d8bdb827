use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialDurations {
    pub fixation_ms: u64,
    pub response_window_ms: u64,
    pub feedback_ms: u64,
}

impl TrialDurations {
    pub fn fixation(&self) -> Duration {
        Duration::from_millis(self.fixation_ms)
    }

    pub fn response_window(&self) -> Duration {
        Duration::from_millis(self.response_window_ms)
    }

    pub fn feedback(&self) -> Duration {
        Duration::from_millis(self.feedback_ms)
    }
}

impl Default for TrialDurations {
    fn default() -> Self {
        Self {
            fixation_ms: 500,
            response_window_ms: 1000,
            feedback_ms: 1000,
        }
    }
}
