//! End-of-session statistics over main (non-practice) trials.

use gonogo_core::{TrialRecord, is_correct};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionSummary {
    pub trials: usize,
    pub correct: usize,
    pub go_trials: usize,
    pub mean_go_rt_ms: f64,
    pub accuracy: f64,
}

impl SessionSummary {
    pub fn accuracy_percent(&self) -> f64 {
        self.accuracy * 100.0
    }
}

/// Mean RT over go trials; a go trial without a response counts as 0 ms.
/// `0` when there are no go trials.
pub fn mean_go_rt<'a>(records: impl IntoIterator<Item = &'a TrialRecord>) -> f64 {
    let (sum, n) = records
        .into_iter()
        .filter(|r| !r.is_practice && r.is_go)
        .fold((0.0, 0usize), |(sum, n), r| (sum + r.rt_ms.unwrap_or(0.0), n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Share of correct trials; `0` when there are none.
pub fn accuracy<'a>(records: impl IntoIterator<Item = &'a TrialRecord>) -> f64 {
    let (correct, n) = records
        .into_iter()
        .filter(|r| !r.is_practice)
        .fold((0usize, 0usize), |(c, n), r| (c + usize::from(is_correct(r)), n + 1));
    if n == 0 { 0.0 } else { correct as f64 / n as f64 }
}

pub fn summarize<'a>(records: impl IntoIterator<Item = &'a TrialRecord>) -> SessionSummary {
    let main: Vec<&TrialRecord> = records.into_iter().filter(|r| !r.is_practice).collect();
    SessionSummary {
        trials: main.len(),
        correct: main.iter().filter(|r| is_correct(r)).count(),
        go_trials: main.iter().filter(|r| r.is_go).count(),
        mean_go_rt_ms: mean_go_rt(main.iter().copied()),
        accuracy: accuracy(main.iter().copied()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gonogo_core::{GO_KEY, StimulusWord, TrialSpec};

    fn go(rt: f64) -> TrialRecord {
        TrialRecord::new(&TrialSpec::main(StimulusWord::Blauw), Some(GO_KEY), Some(rt))
    }

    fn nogo(response: bool) -> TrialRecord {
        let key = response.then_some(GO_KEY);
        TrialRecord::new(&TrialSpec::main(StimulusWord::Rood), key, key.map(|_| 250.0))
    }

    #[test]
    fn empty_input_is_zero() {
        let none: Vec<TrialRecord> = Vec::new();
        assert_eq!(mean_go_rt(&none), 0.0);
        assert_eq!(accuracy(&none), 0.0);
        assert_eq!(summarize(&none), SessionSummary::default());
    }

    #[test]
    fn mean_rt_covers_go_trials_only() {
        let records = vec![go(200.0), go(400.0), nogo(true)];
        assert_eq!(mean_go_rt(&records), 300.0);
    }

    #[test]
    fn missed_go_trial_counts_as_zero_rt() {
        let missed = TrialRecord::new(&TrialSpec::main(StimulusWord::Groen), None, None);
        let records = vec![go(300.0), missed];
        assert_eq!(mean_go_rt(&records), 150.0);
    }

    #[test]
    fn accuracy_is_share_correct() {
        let records = vec![go(200.0), go(400.0), nogo(false), nogo(true)];
        assert_eq!(accuracy(&records), 0.75);
        let summary = summarize(&records);
        assert_eq!(summary.trials, 4);
        assert_eq!(summary.correct, 3);
        assert_eq!(summary.go_trials, 2);
        assert_eq!(summary.accuracy_percent(), 75.0);
    }

    #[test]
    fn practice_records_are_ignored() {
        let practice = TrialRecord::new(&TrialSpec::practice(StimulusWord::Blauw), None, None);
        let records = vec![practice, go(500.0)];
        assert_eq!(mean_go_rt(&records), 500.0);
        assert_eq!(accuracy(&records), 1.0);
    }
}
