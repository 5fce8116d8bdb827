//! Practice and main trial schedules.

use gonogo_core::{GO_WORDS, NO_GO_WORDS, SamplingError, StimulusWord, TrialSpec};
use rand::Rng;
use tracing::debug;

use crate::config::ScheduleCounts;
use crate::sampling::{repeat, sample_without_replacement, shuffle};

pub struct ScheduleBuilder<'a> {
    counts: &'a ScheduleCounts,
}

impl<'a> ScheduleBuilder<'a> {
    pub fn new(counts: &'a ScheduleCounts) -> Self {
        Self { counts }
    }

    /// Go words are independent single draws, so the go split is a coin
    /// flip per trial. No-go words come from the two-word pool padded
    /// with duplicates until it holds `practice_nogo` entries.
    pub fn practice<R: Rng>(&self, rng: &mut R) -> Result<Vec<TrialSpec>, SamplingError> {
        let mut trials = Vec::with_capacity(self.counts.practice_total());
        for _ in 0..self.counts.practice_go {
            for word in sample_without_replacement(rng, &GO_WORDS, 1)? {
                trials.push(TrialSpec::practice(word));
            }
        }

        let pool = padded_nogo_pool(rng, self.counts.practice_nogo);
        for word in sample_without_replacement(rng, &pool, self.counts.practice_nogo)? {
            trials.push(TrialSpec::practice(word));
        }

        let trials = shuffle(rng, trials);
        debug!(trials = trials.len(), "practice schedule built");
        Ok(trials)
    }

    /// Each go word exactly `main_go_per_word` times, no-go words by
    /// independent fair coin, all shuffled together.
    pub fn main<R: Rng>(&self, rng: &mut R) -> Vec<TrialSpec> {
        let mut trials: Vec<TrialSpec> = repeat(&GO_WORDS, self.counts.main_go_per_word)
            .into_iter()
            .map(TrialSpec::main)
            .collect();
        for _ in 0..self.counts.main_nogo {
            let word = if rng.random_bool(0.5) {
                StimulusWord::Rood
            } else {
                StimulusWord::Geel
            };
            trials.push(TrialSpec::main(word));
        }

        let trials = shuffle(rng, trials);
        debug!(trials = trials.len(), "main schedule built");
        trials
    }
}

/// The no-go pool grown to `size` by appending randomly chosen duplicates.
fn padded_nogo_pool<R: Rng>(rng: &mut R, size: usize) -> Vec<StimulusWord> {
    let mut pool = NO_GO_WORDS.to_vec();
    while pool.len() < size {
        let dup = NO_GO_WORDS[rng.random_range(0..NO_GO_WORDS.len())];
        pool.push(dup);
    }
    pool
}
