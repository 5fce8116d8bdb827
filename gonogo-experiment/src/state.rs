use gonogo_core::{
    Capture, Feedback, GO_KEY, KeyFilter, Key, PhaseContent, PhaseSpec, TrialRecord, TrialSpec,
    TrialState, duration_ms,
};
use tracing::trace;

use crate::trial::TrialDurations;

/// Drives one trial through fixation, the response window and (in
/// practice) feedback. A fresh machine is used for every trial.
#[derive(Debug, Clone)]
pub struct TrialMachine {
    spec: TrialSpec,
    durations: TrialDurations,
    state: TrialState,
    response: Option<Key>,
    rt_ms: Option<f64>,
}

impl TrialMachine {
    pub fn new(spec: TrialSpec, durations: TrialDurations) -> Self {
        Self {
            spec,
            durations,
            state: TrialState::Fixation,
            response: None,
            rt_ms: None,
        }
    }

    pub fn state(&self) -> TrialState {
        self.state
    }

    pub fn spec(&self) -> &TrialSpec {
        &self.spec
    }

    /// What the host should present for the current state; `None` once
    /// the trial is complete.
    pub fn phase_spec(&self) -> Option<PhaseSpec> {
        let spec = match self.state {
            TrialState::Fixation => PhaseSpec::timed(
                PhaseContent::Fixation,
                self.durations.fixation(),
                KeyFilter::None,
            ),
            TrialState::Stimulus => PhaseSpec::timed(
                PhaseContent::Word(self.spec.word),
                self.durations.response_window(),
                KeyFilter::Only(vec![GO_KEY]),
            ),
            TrialState::Feedback => PhaseSpec::timed(
                PhaseContent::Feedback(self.feedback()),
                self.durations.feedback(),
                KeyFilter::None,
            ),
            TrialState::Complete => return None,
        };
        Some(spec)
    }

    /// Feeds the host's capture for the current phase and moves on.
    pub fn advance(&mut self, capture: Capture) -> TrialState {
        let next = match self.state {
            TrialState::Fixation => TrialState::Stimulus,
            TrialState::Stimulus => {
                if let Capture::Response { key, elapsed } = capture {
                    if key == GO_KEY {
                        self.response = Some(key);
                        self.rt_ms = Some(duration_ms(elapsed));
                    } else {
                        trace!(?key, "unrecognised key treated as no response");
                    }
                }
                if self.spec.is_practice {
                    TrialState::Feedback
                } else {
                    TrialState::Complete
                }
            }
            TrialState::Feedback | TrialState::Complete => TrialState::Complete,
        };
        trace!(from = ?self.state, to = ?next, word = %self.spec.word, "trial transition");
        self.state = next;
        next
    }

    pub fn feedback(&self) -> Feedback {
        Feedback::for_response(self.spec.is_go, self.response)
    }

    /// The trial's record, available once it reached `Complete`.
    pub fn into_record(self) -> Option<TrialRecord> {
        (self.state == TrialState::Complete)
            .then(|| TrialRecord::new(&self.spec, self.response, self.rt_ms))
    }
}
