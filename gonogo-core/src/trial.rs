use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::SessionError;
use crate::stimulus::StimulusWord;

/// Keys the presentation host can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Space,
    Enter,
    Backspace,
    Escape,
    Char(char),
}

/// The only key recognised during the response window.
pub const GO_KEY: Key = Key::Space;

/// Trial state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialState {
    Fixation,
    Stimulus,
    Feedback,
    Complete,
}

/// One scheduled trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialSpec {
    pub word: StimulusWord,
    pub is_go: bool,
    pub is_practice: bool,
}

impl TrialSpec {
    pub fn new(word: StimulusWord, is_practice: bool) -> Self {
        Self {
            word,
            is_go: word.is_go(),
            is_practice,
        }
    }

    pub fn practice(word: StimulusWord) -> Self {
        Self::new(word, true)
    }

    pub fn main(word: StimulusWord) -> Self {
        Self::new(word, false)
    }
}

/// Non-empty participant identifier entered before the first trial.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyParticipantId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier safe to embed in a CSV field and a file name.
    pub fn sanitized(&self) -> String {
        self.0
            .chars()
            .map(|c| match c {
                ',' | '"' | '\'' | '/' | '\\' | ':' => '_',
                c if c.is_whitespace() || c.is_control() => '_',
                c => c,
            })
            .collect()
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Recorded result per completed trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub participant_id: Option<ParticipantId>,
    pub word: StimulusWord,
    pub is_go: bool,
    pub is_practice: bool,
    pub response: Option<Key>,
    pub rt_ms: Option<f64>,
}

impl TrialRecord {
    pub fn new(spec: &TrialSpec, response: Option<Key>, rt_ms: Option<f64>) -> Self {
        Self {
            participant_id: None,
            word: spec.word,
            is_go: spec.is_go,
            is_practice: spec.is_practice,
            response,
            rt_ms,
        }
    }

    pub fn responded(&self) -> bool {
        self.response == Some(GO_KEY)
    }
}

/// Milliseconds with sub-millisecond precision kept to the microsecond.
pub fn duration_ms(d: Duration) -> f64 {
    d.as_micros() as f64 / 1000.0
}
