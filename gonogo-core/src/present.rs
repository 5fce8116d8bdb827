//! The seam between the trial engine and whatever draws the screen and
//! captures keys.

use async_trait::async_trait;
use std::time::Duration;

use crate::classify::Feedback;
use crate::error::HostError;
use crate::stimulus::StimulusWord;
use crate::trial::Key;

/// What the host should put on screen for one phase.
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseContent {
    Fixation,
    Word(StimulusWord),
    Feedback(Feedback),
    Text(String),
}

/// Which keys end a phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyFilter {
    None,
    Any,
    Only(Vec<Key>),
}

impl KeyFilter {
    pub fn accepts(&self, key: &Key) -> bool {
        match self {
            KeyFilter::None => false,
            KeyFilter::Any => true,
            KeyFilter::Only(keys) => keys.contains(key),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSpec {
    pub content: PhaseContent,
    /// `None` waits until an accepted key arrives.
    pub duration: Option<Duration>,
    pub keys: KeyFilter,
}

impl PhaseSpec {
    pub fn timed(content: PhaseContent, duration: Duration, keys: KeyFilter) -> Self {
        Self {
            content,
            duration: Some(duration),
            keys,
        }
    }

    pub fn until_key(content: PhaseContent) -> Self {
        Self {
            content,
            duration: None,
            keys: KeyFilter::Any,
        }
    }
}

/// Result of presenting one phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Capture {
    Response { key: Key, elapsed: Duration },
    Timeout,
}

#[async_trait(?Send)]
pub trait PresentationHost {
    /// Shows `spec` and resolves with the first accepted key or a timeout.
    async fn present(&mut self, spec: &PhaseSpec) -> Result<Capture, HostError>;

    /// Collects one line of free text.
    async fn read_text(&mut self, prompt: &str) -> Result<String, HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_filter() {
        assert!(!KeyFilter::None.accepts(&Key::Space));
        assert!(KeyFilter::Any.accepts(&Key::Char('q')));
        let only = KeyFilter::Only(vec![Key::Space]);
        assert!(only.accepts(&Key::Space));
        assert!(!only.accepts(&Key::Enter));
    }
}
