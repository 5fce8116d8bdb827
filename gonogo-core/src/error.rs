use thiserror::Error;

/// Without-replacement draw asked for more items than the pool holds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot draw {requested} items without replacement from a pool of {available}")]
pub struct SamplingError {
    pub requested: usize,
    pub available: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("participant id must not be empty")]
    EmptyParticipantId,

    #[error("participant id already attached to this session")]
    ParticipantAlreadyAttached,
}

/// Failures reported by a presentation host.
#[derive(Debug, Error)]
pub enum HostError {
    /// The participant pressed Escape.
    #[error("session aborted by participant")]
    Aborted,

    /// The input source went away while a response was still expected.
    #[error("input source closed")]
    InputClosed,

    #[error("display error: {0}")]
    Display(String),
}
