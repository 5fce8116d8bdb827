pub mod classify;
pub mod error;
pub mod phase;
pub mod present;
pub mod stimulus;
pub mod trial;

pub use classify::{Feedback, is_correct, response_code, trial_type_code};
pub use error::{HostError, SamplingError, SessionError};
pub use phase::{Phase, SessionPhase};
pub use present::{Capture, KeyFilter, PhaseContent, PhaseSpec, PresentationHost};
pub use stimulus::{GO_WORDS, NO_GO_WORDS, StimulusWord};
pub use trial::{GO_KEY, Key, ParticipantId, TrialRecord, TrialSpec, TrialState, duration_ms};
