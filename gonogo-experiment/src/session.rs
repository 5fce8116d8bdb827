use gonogo_core::{ParticipantId, SessionError, TrialRecord};
use tracing::debug;

/// Everything collected during one session. The trial runner is the only
/// writer; the aggregator and export read it at the end.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    participant: Option<ParticipantId>,
    records: Vec<TrialRecord>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the participant once; later records carry the id.
    pub fn attach_participant(&mut self, id: ParticipantId) -> Result<(), SessionError> {
        if self.participant.is_some() {
            return Err(SessionError::ParticipantAlreadyAttached);
        }
        self.participant = Some(id);
        Ok(())
    }

    pub fn participant(&self) -> Option<&ParticipantId> {
        self.participant.as_ref()
    }

    pub fn push(&mut self, mut record: TrialRecord) {
        if record.participant_id.is_none() {
            record.participant_id = self.participant.clone();
        }
        debug!(
            n = self.records.len(),
            word = %record.word,
            practice = record.is_practice,
            responded = record.responded(),
            rt_ms = ?record.rt_ms,
            "trial recorded"
        );
        self.records.push(record);
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn main_records(&self) -> impl Iterator<Item = &TrialRecord> {
        self.records.iter().filter(|r| !r.is_practice)
    }

    pub fn practice_records(&self) -> impl Iterator<Item = &TrialRecord> {
        self.records.iter().filter(|r| r.is_practice)
    }
}
