//! CSV export of main-session records, with a manual retry path when the
//! automatic delivery fails.

use gonogo_core::{ParticipantId, TrialRecord, is_correct, response_code, trial_type_code};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::session::SessionState;

pub const CSV_HEADER: [&str; 5] = ["participant_id", "trial_type", "response", "correct", "rt"];

const UNKNOWN_PARTICIPANT: &str = "UNKNOWN";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

fn participant_label(participant: Option<&ParticipantId>) -> String {
    participant
        .map(ParticipantId::sanitized)
        .unwrap_or_else(|| UNKNOWN_PARTICIPANT.to_string())
}

pub fn export_filename(participant: Option<&ParticipantId>) -> String {
    format!(
        "post_test_gonogo_data_participant_{}.csv",
        participant_label(participant)
    )
}

/// One row per main-session record, in completion order. A record's own
/// participant id wins over `participant`.
pub fn to_csv<'a>(
    records: impl IntoIterator<Item = &'a TrialRecord>,
    participant: Option<&ParticipantId>,
) -> Result<String, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;

    for record in records.into_iter().filter(|r| !r.is_practice) {
        let id = participant_label(record.participant_id.as_ref().or(participant));
        wtr.write_record([
            id,
            trial_type_code(record).to_string(),
            response_code(record).to_string(),
            u8::from(is_correct(record)).to_string(),
            record.rt_ms.unwrap_or(0.0).to_string(),
        ])?;
    }

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// A built CSV that has not necessarily reached its destination yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDownload {
    pub filename: String,
    pub contents: String,
}

impl PendingDownload {
    pub fn build(session: &SessionState) -> Result<Self, ExportError> {
        let participant = session.participant();
        Ok(Self {
            filename: export_filename(participant),
            contents: to_csv(session.records(), participant)?,
        })
    }

    /// The manual download action: hands the same bytes to `sink` again.
    pub fn retry(&self, sink: &mut dyn DownloadSink) -> Result<PathBuf, ExportError> {
        let path = sink.deliver(self)?;
        info!(path = %path.display(), "data downloaded");
        Ok(path)
    }
}

/// Destination for the session's CSV.
pub trait DownloadSink {
    fn deliver(&mut self, download: &PendingDownload) -> Result<PathBuf, ExportError>;
}

/// Writes downloads into a directory, creating it when missing.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&mut self, download: &PendingDownload) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&download.filename);
        std::fs::write(&path, download.contents.as_bytes())?;
        Ok(path)
    }
}

#[derive(Debug)]
pub enum ExportOutcome {
    Delivered(PathBuf),
    /// Automatic delivery failed; the caller must offer a manual retry.
    ManualFallback {
        pending: PendingDownload,
        error: ExportError,
    },
}

/// Builds the CSV and tries to deliver it once.
pub fn export_session(
    session: &SessionState,
    sink: &mut dyn DownloadSink,
) -> Result<ExportOutcome, ExportError> {
    let pending = PendingDownload::build(session)?;
    match sink.deliver(&pending) {
        Ok(path) => {
            info!(path = %path.display(), "data downloaded");
            Ok(ExportOutcome::Delivered(path))
        }
        Err(error) => {
            warn!(
                %error,
                file = %pending.filename,
                "automatic download failed, manual download required"
            );
            Ok(ExportOutcome::ManualFallback { pending, error })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gonogo_core::{GO_KEY, StimulusWord, TrialSpec};

    struct BlockedSink;

    impl DownloadSink for BlockedSink {
        fn deliver(&mut self, _: &PendingDownload) -> Result<PathBuf, ExportError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "blocked").into())
        }
    }

    fn records() -> Vec<TrialRecord> {
        vec![
            TrialRecord::new(&TrialSpec::main(StimulusWord::Blauw), Some(GO_KEY), Some(350.0)),
            TrialRecord::new(&TrialSpec::main(StimulusWord::Rood), None, None),
        ]
    }

    #[test]
    fn csv_matches_expected_layout() {
        let id = ParticipantId::parse("P1").unwrap();
        let csv = to_csv(&records(), Some(&id)).unwrap();
        assert_eq!(
            csv,
            "participant_id,trial_type,response,correct,rt\nP1,1,1,1,350\nP1,0,0,1,0\n"
        );
    }

    #[test]
    fn missing_participant_falls_back_to_unknown() {
        let csv = to_csv(&records(), None).unwrap();
        assert!(csv.lines().skip(1).all(|l| l.starts_with("UNKNOWN,")));
        assert_eq!(
            export_filename(None),
            "post_test_gonogo_data_participant_UNKNOWN.csv"
        );
    }

    #[test]
    fn practice_records_and_errors_are_encoded() {
        let mut all = records();
        all.insert(
            0,
            TrialRecord::new(&TrialSpec::practice(StimulusWord::Groen), None, None),
        );
        all.push(TrialRecord::new(
            &TrialSpec::main(StimulusWord::Geel),
            Some(GO_KEY),
            Some(412.5),
        ));
        let csv = to_csv(&all, None).unwrap();
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[3], "UNKNOWN,0,1,0,412.5");
    }

    #[test]
    fn directory_sink_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = SessionState::new();
        session
            .attach_participant(ParticipantId::parse("P 2").unwrap())
            .unwrap();
        for record in records() {
            session.push(record);
        }
        let mut sink = DirectorySink::new(dir.path().join("out"));
        let outcome = export_session(&session, &mut sink).unwrap();
        let ExportOutcome::Delivered(path) = outcome else {
            panic!("expected delivery");
        };
        assert_eq!(
            path.file_name().unwrap(),
            "post_test_gonogo_data_participant_P_2.csv"
        );
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.starts_with(
            "participant_id,trial_type,response,correct,rt\nP_2,1,1,1,350\n"
        ));
    }

    #[test]
    fn blocked_delivery_offers_manual_retry() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = SessionState::new();
        for record in records() {
            session.push(record);
        }
        let outcome = export_session(&session, &mut BlockedSink).unwrap();
        let ExportOutcome::ManualFallback { pending, .. } = outcome else {
            panic!("expected fallback");
        };
        let path = pending.retry(&mut DirectorySink::new(dir.path())).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), pending.contents);
    }
}
