pub mod config;
pub mod export;
pub mod host;
pub mod runner;
pub mod sampling;
pub mod schedule;
pub mod screens;
pub mod session;
pub mod state;
pub mod summary;
pub mod trial;
pub use config::{ConfigError, ExperimentConfig, ScheduleCounts};
pub use export::{
    DirectorySink, DownloadSink, ExportError, ExportOutcome, PendingDownload, export_filename,
    export_session, to_csv,
};
pub use host::{ChannelHost, Screen};
pub use runner::{SessionEnd, SessionOutcome, SessionRunner};
pub use schedule::ScheduleBuilder;
pub use session::SessionState;
pub use state::TrialMachine;
pub use summary::{SessionSummary, accuracy, mean_go_rt, summarize};
pub use trial::TrialDurations;
