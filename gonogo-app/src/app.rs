use anyhow::{Context, Result};
use gonogo_core::{Key, PhaseContent};
use gonogo_experiment::{
    ChannelHost, DirectorySink, ExperimentConfig, ExportOutcome, PendingDownload, Screen,
    SessionEnd, SessionRunner, export_session,
};
use gonogo_timing::{SessionTimer, WindowOutcome, response_window};
use std::path::Path;
use std::sync::Mutex;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::terminal::{TerminalGuard, TerminalScreen, spawn_key_reader};

const LOG_FILE: &str = "gonogo.log";

const MANUAL_DOWNLOAD: &str = "\
Als je download niet automatisch is gestart, druk op D om je data te downloaden.
Druk op Escape om af te sluiten.";

pub struct App {
    config: ExperimentConfig,
}

impl App {
    pub fn new(args: Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => ExperimentConfig::from_json_file(path)?,
            None => ExperimentConfig::default(),
        };
        if args.seed.is_some() {
            config.seed = args.seed;
        }
        if let Some(dir) = args.output_dir {
            config.output_dir = dir;
        }
        init_logging(&config.output_dir)?;
        info!(?config, "configuration loaded");
        Ok(Self { config })
    }

    pub fn run(self) -> Result<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .context("failed to start runtime")?;

        let output_dir = self.config.output_dir.clone();
        let mut rng = self.config.rng();
        let (tx, rx) = unbounded_channel();

        let leftover = {
            let _guard = TerminalGuard::enter().context("failed to prepare terminal")?;
            let _reader = spawn_key_reader(tx);

            runtime.block_on(async move {
                let host = ChannelHost::new(TerminalScreen::new(), rx);
                let mut runner =
                    SessionRunner::new(self.config, host, SessionTimer::new(), &mut rng)
                        .context("failed to build trial schedules")?;
                let outcome = runner.run().await;
                if let SessionEnd::Failed(error) = &outcome.end {
                    error!(%error, "session failed, exporting collected data");
                }

                let mut sink = DirectorySink::new(&output_dir);
                match export_session(&outcome.session, &mut sink)? {
                    ExportOutcome::Delivered(_) => Ok::<_, anyhow::Error>(None),
                    ExportOutcome::ManualFallback { pending, .. } => {
                        let (mut screen, mut keys) = runner.into_host().into_parts();
                        manual_download(&mut screen, &mut keys, &mut sink, &pending).await
                    }
                }
            })?
        };

        if let Some(pending) = leftover {
            // Terminal is restored here; print the data so it is not lost.
            println!("{}", pending.filename);
            print!("{}", pending.contents);
        }
        Ok(())
    }
}

/// Offers the download again until it succeeds or the participant
/// leaves. Returns the data still undelivered.
async fn manual_download(
    screen: &mut TerminalScreen,
    keys: &mut UnboundedReceiver<Key>,
    sink: &mut DirectorySink,
    pending: &PendingDownload,
) -> Result<Option<PendingDownload>> {
    screen.show(&PhaseContent::Text(MANUAL_DOWNLOAD.to_string()))?;
    loop {
        let outcome = response_window(keys, None, |key| {
            matches!(key, Key::Char('d' | 'D') | Key::Escape)
        })
        .await;
        match outcome {
            WindowOutcome::Accepted {
                key: Key::Escape, ..
            }
            | WindowOutcome::Closed => return Ok(Some(pending.clone())),
            WindowOutcome::Accepted { .. } => match pending.retry(sink) {
                Ok(path) => {
                    let saved = format!("Data opgeslagen: {}", path.display());
                    screen.show(&PhaseContent::Text(saved))?;
                    return Ok(None);
                }
                Err(error) => {
                    warn!(%error, dir = %sink.dir().display(), "manual download failed");
                    screen.show(&PhaseContent::Text(format!("{MANUAL_DOWNLOAD}\n\n{error}")))?;
                }
            },
            WindowOutcome::Elapsed(_) => {}
        }
    }
}

fn init_logging(output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("cannot create {}", output_dir.display()))?;
    let log_path = output_dir.join(LOG_FILE);
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("cannot open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
