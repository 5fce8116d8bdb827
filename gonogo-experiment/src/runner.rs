use gonogo_core::{
    Capture, HostError, KeyFilter, ParticipantId, Phase, PhaseContent, PhaseSpec,
    PresentationHost, SamplingError, SessionPhase, TrialSpec,
};
use gonogo_timing::{Timer, TimingStats};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ExperimentConfig;
use crate::schedule::ScheduleBuilder;
use crate::screens;
use crate::session::SessionState;
use crate::state::TrialMachine;
use crate::summary::{SessionSummary, summarize};

#[derive(Debug)]
pub enum SessionEnd {
    Completed,
    Aborted,
    Failed(HostError),
}

/// What a session leaves behind, however it ended.
#[derive(Debug)]
pub struct SessionOutcome {
    pub session: SessionState,
    pub summary: SessionSummary,
    pub timing: TimingStats,
    pub end: SessionEnd,
}

/// Runs the whole session: participant entry, instruction screens, the
/// practice and main blocks, and the debrief.
pub struct SessionRunner<H, T>
where
    H: PresentationHost,
    T: Timer,
{
    pub phase: SessionPhase,
    host: H,
    timer: T,
    config: ExperimentConfig,
    practice: Vec<TrialSpec>,
    main: Vec<TrialSpec>,
    session: SessionState,
    phase_trial_number: usize,
}

impl<H, T> SessionRunner<H, T>
where
    H: PresentationHost,
    T: Timer,
{
    /// Builds both schedules up front; a sampling failure stops the
    /// session before any trial runs.
    pub fn new<R: Rng>(
        config: ExperimentConfig,
        host: H,
        timer: T,
        rng: &mut R,
    ) -> Result<Self, SamplingError> {
        let builder = ScheduleBuilder::new(&config.counts);
        let practice = builder.practice(rng)?;
        let main = builder.main(rng);
        Ok(Self {
            phase: SessionPhase::default(),
            host,
            timer,
            config,
            practice,
            main,
            session: SessionState::new(),
            phase_trial_number: 0,
        })
    }

    pub fn practice_schedule(&self) -> &[TrialSpec] {
        &self.practice
    }

    pub fn main_schedule(&self) -> &[TrialSpec] {
        &self.main
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn trial_progress(&self) -> Option<(usize, usize)> {
        if self.phase.is_practice() {
            Some((self.phase_trial_number + 1, self.practice.len()))
        } else if self.phase.is_experiment() {
            Some((self.phase_trial_number + 1, self.main.len()))
        } else {
            None
        }
    }

    /// Hands the host back, e.g. to reuse its input for a download prompt.
    pub fn into_host(self) -> H {
        self.host
    }

    pub async fn run(&mut self) -> SessionOutcome {
        info!(
            practice = self.practice.len(),
            main = self.main.len(),
            "session started"
        );
        let result = self.run_phases().await;

        let end = match result {
            Ok(()) => SessionEnd::Completed,
            Err(HostError::Aborted) => {
                warn!(phase = ?self.phase, "session aborted by participant");
                SessionEnd::Aborted
            }
            Err(error) => {
                warn!(phase = ?self.phase, %error, "session ended early");
                SessionEnd::Failed(error)
            }
        };
        let summary = summarize(self.session.records());
        let timing = self.timer.timing_stats();
        info!(
            records = self.session.records().len(),
            mean_go_rt_ms = summary.mean_go_rt_ms,
            accuracy = summary.accuracy,
            overrun_mean_ms = timing.mean_overrun_ns / 1_000_000.0,
            jitter_ms = timing.jitter_ns / 1_000_000.0,
            "session finished"
        );

        SessionOutcome {
            session: std::mem::take(&mut self.session),
            summary,
            timing,
            end,
        }
    }

    async fn run_phases(&mut self) -> Result<(), HostError> {
        loop {
            info!(phase = ?self.phase, "phase started");
            match self.phase {
                SessionPhase::ParticipantEntry => self.collect_participant().await?,
                SessionPhase::Welcome => self.show_message(screens::WELCOME).await?,
                SessionPhase::Instructions => self.show_message(screens::INSTRUCTIONS).await?,
                SessionPhase::PracticeEnd => self.show_message(screens::PRACTICE_END).await?,
                phase if phase.runs_trials() => self.run_block().await?,
                SessionPhase::Debrief => {
                    let summary = summarize(self.session.records());
                    let debrief = PhaseSpec::timed(
                        PhaseContent::Text(screens::debrief(&summary)),
                        Duration::from_millis(self.config.debrief_ms),
                        KeyFilter::None,
                    );
                    self.present(&debrief).await?;
                }
                _ => {}
            }

            match self.phase.next() {
                Some(next) => {
                    self.phase = next;
                    self.phase_trial_number = 0;
                }
                None => return Ok(()),
            }
        }
    }

    async fn collect_participant(&mut self) -> Result<(), HostError> {
        loop {
            let raw = self.host.read_text(screens::PARTICIPANT_PROMPT).await?;
            match ParticipantId::parse(&raw) {
                Ok(id) => {
                    info!(participant = %id, "participant registered");
                    if let Err(error) = self.session.attach_participant(id) {
                        warn!(%error, "participant id ignored");
                    }
                    return Ok(());
                }
                Err(error) => debug!(%error, "participant id rejected, asking again"),
            }
        }
    }

    async fn show_message(&mut self, text: &str) -> Result<(), HostError> {
        self.present(&PhaseSpec::until_key(PhaseContent::Text(text.to_string())))
            .await
            .map(|_| ())
    }

    async fn run_block(&mut self) -> Result<(), HostError> {
        let trials = if self.phase.is_practice() {
            self.practice.clone()
        } else {
            self.main.clone()
        };
        for spec in trials {
            if let Some((n, total)) = self.trial_progress() {
                debug!(n, total, word = %spec.word, "trial started");
            }
            self.run_trial(spec).await?;
            self.phase_trial_number += 1;
        }
        Ok(())
    }

    async fn run_trial(&mut self, spec: TrialSpec) -> Result<(), HostError> {
        let mut machine = TrialMachine::new(spec, self.config.durations());
        while let Some(phase) = machine.phase_spec() {
            let capture = self.present(&phase).await?;
            machine.advance(capture);
        }
        if let Some(record) = machine.into_record() {
            self.session.push(record);
        }
        Ok(())
    }

    /// Presents one phase, logging how far timed-out phases overran.
    async fn present(&mut self, spec: &PhaseSpec) -> Result<Capture, HostError> {
        let started = self.timer.now();
        let capture = self.host.present(spec).await?;
        if let (Capture::Timeout, Some(scheduled)) = (capture, spec.duration) {
            let observed = self.timer.elapsed(started);
            self.timer.record_phase(scheduled, observed);
        }
        Ok(capture)
    }
}
