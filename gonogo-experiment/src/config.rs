use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::trial::TrialDurations;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Trial counts for both schedules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScheduleCounts {
    pub practice_go: usize,
    pub practice_nogo: usize,
    pub main_go_per_word: usize,
    pub main_nogo: usize,
}

impl Default for ScheduleCounts {
    fn default() -> Self {
        Self {
            practice_go: 7,
            practice_nogo: 3,
            main_go_per_word: 30,
            main_nogo: 20,
        }
    }
}

impl ScheduleCounts {
    pub fn practice_total(&self) -> usize {
        self.practice_go + self.practice_nogo
    }

    pub fn main_total(&self) -> usize {
        self.main_go_per_word * 2 + self.main_nogo
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub fixation_ms: u64,
    pub response_window_ms: u64,
    pub feedback_ms: u64,
    pub debrief_ms: u64,
    pub counts: ScheduleCounts,
    pub seed: Option<u64>,
    pub output_dir: PathBuf,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            fixation_ms: 500,
            response_window_ms: 1000,
            feedback_ms: 1000,
            debrief_ms: 1000,
            counts: ScheduleCounts::default(),
            seed: None,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ExperimentConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn durations(&self) -> TrialDurations {
        TrialDurations {
            fixation_ms: self.fixation_ms,
            response_window_ms: self.response_window_ms,
            feedback_ms: self.feedback_ms,
        }
    }

    /// Seeded generator when a seed is configured, OS entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
