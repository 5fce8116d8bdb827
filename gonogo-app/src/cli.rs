use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gonogo")]
#[command(about = "Go/no-go reaction time task with CSV export")]
pub struct Args {
    /// JSON file with timing, schedule counts, seed and output directory
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for the trial schedules (random when omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Directory for the CSV export and the log file
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}
