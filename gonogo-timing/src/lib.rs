pub mod timer;
pub mod window;

pub use timer::{SessionTimer, TimingStats, Timer};
pub use window::{response_window, WindowOutcome};
