//! Audio inspection services: silence detection and duration probing.

pub mod probe;
pub mod silence;

pub use probe::probe_duration;
pub use silence::{SilenceDetector, SilenceInterval};
