//! Silence detection through ffmpeg's `silencedetect` filter.
//!
//! The detector shells out to ffmpeg and parses its diagnostic stream for
//! `silence_start:`/`silence_end:` marker pairs. Output is discarded
//! (`-f null -`); only stderr matters.

use crate::config::SilenceConfig;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use thiserror::Error;
use tokio::process::Command;

static SILENCE_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"silence_start:\s*([0-9.]+)").unwrap());
static SILENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"silence_end:\s*([0-9.]+)").unwrap());

/// A maximal interval during which the audio level stays below the
/// configured threshold for at least the configured minimum duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilenceInterval {
    /// Silence start in seconds.
    pub start: f64,
    /// Silence end in seconds.
    pub end: f64,
}

impl SilenceInterval {
    /// Length of the silence in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Errors of the silence-detection strategy. These never escape the timing
/// cascade; they are logged and translated into a fall-through.
#[derive(Debug, Error)]
pub enum SilenceDetectError {
    /// The audio tool is not on PATH.
    #[error("audio tool '{0}' not available")]
    ToolMissing(String),
    /// The audio tool exited unsuccessfully.
    #[error("audio tool exited with {0}")]
    ToolFailed(String),
    /// The tool ran but reported no silences.
    #[error("no silences detected")]
    NoSilences,
    /// Failure to spawn or read the subprocess.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Wrapper around the external silence-detect tool.
pub struct SilenceDetector {
    config: SilenceConfig,
}

impl SilenceDetector {
    /// Create a detector with the given silence settings.
    pub fn new(config: SilenceConfig) -> Self {
        Self { config }
    }

    /// Check whether the configured tool can be invoked at all.
    pub async fn is_available(&self) -> bool {
        match Command::new(&self.config.tool)
            .arg("-version")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await
        {
            Ok(status) => status.success(),
            Err(e) => {
                debug!("{} not invocable: {}", self.config.tool, e);
                false
            }
        }
    }

    /// Run silence detection over the audio file and return the detected
    /// silence intervals in order.
    pub async fn detect(
        &self,
        audio_path: &Path,
    ) -> Result<Vec<SilenceInterval>, SilenceDetectError> {
        if !self.is_available().await {
            return Err(SilenceDetectError::ToolMissing(self.config.tool.clone()));
        }

        let filter = format!(
            "silencedetect=noise={}dB:d={}",
            self.config.threshold_db, self.config.min_silence_duration
        );
        debug!(
            "Running {} silencedetect on {:?} ({})",
            self.config.tool, audio_path, filter
        );

        let output = Command::new(&self.config.tool)
            .arg("-i")
            .arg(audio_path)
            .arg("-af")
            .arg(&filter)
            .arg("-f")
            .arg("null")
            .arg("-")
            .output()
            .await?;

        if !output.status.success() {
            return Err(SilenceDetectError::ToolFailed(output.status.to_string()));
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let silences = parse_silence_markers(&stderr);
        if silences.is_empty() {
            warn!("No silences detected in {:?}", audio_path);
            return Err(SilenceDetectError::NoSilences);
        }

        debug!("Detected {} silence intervals", silences.len());
        Ok(silences)
    }
}

/// Parse paired `silence_start`/`silence_end` markers from the tool's
/// diagnostic output. Unpaired trailing starts are dropped.
pub fn parse_silence_markers(diagnostics: &str) -> Vec<SilenceInterval> {
    let mut silences = Vec::new();
    let mut current_start: Option<f64> = None;

    for line in diagnostics.lines() {
        if let Some(caps) = SILENCE_START.captures(line) {
            if let Ok(value) = caps[1].parse::<f64>() {
                current_start = Some(value);
            }
            continue;
        }
        if let Some(caps) = SILENCE_END.captures(line) {
            if let (Some(start), Ok(end)) = (current_start.take(), caps[1].parse::<f64>()) {
                silences.push(SilenceInterval { start, end });
            }
        }
    }

    silences
}
