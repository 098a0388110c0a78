// src/config/mod.rs
//! Configuration management module for CapX.
//!
//! This module provides the configuration type definitions and the
//! configuration service used for dependency injection.
//!
//! # Key Components
//!
//! - [`Config`] - Main configuration structure containing all settings
//! - [`ConfigService`] - Service interface for configuration management
//! - [`ProductionConfigService`] - Production implementation layering a
//!   config file and `CAPX_*` environment overrides over defaults
//! - [`TestConfigService`] - Test implementation with a fixed configuration
//!
//! The empirical timing constants (speech rate, pauses, slowdown factors,
//! silence thresholds, calibration offset) all live here so that they can be
//! tuned without touching the aligners.
//!
//! # Examples
//!
//! ```rust
//! use capx_cli::config::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.script.max_words, 15);
//! assert_eq!(config.silence.threshold_db, -30.0);
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod service;

pub use service::{ConfigService, ProductionConfigService, TestConfigService};

/// Full application configuration for CapX.
///
/// Aggregates the settings for script parsing, timing estimation, silence
/// detection, the transcription service, and caption output.
///
/// # Serialization
///
/// This struct can be serialized to/from TOML format for configuration files.
///
/// ```rust
/// use capx_cli::config::Config;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let toml_str = toml::to_string(&config)?;
/// assert!(toml_str.contains("[timing]"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Script parsing settings.
    #[serde(default)]
    pub script: ScriptConfig,
    /// Heuristic timing estimation settings.
    #[serde(default)]
    pub timing: TimingConfig,
    /// Silence-detection alignment settings.
    #[serde(default)]
    pub silence: SilenceConfig,
    /// Transcription (word-level forced alignment) settings.
    #[serde(default)]
    pub asr: AsrConfig,
    /// Caption output settings.
    #[serde(default)]
    pub formats: FormatsConfig,
}

/// Script parsing configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ScriptConfig {
    /// Word budget per caption unit; a single sentence may exceed it but is
    /// never split.
    pub max_words: usize,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self { max_words: 15 }
    }
}

/// Heuristic timing configuration.
///
/// These are empirical constants: the defaults were tuned against synthetic
/// dialogue audio and intentionally run slower than typical read-aloud rates.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TimingConfig {
    /// Average speaking rate used for duration estimation.
    pub words_per_minute: f64,
    /// Minimum duration for a caption segment in seconds.
    pub min_segment_duration: f64,
    /// Maximum duration for a caption segment in seconds.
    pub max_segment_duration: f64,
    /// Pause in seconds when the speaker changes between units.
    pub pause_between_speakers: f64,
    /// Pause in seconds between units of the same speaker.
    pub pause_between_segments: f64,
    /// Maximum relative pause lengthening over the second half of the
    /// script (0.5 = up to 50% longer).
    pub pause_slowdown: f64,
    /// Maximum relative duration lengthening over the tail of the script
    /// (0.60 = up to 60% more time for the last units).
    pub duration_slowdown: f64,
    /// Fraction of the unit list after which the progressive slowdown
    /// starts.
    pub slowdown_start_ratio: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: 120.0,
            min_segment_duration: 1.0,
            max_segment_duration: 60.0,
            pause_between_speakers: 1.0,
            pause_between_segments: 0.8,
            pause_slowdown: 0.5,
            duration_slowdown: 0.60,
            slowdown_start_ratio: 0.2,
        }
    }
}

/// Silence-detection alignment configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SilenceConfig {
    /// Noise floor in dB for the silencedetect filter.
    pub threshold_db: f64,
    /// Minimum silence duration in seconds for the filter to report it.
    pub min_silence_duration: f64,
    /// Speech spans shorter than this merge into the preceding span.
    pub min_speech_duration: f64,
    /// Adjacent speech spans both shorter than this merge together.
    pub merge_below_duration: f64,
    /// Constant shift in seconds applied to silence-derived timings to
    /// compensate for systematic early detection.
    pub calibration_offset: f64,
    /// Name of the audio tool invoked for silence detection.
    pub tool: String,
}

impl Default for SilenceConfig {
    fn default() -> Self {
        Self {
            threshold_db: -30.0,
            min_silence_duration: 0.25,
            min_speech_duration: 0.6,
            merge_below_duration: 1.5,
            calibration_offset: 3.0,
            tool: "ffmpeg".to_string(),
        }
    }
}

/// Transcription service configuration for word-level forced alignment.
///
/// The service is any OpenAI-compatible `/audio/transcriptions` endpoint
/// that supports word-level timestamp granularity; a locally hosted
/// faster-whisper server is the usual choice and honours the decoding
/// parameters below.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AsrConfig {
    /// Whether word-level alignment is attempted at all.
    pub enabled: bool,
    /// Model name requested from the service.
    pub model: String,
    /// Transcription language; fixed at request time.
    pub language: String,
    /// Decoder beam size.
    pub beam_size: u32,
    /// Inference device hint ("cpu", "cuda").
    pub device: String,
    /// Inference precision hint ("int8", "float16").
    pub compute_type: String,
    /// Base URL of the transcription endpoint.
    pub base_url: String,
    /// API key; empty for unauthenticated local servers.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u32,
    /// Maximum retry attempts for failed requests.
    pub max_retries: u32,
    /// Delay between retries in milliseconds.
    pub retry_delay_ms: u64,
}

impl Default for AsrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "base".to_string(),
            language: "en".to_string(),
            beam_size: 5,
            device: "cpu".to_string(),
            compute_type: "int8".to_string(),
            base_url: "http://127.0.0.1:8000/v1".to_string(),
            api_key: String::new(),
            timeout_seconds: 300,
            max_retries: 2,
            retry_delay_ms: 1000,
        }
    }
}

/// Caption output configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct FormatsConfig {
    /// Formats written by default ("srt", "vtt", "json", "transcript",
    /// "timing").
    pub default_formats: Vec<String>,
    /// Directory caption packages are written to.
    pub output_dir: PathBuf,
    /// Include `[MM:SS]` timestamps in transcript output.
    pub transcript_timestamps: bool,
    /// Include speaker labels in transcript output.
    pub transcript_speakers: bool,
}

impl Default for FormatsConfig {
    fn default() -> Self {
        Self {
            default_formats: vec![
                "srt".to_string(),
                "vtt".to_string(),
                "json".to_string(),
                "transcript".to_string(),
                "timing".to_string(),
            ],
            output_dir: PathBuf::from("captions"),
            transcript_timestamps: true,
            transcript_speakers: true,
        }
    }
}

impl Config {
    /// Validate cross-field constraints that serde cannot express.
    pub fn validate(&self) -> crate::Result<()> {
        if self.script.max_words == 0 {
            return Err(crate::error::CapxError::config(
                "script.max_words must be positive",
            ));
        }
        if self.timing.words_per_minute <= 0.0 {
            return Err(crate::error::CapxError::config(
                "timing.words_per_minute must be positive",
            ));
        }
        if self.timing.min_segment_duration > self.timing.max_segment_duration {
            return Err(crate::error::CapxError::config(
                "timing.min_segment_duration exceeds timing.max_segment_duration",
            ));
        }
        if self.silence.min_silence_duration <= 0.0 {
            return Err(crate::error::CapxError::config(
                "silence.min_silence_duration must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.timing.slowdown_start_ratio) {
            return Err(crate::error::CapxError::config(
                "timing.slowdown_start_ratio must be within 0.0-1.0",
            ));
        }
        Ok(())
    }
}
