//! Timing strategy cascade.
//!
//! Three interchangeable strategies assign `[start, end]` intervals to
//! caption units, tried in order of fidelity:
//!
//! 1. [`word::WordAligner`] - forced alignment against ASR word timings
//! 2. [`silence::SilenceAligner`] - silence-boundary detection
//! 3. [`heuristic::HeuristicEstimator`] - speech-rate heuristics
//!
//! A strategy that cannot run reports [`AlignOutcome::NotAvailable`] and the
//! engine falls through; the heuristic path always succeeds, so alignment
//! as a whole never fails.

pub mod heuristic;
pub mod postprocess;
pub mod silence;
pub mod word;

pub use heuristic::HeuristicEstimator;
pub use postprocess::split_long_segments;
pub use silence::SilenceAligner;
pub use word::WordAligner;

use crate::config::Config;
use crate::core::script::CaptionUnit;
use crate::core::segment::{CaptionSegment, SpeakerMap};
use crate::services::asr::Transcriber;
use crate::services::audio::SilenceDetector;
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;

/// Outcome of one timing strategy attempt.
#[derive(Debug)]
pub enum AlignOutcome {
    /// The strategy produced a full set of segments.
    Aligned(Vec<CaptionSegment>),
    /// The strategy's preconditions failed; try the next one.
    NotAvailable,
}

/// Orchestrator owning the strategy cascade for one request.
///
/// The engine holds no mutable state; each call to [`TimingEngine::align`]
/// runs strictly serially and owns its intermediate values.
pub struct TimingEngine {
    config: Config,
    transcriber: Option<Arc<dyn Transcriber>>,
}

impl TimingEngine {
    /// Create an engine without a transcription service; word-level
    /// alignment is skipped.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            transcriber: None,
        }
    }

    /// Create an engine with a transcription service for word-level
    /// alignment.
    pub fn with_transcriber(config: Config, transcriber: Arc<dyn Transcriber>) -> Self {
        Self {
            config,
            transcriber: Some(transcriber),
        }
    }

    /// Assign timing to every unit.
    ///
    /// Tries word alignment, then silence alignment (both only when
    /// `audio_path` points at an existing file), then the heuristic
    /// estimator. An empty unit list yields an empty segment list.
    pub async fn align(
        &self,
        units: &[CaptionUnit],
        audio_duration: f64,
        audio_path: Option<&Path>,
        speakers: Option<&SpeakerMap>,
    ) -> Vec<CaptionSegment> {
        if units.is_empty() {
            return Vec::new();
        }

        if let Some(path) = audio_path.filter(|p| p.exists()) {
            match self
                .try_word_alignment(units, audio_duration, path, speakers)
                .await
            {
                AlignOutcome::Aligned(segments) => {
                    info!("Using word-level forced alignment");
                    return segments;
                }
                AlignOutcome::NotAvailable => {}
            }

            match self
                .try_silence_alignment(units, audio_duration, path, speakers)
                .await
            {
                AlignOutcome::Aligned(segments) => {
                    info!("Using silence-boundary alignment");
                    return segments;
                }
                AlignOutcome::NotAvailable => {}
            }
        }

        info!("Using heuristic timing estimation");
        HeuristicEstimator::new(self.config.timing.clone()).estimate(
            units,
            audio_duration,
            speakers,
        )
    }

    async fn try_word_alignment(
        &self,
        units: &[CaptionUnit],
        audio_duration: f64,
        audio_path: &Path,
        speakers: Option<&SpeakerMap>,
    ) -> AlignOutcome {
        if !self.config.asr.enabled {
            return AlignOutcome::NotAvailable;
        }
        let Some(transcriber) = &self.transcriber else {
            return AlignOutcome::NotAvailable;
        };

        let aligner = WordAligner::new(self.config.asr.clone(), self.config.timing.clone());
        match aligner
            .align(
                transcriber.as_ref(),
                audio_path,
                units,
                audio_duration,
                speakers,
            )
            .await
        {
            Ok(segments) => AlignOutcome::Aligned(segments),
            Err(e) => {
                warn!("Word alignment unavailable: {}", e);
                AlignOutcome::NotAvailable
            }
        }
    }

    async fn try_silence_alignment(
        &self,
        units: &[CaptionUnit],
        audio_duration: f64,
        audio_path: &Path,
        speakers: Option<&SpeakerMap>,
    ) -> AlignOutcome {
        let detector = SilenceDetector::new(self.config.silence.clone());
        match detector.detect(audio_path).await {
            Ok(silences) => {
                let aligner = SilenceAligner::new(self.config.silence.clone());
                AlignOutcome::Aligned(aligner.align(units, &silences, audio_duration, speakers))
            }
            Err(e) => {
                warn!("Silence alignment unavailable: {}", e);
                AlignOutcome::NotAvailable
            }
        }
    }
}
