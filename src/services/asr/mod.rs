//! Transcription service abstraction.
//!
//! The word aligner only needs ordered word-level timings; this module
//! defines the data model and the [`Transcriber`] seam so that the HTTP
//! client can be swapped for a mock in tests.

mod whisper;

pub use whisper::WhisperApiClient;

use crate::Result;
use async_trait::async_trait;
use std::path::Path;

/// A single transcribed word with its time span in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct WordTiming {
    /// The transcribed word, surrounding whitespace trimmed.
    pub word: String,
    /// Word start in seconds.
    pub start: f64,
    /// Word end in seconds.
    pub end: f64,
}

/// A transcription segment carrying its word-level timings.
#[derive(Debug, Clone)]
pub struct TranscribedSegment {
    /// Segment start in seconds.
    pub start: f64,
    /// Segment end in seconds.
    pub end: f64,
    /// Segment text as returned by the service.
    pub text: String,
    /// Word timings within the segment, in order.
    pub words: Vec<WordTiming>,
}

/// Full transcription result.
#[derive(Debug, Clone, Default)]
pub struct Transcription {
    /// Ordered transcription segments.
    pub segments: Vec<TranscribedSegment>,
}

impl Transcription {
    /// Flatten the per-segment word timings into one ordered stream.
    pub fn word_timings(&self) -> Vec<WordTiming> {
        self.segments
            .iter()
            .flat_map(|segment| segment.words.iter().cloned())
            .collect()
    }
}

/// Transcription provider returning word-level timings for an audio file.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the given audio file with word-level timestamps.
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcription>;
}
