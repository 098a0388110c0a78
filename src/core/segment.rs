//! Timed caption segments, the unit of exchange between aligners and
//! formatters.

use crate::core::script::CaptionUnit;
use serde::Serialize;
use std::collections::HashMap;

/// Mapping from script speaker ids to display names.
pub type SpeakerMap = HashMap<u32, String>;

/// A caption unit augmented with `[start_time, end_time]` and a resolved
/// speaker name.
///
/// Segments are constructed once by the chosen timing strategy and are
/// immutable afterward; formatters only read them. Field order matters for
/// the JSON caption format and must not be rearranged.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CaptionSegment {
    /// Segment start in seconds from the beginning of the audio.
    pub start_time: f64,
    /// Segment end in seconds, `start_time <= end_time`.
    pub end_time: f64,
    /// Sentence text of the underlying unit.
    pub text: String,
    /// Speaker identifier from the script.
    pub speaker_id: u32,
    /// Display name, from the speaker mapping or `"Speaker <id>"`.
    pub speaker_name: String,
    /// Always 1.0: the text is known a priori, the field is kept for
    /// downstream parity.
    pub confidence: f64,
    /// Whitespace-split token count of `text`.
    pub word_count: usize,
    /// Character count of `text`.
    pub char_count: usize,
}

impl CaptionSegment {
    /// Build a segment from a parsed unit and a computed time span.
    pub fn from_unit(
        unit: &CaptionUnit,
        start_time: f64,
        end_time: f64,
        speakers: Option<&SpeakerMap>,
    ) -> Self {
        Self {
            start_time,
            end_time,
            text: unit.text.clone(),
            speaker_id: unit.speaker_id,
            speaker_name: resolve_speaker_name(speakers, unit.speaker_id),
            confidence: 1.0,
            word_count: unit.word_count,
            char_count: unit.char_count,
        }
    }

    /// Duration of the segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Resolve a speaker id to a display name, defaulting to `"Speaker <id>"`.
pub fn resolve_speaker_name(speakers: Option<&SpeakerMap>, speaker_id: u32) -> String {
    speakers
        .and_then(|m| m.get(&speaker_id).cloned())
        .unwrap_or_else(|| format!("Speaker {}", speaker_id))
}
