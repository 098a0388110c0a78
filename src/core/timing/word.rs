//! Forced alignment of script units against ASR word timings.
//!
//! The transcript text is already known, so this is not decoding: script
//! words are matched to transcribed words by monotone forward search, and
//! each unit's span is taken from the first and last matched word. Units
//! that cannot be matched fall back to proportional timing so the output
//! always covers every unit.

use crate::config::{AsrConfig, TimingConfig};
use crate::core::script::CaptionUnit;
use crate::core::segment::{CaptionSegment, SpeakerMap};
use crate::services::asr::{Transcriber, WordTiming};
use log::{debug, warn};
use std::path::Path;
use thiserror::Error;

/// Forward search window in ASR words beyond the cursor. Matching further
/// ahead risks locking onto a repeated phrase later in the audio.
const SEARCH_WINDOW: usize = 200;

/// Fraction of a unit's words that must match for a confident span.
const FULL_MATCH_RATIO: f64 = 0.7;

/// Fraction of a unit's words that still yields a usable partial span.
const PARTIAL_MATCH_RATIO: f64 = 0.5;

/// Errors of the word-alignment strategy. These never escape the timing
/// cascade; they are logged and translated into a fall-through.
#[derive(Debug, Error)]
pub enum WordAlignError {
    /// The transcription service failed or is unreachable.
    #[error("transcription failed: {0}")]
    Transcription(String),
    /// The service answered but produced no word timings.
    #[error("transcription returned no word timings")]
    NoWordTimings,
}

/// Aligner matching script units to transcribed word timings.
pub struct WordAligner {
    asr: AsrConfig,
    timing: TimingConfig,
}

impl WordAligner {
    /// Create an aligner with the given configuration.
    pub fn new(asr: AsrConfig, timing: TimingConfig) -> Self {
        Self { asr, timing }
    }

    /// Transcribe the audio and align the units against the word stream.
    ///
    /// # Errors
    ///
    /// Returns a [`WordAlignError`] when the transcription service is
    /// unusable; the caller treats that as strategy-not-available.
    pub async fn align(
        &self,
        transcriber: &dyn Transcriber,
        audio_path: &Path,
        units: &[CaptionUnit],
        audio_duration: f64,
        speakers: Option<&SpeakerMap>,
    ) -> Result<Vec<CaptionSegment>, WordAlignError> {
        debug!(
            "Transcribing {:?} for word-level alignment (model={}, language={})",
            audio_path, self.asr.model, self.asr.language
        );
        let transcription = transcriber
            .transcribe(audio_path)
            .await
            .map_err(|e| WordAlignError::Transcription(e.to_string()))?;

        let words = transcription.word_timings();
        if words.is_empty() {
            return Err(WordAlignError::NoWordTimings);
        }
        debug!("Aligning {} units against {} words", units.len(), words.len());

        Ok(self.align_words(units, &words, audio_duration, speakers))
    }

    /// Pure alignment of units against an ordered word-timing stream.
    pub fn align_words(
        &self,
        units: &[CaptionUnit],
        words: &[WordTiming],
        audio_duration: f64,
        speakers: Option<&SpeakerMap>,
    ) -> Vec<CaptionSegment> {
        let normalized: Vec<String> = words.iter().map(|w| normalize_token(&w.word)).collect();
        let total_words: usize = units.iter().map(|u| u.word_count).sum();

        let mut segments: Vec<CaptionSegment> = Vec::with_capacity(units.len());
        let mut word_idx = 0usize;
        let mut words_before = 0usize;

        for unit in units {
            let unit_words: Vec<String> = unit
                .text
                .split_whitespace()
                .map(normalize_token)
                .filter(|w| !w.is_empty())
                .collect();

            let matched_span = if unit_words.is_empty() {
                None
            } else {
                self.match_unit(&unit_words, &normalized, words, &mut word_idx)
            };

            let (mut start, mut end) = match matched_span {
                Some(span) => span,
                None => self.proportional_span(unit, words_before, total_words, audio_duration),
            };

            // Sequential timing: a segment can never begin before the
            // previous one ends.
            if let Some(prev) = segments.last() {
                if start < prev.end_time {
                    start = prev.end_time;
                    if end <= start {
                        end = start + 1.0;
                    }
                }
            }
            start = start.min(audio_duration);
            end = end.clamp(start, audio_duration);

            segments.push(CaptionSegment::from_unit(unit, start, end, speakers));
            words_before += unit.word_count;
        }

        if let Some(last) = segments.last_mut() {
            last.end_time = audio_duration;
            if last.start_time > last.end_time {
                last.start_time = last.end_time;
            }
        }

        segments
    }

    /// Search forward from the cursor for this unit's word sequence.
    ///
    /// Returns the matched time span and advances the cursor past the
    /// matched region, or returns `None` when fewer than half the unit's
    /// words can be found in the window.
    fn match_unit(
        &self,
        unit_words: &[String],
        normalized: &[String],
        words: &[WordTiming],
        word_idx: &mut usize,
    ) -> Option<(f64, f64)> {
        let limit = (*word_idx + SEARCH_WINDOW).min(normalized.len());
        let needed = unit_words.len() as f64;

        for i in *word_idx..limit {
            if normalized[i] != unit_words[0] {
                continue;
            }

            let start = words[i].start;
            let mut matched = 1usize;
            let mut end: Option<f64> = None;

            // Scan a bounded lookahead, tolerating ASR insertions; stop
            // early once the unit is covered well enough and the stream
            // diverges.
            let lookahead = (i + 1 + unit_words.len() + 5).min(normalized.len());
            for j in (i + 1)..lookahead {
                if matched >= unit_words.len() {
                    break;
                }
                let expected = &unit_words[matched];
                let next = &normalized[j];
                if next == expected
                    || expected.replace('\'', "") == next.replace('\'', "")
                {
                    matched += 1;
                    end = Some(words[j].end);
                } else if matched as f64 >= needed * FULL_MATCH_RATIO {
                    break;
                }
            }

            if matched as f64 >= needed * FULL_MATCH_RATIO {
                *word_idx = i + matched;
                let end = end.unwrap_or(start + 1.0);
                return Some((start, end));
            }
            if matched as f64 >= needed * PARTIAL_MATCH_RATIO {
                *word_idx = i + matched;
                let end =
                    end.unwrap_or_else(|| words[(i + matched - 1).min(words.len() - 1)].end);
                return Some((start, end));
            }
            // Weak candidate: keep scanning for a better first-word match.
        }

        None
    }

    /// Proportional fallback for an unmatched unit: position by cumulative
    /// word count, duration from the configured speech rate.
    fn proportional_span(
        &self,
        unit: &CaptionUnit,
        words_before: usize,
        total_words: usize,
        audio_duration: f64,
    ) -> (f64, f64) {
        warn!(
            "No transcript match for unit '{}', using proportional timing",
            &unit.text.chars().take(40).collect::<String>()
        );
        let start = if total_words > 0 {
            words_before as f64 / total_words as f64 * audio_duration
        } else {
            0.0
        };
        let words_per_second = self.timing.words_per_minute / 60.0;
        let duration = unit.word_count as f64 / words_per_second;
        (start, start + duration)
    }
}

/// Normalise a token for matching: lowercase, straighten typographic
/// punctuation, and trim surrounding sentence punctuation.
pub fn normalize_token(token: &str) -> String {
    let straightened: String = token
        .trim()
        .chars()
        .flat_map(|c| match c {
            '\u{2018}' | '\u{2019}' => vec!['\''],
            '\u{201C}' | '\u{201D}' => vec!['"'],
            '\u{2013}' | '\u{2014}' => vec!['-'],
            '\u{2026}' => vec!['.', '.', '.'],
            _ => vec![c],
        })
        .collect();
    straightened
        .trim_matches(|c: char| ".,!?;:".contains(c))
        .to_lowercase()
}
