//! Timing alignment from detected silence intervals.
//!
//! Silences mark sentence boundaries: the complement of the silence list
//! within `[0, audio_duration]` gives speech spans, the span count is
//! reconciled against the unit count, and units are mapped onto the
//! concatenated speech timeline proportionally by word count. A fixed
//! calibration offset compensates for the detector firing early.

use crate::config::SilenceConfig;
use crate::core::script::CaptionUnit;
use crate::core::segment::{CaptionSegment, SpeakerMap};
use crate::services::audio::SilenceInterval;
use log::{debug, warn};

/// One speech span `(start, end)` in seconds.
type Span = (f64, f64);

/// Aligner deriving unit timing from silence boundaries.
pub struct SilenceAligner {
    config: SilenceConfig,
}

impl SilenceAligner {
    /// Create an aligner with the given silence settings.
    pub fn new(config: SilenceConfig) -> Self {
        Self { config }
    }

    /// Align units against the detected silences.
    ///
    /// The silence list must be non-empty and ordered; the caller treats an
    /// empty detection as strategy-not-available before getting here.
    pub fn align(
        &self,
        units: &[CaptionUnit],
        silences: &[SilenceInterval],
        audio_duration: f64,
        speakers: Option<&SpeakerMap>,
    ) -> Vec<CaptionSegment> {
        if units.is_empty() {
            return Vec::new();
        }

        let spans = self.speech_spans(silences, audio_duration);
        debug!(
            "{} speech spans from {} silences for {} units",
            spans.len(),
            silences.len(),
            units.len()
        );

        let spans = if spans.len() == units.len() {
            spans
        } else {
            warn!(
                "Span/unit count mismatch ({} vs {}), reconciling from silence boundaries",
                spans.len(),
                units.len()
            );
            self.spans_from_boundaries(silences, units.len(), audio_duration)
        };

        self.map_units_to_spans(units, &spans, audio_duration, speakers)
    }

    /// Derive speech spans as the complement of the silences, then filter
    /// out spans too short to be sentences.
    fn speech_spans(&self, silences: &[SilenceInterval], audio_duration: f64) -> Vec<Span> {
        let mut spans: Vec<Span> = Vec::new();

        if let Some(first) = silences.first() {
            if first.start > 0.0 {
                spans.push((0.0, first.start));
            }
        }
        for (i, silence) in silences.iter().enumerate() {
            match silences.get(i + 1) {
                Some(next) => {
                    if next.start > silence.end {
                        spans.push((silence.end, next.start));
                    }
                }
                None => {
                    if silence.end < audio_duration {
                        spans.push((silence.end, audio_duration));
                    }
                }
            }
        }
        if spans.is_empty() {
            spans.push((0.0, audio_duration));
        }

        // Merge sub-sentence blips into the preceding span; the opening
        // span survives even when short.
        let mut filtered: Vec<Span> = Vec::new();
        for span in spans {
            let duration = span.1 - span.0;
            if duration >= self.config.min_speech_duration || filtered.is_empty() {
                filtered.push(span);
            } else {
                let last = filtered.last_mut().unwrap();
                last.1 = span.1;
            }
        }

        // A run of short spans usually means one sentence chopped by
        // breathing pauses; collapse adjacent short pairs.
        let mut i = 0;
        while i + 1 < filtered.len() {
            let current = filtered[i].1 - filtered[i].0;
            let next = filtered[i + 1].1 - filtered[i + 1].0;
            if current < self.config.merge_below_duration && next < self.config.merge_below_duration
            {
                filtered[i].1 = filtered[i + 1].1;
                filtered.remove(i + 1);
            } else {
                i += 1;
            }
        }

        filtered
    }

    /// Rebuild exactly `target` spans using silence starts as sentence
    /// boundaries: keep the longest silences when there are too many,
    /// interpolate uniformly when there are too few, then split or merge
    /// until the count matches.
    fn spans_from_boundaries(
        &self,
        silences: &[SilenceInterval],
        target: usize,
        audio_duration: f64,
    ) -> Vec<Span> {
        let boundaries: Vec<f64> = if silences.len() > target.saturating_sub(1) {
            let mut by_duration: Vec<&SilenceInterval> = silences.iter().collect();
            by_duration.sort_by(|a, b| {
                b.duration()
                    .partial_cmp(&a.duration())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            let mut starts: Vec<f64> = by_duration
                .iter()
                .take(target.saturating_sub(1))
                .map(|s| s.start)
                .collect();
            starts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            starts
        } else if silences.len() < target.saturating_sub(1) {
            let step = audio_duration / target as f64;
            (1..target).map(|i| i as f64 * step).collect()
        } else {
            let mut starts: Vec<f64> = silences.iter().map(|s| s.start).collect();
            starts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            starts
        };

        let mut spans: Vec<Span> = Vec::new();
        let mut cursor = 0.0_f64;
        for boundary in boundaries {
            if boundary > cursor {
                spans.push((cursor, boundary));
                cursor = boundary;
            }
        }
        if cursor < audio_duration {
            spans.push((cursor, audio_duration));
        }
        if spans.is_empty() {
            spans.push((0.0, audio_duration));
        }

        while spans.len() < target {
            split_longest(&mut spans);
        }
        while spans.len() > target {
            merge_smallest_pair(&mut spans);
        }

        spans
    }

    /// Walk units along the concatenated speech timeline, giving each unit
    /// a share of the total speech time proportional to its word count, and
    /// translate timeline positions back to absolute times.
    fn map_units_to_spans(
        &self,
        units: &[CaptionUnit],
        spans: &[Span],
        audio_duration: f64,
        speakers: Option<&SpeakerMap>,
    ) -> Vec<CaptionSegment> {
        let total_words: usize = units.iter().map(|u| u.word_count).sum();
        let total_speech: f64 = spans.iter().map(|(s, e)| e - s).sum();
        let offset = self.config.calibration_offset;

        let mut segments = Vec::with_capacity(units.len());
        let mut timeline = 0.0_f64;

        for unit in units {
            let proportion = if total_words > 0 {
                unit.word_count as f64 / total_words as f64
            } else {
                1.0 / units.len() as f64
            };
            let allocation = total_speech * proportion;
            let target_start = timeline;
            let target_end = timeline + allocation;

            let mut start: Option<f64> = None;
            let mut end: Option<f64> = None;
            let mut cursor = 0.0_f64;
            for (span_start, span_end) in spans {
                let span_duration = span_end - span_start;
                if cursor <= target_start && target_start < cursor + span_duration {
                    start = Some(span_start + (target_start - cursor));
                }
                if cursor < target_end && target_end <= cursor + span_duration {
                    end = Some(span_start + (target_end - cursor));
                    break;
                }
                cursor += span_duration;
            }
            // Float drift can push a cursor position past the final span;
            // land such positions on the timeline's end.
            let last_end = spans.last().map(|(_, e)| *e).unwrap_or(audio_duration);
            let start = start.unwrap_or(last_end);
            let end = end.unwrap_or_else(|| last_end.min(start + allocation));
            timeline = target_end;

            let start = (start + offset).clamp(0.0, audio_duration);
            let end = (end + offset).clamp(start, audio_duration);
            segments.push(CaptionSegment::from_unit(unit, start, end, speakers));
        }

        if let Some(last) = segments.last_mut() {
            last.end_time = audio_duration;
            if last.start_time > last.end_time {
                last.start_time = last.end_time;
            }
        }

        segments
    }
}

fn split_longest(spans: &mut Vec<Span>) {
    if spans.is_empty() {
        return;
    }
    let mut longest = 0usize;
    for (i, span) in spans.iter().enumerate() {
        if span.1 - span.0 > spans[longest].1 - spans[longest].0 {
            longest = i;
        }
    }
    let (start, end) = spans[longest];
    let mid = (start + end) / 2.0;
    spans[longest] = (start, mid);
    spans.insert(longest + 1, (mid, end));
}

fn merge_smallest_pair(spans: &mut Vec<Span>) {
    if spans.len() < 2 {
        return;
    }
    let mut best = 0usize;
    let mut best_combined = f64::INFINITY;
    for i in 0..spans.len() - 1 {
        let combined = (spans[i].1 - spans[i].0) + (spans[i + 1].1 - spans[i + 1].0);
        if combined < best_combined {
            best_combined = combined;
            best = i;
        }
    }
    spans[best] = (spans[best].0, spans[best + 1].1);
    spans.remove(best + 1);
}
