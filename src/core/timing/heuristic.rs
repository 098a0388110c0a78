//! Analytic timing estimation from speech-rate heuristics.
//!
//! The last-resort strategy: no audio inspection at all. Time is distributed
//! across units proportionally to word count, with inter-unit pauses and a
//! progressive slowdown curve that gives later units more room, then scaled
//! so that the segments fill the known audio duration exactly.

use crate::config::TimingConfig;
use crate::core::script::CaptionUnit;
use crate::core::segment::{CaptionSegment, SpeakerMap};
use log::debug;

/// Heuristic timing estimator.
///
/// Guaranteed to succeed for any positive audio duration and at least one
/// unit; the cascade relies on this as its terminal strategy.
pub struct HeuristicEstimator {
    config: TimingConfig,
}

impl HeuristicEstimator {
    /// Create an estimator with the given timing constants.
    pub fn new(config: TimingConfig) -> Self {
        Self { config }
    }

    /// Produce segments that exactly span `[0, audio_duration]`.
    pub fn estimate(
        &self,
        units: &[CaptionUnit],
        audio_duration: f64,
        speakers: Option<&SpeakerMap>,
    ) -> Vec<CaptionSegment> {
        if units.is_empty() {
            return Vec::new();
        }

        let pauses = self.pause_schedule(units);
        let total_pause: f64 = pauses.iter().sum();
        let available = audio_duration - total_pause;
        let mut durations = self.base_durations(units, available);

        // Scale durations and pauses together so the walk lands exactly on
        // the audio duration.
        let total: f64 = durations.iter().sum::<f64>() + total_pause;
        let mut pauses = pauses;
        if total > 0.0 && (total - audio_duration).abs() > 0.01 {
            let scale = audio_duration / total;
            for d in &mut durations {
                *d *= scale;
            }
            for p in &mut pauses {
                *p *= scale;
            }
            debug!(
                "Heuristic timing scaled by {:.3} to fit {:.2}s",
                scale, audio_duration
            );
        }

        let mut segments = Vec::with_capacity(units.len());
        let mut current = 0.0_f64;
        let last = units.len() - 1;
        for (i, unit) in units.iter().enumerate() {
            let mut end = current + durations[i];
            if i == last || end > audio_duration {
                end = audio_duration;
            }
            if end < current {
                end = current;
            }
            segments.push(CaptionSegment::from_unit(unit, current, end, speakers));
            current = end;

            if i < last {
                let pause = pauses[i].min((audio_duration - current).max(0.0));
                current += pause;
            }
        }

        // Final snap; the walk above already lands here except for float
        // drift.
        if let Some(last_segment) = segments.last_mut() {
            last_segment.end_time = audio_duration;
        }

        segments
    }

    /// Pause before each adjacent pair, longer when the speaker changes and
    /// progressively longer through the second half of the script.
    fn pause_schedule(&self, units: &[CaptionUnit]) -> Vec<f64> {
        let n = units.len();
        let half = n as f64 * 0.5;
        let mut pauses = Vec::with_capacity(n.saturating_sub(1));

        for i in 0..n.saturating_sub(1) {
            let mut pause = if units[i + 1].speaker_id != units[i].speaker_id {
                self.config.pause_between_speakers
            } else {
                self.config.pause_between_segments
            };
            if (i as f64) >= half && half > 0.0 {
                let progress = (i as f64 - half) / half;
                pause *= 1.0 + progress * self.config.pause_slowdown;
            }
            pauses.push(pause);
        }

        pauses
    }

    /// Word-count-proportional base durations with the progressive slowdown
    /// applied past the configured start ratio, clamped per unit before the
    /// global rescale.
    fn base_durations(&self, units: &[CaptionUnit], available: f64) -> Vec<f64> {
        let n = units.len();
        let total_words: usize = units.iter().map(|u| u.word_count).sum();
        let slowdown_start = n as f64 * self.config.slowdown_start_ratio;
        let slowdown_span = n as f64 * (1.0 - self.config.slowdown_start_ratio);

        units
            .iter()
            .enumerate()
            .map(|(i, unit)| {
                let mut duration = if total_words > 0 {
                    available * unit.word_count as f64 / total_words as f64
                } else {
                    available / n as f64
                };
                if (i as f64) >= slowdown_start && slowdown_span > 0.0 {
                    let progress = (i as f64 - slowdown_start) / slowdown_span;
                    duration *= 1.0 + progress * self.config.duration_slowdown;
                }
                duration.clamp(
                    self.config.min_segment_duration,
                    self.config.max_segment_duration,
                )
            })
            .collect()
    }
}
