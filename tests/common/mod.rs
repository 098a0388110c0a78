//! Shared helpers for integration tests.

use capx_cli::core::segment::CaptionSegment;

/// Assert the universal caption invariants: ordering, bounds, and the
/// exact final snap to the audio duration.
pub fn assert_caption_invariants(segments: &[CaptionSegment], audio_duration: f64) {
    assert!(!segments.is_empty(), "expected at least one segment");
    for pair in segments.windows(2) {
        assert!(
            pair[0].end_time <= pair[1].start_time + 1e-9,
            "segments overlap: [{:.3}, {:.3}] then [{:.3}, {:.3}]",
            pair[0].start_time,
            pair[0].end_time,
            pair[1].start_time,
            pair[1].end_time
        );
    }
    for segment in segments {
        assert!(segment.start_time >= 0.0, "negative start");
        assert!(
            segment.start_time <= segment.end_time + 1e-9,
            "start after end"
        );
        assert!(
            segment.end_time <= audio_duration + 1e-9,
            "end {:.3} past audio duration {:.3}",
            segment.end_time,
            audio_duration
        );
    }
    assert_eq!(
        segments.last().unwrap().end_time,
        audio_duration,
        "final segment must end exactly at the audio duration"
    );
}
