//! Silence-boundary alignment behaviour, driven through canned silence
//! intervals and tool diagnostics.

mod common;

use capx_cli::config::SilenceConfig;
use capx_cli::core::script::ScriptParser;
use capx_cli::core::timing::SilenceAligner;
use capx_cli::services::audio::{SilenceInterval, silence::parse_silence_markers};
use common::assert_caption_invariants;

fn silences(spec: &[(f64, f64)]) -> Vec<SilenceInterval> {
    spec.iter()
        .map(|(s, e)| SilenceInterval { start: *s, end: *e })
        .collect()
}

#[test]
fn calibration_shifts_detected_spans() {
    // Speech spans (0, 3) and (3.5, 6.5) over 10s of audio with two
    // equal-weight units: after the +3s calibration segment one sits near
    // [3, 6] and the final end snaps to the audio duration.
    let units = ScriptParser::default()
        .parse("Speaker 1: One two three four.\nSpeaker 2: Five six seven eight.");
    let aligner = SilenceAligner::new(SilenceConfig::default());
    let segments = aligner.align(&units, &silences(&[(3.0, 3.5), (6.5, 10.0)]), 10.0, None);

    assert_eq!(segments.len(), 2);
    assert!((segments[0].start_time - 3.0).abs() < 1e-9);
    assert!((segments[0].end_time - 6.0).abs() < 1e-9);
    assert_eq!(segments[1].end_time, 10.0);
    assert_caption_invariants(&segments, 10.0);
}

#[test]
fn more_silences_than_units_selects_longest() {
    let units = ScriptParser::default().parse(
        "Speaker 1: First spoken sentence.\nSpeaker 2: Second spoken sentence.",
    );
    let aligner = SilenceAligner::new(SilenceConfig::default());
    // Five silences for two units: only the longest should become the
    // boundary between the two segments.
    let segments = aligner.align(
        &units,
        &silences(&[
            (1.0, 1.3),
            (2.0, 2.25),
            (4.0, 6.0),
            (7.0, 7.3),
            (8.0, 8.3),
        ]),
        12.0,
        None,
    );
    assert_eq!(segments.len(), 2);
    assert_caption_invariants(&segments, 12.0);
}

#[test]
fn fewer_silences_than_units_interpolates() {
    let script: String = (0..6)
        .map(|i| format!("Speaker 1: Spoken sentence number {} here.", i))
        .collect::<Vec<_>>()
        .join("\n");
    let units = ScriptParser::default().parse(&script);
    let aligner = SilenceAligner::new(SilenceConfig::default());
    let segments = aligner.align(&units, &silences(&[(30.0, 30.5)]), 60.0, None);
    assert_eq!(segments.len(), 6);
    assert_caption_invariants(&segments, 60.0);
}

#[test]
fn word_count_drives_time_share() {
    // A 12-word unit against a 3-word unit: the first gets roughly four
    // times the speech timeline.
    let units = ScriptParser::default().parse(
        "Speaker 1: One two three four five six seven eight nine ten eleven twelve.\n\
         Speaker 2: Almost nothing here.",
    );
    let mut config = SilenceConfig::default();
    config.calibration_offset = 0.0;
    let aligner = SilenceAligner::new(config);
    let segments = aligner.align(&units, &silences(&[(14.0, 15.0)]), 20.0, None);

    assert_eq!(segments.len(), 2);
    let first = segments[0].duration();
    let second = segments[1].duration();
    assert!(
        first > 3.0 * second,
        "expected word-weighted split, got {:.2}s vs {:.2}s",
        first,
        second
    );
    assert_caption_invariants(&segments, 20.0);
}

#[test]
fn ffmpeg_diagnostics_parse_into_intervals() {
    let stderr = "\
Input #0, wav, from 'episode.wav':
  Duration: 00:00:10.00, bitrate: 256 kb/s
[silencedetect @ 0x5608] silence_start: 2.87069
[silencedetect @ 0x5608] silence_end: 3.52441 | silence_duration: 0.653719
[silencedetect @ 0x5608] silence_start: 7.1
[silencedetect @ 0x5608] silence_end: 7.9 | silence_duration: 0.8
size=N/A time=00:00:10.00 bitrate=N/A speed= 512x
";
    let intervals = parse_silence_markers(stderr);
    assert_eq!(intervals.len(), 2);
    assert!((intervals[0].start - 2.87069).abs() < 1e-9);
    assert!((intervals[1].end - 7.9).abs() < 1e-9);
}

#[test]
fn single_unit_spans_everything() {
    let units = ScriptParser::default().parse("Speaker 1: Only one sentence.");
    let aligner = SilenceAligner::new(SilenceConfig::default());
    let segments = aligner.align(&units, &silences(&[(4.0, 4.5)]), 9.0, None);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].end_time, 9.0);
    assert_caption_invariants(&segments, 9.0);
}
