//! End-to-end pipeline tests: script in, timed segments out.

mod common;

use capx_cli::config::Config;
use capx_cli::core::script::ScriptParser;
use capx_cli::core::timing::TimingEngine;
use common::assert_caption_invariants;

#[tokio::test]
async fn heuristic_two_speakers_known_duration() {
    let engine = TimingEngine::new(Config::default());
    let units = ScriptParser::default().parse("Speaker 1: Hello there.\nSpeaker 2: Hi back!");
    let segments = engine.align(&units, 6.0, None, None).await;

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].speaker_id, 1);
    assert_eq!(segments[0].text, "Hello there.");
    assert_eq!(segments[1].speaker_id, 2);
    assert_eq!(segments[1].text, "Hi back!");
    assert_eq!(segments[1].end_time, 6.0);
    assert!(segments[0].end_time <= segments[1].start_time);
    assert_caption_invariants(&segments, 6.0);
}

#[tokio::test]
async fn sentence_packing_respects_word_budget() {
    let units = ScriptParser::default().parse(
        "Speaker 1: One two three four five six seven eight nine ten. \
         Eleven twelve thirteen fourteen fifteen sixteen.",
    );
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].word_count, 10);
    assert_eq!(units[1].word_count, 6);
    assert_eq!(
        units[0].text,
        "One two three four five six seven eight nine ten."
    );
    assert_eq!(units[1].text, "Eleven twelve thirteen fourteen fifteen sixteen.");
}

#[tokio::test]
async fn continuation_lines_inherit_speaker() {
    let units = ScriptParser::default().parse("Speaker 2: First line.\nA bare continuation.");
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].speaker_id, 2);
    assert_eq!(units[1].speaker_id, 2);
    assert_eq!(units[0].text, "First line.");
    assert_eq!(units[1].text, "A bare continuation.");
}

#[tokio::test]
async fn bare_script_defaults_to_speaker_one() {
    let engine = TimingEngine::new(Config::default());
    let units = ScriptParser::default().parse("Just some narration.\nMore narration here.");
    assert!(units.iter().all(|u| u.speaker_id == 1));

    let segments = engine.align(&units, 8.0, None, None).await;
    assert_caption_invariants(&segments, 8.0);
}

#[tokio::test]
async fn late_speaker_then_continuations() {
    let units =
        ScriptParser::default().parse("Speaker 3: Intro line.\nSecond thought.\nThird thought.");
    assert_eq!(units.len(), 3);
    assert!(units.iter().all(|u| u.speaker_id == 3));
}

#[tokio::test]
async fn single_unit_spans_full_duration() {
    let engine = TimingEngine::new(Config::default());
    let units = ScriptParser::default().parse("Speaker 1: A single caption.");
    let segments = engine.align(&units, 42.0, None, None).await;
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].start_time, 0.0);
    assert_eq!(segments[0].end_time, 42.0);
}

#[tokio::test]
async fn empty_script_yields_empty_output() {
    let engine = TimingEngine::new(Config::default());
    let units = ScriptParser::default().parse("");
    let segments = engine.align(&units, 10.0, None, None).await;
    assert!(segments.is_empty());
}

#[tokio::test]
async fn segment_count_matches_unit_count_at_scale() {
    let script: String = (0..40)
        .map(|i| {
            format!(
                "Speaker {}: This is spoken line number {} of the long script.",
                i % 3 + 1,
                i
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let units = ScriptParser::default().parse(&script);
    let engine = TimingEngine::new(Config::default());
    let segments = engine.align(&units, 600.0, None, None).await;
    assert_eq!(segments.len(), units.len());
    assert_caption_invariants(&segments, 600.0);
}

#[tokio::test]
async fn round_trip_preserves_sentence_content() {
    let script = "Speaker 1: Good evening. Welcome to the show!\nSpeaker 2: Thanks for having me.";
    let units = ScriptParser::default().parse(script);
    let rebuilt = units
        .iter()
        .map(|u| u.text.clone())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(
        rebuilt,
        "Good evening. Welcome to the show! Thanks for having me."
    );
}
