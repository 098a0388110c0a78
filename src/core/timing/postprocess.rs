//! Optional post-processing for callers that prefer short cues over
//! sentence integrity.

use crate::core::segment::CaptionSegment;

/// Split any segment longer than `max_duration` into equal-time sub-cues.
///
/// A long segment becomes `ceil(duration / max_duration)` pieces (capped at
/// its word count), its words divided as evenly as possible and its time
/// distributed uniformly. Sentence boundaries are not preserved.
pub fn split_long_segments(
    segments: Vec<CaptionSegment>,
    max_duration: f64,
) -> Vec<CaptionSegment> {
    let mut out = Vec::with_capacity(segments.len());

    for segment in segments {
        let duration = segment.duration();
        if duration <= max_duration || max_duration <= 0.0 {
            out.push(segment);
            continue;
        }

        let words: Vec<&str> = segment.text.split_whitespace().collect();
        let pieces = ((duration / max_duration).ceil() as usize)
            .max(1)
            .min(words.len().max(1));
        if pieces == 1 {
            out.push(segment);
            continue;
        }

        let piece_duration = duration / pieces as f64;
        let base = words.len() / pieces;
        let extra = words.len() % pieces;
        let mut taken = 0usize;

        for i in 0..pieces {
            let take = base + usize::from(i < extra);
            let text = words[taken..taken + take].join(" ");
            taken += take;

            let start = segment.start_time + i as f64 * piece_duration;
            let end = if i == pieces - 1 {
                segment.end_time
            } else {
                start + piece_duration
            };
            let char_count = text.chars().count();
            out.push(CaptionSegment {
                start_time: start,
                end_time: end,
                text,
                speaker_id: segment.speaker_id,
                speaker_name: segment.speaker_name.clone(),
                confidence: segment.confidence,
                word_count: take,
                char_count,
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::script::ScriptParser;
    use crate::core::segment::CaptionSegment;

    fn segment(text: &str, start: f64, end: f64) -> CaptionSegment {
        let units = ScriptParser::new(1000).parse(&format!("Speaker 1: {}", text));
        CaptionSegment::from_unit(&units[0], start, end, None)
    }

    #[test]
    fn test_short_segments_pass_through() {
        let input = vec![segment("Quick line.", 0.0, 4.0)];
        let output = split_long_segments(input.clone(), 8.0);
        assert_eq!(output, input);
    }

    #[test]
    fn test_long_segment_splits_by_ceiling() {
        // 20s at 8s max: ceil(20/8) = 3 pieces.
        let input = vec![segment(
            "one two three four five six seven eight nine ten eleven twelve",
            0.0,
            20.0,
        )];
        let output = split_long_segments(input, 8.0);
        assert_eq!(output.len(), 3);
        assert_eq!(output[0].word_count, 4);
        assert_eq!(output[1].word_count, 4);
        assert_eq!(output[2].word_count, 4);
        assert!((output[0].duration() - 20.0 / 3.0).abs() < 1e-9);
        assert_eq!(output[0].start_time, 0.0);
        assert_eq!(output[2].end_time, 20.0);
        for pair in output.windows(2) {
            assert!((pair[0].end_time - pair[1].start_time).abs() < 1e-9);
        }
    }

    #[test]
    fn test_uneven_word_division() {
        let input = vec![segment("a b c d e f g", 0.0, 17.0)];
        let output = split_long_segments(input, 8.0);
        // ceil(17/8) = 3 pieces over 7 words: 3 + 2 + 2.
        assert_eq!(output.len(), 3);
        assert_eq!(output[0].word_count, 3);
        assert_eq!(output[1].word_count, 2);
        assert_eq!(output[2].word_count, 2);
        let rebuilt: Vec<String> = output.iter().map(|s| s.text.clone()).collect();
        assert_eq!(rebuilt.join(" "), "a b c d e f g");
    }

    #[test]
    fn test_pieces_capped_by_word_count() {
        let input = vec![segment("lonely", 0.0, 30.0)];
        let output = split_long_segments(input, 8.0);
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].text, "lonely");
    }

    #[test]
    fn test_speaker_metadata_survives_split() {
        let input = vec![segment("one two three four", 2.0, 22.0)];
        let output = split_long_segments(input, 10.0);
        assert_eq!(output.len(), 2);
        for piece in &output {
            assert_eq!(piece.speaker_id, 1);
            assert_eq!(piece.speaker_name, "Speaker 1");
            assert_eq!(piece.confidence, 1.0);
        }
    }
}
