use crate::Result;
use crate::core::formats::{CaptionFormat, format_clock_time};
use crate::core::segment::CaptionSegment;

/// Plain-text transcript serialiser: one `[MM:SS] Speaker: text` line per
/// segment, with timestamps and speaker labels independently toggleable.
pub struct TranscriptFormat {
    /// Include `[MM:SS]` timestamps.
    pub include_timestamps: bool,
    /// Include speaker labels.
    pub include_speakers: bool,
}

impl Default for TranscriptFormat {
    fn default() -> Self {
        Self {
            include_timestamps: true,
            include_speakers: true,
        }
    }
}

impl CaptionFormat for TranscriptFormat {
    fn render(&self, segments: &[CaptionSegment]) -> Result<String> {
        let mut lines = Vec::with_capacity(segments.len());

        for segment in segments {
            let text = segment.text.trim();
            if text.is_empty() {
                continue;
            }
            let mut parts: Vec<String> = Vec::new();
            if self.include_timestamps {
                parts.push(format!("[{}]", format_clock_time(segment.start_time)));
            }
            if self.include_speakers && !segment.speaker_name.is_empty() {
                parts.push(format!("{}:", segment.speaker_name));
            }
            parts.push(text.to_string());
            lines.push(parts.join(" "));
        }

        Ok(lines.join("\n"))
    }

    fn format_name(&self) -> &'static str {
        "Transcript"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::script::ScriptParser;

    fn make_segments() -> Vec<CaptionSegment> {
        let units =
            ScriptParser::default().parse("Speaker 1: Welcome back.\nSpeaker 2: Glad to be here.");
        vec![
            CaptionSegment::from_unit(&units[0], 0.0, 3.0, None),
            CaptionSegment::from_unit(&units[1], 65.0, 70.0, None),
        ]
    }

    #[test]
    fn test_transcript_full_lines() {
        let output = TranscriptFormat::default().render(&make_segments()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "[00:00] Speaker 1: Welcome back.");
        assert_eq!(lines[1], "[01:05] Speaker 2: Glad to be here.");
    }

    #[test]
    fn test_transcript_without_timestamps() {
        let format = TranscriptFormat {
            include_timestamps: false,
            include_speakers: true,
        };
        let output = format.render(&make_segments()).unwrap();
        assert!(output.starts_with("Speaker 1: Welcome back."));
    }

    #[test]
    fn test_transcript_without_speakers() {
        let format = TranscriptFormat {
            include_timestamps: true,
            include_speakers: false,
        };
        let output = format.render(&make_segments()).unwrap();
        assert_eq!(output.lines().next().unwrap(), "[00:00] Welcome back.");
    }

    #[test]
    fn test_transcript_bare_text() {
        let format = TranscriptFormat {
            include_timestamps: false,
            include_speakers: false,
        };
        let output = format.render(&make_segments()).unwrap();
        assert_eq!(output, "Welcome back.\nGlad to be here.");
    }
}
