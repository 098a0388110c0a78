use crate::Result;
use crate::core::formats::CaptionFormat;
use crate::core::segment::CaptionSegment;

/// Human-readable script-with-timing report: the original script lines
/// annotated with their assigned time spans, one
/// `[<start>s - <end>s] Speaker: text` line per segment.
pub struct ScriptTimingFormat;

impl CaptionFormat for ScriptTimingFormat {
    fn render(&self, segments: &[CaptionSegment]) -> Result<String> {
        let mut lines = Vec::with_capacity(segments.len());

        for segment in segments {
            let label = if segment.speaker_name.is_empty() {
                String::new()
            } else {
                format!("{}: ", segment.speaker_name)
            };
            lines.push(format!(
                "[{:.2}s - {:.2}s] {}{}",
                segment.start_time,
                segment.end_time,
                label,
                segment.text.trim()
            ));
        }

        Ok(lines.join("\n"))
    }

    fn format_name(&self) -> &'static str {
        "Script timing"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::script::ScriptParser;

    #[test]
    fn test_script_timing_lines() {
        let units = ScriptParser::default().parse("Speaker 1: Hello there.\nSpeaker 2: Hi back!");
        let segments = vec![
            CaptionSegment::from_unit(&units[0], 0.0, 2.5, None),
            CaptionSegment::from_unit(&units[1], 3.0, 6.0, None),
        ];
        let output = ScriptTimingFormat.render(&segments).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "[0.00s - 2.50s] Speaker 1: Hello there.");
        assert_eq!(lines[1], "[3.00s - 6.00s] Speaker 2: Hi back!");
    }

    #[test]
    fn test_script_timing_without_speaker() {
        let units = ScriptParser::default().parse("Speaker 1: Quiet line.");
        let mut segment = CaptionSegment::from_unit(&units[0], 1.0, 2.0, None);
        segment.speaker_name = String::new();
        let output = ScriptTimingFormat.render(&[segment]).unwrap();
        assert_eq!(output, "[1.00s - 2.00s] Quiet line.");
    }
}
