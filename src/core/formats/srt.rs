use crate::Result;
use crate::core::formats::{CaptionFormat, format_srt_time};
use crate::core::segment::CaptionSegment;

/// SubRip (.srt) caption serialiser.
///
/// Entries are 1-indexed; the speaker name is prefixed as `[Name]` and
/// omitted when empty.
pub struct SrtFormat;

impl CaptionFormat for SrtFormat {
    fn render(&self, segments: &[CaptionSegment]) -> Result<String> {
        let mut output = String::new();

        for (i, segment) in segments.iter().enumerate() {
            let text = segment.text.trim();
            let display = if segment.speaker_name.is_empty() {
                text.to_string()
            } else {
                format!("[{}] {}", segment.speaker_name, text)
            };
            output.push_str(&format!("{}\n", i + 1));
            output.push_str(&format!(
                "{} --> {}\n",
                format_srt_time(segment.start_time),
                format_srt_time(segment.end_time)
            ));
            output.push_str(&display);
            output.push_str("\n\n");
        }

        Ok(output)
    }

    fn format_name(&self) -> &'static str {
        "SRT"
    }

    fn file_extension(&self) -> &'static str {
        "srt"
    }
}
