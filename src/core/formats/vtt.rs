use crate::Result;
use crate::core::formats::{CaptionFormat, format_vtt_time};
use crate::core::segment::CaptionSegment;

/// WebVTT (.vtt) caption serialiser.
///
/// Speakers are carried in `<v Name>` voice tags, omitted when the name is
/// empty.
pub struct VttFormat;

impl CaptionFormat for VttFormat {
    fn render(&self, segments: &[CaptionSegment]) -> Result<String> {
        let mut output = String::from("WEBVTT\n\n");

        for segment in segments {
            let text = segment.text.trim();
            let display = if segment.speaker_name.is_empty() {
                text.to_string()
            } else {
                format!("<v {}>{}", segment.speaker_name, text)
            };
            output.push_str(&format!(
                "{} --> {}\n",
                format_vtt_time(segment.start_time),
                format_vtt_time(segment.end_time)
            ));
            output.push_str(&display);
            output.push_str("\n\n");
        }

        Ok(output)
    }

    fn format_name(&self) -> &'static str {
        "WebVTT"
    }

    fn file_extension(&self) -> &'static str {
        "vtt"
    }
}
