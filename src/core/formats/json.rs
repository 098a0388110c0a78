use crate::Result;
use crate::core::formats::CaptionFormat;
use crate::core::segment::CaptionSegment;
use serde::Serialize;

/// Machine-readable JSON caption serialiser.
///
/// The envelope (`format`, `version`, segment field order) is a wire
/// contract with downstream consumers; non-ASCII text is preserved
/// verbatim and the output is indented with two spaces.
pub struct JsonFormat;

#[derive(Serialize)]
struct CaptionDocument<'a> {
    format: &'static str,
    version: &'static str,
    segments: &'a [CaptionSegment],
    total_segments: usize,
    total_duration: f64,
}

impl CaptionFormat for JsonFormat {
    fn render(&self, segments: &[CaptionSegment]) -> Result<String> {
        let total_duration = segments
            .iter()
            .map(|s| s.end_time)
            .fold(0.0_f64, f64::max);
        let document = CaptionDocument {
            format: "vibevoice_captions",
            version: "1.0",
            segments,
            total_segments: segments.len(),
            total_duration,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    fn format_name(&self) -> &'static str {
        "JSON"
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }
}
