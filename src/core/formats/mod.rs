//! Caption output formats.
//!
//! Each format is a pure serialiser from a segment list to text; writing
//! files is the package writer's job. Timestamp layout is contractual for
//! downstream players: SRT uses `HH:MM:SS,mmm`, WebVTT `HH:MM:SS.mmm`,
//! both with a single-spaced `-->` separator.

pub mod json;
pub mod package;
pub mod script_timing;
pub mod srt;
pub mod transcript;
pub mod vtt;

pub use json::JsonFormat;
pub use package::CaptionPackageWriter;
pub use script_timing::ScriptTimingFormat;
pub use srt::SrtFormat;
pub use transcript::TranscriptFormat;
pub use vtt::VttFormat;

use crate::core::segment::CaptionSegment;

/// Trait for caption serialisers.
///
/// Implementations are read-only over the segments and must be
/// deterministic: the same segments always render to the same bytes.
pub trait CaptionFormat {
    /// Serialise the segments into the format's text representation.
    fn render(&self, segments: &[CaptionSegment]) -> crate::Result<String>;

    /// Human-readable name of this format.
    fn format_name(&self) -> &'static str;

    /// File extension without the leading dot.
    fn file_extension(&self) -> &'static str;
}

/// Identifier for the supported caption formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionFormatType {
    /// SubRip (.srt).
    Srt,
    /// WebVTT (.vtt).
    Vtt,
    /// Machine-readable JSON (.json).
    Json,
    /// Plain transcript (.txt).
    Transcript,
    /// Script-with-timing report (_timing.txt).
    Timing,
}

impl CaptionFormatType {
    /// All formats in package-writing order.
    pub const ALL: [CaptionFormatType; 5] = [
        CaptionFormatType::Srt,
        CaptionFormatType::Vtt,
        CaptionFormatType::Json,
        CaptionFormatType::Transcript,
        CaptionFormatType::Timing,
    ];

    /// Parse a format name as used in configuration and on the CLI.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "srt" => Some(Self::Srt),
            "vtt" => Some(Self::Vtt),
            "json" => Some(Self::Json),
            "transcript" | "txt" => Some(Self::Transcript),
            "timing" | "script_timing" => Some(Self::Timing),
            _ => None,
        }
    }

    /// The configuration/CLI name of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
            Self::Json => "json",
            Self::Transcript => "transcript",
            Self::Timing => "timing",
        }
    }
}

impl std::fmt::Display for CaptionFormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Format seconds as an SRT timestamp: `HH:MM:SS,mmm`.
///
/// Milliseconds are truncated, not rounded, so a timestamp never spills
/// into the next second.
pub fn format_srt_time(seconds: f64) -> String {
    let total = seconds.max(0.0);
    let hours = (total / 3600.0) as u64;
    let minutes = ((total % 3600.0) / 60.0) as u64;
    let secs = (total % 60.0) as u64;
    let millis = ((total % 1.0) * 1000.0) as u64;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Format seconds as a WebVTT timestamp: `HH:MM:SS.mmm`.
pub fn format_vtt_time(seconds: f64) -> String {
    let total = seconds.max(0.0);
    let hours = (total / 3600.0) as u64;
    let minutes = ((total % 3600.0) / 60.0) as u64;
    let secs = total % 60.0;
    format!("{:02}:{:02}:{:06.3}", hours, minutes, secs)
}

/// Format seconds as a readable `MM:SS` clock time.
pub fn format_clock_time(seconds: f64) -> String {
    let total = seconds.max(0.0);
    let minutes = (total / 60.0) as u64;
    let secs = (total % 60.0) as u64;
    format!("{:02}:{:02}", minutes, secs)
}
