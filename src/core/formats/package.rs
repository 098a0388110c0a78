//! Multi-format caption package output.
//!
//! Writes `<output_dir>/<base>.{srt,vtt,json,txt}` plus `<base>_timing.txt`.
//! Each file lands atomically (temp file then rename) so a crashed run never
//! leaves a half-written caption visible under its final name. A failing
//! format is skipped with a warning; the others are still produced.

use crate::config::FormatsConfig;
use crate::core::formats::{
    CaptionFormat, CaptionFormatType, JsonFormat, ScriptTimingFormat, SrtFormat, TranscriptFormat,
    VttFormat,
};
use crate::core::segment::CaptionSegment;
use crate::{Result, error::CapxError};
use log::{info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Writer producing a complete caption package in one call.
pub struct CaptionPackageWriter {
    output_dir: PathBuf,
    config: FormatsConfig,
}

impl CaptionPackageWriter {
    /// Create a writer targeting the given directory.
    pub fn new(output_dir: PathBuf, config: FormatsConfig) -> Self {
        Self { output_dir, config }
    }

    /// Write the requested formats for `base_name`, returning a map from
    /// format name to the written path.
    ///
    /// # Errors
    ///
    /// Only directory creation is fatal; individual format failures are
    /// logged and skipped so the remaining formats still get written.
    pub fn write_package(
        &self,
        segments: &[CaptionSegment],
        base_name: &str,
        formats: &[CaptionFormatType],
    ) -> Result<HashMap<String, PathBuf>> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            CapxError::caption_format(
                "package",
                format!("cannot create {}: {}", self.output_dir.display(), e),
            )
        })?;

        let mut written = HashMap::new();
        for format_type in formats {
            let path = self.output_path(base_name, *format_type);
            match self.render(segments, *format_type) {
                Ok(content) => match write_atomic(&path, &content) {
                    Ok(()) => {
                        info!("{} captions saved to {}", format_type, path.display());
                        written.insert(format_type.as_str().to_string(), path);
                    }
                    Err(e) => {
                        warn!(
                            "Skipping {} output, cannot write {}: {}",
                            format_type,
                            path.display(),
                            e
                        );
                    }
                },
                Err(e) => {
                    warn!("Skipping {} output, render failed: {}", format_type, e);
                }
            }
        }

        Ok(written)
    }

    /// Target path for a format, following the package naming scheme.
    pub fn output_path(&self, base_name: &str, format_type: CaptionFormatType) -> PathBuf {
        let file_name = match format_type {
            CaptionFormatType::Srt => format!("{}.srt", base_name),
            CaptionFormatType::Vtt => format!("{}.vtt", base_name),
            CaptionFormatType::Json => format!("{}.json", base_name),
            CaptionFormatType::Transcript => format!("{}.txt", base_name),
            CaptionFormatType::Timing => format!("{}_timing.txt", base_name),
        };
        self.output_dir.join(file_name)
    }

    fn render(&self, segments: &[CaptionSegment], format_type: CaptionFormatType) -> Result<String> {
        match format_type {
            CaptionFormatType::Srt => SrtFormat.render(segments),
            CaptionFormatType::Vtt => VttFormat.render(segments),
            CaptionFormatType::Json => JsonFormat.render(segments),
            CaptionFormatType::Transcript => TranscriptFormat {
                include_timestamps: self.config.transcript_timestamps,
                include_speakers: self.config.transcript_speakers,
            }
            .render(segments),
            CaptionFormatType::Timing => ScriptTimingFormat.render(segments),
        }
    }
}

/// Write content to `path` via a sibling temp file and rename.
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::script::ScriptParser;

    fn make_segments() -> Vec<CaptionSegment> {
        let units = ScriptParser::default().parse("Speaker 1: Hello there.\nSpeaker 2: Hi back!");
        vec![
            CaptionSegment::from_unit(&units[0], 0.0, 2.5, None),
            CaptionSegment::from_unit(&units[1], 3.0, 6.0, None),
        ]
    }

    #[test]
    fn test_full_package_written() {
        let dir = tempfile::tempdir().unwrap();
        let writer =
            CaptionPackageWriter::new(dir.path().join("captions"), FormatsConfig::default());
        let written = writer
            .write_package(&make_segments(), "episode01", &CaptionFormatType::ALL)
            .unwrap();

        assert_eq!(written.len(), 5);
        assert!(dir.path().join("captions/episode01.srt").exists());
        assert!(dir.path().join("captions/episode01.vtt").exists());
        assert!(dir.path().join("captions/episode01.json").exists());
        assert!(dir.path().join("captions/episode01.txt").exists());
        assert!(dir.path().join("captions/episode01_timing.txt").exists());

        let srt = fs::read_to_string(dir.path().join("captions/episode01.srt")).unwrap();
        assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:02,500\n"));
        // No temp files left behind.
        assert!(!dir.path().join("captions/episode01.tmp").exists());
    }

    #[test]
    fn test_subset_of_formats() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CaptionPackageWriter::new(dir.path().to_path_buf(), FormatsConfig::default());
        let written = writer
            .write_package(
                &make_segments(),
                "clip",
                &[CaptionFormatType::Srt, CaptionFormatType::Json],
            )
            .unwrap();
        assert_eq!(written.len(), 2);
        assert!(!dir.path().join("clip.vtt").exists());
    }

    #[test]
    fn test_unwritable_directory_is_fatal() {
        let writer = CaptionPackageWriter::new(
            PathBuf::from("/proc/definitely/not/writable"),
            FormatsConfig::default(),
        );
        assert!(
            writer
                .write_package(&make_segments(), "x", &CaptionFormatType::ALL)
                .is_err()
        );
    }

    #[test]
    fn test_output_paths() {
        let writer =
            CaptionPackageWriter::new(PathBuf::from("captions"), FormatsConfig::default());
        assert_eq!(
            writer.output_path("ep", CaptionFormatType::Timing),
            PathBuf::from("captions/ep_timing.txt")
        );
        assert_eq!(
            writer.output_path("ep", CaptionFormatType::Transcript),
            PathBuf::from("captions/ep.txt")
        );
    }
}
