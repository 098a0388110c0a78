// src/cli/generate_args.rs
use crate::core::formats::CaptionFormatType;
use crate::core::segment::SpeakerMap;
use clap::Args;
use std::path::PathBuf;

/// Caption generation parameters.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Dialogue script file ("Speaker N: text" lines)
    #[arg(long, short = 's')]
    pub script: PathBuf,

    /// Audio file to align captions against
    #[arg(long, short = 'a')]
    pub audio: Option<PathBuf>,

    /// Audio duration in seconds (probed from the audio file if omitted)
    #[arg(long, short = 'd')]
    pub duration: Option<f64>,

    /// Output directory for the caption package
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// Base file name for caption files (defaults to the audio or script
    /// file stem)
    #[arg(long)]
    pub base_name: Option<String>,

    /// Comma-separated formats to write (srt,vtt,json,transcript,timing)
    #[arg(long)]
    pub formats: Option<String>,

    /// Speaker display name, repeatable ("1=Alice")
    #[arg(long = "speaker", value_name = "ID=NAME")]
    pub speakers: Vec<String>,

    /// Split cues longer than this many seconds
    #[arg(long)]
    pub max_cue_duration: Option<f64>,

    /// Skip word-level transcription alignment
    #[arg(long)]
    pub no_asr: bool,

    /// Skip silence-detection alignment
    #[arg(long)]
    pub no_silence: bool,
}

impl GenerateArgs {
    /// Validate argument combinations before execution.
    pub fn validate(&self) -> Result<(), String> {
        if self.duration.is_none() && self.audio.is_none() {
            return Err(
                "either --duration or --audio is required to know the caption time range"
                    .to_string(),
            );
        }
        if let Some(duration) = self.duration {
            if !duration.is_finite() || duration <= 0.0 {
                return Err(format!("--duration must be positive, got {}", duration));
            }
        }
        if let Some(max_cue) = self.max_cue_duration {
            if !max_cue.is_finite() || max_cue <= 0.0 {
                return Err(format!(
                    "--max-cue-duration must be positive, got {}",
                    max_cue
                ));
            }
        }
        self.parse_speakers().map(|_| ())?;
        self.parse_formats().map(|_| ())
    }

    /// Parse the repeatable `--speaker id=name` values into a speaker map.
    pub fn parse_speakers(&self) -> Result<SpeakerMap, String> {
        let mut speakers = SpeakerMap::new();
        for entry in &self.speakers {
            let (id, name) = entry
                .split_once('=')
                .ok_or_else(|| format!("invalid --speaker '{}', expected ID=NAME", entry))?;
            let id: u32 = id
                .trim()
                .parse()
                .map_err(|_| format!("invalid speaker id in '{}'", entry))?;
            speakers.insert(id, name.trim().to_string());
        }
        Ok(speakers)
    }

    /// Parse the `--formats` list; `None` means use the configured default.
    pub fn parse_formats(&self) -> Result<Option<Vec<CaptionFormatType>>, String> {
        let Some(list) = &self.formats else {
            return Ok(None);
        };
        let mut formats = Vec::new();
        for name in list.split(',') {
            let format = CaptionFormatType::parse(name)
                .ok_or_else(|| format!("unknown caption format '{}'", name.trim()))?;
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        if formats.is_empty() {
            return Err("--formats must name at least one format".to_string());
        }
        Ok(Some(formats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> GenerateArgs {
        GenerateArgs {
            script: PathBuf::from("script.txt"),
            audio: None,
            duration: Some(10.0),
            output_dir: None,
            base_name: None,
            formats: None,
            speakers: vec![],
            max_cue_duration: None,
            no_asr: false,
            no_silence: false,
        }
    }

    #[test]
    fn test_requires_duration_or_audio() {
        let mut args = base_args();
        args.duration = None;
        assert!(args.validate().is_err());
        args.audio = Some(PathBuf::from("audio.wav"));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        let mut args = base_args();
        args.duration = Some(0.0);
        assert!(args.validate().is_err());
        args.duration = Some(-3.0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_speaker_parsing() {
        let mut args = base_args();
        args.speakers = vec!["1=Alice".to_string(), "2 = Bob".to_string()];
        let speakers = args.parse_speakers().unwrap();
        assert_eq!(speakers.get(&1).unwrap(), "Alice");
        assert_eq!(speakers.get(&2).unwrap(), "Bob");
    }

    #[test]
    fn test_invalid_speaker_entry() {
        let mut args = base_args();
        args.speakers = vec!["Alice".to_string()];
        assert!(args.parse_speakers().is_err());
        args.speakers = vec!["x=Alice".to_string()];
        assert!(args.parse_speakers().is_err());
    }

    #[test]
    fn test_format_list_parsing() {
        let mut args = base_args();
        args.formats = Some("srt,json".to_string());
        let formats = args.parse_formats().unwrap().unwrap();
        assert_eq!(formats, vec![CaptionFormatType::Srt, CaptionFormatType::Json]);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let mut args = base_args();
        args.formats = Some("srt,ass".to_string());
        assert!(args.parse_formats().is_err());
    }

    #[test]
    fn test_default_formats_when_unspecified() {
        let args = base_args();
        assert!(args.parse_formats().unwrap().is_none());
    }
}
