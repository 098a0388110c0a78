//! Caption generation command.
//!
//! Orchestration for one request: read the script, resolve the audio
//! duration, run the timing cascade, and write the caption package.

use crate::cli::{GenerateArgs, print_success, print_warning};
use crate::config::ConfigService;
use crate::core::formats::{CaptionFormatType, CaptionPackageWriter};
use crate::core::script::ScriptParser;
use crate::core::segment::SpeakerMap;
use crate::core::timing::{TimingEngine, split_long_segments};
use crate::services::asr::WhisperApiClient;
use crate::services::audio::probe_duration;
use crate::{Result, error::CapxError};
use log::{debug, info};
use std::sync::Arc;

/// Execute the generate command.
pub async fn execute(args: GenerateArgs, config_service: &dyn ConfigService) -> Result<()> {
    let mut config = config_service.get_config()?;
    if args.no_asr {
        config.asr.enabled = false;
    }
    if args.no_silence {
        // An unresolvable tool name makes the silence strategy report
        // not-available without special-casing the cascade.
        config.silence.tool = String::new();
    }

    let script = tokio::fs::read_to_string(&args.script)
        .await
        .map_err(|e| CapxError::script(format!("cannot read {}: {}", args.script.display(), e)))?;

    let parser = ScriptParser::new(config.script.max_words);
    let units = parser.parse(&script);
    if units.is_empty() {
        print_warning("Script contains no caption units; nothing to do");
        return Ok(());
    }
    debug!("Parsed {} caption units", units.len());

    let audio_duration = resolve_duration(&args)?;
    let speakers = args
        .parse_speakers()
        .map_err(CapxError::CommandExecution)?;
    let speakers = if speakers.is_empty() {
        None
    } else {
        Some(speakers)
    };

    let segments = align(&args, &config, &units, audio_duration, speakers.as_ref()).await;
    let segments = match args.max_cue_duration {
        Some(max_duration) => split_long_segments(segments, max_duration),
        None => segments,
    };
    info!(
        "Generated {} caption segments over {:.2}s",
        segments.len(),
        audio_duration
    );

    let formats = match args.parse_formats().map_err(CapxError::CommandExecution)? {
        Some(formats) => formats,
        None => config
            .formats
            .default_formats
            .iter()
            .filter_map(|name| CaptionFormatType::parse(name))
            .collect(),
    };

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.formats.output_dir.clone());
    let base_name = resolve_base_name(&args);
    let writer = CaptionPackageWriter::new(output_dir, config.formats.clone());
    let written = writer.write_package(&segments, &base_name, &formats)?;

    if written.is_empty() {
        print_warning("No caption files could be written");
    } else {
        let mut names: Vec<&str> = written.keys().map(String::as_str).collect();
        names.sort_unstable();
        print_success(&format!(
            "Wrote {} caption file(s) for {} segment(s): {}",
            written.len(),
            segments.len(),
            names.join(", ")
        ));
    }
    Ok(())
}

async fn align(
    args: &GenerateArgs,
    config: &crate::config::Config,
    units: &[crate::core::script::CaptionUnit],
    audio_duration: f64,
    speakers: Option<&SpeakerMap>,
) -> Vec<crate::core::segment::CaptionSegment> {
    let engine = if config.asr.enabled && args.audio.is_some() {
        match WhisperApiClient::new(config.asr.clone()) {
            Ok(client) => TimingEngine::with_transcriber(config.clone(), Arc::new(client)),
            Err(e) => {
                log::warn!("Transcription client unavailable: {}", e);
                TimingEngine::new(config.clone())
            }
        }
    } else {
        TimingEngine::new(config.clone())
    };

    engine
        .align(
            units,
            audio_duration,
            args.audio.as_deref(),
            speakers,
        )
        .await
}

fn resolve_duration(args: &GenerateArgs) -> Result<f64> {
    if let Some(duration) = args.duration {
        return Ok(duration);
    }
    let audio = args
        .audio
        .as_ref()
        .ok_or_else(|| CapxError::CommandExecution("no duration and no audio file".into()))?;
    if !audio.exists() {
        return Err(CapxError::FileNotFound(audio.display().to_string()));
    }
    let duration = probe_duration(audio)?;
    if duration <= 0.0 {
        return Err(CapxError::audio_processing(format!(
            "{} reports a zero-length stream",
            audio.display()
        )));
    }
    Ok(duration)
}

fn resolve_base_name(args: &GenerateArgs) -> String {
    if let Some(base) = &args.base_name {
        return base.clone();
    }
    let stem = args
        .audio
        .as_ref()
        .unwrap_or(&args.script)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string());
    stem.unwrap_or_else(|| "captions".to_string())
}
