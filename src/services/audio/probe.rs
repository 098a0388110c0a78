//! Audio duration probing via Symphonia.
//!
//! Used by the CLI when the caller supplies an audio file without an
//! explicit duration. Only container metadata is read; no packets are
//! decoded.

use crate::{Result, error::CapxError};
use log::debug;
use std::fs::File;
use std::path::Path;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::probe::Hint;
use symphonia::default::get_probe;

/// Read the duration of an audio file in seconds.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, the container format is
/// not recognised, or no audio track carries enough metadata to compute a
/// duration.
pub fn probe_duration(audio_path: &Path) -> Result<f64> {
    let file = File::open(audio_path)
        .map_err(|e| CapxError::audio_processing(format!("Failed to open audio file: {}", e)))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = audio_path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = get_probe()
        .format(&hint, mss, &FormatOptions::default(), &Default::default())
        .map_err(|e| CapxError::audio_processing(format!("Failed to probe format: {}", e)))?;

    let format = probed.format;
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.sample_rate.is_some())
        .ok_or_else(|| CapxError::audio_processing("No audio track found"))?;

    let params = &track.codec_params;
    let duration = match (params.n_frames, params.time_base, params.sample_rate) {
        (Some(frames), Some(tb), _) => {
            let time = tb.calc_time(frames);
            time.seconds as f64 + time.frac
        }
        (Some(frames), None, Some(rate)) => frames as f64 / rate as f64,
        _ => {
            return Err(CapxError::audio_processing(
                "Audio track does not report its length",
            ));
        }
    };

    debug!("Probed duration of {:?}: {:.3}s", audio_path, duration);
    Ok(duration)
}
