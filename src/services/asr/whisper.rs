use super::{TranscribedSegment, Transcriber, Transcription, WordTiming};
use crate::config::AsrConfig;
use crate::{Result, error::CapxError};
use async_trait::async_trait;
use reqwest::{Client, multipart::Form};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio_util::codec::{BytesCodec, FramedRead};

/// HTTP client for an OpenAI-compatible Whisper transcription endpoint.
///
/// Requests `verbose_json` with word-level timestamp granularity. The
/// decoding hints (`beam_size`, `device`, `compute_type`) are forwarded as
/// extra form fields; hosted endpoints ignore them, a local faster-whisper
/// server honours them.
pub struct WhisperApiClient {
    client: Client,
    config: AsrConfig,
}

impl WhisperApiClient {
    /// Create a Whisper API client from transcription settings.
    pub fn new(config: AsrConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds as u64))
            .build()
            .map_err(|e| CapxError::whisper_api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    async fn try_transcribe(&self, audio_path: &Path) -> Result<WhisperResponse> {
        let file = File::open(audio_path)
            .await
            .map_err(|e| CapxError::whisper_api(format!("Failed to open audio file: {}", e)))?;
        let stream = FramedRead::new(file, BytesCodec::new());
        let body = reqwest::Body::wrap_stream(stream);

        let filename = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio.wav".to_string());
        let form = Form::new()
            .text("model", self.config.model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "word")
            .text("timestamp_granularities[]", "segment")
            .text("language", self.config.language.clone())
            .text("beam_size", self.config.beam_size.to_string())
            .text("device", self.config.device.clone())
            .text("compute_type", self.config.compute_type.clone())
            .part(
                "file",
                reqwest::multipart::Part::stream(body)
                    .file_name(filename)
                    .mime_str("audio/wav")?,
            );

        let mut request = self
            .client
            .post(format!("{}/audio/transcriptions", self.config.base_url))
            .multipart(form);
        if !self.config.api_key.is_empty() {
            request = request.header("Authorization", format!("Bearer {}", self.config.api_key));
        }

        let response = request
            .send()
            .await
            .map_err(|e| CapxError::whisper_api(format!("Transcription request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(CapxError::whisper_api(format!(
                "Transcription API error {}: {}",
                status, text
            )));
        }

        let result: WhisperResponse = response.json().await.map_err(|e| {
            CapxError::whisper_api(format!("Failed to parse transcription response: {}", e))
        })?;
        Ok(result)
    }
}

#[async_trait]
impl Transcriber for WhisperApiClient {
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcription> {
        let mut retries = 0;

        let response = loop {
            match self.try_transcribe(audio_path).await {
                Ok(resp) => break resp,
                Err(e) => {
                    if retries < self.config.max_retries {
                        tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
                        retries += 1;
                        continue;
                    }
                    return Err(e);
                }
            }
        };

        Ok(response.into_transcription())
    }
}

/// Wire format of the verbose transcription response.
#[derive(Debug, Deserialize)]
struct WhisperResponse {
    #[serde(default)]
    #[allow(dead_code)]
    text: String,
    #[serde(default)]
    segments: Vec<WhisperSegment>,
    #[serde(default)]
    words: Option<Vec<WhisperWord>>,
}

#[derive(Debug, Deserialize)]
struct WhisperSegment {
    start: f64,
    end: f64,
    text: String,
    #[serde(default)]
    words: Option<Vec<WhisperWord>>,
}

#[derive(Debug, Deserialize)]
struct WhisperWord {
    word: String,
    start: f64,
    end: f64,
}

impl WhisperResponse {
    /// Normalise the two places word timings can appear (nested under
    /// segments, or as a flat top-level list) into one model.
    fn into_transcription(self) -> Transcription {
        let has_nested_words = self
            .segments
            .iter()
            .any(|s| s.words.as_ref().is_some_and(|w| !w.is_empty()));

        if has_nested_words {
            let segments = self
                .segments
                .into_iter()
                .map(|s| TranscribedSegment {
                    start: s.start,
                    end: s.end,
                    text: s.text.trim().to_string(),
                    words: s
                        .words
                        .unwrap_or_default()
                        .into_iter()
                        .map(WhisperWord::into_word_timing)
                        .collect(),
                })
                .collect();
            return Transcription { segments };
        }

        // Flat word list: synthesize a single segment spanning all words.
        let words: Vec<WordTiming> = self
            .words
            .unwrap_or_default()
            .into_iter()
            .map(WhisperWord::into_word_timing)
            .collect();
        if words.is_empty() {
            return Transcription::default();
        }
        let start = words.first().map(|w| w.start).unwrap_or(0.0);
        let end = words.last().map(|w| w.end).unwrap_or(0.0);
        Transcription {
            segments: vec![TranscribedSegment {
                start,
                end,
                text: words
                    .iter()
                    .map(|w| w.word.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
                words,
            }],
        }
    }
}

impl WhisperWord {
    fn into_word_timing(self) -> WordTiming {
        WordTiming {
            word: self.word.trim().to_string(),
            start: self.start,
            end: self.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_whisper_client_creation() {
        let client = WhisperApiClient::new(AsrConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_nested_word_response_conversion() {
        let response = WhisperResponse {
            text: "hello world".to_string(),
            segments: vec![WhisperSegment {
                start: 0.0,
                end: 1.0,
                text: " hello world ".to_string(),
                words: Some(vec![
                    WhisperWord {
                        word: " hello".to_string(),
                        start: 0.0,
                        end: 0.5,
                    },
                    WhisperWord {
                        word: "world ".to_string(),
                        start: 0.5,
                        end: 1.0,
                    },
                ]),
            }],
            words: None,
        };

        let transcription = response.into_transcription();
        assert_eq!(transcription.segments.len(), 1);
        let words = transcription.word_timings();
        assert_eq!(words[0].word, "hello");
        assert_eq!(words[1].word, "world");
    }

    #[test]
    fn test_flat_word_response_conversion() {
        let response = WhisperResponse {
            text: "one two".to_string(),
            segments: vec![],
            words: Some(vec![
                WhisperWord {
                    word: "one".to_string(),
                    start: 0.1,
                    end: 0.4,
                },
                WhisperWord {
                    word: "two".to_string(),
                    start: 0.5,
                    end: 0.9,
                },
            ]),
        };

        let transcription = response.into_transcription();
        assert_eq!(transcription.segments.len(), 1);
        assert_eq!(transcription.segments[0].start, 0.1);
        assert_eq!(transcription.segments[0].end, 0.9);
        assert_eq!(transcription.word_timings().len(), 2);
    }

    #[test]
    fn test_empty_response_conversion() {
        let response = WhisperResponse {
            text: String::new(),
            segments: vec![],
            words: None,
        };
        assert!(response.into_transcription().word_timings().is_empty());
    }
}
