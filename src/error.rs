//! Error types for the CapX caption timing engine.
//!
//! This module defines the `CapxError` enum covering all error conditions
//! that can occur during script parsing, timing alignment, transcription
//! service access, audio probing, and caption file output.
//!
//! It also provides helper methods to construct errors and generate
//! user-friendly messages.
use thiserror::Error;

/// Represents all possible errors in the CapX application.
///
/// Each variant provides specific context to facilitate debugging and
/// user-friendly reporting.
///
/// # Examples
///
/// ```rust
/// use capx_cli::error::{CapxError, CapxResult};
///
/// fn example() -> CapxResult<()> {
///     Err(CapxError::CaptionFormat {
///         format: "SRT".to_string(),
///         message: "invalid timestamp".to_string(),
///     })
/// }
/// ```
///
/// # Exit Codes
///
/// Each error variant maps to an exit code via `CapxError::exit_code`.
#[derive(Error, Debug)]
pub enum CapxError {
    /// I/O operation failed during file system access.
    ///
    /// This variant wraps `std::io::Error` and provides context about
    /// file operations that failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error due to invalid or missing settings.
    ///
    /// Contains a human-readable message describing the issue.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },

    /// Caption format error indicating invalid timing or structure.
    ///
    /// Provides the caption format and detailed message.
    #[error("Caption format error [{format}]: {message}")]
    CaptionFormat {
        /// The caption format that caused the error (e.g., "SRT", "VTT")
        format: String,
        /// Detailed error message describing the issue
        message: String,
    },

    /// Transcription API request error with specified source.
    #[error("API error [{source:?}]: {message}")]
    Api {
        /// Error message from the API
        message: String,
        /// Source of the API error
        source: ApiErrorSource,
    },

    /// Audio processing error during probing or silence analysis.
    #[error("Audio processing error: {message}")]
    AudioProcessing {
        /// Description of the audio processing error
        message: String,
    },

    /// Script input error (unreadable file, invalid arguments).
    #[error("Script error: {message}")]
    Script {
        /// Description of the script error
        message: String,
    },

    /// Indicates that the specified file was not found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Generic command execution error.
    #[error("{0}")]
    CommandExecution(String),

    /// Catch-all error variant wrapping any other failure.
    #[error("Unknown error: {0}")]
    Other(#[from] anyhow::Error),
}

// Convert reqwest error to transcription API error
impl From<reqwest::Error> for CapxError {
    fn from(err: reqwest::Error) -> Self {
        CapxError::Api {
            message: err.to_string(),
            source: ApiErrorSource::Whisper,
        }
    }
}

// Convert symphonia error to audio processing error
impl From<symphonia::core::errors::Error> for CapxError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        CapxError::audio_processing(err.to_string())
    }
}

// Convert config crate error to configuration error
impl From<config::ConfigError> for CapxError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(path) => CapxError::Config {
                message: format!("Configuration file not found: {}", path),
            },
            config::ConfigError::Message(msg) => CapxError::Config { message: msg },
            _ => CapxError::Config {
                message: format!("Configuration error: {}", err),
            },
        }
    }
}

impl From<serde_json::Error> for CapxError {
    fn from(err: serde_json::Error) -> Self {
        CapxError::CaptionFormat {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// Specialized `Result` type for CapX operations.
pub type CapxResult<T> = Result<T, CapxError>;

impl CapxError {
    /// Create a configuration error with the given message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use capx_cli::error::CapxError;
    /// let err = CapxError::config("invalid setting");
    /// assert_eq!(err.to_string(), "Configuration error: invalid setting");
    /// ```
    pub fn config<S: Into<String>>(message: S) -> Self {
        CapxError::Config {
            message: message.into(),
        }
    }

    /// Create a caption format error for the given format and message.
    pub fn caption_format<S1, S2>(format: S1, message: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        CapxError::CaptionFormat {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Create an audio processing error with the given message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use capx_cli::error::CapxError;
    /// let err = CapxError::audio_processing("probe failed");
    /// assert_eq!(err.to_string(), "Audio processing error: probe failed");
    /// ```
    pub fn audio_processing<S: Into<String>>(message: S) -> Self {
        CapxError::AudioProcessing {
            message: message.into(),
        }
    }

    /// Create a script input error with the given message.
    pub fn script<S: Into<String>>(message: S) -> Self {
        CapxError::Script {
            message: message.into(),
        }
    }

    /// Create a Whisper transcription API error.
    pub fn whisper_api<T: Into<String>>(message: T) -> Self {
        Self::Api {
            message: message.into(),
            source: ApiErrorSource::Whisper,
        }
    }

    /// Return the corresponding exit code for this error variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use capx_cli::error::CapxError;
    /// assert_eq!(CapxError::config("x").exit_code(), 2);
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            CapxError::Io(_) => 1,
            CapxError::Config { .. } => 2,
            CapxError::Api { .. } => 3,
            CapxError::CaptionFormat { .. } => 4,
            CapxError::AudioProcessing { .. } => 5,
            CapxError::Script { .. } => 6,
            _ => 1,
        }
    }

    /// Return a user-friendly error message with suggested remedies.
    pub fn user_friendly_message(&self) -> String {
        match self {
            CapxError::Io(e) => format!("File operation error: {}", e),
            CapxError::Config { message } => format!(
                "Configuration error: {}\nHint: run 'capx-cli config --list' to inspect settings",
                message
            ),
            CapxError::Api { message, source } => format!(
                "API error ({:?}): {}\nHint: check network connection and transcription service settings",
                source, message
            ),
            CapxError::CaptionFormat { message, .. } => format!(
                "Caption output error: {}\nHint: check the requested formats and output directory",
                message
            ),
            CapxError::AudioProcessing { message } => format!(
                "Audio processing error: {}\nHint: ensure the audio file is readable and a supported format",
                message
            ),
            CapxError::Script { message } => format!(
                "Script error: {}\nHint: scripts use 'Speaker N: text' lines",
                message
            ),
            CapxError::FileNotFound(path) => format!("File not found: {}", path),
            CapxError::CommandExecution(msg) => msg.clone(),
            CapxError::Other(err) => {
                format!("Unknown error: {}\nHint: please report this issue", err)
            }
        }
    }
}

/// API error source enumeration.
///
/// Specifies the source of API-related errors to help with error diagnosis
/// and handling.
#[derive(Debug, thiserror::Error)]
pub enum ApiErrorSource {
    /// Whisper transcription API
    #[error("Whisper")]
    Whisper,
}
