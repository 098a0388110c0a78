//! Configuration service abstraction for dependency injection.
//!
//! Commands receive a [`ConfigService`] rather than a concrete config so
//! that tests can inject controlled settings without touching the
//! filesystem or process environment.

use super::Config;
use crate::Result;
use std::path::PathBuf;

/// Service interface providing access to the effective configuration.
pub trait ConfigService: Send + Sync {
    /// Return the effective configuration.
    fn get_config(&self) -> Result<Config>;
}

/// Production configuration service.
///
/// Layers, in increasing precedence: built-in defaults, an optional
/// `config.toml` in the platform config directory, and `CAPX_*` environment
/// variables (e.g. `CAPX_TIMING__WORDS_PER_MINUTE=140`).
pub struct ProductionConfigService {
    config_path: Option<PathBuf>,
}

impl ProductionConfigService {
    /// Create a service reading from the default config location.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: Self::default_config_path(),
        })
    }

    /// Create a service reading from an explicit config file path.
    pub fn with_config_path(path: PathBuf) -> Self {
        Self {
            config_path: Some(path),
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("capx").join("config.toml"))
    }

    fn build(&self) -> Result<Config> {
        let mut builder = config::Config::builder();

        if let Some(path) = &self.config_path {
            builder = builder.add_source(
                config::File::from(path.clone())
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("CAPX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl ConfigService for ProductionConfigService {
    fn get_config(&self) -> Result<Config> {
        self.build()
    }
}

/// Test configuration service returning a fixed configuration.
pub struct TestConfigService {
    config: Config,
}

impl TestConfigService {
    /// Wrap the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Service with all defaults, transcription disabled, suitable for
    /// offline tests.
    pub fn offline() -> Self {
        let mut config = Config::default();
        config.asr.enabled = false;
        Self::new(config)
    }
}

impl ConfigService for TestConfigService {
    fn get_config(&self) -> Result<Config> {
        Ok(self.config.clone())
    }
}
