//! Configuration loading and typed config structures for the equalizer.
//!
//! The canonical configuration lives in `equalizer-config.yaml` at the
//! project root. Every section is optional; anything left out falls back to
//! the calibrated defaults, so an empty file describes the stock equalizer.

use std::path::Path;

use equalizer_types::ContextParameters;
use serde::Deserialize;

use crate::error::{CoreError, RegistryError, TuningError};
use crate::propagation::{EngineTuning, PropagationEngine};
use crate::registry::{MULTI_USE_RECREATION_FOREST, RegimeProfile, RegimeRegistry, default_profiles};

/// Environment variable that overrides `logging.level`.
pub const LOG_LEVEL_ENV: &str = "EQUALIZER_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configured regimes do not form a valid registry.
    #[error("invalid regimes: {source}")]
    Registry {
        /// The underlying registry error.
        #[from]
        source: RegistryError,
    },

    /// The engine tuning constants are invalid.
    #[error("invalid engine tuning: {source}")]
    Tuning {
        /// The underlying tuning error.
        #[from]
        source: TuningError,
    },

    /// The shell's initial regime is not among the configured regimes.
    #[error("invalid shell defaults: {source}")]
    ShellRegime {
        /// The underlying lookup error.
        #[from]
        source: CoreError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level equalizer configuration.
///
/// Mirrors the structure of `equalizer-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EqualizerConfig {
    /// Propagation formula constants.
    #[serde(default)]
    pub engine: EngineTuning,

    /// Management regimes, in selector order.
    #[serde(default = "default_profiles")]
    pub regimes: Vec<RegimeProfile>,

    /// Initial state of the shell's inputs.
    #[serde(default)]
    pub shell: ShellConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for EqualizerConfig {
    fn default() -> Self {
        Self {
            engine: EngineTuning::default(),
            regimes: default_profiles(),
            shell: ShellConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl EqualizerConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `EQUALIZER_LOG_LEVEL` overrides `logging.level` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml maps an empty document to unit, not an empty mapping.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.logging.apply_env_overrides();
        Ok(config)
    }

    /// Validate the configuration and build a propagation engine from it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Registry`] for invalid regimes,
    /// [`ConfigError::Tuning`] for invalid constants, or
    /// [`ConfigError::ShellRegime`] if `shell.regime` is not registered.
    pub fn build_engine(&self) -> Result<PropagationEngine, ConfigError> {
        let registry = RegimeRegistry::from_profiles(self.regimes.clone())?;
        registry.lookup(&self.shell.regime)?;
        Ok(PropagationEngine::new(registry, self.engine)?)
    }
}

/// Initial values of the shell's context inputs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShellConfig {
    /// Assessment area in hectares.
    #[serde(default = "default_area")]
    pub total_area: f64,

    /// Managed area in hectares.
    #[serde(default = "default_area")]
    pub managed_area: f64,

    /// Selected regime.
    #[serde(default = "default_regime")]
    pub regime: String,

    /// Integrity rating.
    #[serde(default)]
    pub integrity: i32,
}

impl ShellConfig {
    /// Context the shell starts from.
    pub fn initial_context(&self) -> ContextParameters {
        ContextParameters::new(
            self.total_area,
            self.managed_area,
            self.regime.clone(),
            self.integrity,
        )
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            total_area: default_area(),
            managed_area: default_area(),
            regime: default_regime(),
            integrity: 0,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Override the log level with `EQUALIZER_LOG_LEVEL` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(LOG_LEVEL_ENV) {
            self.level = val;
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_area() -> f64 {
    100.0
}

fn default_regime() -> String {
    MULTI_USE_RECREATION_FOREST.to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}
