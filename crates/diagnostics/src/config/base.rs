//! Core configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{RemoteSinkSettings, Sinks};

/// Logging configuration consumed by [`AdvancedLogging::from_config`]
///
/// [`AdvancedLogging::from_config`]: crate::AdvancedLogging::from_config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Which sinks are active
    pub sinks: Sinks,

    /// Directory for file-based logs. Validated on assignment, so a missing
    /// directory is replaced by the system temp directory.
    pub file_directory: Option<PathBuf>,

    /// Reserved remote document-store sink settings
    pub remote: RemoteSinkSettings,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            sinks: Sinks::standard(),
            file_directory: None,
            remote: RemoteSinkSettings::default(),
        }
    }
}

impl LoggingConfig {
    /// Create a configuration with the given sinks and no directory
    #[must_use]
    pub fn with_sinks(sinks: Sinks) -> Self {
        Self {
            sinks,
            ..Self::default()
        }
    }

    /// Set the file-sink directory
    #[must_use]
    pub fn file_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.file_directory = Some(dir.into());
        self
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Trace level
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warn level
    Warn,
    /// Error level
    Error,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Trace => write!(f, "trace"),
            Level::Debug => write!(f, "debug"),
            Level::Info => write!(f, "info"),
            Level::Warn => write!(f, "warn"),
            Level::Error => write!(f, "error"),
        }
    }
}

impl From<Level> for tracing::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => tracing::Level::TRACE,
            Level::Debug => tracing::Level::DEBUG,
            Level::Info => tracing::Level::INFO,
            Level::Warn => tracing::Level::WARN,
            Level::Error => tracing::Level::ERROR,
        }
    }
}
