//! Configuration presets for common scenarios

use super::{LoggingConfig, Sinks};

impl LoggingConfig {
    /// Create configuration from environment variables
    ///
    /// Reads `SDK_LOG_DEBUG`, `SDK_LOG_TRACE`, `SDK_LOG_CONSOLE`,
    /// `SDK_LOG_FILE`, `SDK_LOG_REMOTE` and `SDK_LOG_DIR`. Unset variables
    /// keep the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let flag = |key: &str, current: &mut bool| {
            if let Some(v) = lookup(key) {
                *current = v != "0" && !v.eq_ignore_ascii_case("false");
            }
        };

        flag("SDK_LOG_DEBUG", &mut config.sinks.debug);
        flag("SDK_LOG_TRACE", &mut config.sinks.trace);
        flag("SDK_LOG_CONSOLE", &mut config.sinks.console);
        flag("SDK_LOG_FILE", &mut config.sinks.file);
        flag("SDK_LOG_REMOTE", &mut config.sinks.remote);

        if let Some(dir) = lookup("SDK_LOG_DIR") {
            config.file_directory = Some(dir.into());
        }

        config
    }

    /// Development configuration (debug, trace and console streams)
    #[must_use]
    pub fn development() -> Self {
        Self::default()
    }

    /// Production configuration (rolling file only)
    #[must_use]
    pub fn production() -> Self {
        Self::with_sinks(Sinks {
            file: true,
            ..Sinks::default()
        })
    }

    /// Every sink off
    #[must_use]
    pub fn silent() -> Self {
        Self::with_sinks(Sinks::default())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_empty_env_is_default() {
        let config = LoggingConfig::from_lookup(|_| None);
        assert_eq!(config, LoggingConfig::default());
    }

    #[test]
    fn test_env_flags_and_dir() {
        let config = LoggingConfig::from_lookup(lookup_from(&[
            ("SDK_LOG_DEBUG", "0"),
            ("SDK_LOG_TRACE", "FALSE"),
            ("SDK_LOG_FILE", "1"),
            ("SDK_LOG_DIR", "/srv/logs"),
        ]));

        assert!(!config.sinks.debug);
        assert!(!config.sinks.trace);
        assert!(config.sinks.console);
        assert!(config.sinks.file);
        assert!(!config.sinks.remote);
        assert_eq!(config.file_directory, Some(PathBuf::from("/srv/logs")));
    }

    #[test]
    fn test_presets() {
        assert_eq!(LoggingConfig::development().sinks, Sinks::standard());
        assert!(LoggingConfig::production().sinks.file);
        assert!(!LoggingConfig::production().sinks.console);
        assert!(LoggingConfig::silent().sinks.is_empty());
    }
}
