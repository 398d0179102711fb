//! Sink toggles and the reserved remote sink settings

use serde::{Deserialize, Serialize};
use url::Url;

/// Which logging sinks are enabled
///
/// The flags are independent; any subset may be on at once. `Default` turns
/// every sink off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Sinks {
    /// Debug stream
    pub debug: bool,
    /// Trace stream
    pub trace: bool,
    /// Console output
    pub console: bool,
    /// Rolling file in the configured directory
    pub file: bool,
    /// Remote document store (reserved, never realized)
    pub remote: bool,
}

impl Sinks {
    /// Debug, trace and console on; file and remote off
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            debug: true,
            trace: true,
            console: true,
            file: false,
            remote: false,
        }
    }

    /// Whether no sink is enabled
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.debug || self.trace || self.console || self.file || self.remote)
    }
}

/// Settings for the remote document-store sink
///
/// Carried as plain data only. Nothing reads, validates or transmits these
/// values.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSinkSettings {
    /// Document store endpoint
    pub endpoint: Option<Url>,
    /// Access key; redacted from `Debug`
    #[serde(skip_serializing)]
    pub key: Option<String>,
    /// Time to live for stored records, in seconds
    pub ttl_seconds: f64,
}

impl std::fmt::Debug for RemoteSinkSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSinkSettings")
            .field("endpoint", &self.endpoint.as_ref().map(Url::as_str))
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}
