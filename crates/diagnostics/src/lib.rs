//! # sdk-diagnostics
//!
//! Request/response logging configuration for an API client SDK.
//!
//! A host picks its sinks once, at construction, and then hands the SDK a
//! single [`AdvancedLogging`] value. The SDK calls [`AdvancedLogging::log`]
//! for every request and response it wants recorded; the facade forwards each
//! message to one [`Logger`] at debug level and does nothing else.
//!
//! ## Quick Start
//!
//! ```rust
//! use sdk_diagnostics::AdvancedLogging;
//!
//! # fn main() -> sdk_diagnostics::LogResult<()> {
//! let logging = AdvancedLogging::with_sinks(false, false, true, true, Some("/var/log/sdk"));
//!
//! // Missing directories fall back to the temp directory.
//! let dir = logging.file_directory().unwrap();
//! if dir.is_fallback() {
//!     println!("logging to {}", dir.path().display());
//! }
//!
//! let _guard = sdk_diagnostics::init(&logging)?;
//! logging.log("GET /v3/company/1/query 200");
//! # Ok(())
//! # }
//! ```
//!
//! Hosts with their own logging stack pass a logger instead:
//!
//! ```rust
//! use std::sync::Arc;
//! use sdk_diagnostics::{AdvancedLogging, MemoryLogger};
//!
//! let logger = Arc::new(MemoryLogger::new());
//! let logging = AdvancedLogging::with_logger(logger.clone());
//! logging.log("request sent");
//! assert_eq!(logger.len(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod config;
mod core;
mod facade;
mod logger;
mod subscriber;

// Public API
pub use config::{Level, LoggingConfig, RemoteSinkSettings, Sinks};
pub use crate::core::{LogError, LogResult};
pub use facade::{
    AdvancedLogging, CUSTOM_LOGGER_INITIALIZED, DirectorySource, FileDirectory, LOGGER_CATEGORY,
    LOGGER_INITIALIZED, resolve_file_directory,
};
pub use logger::{Logger, LoggerFactory, MemoryLogger, Record, TracingLogger, TracingLoggerFactory};
pub use subscriber::{DEFAULT_FILE_PREFIX, SinkGuard, SinkLayer, SinkSubscriber, SubscriberBuilder};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{AdvancedLogging, Level, LogResult, Logger, LoggingConfig, Sinks};
}

/// Install a global subscriber realizing `facade`'s sinks
///
/// # Errors
///
/// Returns error if the file sink cannot be opened or a global subscriber is
/// already installed.
pub fn init(facade: &AdvancedLogging) -> LogResult<SinkGuard> {
    SubscriberBuilder::from_facade(facade).init()
}
