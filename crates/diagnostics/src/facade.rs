//! Request/response logging facade
//!
//! [`AdvancedLogging`] records which sinks a host wants, resolves where file
//! logs go, and forwards every message to one [`Logger`] at debug level.
//!
//! There are three ways to build one:
//!
//! | constructor            | sinks            | directory        | logger                  |
//! |------------------------|------------------|------------------|-------------------------|
//! | [`new`]                | debug/trace/console | temp dir      | tracing, `"SDK Logger"` |
//! | [`with_logger`]        | all off          | none             | caller's                |
//! | [`with_sinks`]         | as given         | validated        | tracing, `"SDK Logger"` |
//! | [`with_sinks_and_factory`] | as given     | validated        | factory, `"SDK Logger"` |
//!
//! [`with_logger`] does not touch the sink flags. They stay off even when the
//! supplied logger writes to the console.
//!
//! [`new`]: AdvancedLogging::new
//! [`with_logger`]: AdvancedLogging::with_logger
//! [`with_sinks`]: AdvancedLogging::with_sinks
//! [`with_sinks_and_factory`]: AdvancedLogging::with_sinks_and_factory

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{Level, LoggingConfig, RemoteSinkSettings, Sinks};
use crate::core::LogResult;
use crate::logger::{Logger, LoggerFactory, TracingLoggerFactory};

/// Category used for loggers the facade creates itself
pub const LOGGER_CATEGORY: &str = "SDK Logger";

/// Bootstrap message written when the facade creates its own logger
pub const LOGGER_INITIALIZED: &str = "logger initialized";

/// Bootstrap message written when a caller supplies the logger
pub const CUSTOM_LOGGER_INITIALIZED: &str = "custom logger initialized";

/// How a file-sink directory was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectorySource {
    /// The requested directory exists and is used as given
    Configured,
    /// The requested directory was missing; the temp directory is used
    TempFallback,
}

/// Resolved file-sink directory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileDirectory {
    path: PathBuf,
    source: DirectorySource,
}

impl FileDirectory {
    /// Directory file logs are written to
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How the directory was chosen
    #[must_use]
    pub fn source(&self) -> DirectorySource {
        self.source
    }

    /// Whether the requested directory was replaced
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source == DirectorySource::TempFallback
    }
}

/// Resolve a requested file-sink directory.
///
/// An existing directory is kept exactly as given. Anything else (`None`, an
/// empty path, a missing path, a regular file) becomes
/// [`std::env::temp_dir`].
pub fn resolve_file_directory(requested: Option<&Path>) -> FileDirectory {
    match requested {
        Some(path) if path.is_dir() => FileDirectory {
            path: path.to_path_buf(),
            source: DirectorySource::Configured,
        },
        _ => FileDirectory {
            path: std::env::temp_dir(),
            source: DirectorySource::TempFallback,
        },
    }
}

/// Sink configuration plus the logger messages are forwarded to
///
/// Cloning shares the logger. After construction nothing changes except the
/// file directory, and only through [`set_file_directory`].
///
/// `AdvancedLogging` is `Send + Sync`, but [`log`] adds no locking of its
/// own. Concurrent calls are exactly as safe as the logger behind it.
///
/// [`set_file_directory`]: AdvancedLogging::set_file_directory
/// [`log`]: AdvancedLogging::log
#[derive(Clone)]
pub struct AdvancedLogging {
    sinks: Sinks,
    file_directory: Option<FileDirectory>,
    remote: RemoteSinkSettings,
    logger: Arc<dyn Logger>,
}

impl AdvancedLogging {
    /// Debug, trace and console sinks on, file sink off.
    ///
    /// Same as `with_sinks(true, true, true, false, None::<&Path>)`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sinks(true, true, true, false, None::<&Path>)
    }

    /// Use a logger built by the caller.
    ///
    /// Writes [`CUSTOM_LOGGER_INITIALIZED`] at info level through it. Sink
    /// flags stay off and no directory is assigned.
    pub fn with_logger(logger: Arc<dyn Logger>) -> Self {
        let facade = Self {
            sinks: Sinks::default(),
            file_directory: None,
            remote: RemoteSinkSettings::default(),
            logger,
        };
        facade.logger.log(Level::Info, CUSTOM_LOGGER_INITIALIZED);
        facade
    }

    /// Configure every sink explicitly.
    ///
    /// `file_directory` goes through [`resolve_file_directory`]. A tracing
    /// logger for [`LOGGER_CATEGORY`] is created and [`LOGGER_INITIALIZED`]
    /// is written through it at info level. Use
    /// [`with_sinks_and_factory`](Self::with_sinks_and_factory) to supply the
    /// logger factory instead.
    pub fn with_sinks(
        debug: bool,
        trace: bool,
        console: bool,
        file: bool,
        file_directory: Option<impl AsRef<Path>>,
    ) -> Self {
        let sinks = Sinks {
            debug,
            trace,
            console,
            file,
            remote: false,
        };
        Self::configure(
            sinks,
            file_directory.as_ref().map(AsRef::as_ref),
            RemoteSinkSettings::default(),
            Arc::new(TracingLoggerFactory.logger(LOGGER_CATEGORY)),
        )
    }

    /// [`with_sinks`](Self::with_sinks), asking `factory` for the logger
    /// instead of using the default tracing logger.
    ///
    /// # Errors
    ///
    /// Returns whatever `factory` returns when it cannot create a logger.
    pub fn with_sinks_and_factory(
        debug: bool,
        trace: bool,
        console: bool,
        file: bool,
        file_directory: Option<impl AsRef<Path>>,
        factory: &dyn LoggerFactory,
    ) -> LogResult<Self> {
        let sinks = Sinks {
            debug,
            trace,
            console,
            file,
            remote: false,
        };
        let logger = factory.create_logger(LOGGER_CATEGORY)?;
        Ok(Self::configure(
            sinks,
            file_directory.as_ref().map(AsRef::as_ref),
            RemoteSinkSettings::default(),
            logger,
        ))
    }

    /// Configure from a [`LoggingConfig`] with the default tracing logger.
    pub fn from_config(config: LoggingConfig) -> Self {
        Self::configure(
            config.sinks,
            config.file_directory.as_deref(),
            config.remote,
            Arc::new(TracingLoggerFactory.logger(LOGGER_CATEGORY)),
        )
    }

    /// Configure from a [`LoggingConfig`], asking `factory` for the logger.
    ///
    /// # Errors
    ///
    /// Returns whatever `factory` returns when it cannot create a logger.
    pub fn from_config_with(
        config: LoggingConfig,
        factory: &dyn LoggerFactory,
    ) -> LogResult<Self> {
        let logger = factory.create_logger(LOGGER_CATEGORY)?;
        Ok(Self::configure(
            config.sinks,
            config.file_directory.as_deref(),
            config.remote,
            logger,
        ))
    }

    fn configure(
        sinks: Sinks,
        file_directory: Option<&Path>,
        remote: RemoteSinkSettings,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let mut facade = Self {
            sinks,
            file_directory: None,
            remote,
            logger,
        };
        facade.set_file_directory(file_directory);
        facade.logger.log(Level::Info, LOGGER_INITIALIZED);
        facade
    }

    /// Assign the file-sink directory, falling back to the temp directory
    /// when `dir` is not an existing directory.
    pub fn set_file_directory(&mut self, dir: Option<impl AsRef<Path>>) {
        let requested: Option<&Path> = dir.as_ref().map(AsRef::as_ref);
        let resolved = resolve_file_directory(requested);
        if resolved.is_fallback() {
            tracing::debug!(
                requested = ?requested,
                fallback = %resolved.path().display(),
                "log directory not found, using temp directory"
            );
        }
        self.file_directory = Some(resolved);
    }

    /// Forward `message` to the logger at debug level.
    pub fn log(&self, message: &str) {
        self.logger.log(Level::Debug, message);
    }

    /// Enabled sinks
    #[must_use]
    pub fn sinks(&self) -> Sinks {
        self.sinks
    }

    /// Whether the debug stream is on
    #[must_use]
    pub fn is_debug_enabled(&self) -> bool {
        self.sinks.debug
    }

    /// Whether the trace stream is on
    #[must_use]
    pub fn is_trace_enabled(&self) -> bool {
        self.sinks.trace
    }

    /// Whether console output is on
    #[must_use]
    pub fn is_console_enabled(&self) -> bool {
        self.sinks.console
    }

    /// Whether the rolling file sink is on
    #[must_use]
    pub fn is_file_enabled(&self) -> bool {
        self.sinks.file
    }

    /// Whether the reserved remote sink is flagged on
    #[must_use]
    pub fn is_remote_enabled(&self) -> bool {
        self.sinks.remote
    }

    /// Resolved file-sink directory, `None` when none was ever assigned
    #[must_use]
    pub fn file_directory(&self) -> Option<&FileDirectory> {
        self.file_directory.as_ref()
    }

    /// Reserved remote sink settings
    #[must_use]
    pub fn remote(&self) -> &RemoteSinkSettings {
        &self.remote
    }

    /// Logger messages are forwarded to
    #[must_use]
    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }
}

impl Default for AdvancedLogging {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AdvancedLogging {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvancedLogging")
            .field("sinks", &self.sinks)
            .field("file_directory", &self.file_directory)
            .field("remote", &self.remote)
            .finish_non_exhaustive()
    }
}
