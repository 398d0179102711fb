//! Logger capability consumed by the facade
//!
//! [`Logger`] is the only thing the facade needs from a backend: write one
//! message at one level. [`LoggerFactory`] is how a backend hands out
//! category-scoped loggers when the facade builds its own.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Level;
use crate::core::LogResult;

/// Sink for diagnostic messages
///
/// Implementations decide how concurrent writes are handled; callers get
/// exactly the thread safety the implementation provides.
pub trait Logger: Send + Sync {
    /// Write `message` at `level`
    fn log(&self, level: Level, message: &str);

    /// Write at [`Level::Info`]
    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    /// Write at [`Level::Debug`]
    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, level: Level, message: &str) {
        (**self).log(level, message);
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn log(&self, level: Level, message: &str) {
        (**self).log(level, message);
    }
}

/// Creates loggers bound to a category name
pub trait LoggerFactory: Send + Sync {
    /// Create a logger for `category`
    ///
    /// # Errors
    ///
    /// Returns the backend's error if it cannot produce a logger.
    fn create_logger(&self, category: &str) -> LogResult<Arc<dyn Logger>>;
}

impl<F> LoggerFactory for F
where
    F: Fn(&str) -> LogResult<Arc<dyn Logger>> + Send + Sync,
{
    fn create_logger(&self, category: &str) -> LogResult<Arc<dyn Logger>> {
        self(category)
    }
}

// ---------------------------------------------------------------------------
// tracing backend
// ---------------------------------------------------------------------------

/// Logger that turns every message into a `tracing` event
///
/// The category is attached as a `category` field. Where the event ends up is
/// decided by whichever subscriber is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingLogger {
    category: String,
}

impl TracingLogger {
    /// Create a logger for `category`
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }

    /// Category attached to every event
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str) {
        let category = self.category.as_str();
        match level {
            Level::Trace => tracing::trace!(category, "{}", message),
            Level::Debug => tracing::debug!(category, "{}", message),
            Level::Info => tracing::info!(category, "{}", message),
            Level::Warn => tracing::warn!(category, "{}", message),
            Level::Error => tracing::error!(category, "{}", message),
        }
    }
}

/// Factory for [`TracingLogger`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLoggerFactory;

impl TracingLoggerFactory {
    /// Infallible counterpart of [`LoggerFactory::create_logger`]
    #[must_use]
    pub fn logger(&self, category: &str) -> TracingLogger {
        TracingLogger::new(category)
    }
}

impl LoggerFactory for TracingLoggerFactory {
    fn create_logger(&self, category: &str) -> LogResult<Arc<dyn Logger>> {
        Ok(Arc::new(self.logger(category)))
    }
}

// ---------------------------------------------------------------------------
// in-memory backend
// ---------------------------------------------------------------------------

/// One message captured by [`MemoryLogger`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Level the message was written at
    pub level: Level,
    /// Message text, unmodified
    pub message: String,
}

/// Logger that keeps every message in memory, in write order
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<Record>>,
}

impl MemoryLogger {
    /// Create an empty logger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of captured records
    #[must_use]
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    /// Remove and return captured records
    pub fn take(&self) -> Vec<Record> {
        std::mem::take(&mut *self.records.lock())
    }

    /// Number of captured records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether nothing has been captured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, message: &str) {
        self.records.lock().push(Record {
            level,
            message: message.to_string(),
        });
    }
}
