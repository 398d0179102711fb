//! Subscriber installer for the enabled sinks
//!
//! The facade only records which sinks are wanted. This module turns that
//! record into a `tracing-subscriber` registry so the default
//! [`TracingLogger`](crate::TracingLogger) output actually lands somewhere:
//!
//! - console: stdout, compact, `DEBUG` and up
//! - debug stream: stderr, compact, `DEBUG` and up
//! - trace stream: stderr, pretty with span close events, `TRACE` only
//! - file: daily rolling JSON lines in the resolved directory
//!
//! The debug and trace streams share stderr but never accept the same event.
//! The remote sink is never realized.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{
    Layer, Registry,
    filter::{LevelFilter, filter_fn},
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::{Layered, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::Sinks;
use crate::core::{LogError, LogResult};
use crate::facade::{AdvancedLogging, FileDirectory};

/// Default file name prefix for the rolling file sink
pub const DEFAULT_FILE_PREFIX: &str = "sdk-requests.log";

/// One boxed, filtered layer per sink
pub type SinkLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Subscriber produced by [`SubscriberBuilder::build`]
pub type SinkSubscriber = Layered<Vec<SinkLayer>, Registry>;

type MakeStream = Arc<dyn Fn() -> Box<dyn io::Write + Send> + Send + Sync>;

/// Keeps background writers alive
///
/// Dropping the guard flushes the file sink.
#[derive(Debug, Default)]
#[must_use = "dropping the guard stops the file writer"]
pub struct SinkGuard {
    #[cfg(feature = "file")]
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Builds a subscriber from sink flags
#[derive(Clone)]
pub struct SubscriberBuilder {
    sinks: Sinks,
    file_directory: PathBuf,
    file_prefix: String,
    stdout: Option<MakeStream>,
    stderr: Option<MakeStream>,
}

impl SubscriberBuilder {
    /// Builder for `sinks`, writing files to `file_directory` or to the temp
    /// directory when none is given.
    #[must_use]
    pub fn new(sinks: Sinks, file_directory: Option<&FileDirectory>) -> Self {
        Self {
            sinks,
            file_directory: file_directory
                .map_or_else(std::env::temp_dir, |dir| dir.path().to_path_buf()),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            stdout: None,
            stderr: None,
        }
    }

    /// Builder mirroring a facade's sinks and directory
    #[must_use]
    pub fn from_facade(facade: &AdvancedLogging) -> Self {
        Self::new(facade.sinks(), facade.file_directory())
    }

    /// Override the rolling file name prefix
    #[must_use]
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Send the console sink somewhere other than stdout
    ///
    /// Colors are turned off for redirected streams.
    #[must_use]
    pub fn with_stdout<W, F>(mut self, make: F) -> Self
    where
        F: Fn() -> W + Send + Sync + 'static,
        W: io::Write + Send + 'static,
    {
        self.stdout = Some(boxed_stream(make));
        self
    }

    /// Send the debug and trace streams somewhere other than stderr
    ///
    /// Colors are turned off for redirected streams.
    #[must_use]
    pub fn with_stderr<W, F>(mut self, make: F) -> Self
    where
        F: Fn() -> W + Send + Sync + 'static,
        W: io::Write + Send + 'static,
    {
        self.stderr = Some(boxed_stream(make));
        self
    }

    /// Build the subscriber without installing it
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - the file appender cannot be created in the directory
    /// - the file sink is on but the `file` feature is disabled
    pub fn build(self) -> LogResult<(SinkSubscriber, SinkGuard)> {
        let (layers, guard) = self.layers()?;
        Ok((Registry::default().with(layers), guard))
    }

    /// Build and install as the global default subscriber
    ///
    /// # Errors
    ///
    /// Returns error if building fails or a global subscriber is already set.
    pub fn init(self) -> LogResult<SinkGuard> {
        let (subscriber, guard) = self.build()?;
        subscriber
            .try_init()
            .map_err(|e| LogError::Init(e.to_string()))?;
        Ok(guard)
    }

    pub(crate) fn layers(&self) -> LogResult<(Vec<SinkLayer>, SinkGuard)> {
        let mut guard = SinkGuard::default();
        let mut layers: Vec<SinkLayer> = Vec::new();

        if self.sinks.console {
            let (writer, ansi) = stream_writer(self.stdout.as_ref(), io::stdout, &io::stdout());
            layers.push(
                fmt::layer()
                    .compact()
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_filter(LevelFilter::DEBUG)
                    .boxed(),
            );
        }

        if self.sinks.debug {
            let (writer, ansi) = stream_writer(self.stderr.as_ref(), io::stderr, &io::stderr());
            layers.push(
                fmt::layer()
                    .compact()
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_filter(LevelFilter::DEBUG)
                    .boxed(),
            );
        }

        if self.sinks.trace {
            let (writer, ansi) = stream_writer(self.stderr.as_ref(), io::stderr, &io::stderr());
            layers.push(
                fmt::layer()
                    .pretty()
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_file(false)
                    .with_line_number(false)
                    .with_thread_ids(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_filter(filter_fn(|meta| *meta.level() == tracing::Level::TRACE))
                    .boxed(),
            );
        }

        if self.sinks.file {
            layers.push(self.file_layer(&mut guard)?);
        }

        Ok((layers, guard))
    }

    #[cfg(feature = "file")]
    fn file_layer(&self, guard: &mut SinkGuard) -> LogResult<SinkLayer> {
        use tracing_appender::rolling::{RollingFileAppender, Rotation};

        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(self.file_prefix.as_str())
            .build(&self.file_directory)
            .map_err(|e| {
                LogError::Init(format!(
                    "file appender in '{}': {e}",
                    self.file_directory.display()
                ))
            })?;

        let (writer, worker) = tracing_appender::non_blocking(appender);
        guard._file_guard = Some(worker);

        Ok(fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false)
            .with_current_span(true)
            .with_filter(LevelFilter::DEBUG)
            .boxed())
    }

    #[cfg(not(feature = "file"))]
    fn file_layer(&self, _guard: &mut SinkGuard) -> LogResult<SinkLayer> {
        Err(LogError::Config(
            "file sink requires the `file` feature".to_string(),
        ))
    }
}

impl std::fmt::Debug for SubscriberBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberBuilder")
            .field("sinks", &self.sinks)
            .field("file_directory", &self.file_directory)
            .field("file_prefix", &self.file_prefix)
            .field("stdout_redirected", &self.stdout.is_some())
            .field("stderr_redirected", &self.stderr.is_some())
            .finish()
    }
}

fn boxed_stream<W, F>(make: F) -> MakeStream
where
    F: Fn() -> W + Send + Sync + 'static,
    W: io::Write + Send + 'static,
{
    Arc::new(move || Box::new(make()) as Box<dyn io::Write + Send>)
}

/// Writer for a std stream, or its redirection, plus whether to use colors
fn stream_writer<S>(
    custom: Option<&MakeStream>,
    std_stream: fn() -> S,
    terminal: &impl io::IsTerminal,
) -> (BoxMakeWriter, bool)
where
    S: io::Write + 'static,
{
    match custom {
        Some(make) => {
            let make = Arc::clone(make);
            (BoxMakeWriter::new(move || make()), false)
        }
        None => (
            BoxMakeWriter::new(std_stream),
            cfg!(feature = "ansi") && terminal.is_terminal(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::config::Level;
    use crate::facade::resolve_file_directory;
    use crate::logger::{Logger, TracingLogger};
    use rstest::rstest;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn hits(&self, needle: &str) -> usize {
            String::from_utf8_lossy(&self.0.lock().unwrap())
                .matches(needle)
                .count()
        }
    }

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured(sinks: Sinks) -> (SinkSubscriber, Buffer, Buffer) {
        let stdout = Buffer::default();
        let stderr = Buffer::default();
        let (out, err) = (stdout.clone(), stderr.clone());
        let (subscriber, _guard) = SubscriberBuilder::new(sinks, None)
            .with_stdout(move || out.clone())
            .with_stderr(move || err.clone())
            .build()
            .unwrap();
        (subscriber, stdout, stderr)
    }

    #[rstest]
    #[case::none(Sinks::default(), 0)]
    #[case::standard(Sinks::standard(), 3)]
    #[case::console_only(Sinks { console: true, ..Sinks::default() }, 1)]
    #[case::remote_is_never_realized(Sinks { remote: true, ..Sinks::default() }, 0)]
    fn test_one_layer_per_stream_sink(#[case] sinks: Sinks, #[case] expected: usize) {
        let (layers, _guard) = SubscriberBuilder::new(sinks, None).layers().unwrap();
        assert_eq!(layers.len(), expected);
    }

    #[test]
    fn test_debug_message_written_once_per_stream() {
        let (subscriber, stdout, stderr) = captured(Sinks::standard());

        tracing::subscriber::with_default(subscriber, || {
            TracingLogger::new("SDK Logger").log(Level::Debug, "GET /v3/company/1/item 200");
        });

        assert_eq!(stdout.hits("GET /v3/company/1/item 200"), 1);
        assert_eq!(stderr.hits("GET /v3/company/1/item 200"), 1);
    }

    #[test]
    fn test_trace_message_only_on_trace_stream() {
        let (subscriber, stdout, stderr) = captured(Sinks::standard());

        tracing::subscriber::with_default(subscriber, || {
            TracingLogger::new("SDK Logger").log(Level::Trace, "raw response bytes");
        });

        assert_eq!(stdout.hits("raw response bytes"), 0);
        assert_eq!(stderr.hits("raw response bytes"), 1);
    }

    #[rstest]
    #[case::debug_stream(Sinks { debug: true, ..Sinks::default() }, Level::Trace, 0)]
    #[case::debug_stream_info(Sinks { debug: true, ..Sinks::default() }, Level::Info, 1)]
    #[case::trace_stream(Sinks { trace: true, ..Sinks::default() }, Level::Trace, 1)]
    #[case::trace_stream_debug(Sinks { trace: true, ..Sinks::default() }, Level::Debug, 0)]
    fn test_stderr_streams_do_not_overlap(
        #[case] sinks: Sinks,
        #[case] level: Level,
        #[case] expected: usize,
    ) {
        let (subscriber, _stdout, stderr) = captured(sinks);

        tracing::subscriber::with_default(subscriber, || {
            TracingLogger::new("SDK Logger").log(level, "stream marker");
        });

        assert_eq!(stderr.hits("stream marker"), expected);
    }

    #[test]
    fn test_debug_stream_has_no_source_location() {
        let (subscriber, _stdout, stderr) = captured(Sinks {
            debug: true,
            ..Sinks::default()
        });

        tracing::subscriber::with_default(subscriber, || {
            TracingLogger::new("SDK Logger").log(Level::Debug, "located");
        });

        assert_eq!(stderr.hits("located"), 1);
        assert_eq!(stderr.hits("logger.rs"), 0);
    }

    #[test]
    fn test_from_facade_uses_resolved_directory() {
        let dir = tempfile::tempdir().unwrap();
        let facade = AdvancedLogging::with_sinks(false, false, false, true, Some(dir.path()));
        let builder = SubscriberBuilder::from_facade(&facade);

        assert_eq!(builder.file_directory, dir.path());
        assert!(builder.sinks.file);
    }

    #[test]
    fn test_missing_directory_uses_temp() {
        let builder = SubscriberBuilder::new(Sinks::default(), None);
        assert_eq!(builder.file_directory, std::env::temp_dir());
        assert_eq!(builder.file_prefix, DEFAULT_FILE_PREFIX);
    }

    #[cfg(feature = "file")]
    #[test]
    fn test_file_sink_writes_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_file_directory(Some(dir.path()));
        let sinks = Sinks {
            file: true,
            ..Sinks::default()
        };

        let (subscriber, guard) = SubscriberBuilder::new(sinks, Some(&resolved))
            .with_file_prefix("requests.log")
            .build()
            .unwrap();

        tracing::subscriber::with_default(subscriber, || {
            TracingLogger::new("SDK Logger").log(Level::Debug, "POST /v3/company/1/invoice");
        });
        drop(guard);

        let files: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(files.len(), 1);
        assert!(
            files[0]
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("requests.log")
        );

        let contents = std::fs::read_to_string(&files[0]).unwrap();
        assert!(contents.contains("POST /v3/company/1/invoice"));
        assert!(contents.contains("SDK Logger"));
    }

    #[cfg(not(feature = "file"))]
    #[test]
    fn test_file_sink_requires_feature() {
        let sinks = Sinks {
            file: true,
            ..Sinks::default()
        };
        let result = SubscriberBuilder::new(sinks, None).layers();
        assert!(matches!(result, Err(LogError::Config(_))));
    }
}
