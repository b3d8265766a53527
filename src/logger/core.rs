//! Core leveled logger with severity gating
//!
//! This module contains the central logging logic that:
//! - Checks whether a call passes the configured threshold
//! - Decorates the message with its severity label and prefix
//! - Writes Panic/Fatal lines synchronously, then panics or exits
//! - Hands Error/Warn/Info/Debug lines to the background dispatcher

use std::fmt::{self, Display};
use std::io::Write;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use super::config::LoggerConfig;
use super::dispatch::{Dispatcher, Job};
use super::error::ConfigResult;
use super::flags::FormatFlags;
use super::format::{decoration, Message};
use super::levels::Severity;
use super::sink::{LineRecord, LineWriter, StreamWriter};

/// How long a Fatal call waits for queued lines before writing and exiting
const FATAL_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Exit status used by Fatal calls
pub const FATAL_EXIT_CODE: i32 = 1;

/// Logger that filters by severity and decorates every line with its level and prefix
///
/// Threshold and prefix are fixed at construction. Clones share the sink and
/// the background dispatcher.
#[derive(Clone)]
pub struct LeveledLogger {
    threshold: Severity,
    prefix: Arc<str>,
    sink: Arc<dyn LineWriter>,
    dispatcher: Arc<Dispatcher>,
}

impl fmt::Debug for LeveledLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeveledLogger")
            .field("threshold", &self.threshold)
            .field("prefix", &self.prefix)
            .field("workers", &self.dispatcher.worker_count())
            .finish()
    }
}

/// Generates the plain, formatted and joined methods of one non-fatal severity
macro_rules! dispatched_methods {
    ($severity:ident, $plain:ident, $formatted:ident, $joined:ident) => {
        #[doc = concat!("Log `values` joined by spaces at ", stringify!($severity), " severity.")]
        #[track_caller]
        pub fn $plain(&self, values: &[&dyn Display]) {
            self.emit(Severity::$severity, Message::Plain(values));
        }

        #[doc = concat!("Log a `format_args!` message at ", stringify!($severity), " severity.")]
        #[track_caller]
        pub fn $formatted(&self, args: fmt::Arguments<'_>) {
            self.emit(Severity::$severity, Message::Formatted(args));
        }

        #[doc = concat!("Log `values` joined by spaces plus a newline at ", stringify!($severity), " severity.")]
        #[track_caller]
        pub fn $joined(&self, values: &[&dyn Display]) {
            self.emit(Severity::$severity, Message::Joined(values));
        }
    };
}

impl LeveledLogger {
    /// Create a logger writing to `out`
    ///
    /// `level` must be one of "Off", "Panic", "Fatal", "Error", "Warn", "Info" or
    /// "Debug". `flags` controls the timestamp and caller annotations added by
    /// the underlying stream writer.
    ///
    /// # Example
    /// ```rust
    /// use levelog::{FormatFlags, LeveledLogger};
    ///
    /// let log = LeveledLogger::new(std::io::stderr(), "svc", "Warn", FormatFlags::STANDARD)?;
    /// log.warn(&[&"disk", &"low"]);
    /// log.info(&[&"not shown"]);
    /// log.flush();
    /// # Ok::<(), levelog::ConfigError>(())
    /// ```
    pub fn new<W>(out: W, prefix: &str, level: &str, flags: FormatFlags) -> ConfigResult<Self>
    where
        W: Write + Send + 'static,
    {
        let threshold: Severity = level.parse()?;
        let sink: Arc<dyn LineWriter> = Arc::new(StreamWriter::new(out, "", flags));
        Ok(Self::assemble(
            threshold,
            prefix,
            sink,
            Arc::new(Dispatcher::with_defaults()?),
        ))
    }

    /// Create a logger over a caller-supplied line writer
    pub fn with_sink(sink: Arc<dyn LineWriter>, prefix: &str, level: &str) -> ConfigResult<Self> {
        let threshold: Severity = level.parse()?;
        Ok(Self::assemble(
            threshold,
            prefix,
            sink,
            Arc::new(Dispatcher::with_defaults()?),
        ))
    }

    /// Create a logger that shares an existing dispatcher with other loggers
    pub fn with_dispatcher(
        sink: Arc<dyn LineWriter>,
        prefix: &str,
        level: &str,
        dispatcher: Arc<Dispatcher>,
    ) -> ConfigResult<Self> {
        let threshold: Severity = level.parse()?;
        Ok(Self::assemble(threshold, prefix, sink, dispatcher))
    }

    /// Create a logger writing to `out` from a loaded configuration
    pub fn from_config<W>(out: W, config: &LoggerConfig) -> ConfigResult<Self>
    where
        W: Write + Send + 'static,
    {
        let threshold = config.severity()?;
        let flags = config.format_flags()?;
        let dispatcher = Dispatcher::new(config.workers, config.queue_capacity)?;
        let sink: Arc<dyn LineWriter> = Arc::new(StreamWriter::new(out, "", flags));
        Ok(Self::assemble(
            threshold,
            &config.prefix,
            sink,
            Arc::new(dispatcher),
        ))
    }

    fn assemble(
        threshold: Severity,
        prefix: &str,
        sink: Arc<dyn LineWriter>,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        Self {
            threshold,
            prefix: Arc::from(prefix),
            sink,
            dispatcher,
        }
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Check whether a call at `severity` would be written
    pub fn enabled(&self, severity: Severity) -> bool {
        self.threshold.enables(severity)
    }

    /// Wait until every dispatched line has reached the sink
    pub fn flush(&self) {
        self.dispatcher.flush();
    }

    /// Like `flush`, giving up after `timeout`; returns whether everything was written
    pub fn flush_timeout(&self, timeout: Duration) -> bool {
        self.dispatcher.flush_timeout(timeout)
    }

    /// Drain the dispatcher and stop its workers
    ///
    /// Loggers sharing the dispatcher keep working; their lines are written inline.
    pub fn shutdown(&self) {
        self.dispatcher.shutdown();
    }

    // ------------------------------------------------------------------
    // Panic: written synchronously, then the calling thread panics
    // ------------------------------------------------------------------

    /// Log `values` joined by spaces, then panic with the same message.
    #[track_caller]
    pub fn panic(&self, values: &[&dyn Display]) {
        self.emit(Severity::Panic, Message::Plain(values));
    }

    /// Log a `format_args!` message, then panic with the same message.
    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Panic, Message::Formatted(args));
    }

    /// Log `values` joined by spaces plus a newline, then panic with the same message.
    #[track_caller]
    pub fn panicln(&self, values: &[&dyn Display]) {
        self.emit(Severity::Panic, Message::Joined(values));
    }

    // ------------------------------------------------------------------
    // Fatal: queued lines are drained, the line is written, the process exits
    // ------------------------------------------------------------------

    /// Log `values` joined by spaces, then exit the process with status 1.
    #[track_caller]
    pub fn fatal(&self, values: &[&dyn Display]) {
        self.emit(Severity::Fatal, Message::Plain(values));
    }

    /// Log a `format_args!` message, then exit the process with status 1.
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.emit(Severity::Fatal, Message::Formatted(args));
    }

    /// Log `values` joined by spaces plus a newline, then exit the process with status 1.
    #[track_caller]
    pub fn fatalln(&self, values: &[&dyn Display]) {
        self.emit(Severity::Fatal, Message::Joined(values));
    }

    // ------------------------------------------------------------------
    // Error/Warn/Info/Debug: dispatched, the caller returns immediately
    // ------------------------------------------------------------------

    dispatched_methods!(Error, error, errorf, errorln);
    dispatched_methods!(Warn, warn, warnf, warnln);
    dispatched_methods!(Info, info, infof, infoln);
    dispatched_methods!(Debug, debug, debugf, debugln);

    // ------------------------------------------------------------------
    // Ungated output: no level check, no decoration, written synchronously
    // ------------------------------------------------------------------

    #[track_caller]
    pub fn print(&self, values: &[&dyn Display]) {
        self.write_now(&Message::Plain(values).render(""), Location::caller());
    }

    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.write_now(&Message::Formatted(args).render(""), Location::caller());
    }

    #[track_caller]
    pub fn println(&self, values: &[&dyn Display]) {
        self.write_now(&Message::Joined(values).render(""), Location::caller());
    }

    /// Gate, decorate and route one call
    #[track_caller]
    fn emit(&self, severity: Severity, message: Message<'_>) {
        if !self.enabled(severity) {
            return;
        }

        let location = Location::caller();
        let line = message.render(&decoration(severity, &self.prefix));

        match severity {
            Severity::Panic => {
                self.write_now(&line, location);
                panic!("{}", line);
            }
            Severity::Fatal => {
                if !self.dispatcher.flush_timeout(FATAL_DRAIN_TIMEOUT) {
                    log::warn!(
                        "exiting with {} log lines still queued",
                        self.dispatcher.pending()
                    );
                }
                self.write_now(&line, location);
                std::process::exit(FATAL_EXIT_CODE);
            }
            _ => {
                self.dispatcher
                    .submit(Job::new(Arc::clone(&self.sink), line, location));
            }
        }
    }

    fn write_now(&self, line: &str, location: &'static Location<'static>) {
        self.sink.write_line(&LineRecord::now(line, location));
    }
}
