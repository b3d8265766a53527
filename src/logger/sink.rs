//! Line writers: where decorated messages end up
//!
//! Handles:
//! - The `LineWriter` contract every sink implements
//! - A stream writer that annotates lines according to `FormatFlags`
//! - Broken pipe tolerance (write errors are swallowed, never reported back)

use std::fmt::Write as _;
use std::io::{self, Write};
use std::panic::Location;

use chrono::{DateTime, Local, TimeZone, Utc};
use parking_lot::Mutex;

use super::flags::FormatFlags;

/// One message on its way to a sink
#[derive(Debug, Clone, Copy)]
pub struct LineRecord<'a> {
    /// Fully decorated message text
    pub message: &'a str,
    /// Call site that produced the message
    pub location: &'static Location<'static>,
    /// When the call was made (not when the write happens)
    pub time: DateTime<Utc>,
}

impl<'a> LineRecord<'a> {
    /// Record stamped with the current time
    pub fn now(message: &'a str, location: &'static Location<'static>) -> Self {
        Self {
            message,
            location,
            time: Utc::now(),
        }
    }
}

/// Destination for fully formatted lines
///
/// Writers are shared between threads and may be called concurrently by
/// several background workers, so implementations do their own locking.
/// Write failures stay inside the writer.
pub trait LineWriter: Send + Sync {
    fn write_line(&self, record: &LineRecord<'_>);
}

/// Line writer over any `io::Write`, annotating each line per its flags
pub struct StreamWriter<W> {
    out: Mutex<W>,
    prefix: String,
    flags: FormatFlags,
}

impl StreamWriter<io::Stderr> {
    pub fn stderr(flags: FormatFlags) -> Self {
        Self::new(io::stderr(), "", flags)
    }
}

impl StreamWriter<io::Stdout> {
    pub fn stdout(flags: FormatFlags) -> Self {
        Self::new(io::stdout(), "", flags)
    }
}

impl<W: Write + Send> StreamWriter<W> {
    pub fn new(out: W, prefix: impl Into<String>, flags: FormatFlags) -> Self {
        Self {
            out: Mutex::new(out),
            prefix: prefix.into(),
            flags,
        }
    }

    pub fn flags(&self) -> FormatFlags {
        self.flags
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Build the complete output line, newline included
    pub(crate) fn render(&self, record: &LineRecord<'_>) -> String {
        let mut line = String::with_capacity(self.prefix.len() + record.message.len() + 48);

        if !self.flags.contains(FormatFlags::MSG_PREFIX) {
            line.push_str(&self.prefix);
        }

        if self
            .flags
            .intersects(FormatFlags::DATE | FormatFlags::TIME | FormatFlags::MICROSECONDS)
        {
            if self.flags.contains(FormatFlags::UTC) {
                push_timestamp(&mut line, &record.time, self.flags);
            } else {
                push_timestamp(&mut line, &record.time.with_timezone(&Local), self.flags);
            }
        }

        if self
            .flags
            .intersects(FormatFlags::SHORT_FILE | FormatFlags::LONG_FILE)
        {
            let file = record.location.file();
            let file = if self.flags.contains(FormatFlags::SHORT_FILE) {
                file.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(file)
            } else {
                file
            };
            let _ = write!(line, "{}:{}: ", file, record.location.line());
        }

        if self.flags.contains(FormatFlags::MSG_PREFIX) {
            line.push_str(&self.prefix);
        }

        line.push_str(record.message);
        if !record.message.ends_with('\n') {
            line.push('\n');
        }
        line
    }
}

impl<W: Write + Send> LineWriter for StreamWriter<W> {
    fn write_line(&self, record: &LineRecord<'_>) {
        let line = self.render(record);
        let mut out = self.out.lock();
        // A closed pipe or full disk is the writer's problem, not the caller's
        let _ = out.write_all(line.as_bytes());
        let _ = out.flush();
    }
}

fn push_timestamp<Tz>(line: &mut String, time: &DateTime<Tz>, flags: FormatFlags)
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if flags.contains(FormatFlags::DATE) {
        let _ = write!(line, "{} ", time.format("%Y/%m/%d"));
    }
    if flags.intersects(FormatFlags::TIME | FormatFlags::MICROSECONDS) {
        let _ = write!(line, "{}", time.format("%H:%M:%S"));
        if flags.contains(FormatFlags::MICROSECONDS) {
            let _ = write!(line, "{}", time.format("%.6f"));
        }
        line.push(' ');
    }
}
