//! Unconditional logger for code that has no leveled logger at hand
//!
//! Nothing here is gated or decorated: print calls always write, panic calls
//! always write and then panic, fatal calls always write and then exit.
//! Everything is synchronous.

use std::fmt::{self, Display};
use std::panic::Location;
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::core::FATAL_EXIT_CODE;
use super::flags::FormatFlags;
use super::format::Message;
use super::sink::{LineRecord, LineWriter, StreamWriter};

static GLOBAL: Lazy<StandardLogger> =
    Lazy::new(|| StandardLogger::new(Arc::new(StreamWriter::stderr(FormatFlags::STANDARD))));

#[derive(Clone)]
pub struct StandardLogger {
    sink: Arc<dyn LineWriter>,
}

impl StandardLogger {
    pub fn new(sink: Arc<dyn LineWriter>) -> Self {
        Self { sink }
    }

    /// Process-wide instance writing to stderr with date and time, created on first use
    pub fn global() -> &'static StandardLogger {
        &GLOBAL
    }

    #[track_caller]
    pub fn print(&self, values: &[&dyn Display]) {
        self.write(Message::Plain(values).render(""));
    }

    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.write(Message::Formatted(args).render(""));
    }

    #[track_caller]
    pub fn println(&self, values: &[&dyn Display]) {
        self.write(Message::Joined(values).render(""));
    }

    #[track_caller]
    pub fn panic(&self, values: &[&dyn Display]) -> ! {
        self.write_and_panic(Message::Plain(values).render(""))
    }

    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.write_and_panic(Message::Formatted(args).render(""))
    }

    #[track_caller]
    pub fn panicln(&self, values: &[&dyn Display]) -> ! {
        self.write_and_panic(Message::Joined(values).render(""))
    }

    #[track_caller]
    pub fn fatal(&self, values: &[&dyn Display]) -> ! {
        self.write_and_exit(Message::Plain(values).render(""))
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.write_and_exit(Message::Formatted(args).render(""))
    }

    #[track_caller]
    pub fn fatalln(&self, values: &[&dyn Display]) -> ! {
        self.write_and_exit(Message::Joined(values).render(""))
    }

    #[track_caller]
    fn write(&self, line: String) {
        self.sink
            .write_line(&LineRecord::now(&line, Location::caller()));
    }

    #[track_caller]
    fn write_and_panic(&self, line: String) -> ! {
        self.write(line.clone());
        panic!("{}", line);
    }

    #[track_caller]
    fn write_and_exit(&self, line: String) -> ! {
        self.write(line);
        std::process::exit(FATAL_EXIT_CODE);
    }
}
