//! Leveled logging over a line writer
//!
//! This module provides:
//! - Severity gating (Off/Panic/Fatal/Error/Warn/Info/Debug)
//! - Level and prefix decoration of every line
//! - Plain, formatted (`*f`) and joined (`*ln`) forms of each call
//! - Background writes for Error/Warn/Info/Debug through a bounded worker pool
//! - A stream writer honouring date/time/file/UTC flags
//!
//! ## Usage
//!
//! ```rust
//! use levelog::{FormatFlags, LeveledLogger, SharedBuffer};
//!
//! let out = SharedBuffer::new();
//! let log = LeveledLogger::new(out.clone(), "svc", "Warn", FormatFlags::empty())?;
//!
//! log.info(&[&"filtered out"]);
//! log.warn(&[&"disk", &"low"]);
//! log.flush();
//!
//! assert_eq!(out.contents(), "WARN svc disk low\n");
//! # Ok::<(), levelog::ConfigError>(())
//! ```
//!
//! ## Shutdown
//!
//! Error/Warn/Info/Debug calls return before their line is written. Call
//! `flush()` (or `shutdown()`) before exiting so nothing queued is lost.
//! Fatal calls drain the queue themselves before exiting.

mod buffer;
mod config;
mod core;
mod dispatch;
mod error;
mod flags;
mod format;
mod levels;
mod macros;
mod sink;
mod standard;

pub use buffer::{MemoryWriter, SharedBuffer};
pub use config::LoggerConfig;
pub use self::core::{LeveledLogger, FATAL_EXIT_CODE};
pub use dispatch::{Dispatcher, DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS};
pub use error::{ConfigError, ConfigResult};
pub use flags::FormatFlags;
pub use levels::Severity;
pub use sink::{LineRecord, LineWriter, StreamWriter};
pub use standard::StandardLogger;
