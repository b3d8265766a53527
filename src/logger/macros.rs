//! Formatting shorthands
//!
//! ```rust
//! use levelog::{warnf, FormatFlags, LeveledLogger};
//!
//! let log = LeveledLogger::new(std::io::stderr(), "svc", "Warn", FormatFlags::empty())?;
//! let used = 93;
//! warnf!(log, "disk {}% full", used);
//! log.flush();
//! # Ok::<(), levelog::ConfigError>(())
//! ```

/// Log a formatted message at Error severity
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at Warn severity
#[macro_export]
macro_rules! warnf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at Info severity
#[macro_export]
macro_rules! infof {
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message at Debug severity
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message, then panic with it
#[macro_export]
macro_rules! panicf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.panicf(::std::format_args!($($arg)+))
    };
}

/// Log a formatted message, then exit the process
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(::std::format_args!($($arg)+))
    };
}

/// Write a formatted message with no gate and no decoration
#[macro_export]
macro_rules! printf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.printf(::std::format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::logger::{FormatFlags, LeveledLogger, SharedBuffer, StandardLogger, StreamWriter};
    use std::sync::Arc;

    #[test]
    fn test_macros_forward_to_the_formatted_methods() {
        let buffer = SharedBuffer::new();
        let log = LeveledLogger::new(buffer.clone(), "m", "Debug", FormatFlags::empty()).unwrap();
        errorf!(log, "e{}", 1);
        log.flush();
        warnf!(log, "w{}", 2);
        log.flush();
        infof!(log, "i{}", 3);
        log.flush();
        debugf!(log, "d{}", 4);
        log.flush();
        printf!(log, "p{}", 5);
        assert_eq!(
            buffer.lines(),
            vec!["ERROR m e1", "WARN m w2", "INFO m i3", "DEBUG m d4", "p5"]
        );
    }

    #[test]
    fn test_printf_on_the_standard_logger() {
        let buffer = SharedBuffer::new();
        let log = StandardLogger::new(Arc::new(StreamWriter::new(
            buffer.clone(),
            "",
            FormatFlags::empty(),
        )));
        let name = "x";
        printf!(log, "{name}={}", 1);
        assert_eq!(buffer.contents(), "x=1\n");
    }
}
