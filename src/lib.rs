pub mod logger;

pub use logger::{
    ConfigError, ConfigResult, Dispatcher, FormatFlags, LeveledLogger, LineRecord, LineWriter,
    LoggerConfig, MemoryWriter, Severity, SharedBuffer, StandardLogger, StreamWriter,
    DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS, FATAL_EXIT_CODE,
};
