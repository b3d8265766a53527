use thiserror::Error;

/// Errors raised while building a logger
///
/// A failed constructor never hands back a logger, so there is no half-configured state.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown log level {0:?} (expected Off, Panic, Fatal, Error, Warn, Info or Debug)")]
    UnknownLevel(String),

    #[error("unknown format flag {0:?}")]
    UnknownFlag(String),

    #[error("log dispatcher needs a non-zero {0}")]
    ZeroSized(&'static str),

    #[error("failed to start log worker: {0}")]
    WorkerSpawn(#[from] std::io::Error),

    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid logger config: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
