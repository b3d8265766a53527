//! Logger configuration, loadable from TOML
//!
//! ```toml
//! prefix = "svc"
//! level = "Warn"
//! flags = ["StandardFlags", "IncludeShortFileName"]
//! workers = 2
//! queue_capacity = 1024
//! ```
//!
//! Missing keys take their defaults. Names are validated when the logger is
//! built, so a bad level or flag fails construction rather than parsing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::dispatch::{DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS};
use super::error::{ConfigError, ConfigResult};
use super::flags::FormatFlags;
use super::levels::Severity;

/// Settings for one leveled logger (the sink itself is supplied in code)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Text placed after the severity label on every line
    pub prefix: String,
    /// Minimum severity name: Off, Panic, Fatal, Error, Warn, Info or Debug
    pub level: String,
    /// Stream writer annotations, by name
    pub flags: Vec<String>,
    /// Background writer threads
    pub workers: usize,
    /// Lines the background queue holds before writes fall back to the caller
    pub queue_capacity: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            level: Severity::Info.config_name().to_string(),
            flags: vec!["StandardFlags".to_string()],
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

impl LoggerConfig {
    /// Parse a TOML document
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str::<LoggerConfig>(contents)?)
    }

    /// Read and parse a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Threshold named by `level`
    pub fn severity(&self) -> ConfigResult<Severity> {
        self.level.parse()
    }

    /// Flags named by `flags`
    pub fn format_flags(&self) -> ConfigResult<FormatFlags> {
        FormatFlags::from_names(&self.flags)
    }
}
