//! Logger configuration
//!
//! Everything that can be expressed as data lives here and may be loaded from
//! JSON. Closures (handlers, date formatters, clocks) and custom appenders are
//! supplied through [`LoggerBuilder`](super::logger::LoggerBuilder).

use super::error::{LoggerError, Result};
use super::log_level::LevelTable;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default maximum file size in KB before rotation
pub const DEFAULT_MAX_SIZE_KB: u64 = 1000;

/// Default number of rotated backups kept
pub const DEFAULT_MAX_ROTATION: usize = 5;

pub const DEFAULT_CATEGORY: &str = "main";
pub const DEFAULT_LEVEL: &str = "all";

/// Top-level logger configuration
///
/// # Example
///
/// ```
/// use fanout_logger::{LoggerConfig, TransportConfig};
///
/// let config = LoggerConfig::from_json(r#"{
///     "category": "api",
///     "transports": [
///         { "type": "console", "level": "info" },
///         { "type": "file", "filePath": "/tmp/api.log", "maxSize": 10, "writeJson": true }
///     ]
/// }"#).unwrap();
///
/// assert_eq!(config.category, "api");
/// assert!(matches!(config.transports[1], TransportConfig::File(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggerConfig {
    /// Category stamped on events that do not override it
    pub category: String,
    /// Default threshold for transports that do not set their own
    pub level: String,
    /// Custom level names, lowest first; the built-in table when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<String>>,
    pub transports: Vec<TransportConfig>,
    /// strftime pattern used instead of the default timestamp rendering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_pattern: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            level: DEFAULT_LEVEL.to_string(),
            levels: None,
            transports: Vec::new(),
            date_pattern: None,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the level table this configuration describes
    pub fn level_table(&self) -> Result<LevelTable> {
        match &self.levels {
            Some(names) => LevelTable::new(names.iter().cloned()),
            None => Ok(LevelTable::default()),
        }
    }

    /// Check the configuration for errors that would prevent construction
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::InvalidConfiguration`] when a file transport has
    /// no path or the custom level table is malformed.
    pub fn validate(&self) -> Result<()> {
        self.level_table()?;
        for transport in &self.transports {
            transport.validate()?;
        }
        Ok(())
    }
}

/// One configured destination, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    Console(ConsoleTransportConfig),
    File(FileTransportConfig),
}

impl TransportConfig {
    pub fn console() -> Self {
        TransportConfig::Console(ConsoleTransportConfig::default())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        TransportConfig::File(FileTransportConfig::new(path))
    }

    /// Threshold set on the transport itself, if any
    pub fn level(&self) -> Option<&str> {
        match self {
            TransportConfig::Console(c) => c.level.as_deref(),
            TransportConfig::File(f) => f.level.as_deref(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            TransportConfig::Console(_) => Ok(()),
            TransportConfig::File(f) => f.validate(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsoleTransportConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Colour the line by level (requires the `console` feature)
    pub colors: bool,
}

impl ConsoleTransportConfig {
    #[must_use = "builder methods return a new value"]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }
}

/// File destination with size-triggered rotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileTransportConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    pub file_path: PathBuf,
    /// Rotation threshold in KB; 0 means the default
    pub max_size: u64,
    /// Number of numbered backups; 0 means the default
    pub max_rotation: usize,
    /// Write one JSON object per line instead of the text line
    pub write_json: bool,
}

impl Default for FileTransportConfig {
    fn default() -> Self {
        Self {
            level: None,
            file_path: PathBuf::new(),
            max_size: DEFAULT_MAX_SIZE_KB,
            max_rotation: DEFAULT_MAX_ROTATION,
            write_json: false,
        }
    }
}

impl FileTransportConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: path.into(),
            ..Self::default()
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_max_size(mut self, kb: u64) -> Self {
        self.max_size = kb;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_max_rotation(mut self, count: usize) -> Self {
        self.max_rotation = count;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_json(mut self, write_json: bool) -> Self {
        self.write_json = write_json;
        self
    }

    /// Rotation threshold in bytes
    pub fn max_bytes(&self) -> u64 {
        let kb = if self.max_size == 0 {
            DEFAULT_MAX_SIZE_KB
        } else {
            self.max_size
        };
        kb.saturating_mul(1024)
    }

    pub fn effective_max_rotation(&self) -> usize {
        if self.max_rotation == 0 {
            DEFAULT_MAX_ROTATION
        } else {
            self.max_rotation
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.file_path.as_os_str().is_empty() {
            return Err(LoggerError::config(
                "FileTransport",
                "log file path must be provided",
            ));
        }
        Ok(())
    }
}
