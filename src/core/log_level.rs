//! Log level definitions and the ordered level table

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in severities, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    All = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
    Off = 6,
}

impl LogLevel {
    /// Every built-in level in rank order
    pub const LEVELS: [LogLevel; 7] = [
        LogLevel::All,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
        LogLevel::Off,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::All => "all",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
            LogLevel::Off => "off",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::All => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal | LogLevel::Off => BrightRed,
        }
    }
}

impl AsRef<str> for LogLevel {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(LogLevel::All),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            "off" => Ok(LogLevel::Off),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Ordered list of level names, lowest severity first.
///
/// Answers "is severity X permitted at threshold Y". Unknown names resolve to
/// the lowest rank so that malformed input never fails a logging call. When
/// the table contains `off`, a threshold of `off` matches nothing.
///
/// # Example
///
/// ```
/// use fanout_logger::LevelTable;
///
/// let table = LevelTable::default();
/// let warn = table.resolve("warn");
/// assert!(table.allows(table.resolve("error"), warn));
/// assert!(!table.allows(table.resolve("info"), warn));
/// assert_eq!(table.resolve("verbose"), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    names: Vec<String>,
    off: Option<usize>,
}

impl LevelTable {
    /// Build a custom table from names ordered lowest to highest.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the list is empty or contains a
    /// duplicate (case-insensitive) name.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collected: Vec<String> = Vec::new();
        for name in names {
            let name = name.into().to_lowercase();
            if name.is_empty() {
                return Err(LoggerError::config("LevelTable", "level names must not be empty"));
            }
            if collected.contains(&name) {
                return Err(LoggerError::config(
                    "LevelTable",
                    format!("duplicate level name '{}'", name),
                ));
            }
            collected.push(name);
        }

        if collected.is_empty() {
            return Err(LoggerError::config("LevelTable", "at least one level is required"));
        }

        let off = collected.iter().position(|n| n == LogLevel::Off.as_str());
        Ok(Self { names: collected, off })
    }

    /// Rank of `level`, or `None` if the table does not know it
    pub fn rank(&self, level: &str) -> Option<usize> {
        self.names.iter().position(|n| n.eq_ignore_ascii_case(level))
    }

    /// Rank of `level`, falling back to the lowest rank for unknown names
    pub fn resolve(&self, level: &str) -> usize {
        self.rank(level).unwrap_or(0)
    }

    /// Name at `rank`; out-of-range ranks clamp to the highest level
    pub fn name(&self, rank: usize) -> &str {
        let idx = rank.min(self.names.len() - 1);
        &self.names[idx]
    }

    pub fn allows(&self, event_rank: usize, threshold_rank: usize) -> bool {
        if self.off == Some(threshold_rank) {
            return false;
        }
        event_rank >= threshold_rank
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            names: LogLevel::LEVELS.iter().map(|l| l.as_str().to_string()).collect(),
            off: Some(LogLevel::Off as usize),
        }
    }
}
