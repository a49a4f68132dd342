//! Appender trait for log output destinations

use super::{error::Result, log_event::LogEvent};

/// A sink that receives every event passing its transport's threshold.
///
/// `line` is the formatted text line shared by all text-mode sinks; sinks
/// that write a different shape (JSON) derive it from `event`.
pub trait Appender: Send + Sync {
    fn append(&mut self, event: &LogEvent, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}

/// Line terminator written after every record
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";

/// Line terminator written after every record
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";
