//! Timestamp formatting for log lines
//!
//! The default rendering is `YYYY-MM-DD HH:MM:SS±ZZZZ` in local time. A
//! strftime pattern or an arbitrary closure may replace it.

use chrono::{DateTime, Local};
use std::fmt::{self, Write};
use std::sync::Arc;

/// Default strftime pattern: `2025-01-08 10:30:45+0100`
pub const DEFAULT_TIMESTAMP_PATTERN: &str = "%Y-%m-%d %H:%M:%S%z";

/// Caller-supplied timestamp renderer
pub type DateFormatFn = Arc<dyn Fn(&DateTime<Local>) -> String + Send + Sync>;

/// Source of event timestamps
pub type Clock = Arc<dyn Fn() -> DateTime<Local> + Send + Sync>;

/// How an event timestamp is rendered in a log line
///
/// # Examples
///
/// ```
/// use fanout_logger::DateFormatter;
/// use chrono::{Local, TimeZone};
///
/// let at = Local.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
///
/// let pattern = DateFormatter::pattern("%d/%m/%Y");
/// assert_eq!(pattern.format(&at), "08/01/2025");
///
/// let custom = DateFormatter::custom(|d| d.format("%H:%M").to_string());
/// assert_eq!(custom.format(&at), "10:30");
///
/// assert!(DateFormatter::Default.format(&at).starts_with("2025-01-08 10:30:45"));
/// ```
#[derive(Clone, Default)]
pub enum DateFormatter {
    /// [`DEFAULT_TIMESTAMP_PATTERN`] in local time
    #[default]
    Default,

    /// Custom strftime pattern
    Pattern(String),

    /// Arbitrary rendering function
    Custom(DateFormatFn),
}

impl DateFormatter {
    pub fn pattern(pattern: impl Into<String>) -> Self {
        DateFormatter::Pattern(pattern.into())
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&DateTime<Local>) -> String + Send + Sync + 'static,
    {
        DateFormatter::Custom(Arc::new(f))
    }

    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        match self {
            DateFormatter::Default => datetime.format(DEFAULT_TIMESTAMP_PATTERN).to_string(),
            DateFormatter::Pattern(p) => {
                // Malformed patterns fall back to the default rendering
                let mut out = String::new();
                match write!(out, "{}", datetime.format(p)) {
                    Ok(()) => out,
                    Err(_) => datetime.format(DEFAULT_TIMESTAMP_PATTERN).to_string(),
                }
            }
            DateFormatter::Custom(f) => f(datetime),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, DateFormatter::Default)
    }
}

impl From<Option<DateFormatFn>> for DateFormatter {
    fn from(f: Option<DateFormatFn>) -> Self {
        match f {
            Some(f) => DateFormatter::Custom(f),
            None => DateFormatter::Default,
        }
    }
}

impl fmt::Debug for DateFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateFormatter::Default => f.write_str("Default"),
            DateFormatter::Pattern(p) => f.debug_tuple("Pattern").field(p).finish(),
            DateFormatter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Clock reading the current local time
pub fn system_clock() -> Clock {
    Arc::new(Local::now)
}
