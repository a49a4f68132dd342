//! Log event record and per-call options

use super::log_context::LogContext;
use super::log_data::LogData;
use chrono::{DateTime, Local};
use serde::Serialize;

/// Immutable record built once per logging call.
///
/// Transports and handlers receive it by reference; the engine keeps nothing
/// after the call returns.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    pub timestamp: DateTime<Local>,
    /// Resolved level name (unknown levels become the lowest level)
    pub level: String,
    pub category: String,
    pub message: String,
    pub context: Option<LogContext>,
    pub data: Option<LogData>,
}

/// Wire shape of a JSON log line
#[derive(Serialize)]
struct JsonRecord<'a> {
    timestamp: i64,
    level: &'a str,
    category: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a LogContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a LogData>,
}

impl LogEvent {
    pub fn new(
        timestamp: DateTime<Local>,
        level: impl Into<String>,
        category: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            level: level.into(),
            category: category.into(),
            message: message.into(),
            context: None,
            data: None,
        }
    }

    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_data(mut self, data: impl Into<LogData>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Seconds since the Unix epoch
    pub fn epoch_seconds(&self) -> i64 {
        self.timestamp.timestamp()
    }

    /// Serialize as `{timestamp, level, category, message, context?, data?}`
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&JsonRecord {
            timestamp: self.epoch_seconds(),
            level: &self.level,
            category: &self.category,
            message: &self.message,
            context: self.context.as_ref(),
            data: self.data.as_ref(),
        })
    }
}

/// Optional parts of a logging call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogOptions {
    /// Replaces the logger's category for this call
    pub category: Option<String>,
    pub context: Option<LogContext>,
    pub data: Option<LogData>,
}

impl LogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn context(mut self, context: LogContext) -> Self {
        self.context = Some(context);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn data(mut self, data: impl Into<LogData>) -> Self {
        self.data = Some(data.into());
        self
    }
}
