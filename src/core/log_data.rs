//! Payload values attached to log events

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::error::Error as StdError;
use std::fmt;

/// Printable capture of an error and its source chain.
///
/// Rendered on a single line as `outer: cause: root cause`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    message: String,
    causes: Vec<String>,
}

impl ErrorReport {
    pub fn new<E: StdError + ?Sized>(error: &E) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            message: error.to_string(),
            causes,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn causes(&self) -> &[String] {
        &self.causes
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        for cause in &self.causes {
            write!(f, ": {}", cause)?;
        }
        Ok(())
    }
}

impl Serialize for ErrorReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Arbitrary data carried by a log event.
///
/// JSON values cover strings, numbers, booleans, arrays and objects; errors
/// are captured as an [`ErrorReport`].
///
/// # Example
///
/// ```
/// use fanout_logger::LogData;
/// use serde_json::json;
///
/// let data = LogData::from(json!(["foo", "bar"]));
/// assert_eq!(data.to_string(), r#"["foo","bar"]"#);
///
/// let data = LogData::from(json!({"key": "value", "count": 2}));
/// assert_eq!(data.to_string(), r#"key="value", count=2"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LogData {
    Value(Value),
    Error(ErrorReport),
}

impl LogData {
    /// Capture an error together with its source chain
    pub fn error<E: StdError + ?Sized>(error: &E) -> Self {
        LogData::Error(ErrorReport::new(error))
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            LogData::Value(v) => Some(v),
            LogData::Error(_) => None,
        }
    }
}

impl fmt::Display for LogData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::data_formatter::format_data(self))
    }
}

impl From<Value> for LogData {
    fn from(v: Value) -> Self {
        LogData::Value(v)
    }
}

impl From<ErrorReport> for LogData {
    fn from(report: ErrorReport) -> Self {
        LogData::Error(report)
    }
}

impl From<String> for LogData {
    fn from(s: String) -> Self {
        LogData::Value(Value::String(s))
    }
}

impl From<&str> for LogData {
    fn from(s: &str) -> Self {
        LogData::Value(Value::String(s.to_string()))
    }
}

impl From<i64> for LogData {
    fn from(i: i64) -> Self {
        LogData::Value(Value::from(i))
    }
}

impl From<i32> for LogData {
    fn from(i: i32) -> Self {
        LogData::Value(Value::from(i))
    }
}

impl From<u64> for LogData {
    fn from(i: u64) -> Self {
        LogData::Value(Value::from(i))
    }
}

impl From<f64> for LogData {
    fn from(f: f64) -> Self {
        LogData::Value(Value::from(f))
    }
}

impl From<bool> for LogData {
    fn from(b: bool) -> Self {
        LogData::Value(Value::Bool(b))
    }
}

impl From<super::log_context::LogContext> for LogData {
    fn from(ctx: super::log_context::LogContext) -> Self {
        LogData::Value(Value::Object(ctx.into_fields()))
    }
}
