//! Human-readable log line composition
//!
//! Layout: `<timestamp> [<LEVEL>] (<category>)\t<message>[, <context>][, <data>]`

use super::data_formatter::format_data;
use super::log_event::LogEvent;
use super::timestamp::DateFormatter;
use serde_json::Value;

/// Build the text line for an event (without line terminator)
pub fn build_log_string(event: &LogEvent, date_formatter: &DateFormatter) -> String {
    let mut line = format!(
        "{} [{}] ({})\t{}",
        date_formatter.format(&event.timestamp),
        event.level.to_uppercase(),
        event.category,
        event.message
    );

    if let Some(ref context) = event.context {
        if !context.is_empty() {
            line.push_str(", ");
            line.push_str(&context.format_fields());
        }
    }

    if let Some(ref data) = event.data {
        if !data.as_value().is_some_and(Value::is_null) {
            line.push_str(", ");
            line.push_str(&format_data(data));
        }
    }

    line
}
