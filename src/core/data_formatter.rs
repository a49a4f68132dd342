//! Single-line rendering of log payloads
//!
//! Arrays are rendered whole as JSON, while objects are exploded into
//! comma-joined `key=<json>` fragments in insertion order. Scalars render in
//! their plain form (strings unquoted), `null` renders empty and errors render
//! their message chain.

use super::log_data::LogData;
use serde_json::{Map, Value};

/// Render any payload as a single-line fragment
pub fn format_data(data: &LogData) -> String {
    match data {
        LogData::Value(value) => format_value(value),
        LogData::Error(report) => report.to_string(),
    }
}

/// Render a JSON value following the payload rules
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Array(_) => to_json(value),
        Value::Object(fields) => format_fields(fields),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
    }
}

/// Render named fields as `key=<json>` joined by `", "`
pub fn format_fields(fields: &Map<String, Value>) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, to_json(v)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn to_json(value: &Value) -> String {
    // Serializing a `Value` cannot fail: keys are always strings.
    serde_json::to_string(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_is_empty() {
        assert_eq!(format_value(&Value::Null), "");
    }

    #[test]
    fn test_array_rendered_whole() {
        assert_eq!(format_value(&json!(["foo", "bar"])), r#"["foo","bar"]"#);
        assert_eq!(format_value(&json!([])), "[]");
    }

    #[test]
    fn test_object_exploded_per_key() {
        let data = json!({"key": "value", "nestedData": {"nestedValue": [1, 2, 3]}});
        assert_eq!(
            format_value(&data),
            r#"key="value", nestedData={"nestedValue":[1,2,3]}"#
        );
    }

    #[test]
    fn test_object_keeps_insertion_order() {
        let data = json!({"zeta": 1, "alpha": 2, "mid": 3});
        assert_eq!(format_value(&data), "zeta=1, alpha=2, mid=3");
    }

    #[test]
    fn test_scalars_plain() {
        assert_eq!(format_value(&json!("hello world")), "hello world");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!(1.5)), "1.5");
        assert_eq!(format_value(&json!(false)), "false");
    }

    #[test]
    fn test_error_payload() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        assert_eq!(format_data(&LogData::error(&err)), "disk on fire");
    }
}
