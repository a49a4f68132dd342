//! Structured context fields attached to log events

use super::data_formatter;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Insertion-ordered named fields describing the circumstances of an event.
///
/// Child loggers hold a creation-time context; call sites may supply another
/// one. The two are combined with [`LogContext::overlay`], where call-site
/// fields win.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogContext {
    fields: Map<String, Value>,
}

impl LogContext {
    /// Create a new empty log context
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field to the context (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Get all fields
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if context has any fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Format fields as `key=<json>` pairs joined by `", "`
    pub fn format_fields(&self) -> String {
        data_formatter::format_fields(&self.fields)
    }

    /// Layer `top` over `base`.
    ///
    /// Fields in `top` replace same-named fields in `base`; a replaced field
    /// keeps the position it had in `base`. Returns `None` only when both
    /// layers are absent.
    pub fn overlay(base: Option<&LogContext>, top: Option<&LogContext>) -> Option<LogContext> {
        match (base, top) {
            (None, None) => None,
            (Some(b), None) => Some(b.clone()),
            (None, Some(t)) => Some(t.clone()),
            (Some(b), Some(t)) => {
                let mut merged = b.clone();
                for (key, value) in t.fields.iter() {
                    merged.fields.insert(key.clone(), value.clone());
                }
                Some(merged)
            }
        }
    }
}

impl From<Map<String, Value>> for LogContext {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for LogContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}
