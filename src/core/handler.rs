//! Programmatic log handlers

use super::log_event::LogEvent;
use super::log_level::LevelTable;
use std::fmt;
use std::sync::Arc;

/// Callback notified with every matching event
pub type LogHandlerFn = Arc<dyn Fn(&LogEvent) + Send + Sync>;

/// Identifies a registered handler for removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub(crate) u64);

/// Filters applied before a handler is invoked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerOptions {
    /// Minimum level; `all` when unset
    pub level: Option<String>,
    /// Exact category match; any category when unset
    pub category: Option<String>,
}

impl HandlerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: impl AsRef<str>) -> Self {
        self.level = Some(level.as_ref().to_string());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

pub(crate) struct HandlerRegistration {
    pub(crate) id: HandlerId,
    callback: LogHandlerFn,
    threshold_rank: usize,
    category: Option<String>,
}

impl HandlerRegistration {
    pub(crate) fn new(
        id: HandlerId,
        callback: LogHandlerFn,
        options: &HandlerOptions,
        levels: &LevelTable,
    ) -> Self {
        let threshold_rank = options
            .level
            .as_deref()
            .map(|l| levels.resolve(l))
            .unwrap_or(0);

        Self {
            id,
            callback,
            threshold_rank,
            category: options.category.clone(),
        }
    }

    pub(crate) fn accepts(&self, category: &str, event_rank: usize, levels: &LevelTable) -> bool {
        if let Some(ref wanted) = self.category {
            if wanted != category {
                return false;
            }
        }
        levels.allows(event_rank, self.threshold_rank)
    }

    pub(crate) fn notify(&self, event: &LogEvent) {
        (self.callback)(event)
    }
}

impl fmt::Debug for HandlerRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistration")
            .field("id", &self.id)
            .field("threshold_rank", &self.threshold_rank)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(options: HandlerOptions) -> HandlerRegistration {
        HandlerRegistration::new(
            HandlerId(1),
            Arc::new(|_: &LogEvent| {}),
            &options,
            &LevelTable::default(),
        )
    }

    #[test]
    fn test_level_filter() {
        let levels = LevelTable::default();
        let reg = registration(HandlerOptions::new().level("warn"));
        assert!(!reg.accepts("main", levels.resolve("info"), &levels));
        assert!(reg.accepts("main", levels.resolve("warn"), &levels));
        assert!(reg.accepts("main", levels.resolve("error"), &levels));
    }

    #[test]
    fn test_category_filter_is_exact() {
        let levels = LevelTable::default();
        let reg = registration(HandlerOptions::new().category("notFound"));
        for level in levels.names() {
            assert!(!reg.accepts("main", levels.resolve(level), &levels));
        }
        assert!(reg.accepts("notFound", levels.resolve("info"), &levels));
        assert!(!reg.accepts("notFound.child", levels.resolve("info"), &levels));
    }

    #[test]
    fn test_defaults_accept_everything() {
        let levels = LevelTable::default();
        let reg = registration(HandlerOptions::default());
        assert!(reg.accepts("anything", 0, &levels));
    }
}
