//! Main logger implementation
//!
//! A [`Logger`] owns the category, level table, transports and handlers. Every
//! call is dispatched synchronously: the event is built, formatted once, written
//! to each transport whose threshold it passes (in registration order), and then
//! handed to each matching handler (in registration order).

use super::{
    appender::Appender,
    child::ChildLogger,
    config::{LoggerConfig, TransportConfig},
    error::Result,
    handler::{HandlerId, HandlerOptions, HandlerRegistration, LogHandlerFn},
    log_context::LogContext,
    log_data::LogData,
    log_event::{LogEvent, LogOptions},
    log_level::{LevelTable, LogLevel},
    log_string::build_log_string,
    metrics::LoggerMetrics,
    timestamp::{system_clock, Clock, DateFormatFn, DateFormatter},
};
use crate::appenders::{ConsoleAppender, RotatingFileAppender};
use chrono::{DateTime, Local};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Entry points shared by [`Logger`] and [`ChildLogger`].
///
/// Implementors provide [`dispatch`](LogTarget::dispatch); the per-level
/// shorthands forward to it. Level names are resolved against the logger's
/// level table, so custom levels go through [`log`](LogTarget::log).
pub trait LogTarget {
    fn dispatch(&self, level: &str, message: String, options: LogOptions) -> Result<()>;

    fn log(&self, level: impl AsRef<str>, message: impl Into<String>) -> Result<()> {
        self.dispatch(level.as_ref(), message.into(), LogOptions::default())
    }

    fn log_with(
        &self,
        level: impl AsRef<str>,
        message: impl Into<String>,
        data: impl Into<LogData>,
    ) -> Result<()> {
        self.dispatch(level.as_ref(), message.into(), LogOptions::new().data(data))
    }

    #[inline]
    fn all(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::All, message)
    }

    #[inline]
    fn all_with(&self, message: impl Into<String>, data: impl Into<LogData>) -> Result<()> {
        self.log_with(LogLevel::All, message, data)
    }

    #[inline]
    fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Debug, message)
    }

    #[inline]
    fn debug_with(&self, message: impl Into<String>, data: impl Into<LogData>) -> Result<()> {
        self.log_with(LogLevel::Debug, message, data)
    }

    #[inline]
    fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Info, message)
    }

    #[inline]
    fn info_with(&self, message: impl Into<String>, data: impl Into<LogData>) -> Result<()> {
        self.log_with(LogLevel::Info, message, data)
    }

    #[inline]
    fn warn(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Warn, message)
    }

    #[inline]
    fn warn_with(&self, message: impl Into<String>, data: impl Into<LogData>) -> Result<()> {
        self.log_with(LogLevel::Warn, message, data)
    }

    #[inline]
    fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Error, message)
    }

    #[inline]
    fn error_with(&self, message: impl Into<String>, data: impl Into<LogData>) -> Result<()> {
        self.log_with(LogLevel::Error, message, data)
    }

    #[inline]
    fn fatal(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Fatal, message)
    }

    #[inline]
    fn fatal_with(&self, message: impl Into<String>, data: impl Into<LogData>) -> Result<()> {
        self.log_with(LogLevel::Fatal, message, data)
    }
}

/// Stable identifier joining a transport's configuration to its runtime state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransportId(usize);

impl TransportId {
    pub fn index(&self) -> usize {
        self.0
    }
}

struct TransportSlot {
    id: TransportId,
    threshold_rank: usize,
    appender: Box<dyn Appender>,
}

pub struct Logger {
    category: String,
    level: String,
    levels: LevelTable,
    transports: Mutex<Vec<TransportSlot>>,
    handlers: RwLock<Vec<Arc<HandlerRegistration>>>,
    next_handler_id: AtomicU64,
    date_formatter: RwLock<DateFormatter>,
    clock: Clock,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    /// Logger with category `main`, threshold `all` and no transports
    #[must_use]
    pub fn new() -> Self {
        Self {
            category: super::config::DEFAULT_CATEGORY.to_string(),
            level: super::config::DEFAULT_LEVEL.to_string(),
            levels: LevelTable::default(),
            transports: Mutex::new(Vec::new()),
            handlers: RwLock::new(Vec::new()),
            next_handler_id: AtomicU64::new(0),
            date_formatter: RwLock::new(DateFormatter::Default),
            clock: system_clock(),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// Construct a logger from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a file transport without a path or
    /// a malformed level table, and an I/O error if a log file cannot be
    /// opened.
    pub fn from_config(config: LoggerConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use fanout_logger::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .category("api")
    ///     .transport(TransportConfig::Console(
    ///         ConsoleTransportConfig::default().with_level("warn"),
    ///     ))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(logger.category(), "api");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Default threshold applied to transports without their own level
    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn transport_count(&self) -> usize {
        self.transports.lock().len()
    }

    /// Transport identifiers and sink names in registration order
    pub fn transports(&self) -> Vec<(TransportId, String)> {
        self.transports
            .lock()
            .iter()
            .map(|slot| (slot.id, slot.appender.name().to_string()))
            .collect()
    }

    /// Register a handler notified with every event that passes `options`.
    ///
    /// Handlers run synchronously after the transports, in registration
    /// order. A panic inside a handler propagates to the logging call.
    pub fn add_log_handler<F>(&self, handler: F, options: HandlerOptions) -> HandlerId
    where
        F: Fn(&LogEvent) + Send + Sync + 'static,
    {
        self.register_handler(Arc::new(handler), &options)
    }

    fn register_handler(&self, callback: LogHandlerFn, options: &HandlerOptions) -> HandlerId {
        let id = HandlerId(self.next_handler_id.fetch_add(1, Ordering::Relaxed));
        let registration = HandlerRegistration::new(id, callback, options, &self.levels);
        self.handlers.write().push(Arc::new(registration));
        id
    }

    /// Remove one handler; returns `false` if it was not registered
    pub fn remove_log_handler(&self, id: HandlerId) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|h| h.id != id);
        handlers.len() != before
    }

    pub fn clear_log_handlers(&self) {
        self.handlers.write().clear();
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Install a custom timestamp renderer, or restore the default with `None`
    pub fn set_date_formatter(&self, formatter: Option<DateFormatFn>) {
        *self.date_formatter.write() = DateFormatter::from(formatter);
    }

    pub fn set_timestamp_format(&self, formatter: DateFormatter) {
        *self.date_formatter.write() = formatter;
    }

    pub fn date_formatter(&self) -> DateFormatter {
        self.date_formatter.read().clone()
    }

    /// Render an event the way text transports receive it
    pub fn build_log_string(&self, event: &LogEvent) -> String {
        build_log_string(event, &self.date_formatter.read())
    }

    /// Current time according to the logger's clock
    pub fn now(&self) -> DateTime<Local> {
        (self.clock)()
    }

    /// Derive a view that logs under `category` with `context` merged into
    /// every event
    pub fn get_child_logger(
        &self,
        category: impl Into<String>,
        context: Option<LogContext>,
    ) -> ChildLogger<'_> {
        ChildLogger::new(self, category.into(), context)
    }

    pub fn flush(&self) -> Result<()> {
        let mut transports = self.transports.lock();
        for slot in transports.iter_mut() {
            slot.appender.flush()?;
        }
        Ok(())
    }

    pub(crate) fn exec(&self, level: &str, message: String, options: LogOptions) -> Result<()> {
        let rank = self.levels.resolve(level);
        let LogOptions {
            category,
            context,
            data,
        } = options;

        let event = LogEvent {
            timestamp: self.now(),
            level: self.levels.name(rank).to_string(),
            category: category.unwrap_or_else(|| self.category.clone()),
            message,
            context,
            data,
        };
        self.metrics.record_event();

        let line = self.build_log_string(&event);

        {
            let mut transports = self.transports.lock();
            for slot in transports.iter_mut() {
                if !self.levels.allows(rank, slot.threshold_rank) {
                    continue;
                }
                if let Err(e) = slot.appender.append(&event, &line) {
                    self.metrics.record_write_failure();
                    return Err(e);
                }
                self.metrics.record_transport_write();
            }
        }

        // Snapshot so handlers may register or log without deadlocking
        let handlers: Vec<Arc<HandlerRegistration>> = self.handlers.read().clone();
        for handler in handlers.iter() {
            if handler.accepts(&event.category, rank, &self.levels) {
                handler.notify(&event);
                self.metrics.record_handler_notification();
            }
        }

        Ok(())
    }
}

impl LogTarget for Logger {
    fn dispatch(&self, level: &str, message: String, options: LogOptions) -> Result<()> {
        self.exec(level, message, options)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }

        let failures = self.metrics.write_failures();
        if failures > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down after {} failed writes (failure rate: {:.2}%)",
                failures,
                self.metrics.failure_rate()
            );
        }
    }
}

enum PendingTransport {
    Config(TransportConfig),
    Custom {
        level: Option<String>,
        appender: Box<dyn Appender>,
    },
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use fanout_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .category("worker")
///     .level("info")
///     .appender(ConsoleAppender::new())
///     .log_handler(|event: &LogEvent| assert_eq!(event.category, "worker"), HandlerOptions::new())
///     .date_pattern("%H:%M:%S")
///     .build()
///     .unwrap();
///
/// logger.info("ready").unwrap();
/// ```
pub struct LoggerBuilder {
    category: String,
    level: String,
    levels: Option<Vec<String>>,
    level_table: Option<LevelTable>,
    transports: Vec<PendingTransport>,
    handlers: Vec<(LogHandlerFn, HandlerOptions)>,
    date_formatter: Option<DateFormatter>,
    clock: Option<Clock>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            category: super::config::DEFAULT_CATEGORY.to_string(),
            level: super::config::DEFAULT_LEVEL.to_string(),
            levels: None,
            level_table: None,
            transports: Vec::new(),
            handlers: Vec::new(),
            date_formatter: None,
            clock: None,
        }
    }

    /// Apply a configuration: scalar options replace the builder's, the
    /// configured transports are appended
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.category = config.category;
        self.level = config.level;
        if config.levels.is_some() {
            self.levels = config.levels;
        }
        if let Some(pattern) = config.date_pattern {
            self.date_formatter = Some(DateFormatter::Pattern(pattern));
        }
        self.transports
            .extend(config.transports.into_iter().map(PendingTransport::Config));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Default threshold for transports that do not set their own
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: impl AsRef<str>) -> Self {
        self.level = level.as_ref().to_string();
        self
    }

    /// Use a custom ordered level table
    #[must_use = "builder methods return a new value"]
    pub fn levels(mut self, table: LevelTable) -> Self {
        self.level_table = Some(table);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn transport(mut self, transport: TransportConfig) -> Self {
        self.transports.push(PendingTransport::Config(transport));
        self
    }

    /// Add a custom appender using the logger's default threshold
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.transports.push(PendingTransport::Custom {
            level: None,
            appender: Box::new(appender),
        });
        self
    }

    /// Add a custom appender with its own threshold
    #[must_use = "builder methods return a new value"]
    pub fn appender_with_level<A: Appender + 'static>(
        mut self,
        level: impl AsRef<str>,
        appender: A,
    ) -> Self {
        self.transports.push(PendingTransport::Custom {
            level: Some(level.as_ref().to_string()),
            appender: Box::new(appender),
        });
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_handler<F>(mut self, handler: F, options: HandlerOptions) -> Self
    where
        F: Fn(&LogEvent) + Send + Sync + 'static,
    {
        self.handlers.push((Arc::new(handler), options));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn date_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&DateTime<Local>) -> String + Send + Sync + 'static,
    {
        self.date_formatter = Some(DateFormatter::custom(formatter));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn date_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.date_formatter = Some(DateFormatter::pattern(pattern));
        self
    }

    /// Replace the source of event timestamps
    #[must_use = "builder methods return a new value"]
    pub fn clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> DateTime<Local> + Send + Sync + 'static,
    {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Build the Logger, opening every file transport
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration or when a log file cannot be opened.
    pub fn build(self) -> Result<Logger> {
        let levels = match (self.level_table, self.levels) {
            (Some(table), _) => table,
            (None, Some(names)) => LevelTable::new(names)?,
            (None, None) => LevelTable::default(),
        };

        for pending in &self.transports {
            if let PendingTransport::Config(config) = pending {
                config.validate()?;
            }
        }

        let default_rank = levels.resolve(&self.level);
        let mut slots = Vec::with_capacity(self.transports.len());
        for (idx, pending) in self.transports.into_iter().enumerate() {
            let (level, appender): (Option<String>, Box<dyn Appender>) = match pending {
                PendingTransport::Config(TransportConfig::Console(console)) => (
                    console.level,
                    Box::new(ConsoleAppender::with_colors(console.colors)),
                ),
                PendingTransport::Config(TransportConfig::File(file)) => {
                    let appender = RotatingFileAppender::new(&file)?;
                    (file.level, Box::new(appender))
                }
                PendingTransport::Custom { level, appender } => (level, appender),
            };

            let threshold_rank = level
                .as_deref()
                .map(|l| levels.resolve(l))
                .unwrap_or(default_rank);

            slots.push(TransportSlot {
                id: TransportId(idx),
                threshold_rank,
                appender,
            });
        }

        let mut logger = Logger::new();
        logger.category = self.category;
        logger.level = self.level;
        logger.levels = levels;
        logger.transports = Mutex::new(slots);
        if let Some(formatter) = self.date_formatter {
            logger.date_formatter = RwLock::new(formatter);
        }
        if let Some(clock) = self.clock {
            logger.clock = clock;
        }

        for (callback, options) in self.handlers {
            logger.register_handler(callback, &options);
        }

        Ok(logger)
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use parking_lot::Mutex as PlMutex;
    use serde_json::json;

    /// Records every appended line
    struct MemoryAppender {
        lines: Arc<PlMutex<Vec<String>>>,
        tag: &'static str,
    }

    impl Appender for MemoryAppender {
        fn append(&mut self, _event: &LogEvent, line: &str) -> Result<()> {
            self.lines.lock().push(format!("{}:{}", self.tag, line));
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            self.tag
        }
    }

    struct FailingAppender;

    impl Appender for FailingAppender {
        fn append(&mut self, _event: &LogEvent, _line: &str) -> Result<()> {
            Err(crate::core::LoggerError::other("Simulated failure"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn fixed_clock() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().unwrap()
    }

    fn memory(tag: &'static str, lines: &Arc<PlMutex<Vec<String>>>) -> MemoryAppender {
        MemoryAppender {
            lines: Arc::clone(lines),
            tag,
        }
    }

    #[test]
    fn test_builder_default() {
        let logger = LoggerBuilder::default().build().unwrap();
        assert_eq!(logger.category(), "main");
        assert_eq!(logger.level(), "all");
        assert_eq!(logger.transport_count(), 0);
    }

    #[test]
    fn test_build_log_string_with_fixed_clock() {
        let logger = Logger::builder().clock(fixed_clock).build().unwrap();
        let event = LogEvent::new(logger.now(), "info", "main", "foo");
        let timestamp = DateFormatter::Default.format(&fixed_clock());
        assert_eq!(
            logger.build_log_string(&event),
            format!("{} [INFO] (main)\tfoo", timestamp)
        );
    }

    #[test]
    fn test_transport_thresholds_and_order() {
        let lines = Arc::new(PlMutex::new(Vec::new()));
        let logger = Logger::builder()
            .date_formatter(|_| "T".to_string())
            .appender_with_level("warn", memory("a", &lines))
            .appender(memory("b", &lines))
            .appender_with_level("off", memory("c", &lines))
            .build()
            .unwrap();

        logger.info("one").unwrap();
        logger.error("two").unwrap();

        let lines = lines.lock();
        assert_eq!(
            *lines,
            [
                "b:T [INFO] (main)\tone",
                "a:T [ERROR] (main)\ttwo",
                "b:T [ERROR] (main)\ttwo",
            ]
        );
    }

    #[test]
    fn test_unknown_level_logged_as_lowest() {
        let seen = Arc::new(PlMutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let logger = Logger::new();
        logger.add_log_handler(
            move |event: &LogEvent| seen_clone.lock().push(event.level.clone()),
            HandlerOptions::new(),
        );

        logger.log("verbose", "whatever").unwrap();
        assert_eq!(*seen.lock(), ["all"]);
    }

    #[test]
    fn test_handler_level_and_category_filters() {
        let hits = Arc::new(PlMutex::new(Vec::new()));
        let logger = Logger::new();

        let warn_hits = Arc::clone(&hits);
        logger.add_log_handler(
            move |e: &LogEvent| warn_hits.lock().push(format!("warn:{}", e.message)),
            HandlerOptions::new().level("warn"),
        );
        let lost_hits = Arc::clone(&hits);
        logger.add_log_handler(
            move |e: &LogEvent| lost_hits.lock().push(format!("lost:{}", e.message)),
            HandlerOptions::new().category("notFound"),
        );

        logger.info("info message").unwrap();
        logger.error("error message").unwrap();
        logger.fatal("fatal message").unwrap();

        assert_eq!(*hits.lock(), ["warn:error message", "warn:fatal message"]);
        assert_eq!(logger.metrics().handler_notifications(), 2);
    }

    #[test]
    fn test_remove_and_clear_handlers() {
        let logger = Logger::new();
        let first = logger.add_log_handler(|_: &LogEvent| {}, HandlerOptions::new());
        logger.add_log_handler(|_: &LogEvent| {}, HandlerOptions::new());
        assert_eq!(logger.handler_count(), 2);

        assert!(logger.remove_log_handler(first));
        assert!(!logger.remove_log_handler(first));
        assert_eq!(logger.handler_count(), 1);

        logger.clear_log_handlers();
        assert_eq!(logger.handler_count(), 0);
    }

    #[test]
    fn test_set_date_formatter_and_reset() {
        let logger = Logger::builder().clock(fixed_clock).build().unwrap();
        let event = LogEvent::new(logger.now(), "warn", "main", "x");
        let default_line = logger.build_log_string(&event);

        let custom: DateFormatFn = Arc::new(|_: &DateTime<Local>| "custom".to_string());
        logger.set_date_formatter(Some(custom));
        assert_eq!(logger.build_log_string(&event), "custom [WARN] (main)\tx");

        logger.set_date_formatter(None);
        assert_eq!(logger.build_log_string(&event), default_line);
        logger.set_date_formatter(None);
        assert_eq!(logger.build_log_string(&event), default_line);
    }

    #[test]
    fn test_write_failure_propagates() {
        let logger = Logger::builder().appender(FailingAppender).build().unwrap();
        assert!(logger.info("lost").is_err());
        assert_eq!(logger.metrics().write_failures(), 1);
    }

    #[test]
    fn test_handler_can_log_reentrantly() {
        let logger = Arc::new(Logger::new());
        let count = Arc::new(AtomicU64::new(0));
        let count_clone = Arc::clone(&count);
        logger.add_log_handler(
            move |_: &LogEvent| {
                count_clone.fetch_add(1, Ordering::Relaxed);
            },
            HandlerOptions::new().category("audit"),
        );

        let weak = Arc::downgrade(&logger);
        logger.add_log_handler(
            move |e: &LogEvent| {
                if let Some(logger) = weak.upgrade() {
                    let _ = logger.dispatch(
                        "info",
                        format!("saw {}", e.message),
                        LogOptions::new().category("audit"),
                    );
                }
            },
            HandlerOptions::new().category("main"),
        );

        logger.info("hello").unwrap();
        assert_eq!(count.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_custom_level_table() {
        let table = LevelTable::new(["trace", "info", "critical"]).unwrap();
        let lines = Arc::new(PlMutex::new(Vec::new()));
        let logger = Logger::builder()
            .levels(table)
            .level("info")
            .date_formatter(|_| "T".to_string())
            .appender(memory("m", &lines))
            .build()
            .unwrap();

        logger.log("trace", "hidden").unwrap();
        logger.log("critical", "shown").unwrap();
        logger.info_with("shown too", json!({"n": 1})).unwrap();

        assert_eq!(
            *lines.lock(),
            ["m:T [CRITICAL] (main)\tshown", "m:T [INFO] (main)\tshown too, n=1"]
        );
    }

    #[test]
    fn test_file_transport_without_path_fails_build() {
        let result = Logger::builder()
            .transport(TransportConfig::File(Default::default()))
            .build();
        match result {
            Err(e) => assert!(e.is_configuration()),
            Ok(_) => panic!("expected configuration error"),
        }
    }
}
