//! Logging macros for `format!`-style messages.
//!
//! Each macro expands to a [`LogTarget`](crate::LogTarget) call and evaluates
//! to its `Result`, so it works with both loggers and child loggers.
//!
//! # Examples
//!
//! ```
//! use fanout_logger::prelude::*;
//! use fanout_logger::info;
//!
//! let logger = Logger::new();
//!
//! info!(logger, "Server started")?;
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port)?;
//!
//! let child = logger.get_child_logger("http", None);
//! info!(child, "Accepted connection from {}", "10.0.0.7")?;
//! # Ok::<(), LoggerError>(())
//! ```

/// Log a message at any level name.
///
/// # Examples
///
/// ```
/// # use fanout_logger::prelude::*;
/// # let logger = Logger::new();
/// use fanout_logger::log;
/// log!(logger, LogLevel::Info, "Simple message").unwrap();
/// log!(logger, "verbose", "Custom level, code {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::LogTarget::log(&$logger, $level, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use fanout_logger::prelude::*;
/// # let logger = Logger::new();
/// use fanout_logger::info;
/// info!(logger, "Processing {} items", 100).unwrap();
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use fanout_logger::prelude::*;
/// # let logger = Logger::new();
/// use fanout_logger::error;
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error").unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{HandlerOptions, LogEvent, LogLevel, Logger};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recording_logger() -> (Logger, Arc<Mutex<Vec<(String, String)>>>) {
        let logger = Logger::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        logger.add_log_handler(
            move |e: &LogEvent| sink.lock().push((e.level.clone(), e.message.clone())),
            HandlerOptions::new(),
        );
        (logger, seen)
    }

    #[test]
    fn test_log_macro() {
        let (logger, seen) = recording_logger();
        log!(logger, LogLevel::Info, "Test message").unwrap();
        log!(logger, "warn", "Formatted: {}", 42).unwrap();

        assert_eq!(
            *seen.lock(),
            [
                ("info".to_string(), "Test message".to_string()),
                ("warn".to_string(), "Formatted: 42".to_string()),
            ]
        );
    }

    #[test]
    fn test_level_macros() {
        let (logger, seen) = recording_logger();
        debug!(logger, "Count: {}", 5).unwrap();
        info!(logger, "Items: {}", 100).unwrap();
        warn!(logger, "Retry {} of {}", 1, 3).unwrap();
        error!(logger, "Code: {}", 500).unwrap();
        fatal!(logger, "Critical failure: {}", "system").unwrap();

        let levels: Vec<String> = seen.lock().iter().map(|(l, _)| l.clone()).collect();
        assert_eq!(levels, ["debug", "info", "warn", "error", "fatal"]);
    }

    #[test]
    fn test_macros_on_child_logger() {
        let (logger, seen) = recording_logger();
        let child = logger.get_child_logger("child", None);
        info!(child, "from {}", "child").unwrap();
        assert_eq!(seen.lock()[0].1, "from child");
    }
}
