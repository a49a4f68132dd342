//! # Fanout Logger
//!
//! A structured logging engine: leveled events carrying a message and
//! optional structured data are formatted once, filtered per destination and
//! fanned out to console, rotating file and programmatic handlers.
//!
//! ## Features
//!
//! - **Ordered levels**: built-in `all..off` or a custom ordered table
//! - **Transports**: console and size-rotated files (text or JSON lines)
//! - **Handlers**: callbacks filtered by level and exact category
//! - **Child loggers**: category/context views over one logger
//!
//! ```
//! use fanout_logger::prelude::*;
//! use serde_json::json;
//!
//! let logger = Logger::builder()
//!     .transport(TransportConfig::console())
//!     .build()?;
//!
//! logger.info_with("user signed in", json!({"user": "ada", "roles": ["admin"]}))?;
//!
//! let child = logger.get_child_logger("billing", Some(LogContext::new().with_field("tenant", 7)));
//! child.warn("invoice overdue")?;
//! # Ok::<(), fanout_logger::LoggerError>(())
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, RotatingFileAppender};
    pub use crate::core::{
        Appender, ChildLogger, ConsoleTransportConfig, DateFormatFn, DateFormatter, ErrorReport,
        FileTransportConfig, HandlerId, HandlerOptions, LevelTable, LogContext, LogData,
        LogEvent, LogLevel, LogOptions, LogTarget, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerMetrics, Result, TransportConfig,
    };
}

pub use crate::appenders::{ConsoleAppender, RotatingFileAppender};
pub use crate::core::{
    Appender, ChildLogger, Clock, ConsoleTransportConfig, DateFormatFn, DateFormatter,
    ErrorReport, FileTransportConfig, HandlerId, HandlerOptions, LevelTable, LogContext, LogData,
    LogEvent, LogHandlerFn, LogLevel, LogOptions, LogTarget, Logger, LoggerBuilder, LoggerConfig,
    LoggerError, LoggerMetrics, Result, TransportConfig, TransportId,
};
