//! Core logger types and traits

pub mod appender;
pub mod child;
pub mod config;
pub mod data_formatter;
pub mod error;
pub mod handler;
pub mod log_context;
pub mod log_data;
pub mod log_event;
pub mod log_level;
pub mod log_string;
pub mod logger;
pub mod metrics;
pub mod timestamp;

pub use appender::{Appender, LINE_SEPARATOR};
pub use child::ChildLogger;
pub use config::{ConsoleTransportConfig, FileTransportConfig, LoggerConfig, TransportConfig};
pub use data_formatter::{format_data, format_value};
pub use error::{LoggerError, Result};
pub use handler::{HandlerId, HandlerOptions, LogHandlerFn};
pub use log_context::LogContext;
pub use log_data::{ErrorReport, LogData};
pub use log_event::{LogEvent, LogOptions};
pub use log_level::{LevelTable, LogLevel};
pub use log_string::build_log_string;
pub use logger::{LogTarget, Logger, LoggerBuilder, TransportId};
pub use metrics::LoggerMetrics;
pub use timestamp::{Clock, DateFormatFn, DateFormatter, DEFAULT_TIMESTAMP_PATTERN};
