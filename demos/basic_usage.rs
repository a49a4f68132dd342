//! Basic logger usage example
//!
//! Demonstrates console output, level thresholds, structured data, handlers
//! and child loggers.
//!
//! Run with: cargo run --example basic_usage

use fanout_logger::prelude::*;
use fanout_logger::{info, warn};
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Fanout Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .category("demo")
        .transport(TransportConfig::console())
        .build()?;

    println!("1. Logging at every built-in level:");
    for level in LogLevel::LEVELS {
        logger.log(level, format!("This is a {} message", level))?;
    }

    println!("\n2. Structured data:");
    logger.info_with("user signed in", json!({"user": "ada", "roles": ["admin"]}))?;
    logger.info_with("batch ids", json!([1, 2, 3]))?;
    let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "upstream timed out");
    logger.error_with("request failed", LogData::error(&err))?;

    println!("\n3. A console transport that only shows warnings and above:");
    let quiet = Logger::builder()
        .category("quiet")
        .transport(TransportConfig::Console(
            ConsoleTransportConfig::default().with_level("warn"),
        ))
        .build()?;
    quiet.info("Info message (hidden)")?;
    warn!(quiet, "Warning message {} (visible)", 1)?;

    println!("\n4. Handlers:");
    let id = logger.add_log_handler(
        |event: &LogEvent| println!("   handler saw [{}] {}", event.level, event.message),
        HandlerOptions::new().level("error"),
    );
    logger.info("not delivered to the handler")?;
    logger.fatal("delivered to the handler")?;
    logger.remove_log_handler(id);

    println!("\n5. Child loggers:");
    let child = logger.get_child_logger("billing", Some(LogContext::new().with_field("tenant", 7)));
    info!(child, "invoice {} created", 1042)?;
    let grandchild = child.get_child_logger("billing.tax", Some(LogContext::new().with_field("rate", 0.2)));
    grandchild.debug_with("tax computed", json!({"amount": 12.5}))?;

    println!("\n6. Custom timestamp format:");
    logger.set_timestamp_format(DateFormatter::pattern("%H:%M:%S"));
    logger.info("short timestamp")?;
    logger.set_date_formatter(None);
    logger.info("default timestamp again")?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
