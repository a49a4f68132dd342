//! File logging example
//!
//! Demonstrates file transports in text and JSON mode, size-based rotation
//! and building a logger from a JSON configuration.
//!
//! Run with: cargo run --example file_logging

use fanout_logger::appenders::backup_path;
use fanout_logger::prelude::*;
use serde_json::json;
use std::fs;

fn main() -> Result<()> {
    println!("=== Fanout Logger - File Logging Example ===\n");

    let log_dir = std::env::temp_dir().join("fanout_logger_demo");
    let text_log = log_dir.join("app.log");
    let json_log = log_dir.join("app.jsonl");

    println!("1. Text and JSON file transports:");
    {
        let logger = Logger::builder()
            .category("files")
            .transport(TransportConfig::File(
                FileTransportConfig::new(&text_log)
                    .with_max_size(4)
                    .with_max_rotation(3),
            ))
            .transport(TransportConfig::File(
                FileTransportConfig::new(&json_log)
                    .with_level("warn")
                    .with_json(true),
            ))
            .build()?;

        for i in 0..200 {
            logger.info_with(format!("Processing item {}", i), json!({"item": i}))?;
        }
        logger.warn_with("Disk usage high", json!({"percent": 91}))?;
        logger.flush()?;

        println!("   Wrote {}", text_log.display());
        for i in 1..=3 {
            let backup = backup_path(&text_log, i);
            if backup.exists() {
                println!("   Backup {}: {} bytes", backup.display(), fs::metadata(&backup)?.len());
            }
        }
        println!("   JSON records:");
        for line in fs::read_to_string(&json_log)?.lines() {
            println!("     {}", line);
        }
    }

    println!("\n2. Logger from JSON configuration:");
    let config_json = json!({
        "category": "configured",
        "level": "debug",
        "datePattern": "%Y-%m-%dT%H:%M:%S",
        "transports": [
            { "type": "console" },
            { "type": "file", "filePath": log_dir.join("configured.log"), "level": "error" }
        ]
    })
    .to_string();
    let logger = Logger::from_config(LoggerConfig::from_json(&config_json)?)?;
    logger.debug("console only")?;
    logger.error("console and file")?;
    for (id, name) in logger.transports() {
        println!("   transport #{} -> {}", id.index(), name);
    }

    println!("\n3. A file transport without a path is rejected:");
    let bad = LoggerConfig::from_json(r#"{"transports":[{"type":"file"}]}"#)?;
    match Logger::from_config(bad) {
        Err(e) => println!("   {}", e),
        Ok(_) => println!("   unexpectedly accepted"),
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
