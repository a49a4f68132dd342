//! Stress tests for concurrent logging
//!
//! These tests verify:
//! - No event is lost when many threads share one logger
//! - Lines are never interleaved within a file transport
//! - Rotation stays consistent under concurrent writers
//! - Handlers see every event exactly once

use fanout_logger::appenders::backup_path;
use fanout_logger::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const PER_THREAD: usize = 500;

fn spawn_writers(logger: &Arc<Logger>) {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(logger);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    logger
                        .info(format!("thread-{} message-{}", t, i))
                        .expect("write failed");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer thread panicked");
    }
}

/// Every message written by every thread reaches the file exactly once
#[test]
fn test_concurrent_file_logging_loses_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("concurrent.log");

    let logger = Arc::new(
        Logger::builder()
            .date_formatter(|_| "T".to_string())
            .transport(TransportConfig::file(&log_file))
            .build()
            .expect("Failed to build logger"),
    );

    spawn_writers(&logger);
    logger.flush().unwrap();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * PER_THREAD);

    let unique: HashSet<&str> = lines.iter().copied().collect();
    assert_eq!(unique.len(), THREADS * PER_THREAD, "duplicate lines found");

    for line in &lines {
        assert!(
            line.starts_with("T [INFO] (main)\tthread-"),
            "interleaved or malformed line: {:?}",
            line
        );
    }

    assert_eq!(logger.metrics().transport_writes(), (THREADS * PER_THREAD) as u64);
    assert_eq!(logger.metrics().write_failures(), 0);
}

/// Concurrent writers across rotations keep every line intact
#[test]
fn test_concurrent_rotation() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("rotating.log");

    let logger = Arc::new(
        Logger::builder()
            .date_formatter(|_| "T".to_string())
            .transport(TransportConfig::File(
                FileTransportConfig::new(&log_file)
                    .with_max_size(16)
                    .with_max_rotation(50),
            ))
            .build()
            .unwrap(),
    );

    spawn_writers(&logger);
    logger.flush().unwrap();

    let mut files = vec![log_file.clone()];
    files.extend(
        (1..=50)
            .map(|i| backup_path(&log_file, i))
            .filter(|p| p.exists()),
    );
    assert!(files.len() > 1, "expected at least one rotation");

    for file in &files {
        let content = fs::read_to_string(file).unwrap();
        for line in content.lines() {
            assert!(line.starts_with("T [INFO] (main)\tthread-"), "malformed: {:?}", line);
        }
    }

    // The live file was truncated after the last copy to .1
    let live: HashSet<String> = fs::read_to_string(&log_file)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    let first = fs::read_to_string(backup_path(&log_file, 1)).unwrap();
    assert!(first.lines().all(|l| !live.contains(l)));
}

/// Handlers registered on a shared logger are notified once per event
#[test]
fn test_concurrent_handler_notifications() {
    let logger = Arc::new(Logger::new());
    let seen = Arc::new(AtomicUsize::new(0));
    let errors = Arc::new(AtomicUsize::new(0));

    let seen_clone = Arc::clone(&seen);
    logger.add_log_handler(
        move |_: &LogEvent| {
            seen_clone.fetch_add(1, Ordering::Relaxed);
        },
        HandlerOptions::new(),
    );
    let errors_clone = Arc::clone(&errors);
    logger.add_log_handler(
        move |_: &LogEvent| {
            errors_clone.fetch_add(1, Ordering::Relaxed);
        },
        HandlerOptions::new().level("error"),
    );

    spawn_writers(&logger);

    assert_eq!(seen.load(Ordering::Relaxed), THREADS * PER_THREAD);
    assert_eq!(errors.load(Ordering::Relaxed), 0);
    assert_eq!(
        logger.metrics().handler_notifications(),
        (THREADS * PER_THREAD) as u64
    );
}

/// Child loggers on different threads keep their own categories
#[test]
fn test_child_loggers_across_threads() {
    let logger = Arc::new(Logger::new());
    let per_category = Arc::new(parking_lot::Mutex::new(std::collections::HashMap::new()));

    let sink = Arc::clone(&per_category);
    logger.add_log_handler(
        move |e: &LogEvent| {
            *sink.lock().entry(e.category.clone()).or_insert(0usize) += 1;
        },
        HandlerOptions::new(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                let child = logger.get_child_logger(
                    format!("worker-{}", t),
                    Some(LogContext::new().with_field("thread", t)),
                );
                for i in 0..PER_THREAD {
                    child.debug(format!("step {}", i)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let counts = per_category.lock();
    assert_eq!(counts.len(), THREADS);
    for t in 0..THREADS {
        assert_eq!(counts[&format!("worker-{}", t)], PER_THREAD);
    }
}
