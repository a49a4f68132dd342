//! Logger metrics for observability
//!
//! Counters describing how events fan out through a logger.

use std::sync::atomic::{AtomicU64, Ordering};

/// Fan-out counters
///
/// # Example
///
/// ```
/// use fanout_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_event();
/// metrics.record_transport_write();
///
/// assert_eq!(metrics.events_dispatched(), 1);
/// assert_eq!(metrics.transport_writes(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Events built by the dispatcher
    events_dispatched: AtomicU64,

    /// Successful writes to any transport
    transport_writes: AtomicU64,

    /// Handler invocations
    handler_notifications: AtomicU64,

    /// Transport writes that returned an error
    write_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            events_dispatched: AtomicU64::new(0),
            transport_writes: AtomicU64::new(0),
            handler_notifications: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn events_dispatched(&self) -> u64 {
        self.events_dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn transport_writes(&self) -> u64 {
        self.transport_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handler_notifications(&self) -> u64 {
        self.handler_notifications.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_event(&self) {
        self.events_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_transport_write(&self) {
        self.transport_writes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_handler_notification(&self) {
        self.handler_notifications.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed write, returning the previous failure count
    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed writes as a percentage of attempted writes
    pub fn failure_rate(&self) -> f64 {
        let failed = self.write_failures() as f64;
        let attempted = failed + self.transport_writes() as f64;
        if attempted == 0.0 {
            0.0
        } else {
            failed / attempted * 100.0
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.events_dispatched.store(0, Ordering::Relaxed);
        self.transport_writes.store(0, Ordering::Relaxed);
        self.handler_notifications.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
