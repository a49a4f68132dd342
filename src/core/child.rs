//! Child loggers: category/context views over a parent logger

use super::error::Result;
use super::log_context::LogContext;
use super::log_event::LogOptions;
use super::logger::{LogTarget, Logger};

/// A cheap view bound to a category and an optional context.
///
/// Owns no transports or handlers; every call goes through the parent's
/// dispatcher. The child's category replaces the parent's, and its context is
/// overlaid by any call-site context.
///
/// # Example
///
/// ```
/// use fanout_logger::prelude::*;
///
/// let logger = Logger::new();
/// let child = logger.get_child_logger("db", Some(LogContext::new().with_field("pool", 1)));
/// child.warn("slow query").unwrap();
/// assert_eq!(child.category(), "db");
/// ```
#[derive(Clone)]
pub struct ChildLogger<'a> {
    parent: &'a Logger,
    category: String,
    context: Option<LogContext>,
}

impl<'a> ChildLogger<'a> {
    pub(crate) fn new(parent: &'a Logger, category: String, context: Option<LogContext>) -> Self {
        Self {
            parent,
            category,
            context,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn context(&self) -> Option<&LogContext> {
        self.context.as_ref()
    }

    pub fn parent(&self) -> &'a Logger {
        self.parent
    }

    /// Derive a further view on the same parent. The category is replaced
    /// and `context` is overlaid on this child's context.
    pub fn get_child_logger(
        &self,
        category: impl Into<String>,
        context: Option<LogContext>,
    ) -> ChildLogger<'a> {
        ChildLogger {
            parent: self.parent,
            category: category.into(),
            context: LogContext::overlay(self.context.as_ref(), context.as_ref()),
        }
    }
}

impl LogTarget for ChildLogger<'_> {
    /// `options.category` is ignored: a child always logs under its own
    /// category.
    fn dispatch(&self, level: &str, message: String, options: LogOptions) -> Result<()> {
        let context = LogContext::overlay(self.context.as_ref(), options.context.as_ref());
        self.parent.exec(
            level,
            message,
            LogOptions {
                category: Some(self.category.clone()),
                context,
                data: options.data,
            },
        )
    }
}
