//! Console appender implementation

use crate::core::appender::LINE_SEPARATOR;
use crate::core::{Appender, LogEvent, Result};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

/// Writes each formatted line to standard output
pub struct ConsoleAppender {
    use_colors: bool,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self { use_colors: false }
    }

    /// Colour lines by level. Has no effect without the `console` feature.
    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    #[cfg(feature = "console")]
    fn render(&self, event: &LogEvent, line: &str) -> String {
        if !self.use_colors {
            return line.to_string();
        }
        match event.level.parse::<crate::core::LogLevel>() {
            Ok(level) => line.color(level.color_code()).to_string(),
            Err(_) => line.to_string(),
        }
    }

    #[cfg(not(feature = "console"))]
    fn render(&self, _event: &LogEvent, line: &str) -> String {
        line.to_string()
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, event: &LogEvent, line: &str) -> Result<()> {
        let output = self.render(event, line);
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        stdout.write_all(LINE_SEPARATOR.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stdout().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn test_plain_render_is_unchanged() {
        let appender = ConsoleAppender::new();
        let event = LogEvent::new(Local::now(), "warn", "main", "careful");
        assert_eq!(appender.render(&event, "a line"), "a line");
    }

    #[test]
    fn test_append_and_flush() {
        let mut appender = ConsoleAppender::default();
        let event = LogEvent::new(Local::now(), "info", "main", "hello");
        assert!(appender.append(&event, "hello").is_ok());
        assert!(appender.flush().is_ok());
        assert_eq!(appender.name(), "console");
    }
}
