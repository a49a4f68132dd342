//! Rotating file appender with size-triggered sequential rotation
//!
//! The appender tracks a baseline size (the file's size when it was first
//! seen, or 1 after a rotation) plus the bytes written through the current
//! handle. Before each write, once `baseline + written >= max_bytes`, the
//! backups are shifted by copying `path.(i-1)` onto `path.i` from the highest
//! index down, `path` is copied onto `path.1`, and the live file is reopened
//! truncated.

use crate::core::appender::{Appender, LINE_SEPARATOR};
use crate::core::config::FileTransportConfig;
use crate::core::error::{LoggerError, Result};
use crate::core::log_event::LogEvent;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Lifecycle of the live file handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationState {
    /// No baseline size recorded yet
    Uninitialized,
    /// Handle open, appending
    Open,
    /// Shifting backups; only observable if a rotation failed midway
    Rotating,
}

/// File appender that rotates into numbered backups
///
/// # Examples
///
/// ```no_run
/// use fanout_logger::appenders::RotatingFileAppender;
/// use fanout_logger::FileTransportConfig;
///
/// let config = FileTransportConfig::new("/var/log/app.log")
///     .with_max_size(10)
///     .with_max_rotation(2);
/// let mut appender = RotatingFileAppender::new(&config).unwrap();
/// appender.write_payload("hello").unwrap();
/// ```
pub struct RotatingFileAppender {
    path: PathBuf,
    max_bytes: u64,
    max_rotation: usize,
    write_json: bool,
    state: RotationState,
    baseline_size: Option<u64>,
    bytes_written: u64,
    writer: Option<BufWriter<File>>,
    rotations: u64,
}

impl RotatingFileAppender {
    /// Create an appender for a file transport and open its file.
    ///
    /// If the existing file is already over the limit it is rotated
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the path is empty, or an I/O error if
    /// the file cannot be opened or rotated.
    pub fn new(config: &FileTransportConfig) -> Result<Self> {
        config.validate()?;

        let mut appender = Self {
            path: config.file_path.clone(),
            max_bytes: config.max_bytes(),
            max_rotation: config.effective_max_rotation(),
            write_json: config.write_json,
            state: RotationState::Uninitialized,
            baseline_size: None,
            bytes_written: 0,
            writer: None,
            rotations: 0,
        };
        appender.evaluate_rotation()?;
        Ok(appender)
    }

    /// Write one payload followed by the line separator, rotating first if
    /// the projected size has reached the limit.
    pub fn write_payload(&mut self, payload: &str) -> Result<()> {
        self.evaluate_rotation()?;

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("File writer not initialized"))?;

        writer.write_all(payload.as_bytes()).map_err(|e| {
            LoggerError::io_operation(
                "writing log file",
                format!("cannot write to '{}'", self.path.display()),
                e,
            )
        })?;
        writer.write_all(LINE_SEPARATOR.as_bytes())?;

        self.bytes_written += (payload.len() + LINE_SEPARATOR.len()) as u64;
        Ok(())
    }

    /// Baseline size plus bytes written through the current handle
    #[must_use]
    pub fn projected_size(&self) -> u64 {
        self.baseline_size.unwrap_or(0) + self.bytes_written
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn state(&self) -> RotationState {
        self.state
    }

    /// Number of rotations performed by this appender
    #[must_use]
    pub fn rotation_count(&self) -> u64 {
        self.rotations
    }

    #[must_use]
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    #[must_use]
    pub fn max_rotation(&self) -> usize {
        self.max_rotation
    }

    /// Path of backup `index` (`<path>.<index>`)
    #[must_use]
    pub fn backup_path(&self, index: usize) -> PathBuf {
        backup_path(&self.path, index)
    }

    fn evaluate_rotation(&mut self) -> Result<()> {
        let baseline = match self.baseline_size {
            Some(size) => size,
            None => {
                let size = initial_size(&self.path)?;
                self.baseline_size = Some(size);
                self.state = RotationState::Open;
                size
            }
        };

        if baseline + self.bytes_written >= self.max_bytes {
            self.rotate()
        } else if self.writer.is_none() {
            self.open(false)
        } else {
            Ok(())
        }
    }

    fn rotate(&mut self) -> Result<()> {
        self.state = RotationState::Rotating;

        // Pending bytes must reach the file before it is copied
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        sequential_rotation(&self.path, self.max_rotation)?;

        self.baseline_size = Some(1);
        self.open(true)?;
        self.rotations += 1;
        self.state = RotationState::Open;
        Ok(())
    }

    fn open(&mut self, truncate: bool) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    LoggerError::io_operation(
                        "create log directory",
                        format!("Failed to create directory '{}'", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let mut options = OpenOptions::new();
        options.create(true);
        if truncate {
            options.write(true).truncate(true);
        } else {
            options.append(true);
        }

        let file = options.open(&self.path).map_err(|e| {
            LoggerError::file_appender(
                self.path.display().to_string(),
                format!("Failed to open: {}", e),
            )
        })?;

        self.writer = Some(BufWriter::new(file));
        self.bytes_written = 0;
        Ok(())
    }
}

/// Path of backup `index` next to `path`
pub fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{}", index));
    PathBuf::from(name)
}

/// Shift backups up by one slot, copying rather than renaming.
///
/// For `i` from `max_index` down to 1, `path.(i-1)` (or `path` itself when
/// `i == 1`) is copied over `path.i`. Missing sources are skipped.
pub fn sequential_rotation(path: &Path, max_index: usize) -> Result<()> {
    for i in (1..=max_index).rev() {
        let source = if i > 1 {
            backup_path(path, i - 1)
        } else {
            path.to_path_buf()
        };
        let target = backup_path(path, i);

        match fs::copy(&source, &target) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound && !source.exists() => {}
            Err(e) => {
                return Err(LoggerError::file_rotation(
                    source.display().to_string(),
                    format!("Failed to copy to '{}': {}", target.display(), e),
                ))
            }
        }
    }
    Ok(())
}

/// Size of an existing file; a missing file counts as 1 byte
fn initial_size(path: &Path) -> Result<u64> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(metadata.len()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(1),
        Err(e) => Err(LoggerError::file_appender(
            path.display().to_string(),
            format!("Cannot access file metadata: {}", e),
        )),
    }
}

impl Appender for RotatingFileAppender {
    fn name(&self) -> &str {
        "file"
    }

    fn append(&mut self, event: &LogEvent, line: &str) -> Result<()> {
        if self.write_json {
            let json = event.to_json()?;
            self.write_payload(&json)
        } else {
            self.write_payload(line)
        }
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.flush() {
                eprintln!(
                    "[LOGGER ERROR] Failed to flush '{}' on close: {}",
                    self.path.display(),
                    e
                );
            }
        }
    }
}
