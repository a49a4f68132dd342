//! Appender implementations

pub mod console;
pub mod rotating_file;

pub use console::ConsoleAppender;
pub use rotating_file::{backup_path, sequential_rotation, RotatingFileAppender, RotationState};

pub use crate::core::Appender;
