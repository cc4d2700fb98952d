//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **State Types** - The preview controller bound to browser files
//! - **Log Types** - Activity log shown under the tables

use chrono::Local;
use regex_preview::PreviewController;
use serde::{Deserialize, Serialize};

// =============================================================================
// State Types
// =============================================================================

/// Preview state holding the browser's native file handle.
pub type Controller = PreviewController<web_sys::File>;

// =============================================================================
// Log Types
// =============================================================================

/// Log severity level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// Get CSS class for styling.
    pub fn css_class(&self) -> &'static str {
        match self {
            LogLevel::Info => "log-info",
            LogLevel::Success => "log-success",
            LogLevel::Warning => "log-warning",
            LogLevel::Error => "log-error",
        }
    }

    /// Matching `log` crate level for the console mirror.
    pub fn console_level(&self) -> log::Level {
        match self {
            LogLevel::Info | LogLevel::Success => log::Level::Info,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

/// A single activity log entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Timestamp string (HH:MM:SS)
    pub timestamp: String,
}

impl LogEntry {
    /// Entry stamped with the current local time.
    pub fn now(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        }
    }
}

/// Append `entry`, dropping the oldest entries beyond `limit`.
pub fn push_bounded(logs: &mut Vec<LogEntry>, entry: LogEntry, limit: usize) {
    logs.push(entry);
    if logs.len() > limit {
        let excess = logs.len() - limit;
        logs.drain(..excess);
    }
}
