//! System configuration types: logging.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// The `tracing` filter directive for the workspace crates at this level.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "studybuddy=debug",
            LogLevel::Info => "studybuddy=info",
            LogLevel::Warning => "studybuddy=warn",
            LogLevel::Error => "studybuddy=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
