// LogTally - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary across all layers.

use crate::util::error::LevelError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// =============================================================================
// Level
// =============================================================================

/// The fixed set of log levels, in canonical report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
    Debug,
    Error,
    Warning,
}

impl Level {
    /// Number of levels; sizes the per-level counter array.
    pub const COUNT: usize = 4;

    /// Returns all variants in report order.
    pub fn all() -> &'static [Level; Level::COUNT] {
        &[Level::Info, Level::Debug, Level::Error, Level::Warning]
    }

    /// The uppercase literal as it appears in log files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
        }
    }

    /// Position of this level in `Level::all()`.
    pub fn index(&self) -> usize {
        match self {
            Level::Info => 0,
            Level::Debug => 1,
            Level::Error => 2,
            Level::Warning => 3,
        }
    }

    /// Exact, case-sensitive match of a level token read from a log line.
    ///
    /// `"error"` or `"Error"` in a log file is not a level token.
    pub fn from_token(token: &str) -> Option<Level> {
        match token {
            "INFO" => Some(Level::Info),
            "DEBUG" => Some(Level::Debug),
            "ERROR" => Some(Level::Error),
            "WARNING" => Some(Level::Warning),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse of a user-supplied level (the CLI argument).
impl FromStr for Level {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::from_token(&s.trim().to_uppercase()).ok_or_else(|| LevelError::Unknown {
            input: s.to_string(),
        })
    }
}

// =============================================================================
// Log Record (output of parsing)
// =============================================================================

/// A single parsed log line.
///
/// Built once per run by the parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// Line number in the source file (1-based).
    pub line_number: u64,

    /// Leading date/time text, captured verbatim and not validated.
    pub timestamp: String,

    /// Level token, always one of the fixed set.
    pub level: Level,

    /// Remainder of the line, trimmed. May be empty.
    pub message: String,
}

impl LogRecord {
    /// Re-serialise in the input layout: `<timestamp> <LEVEL> <message>`.
    pub fn to_line(&self) -> String {
        if self.message.is_empty() {
            format!("{} {}", self.timestamp, self.level)
        } else {
            format!("{} {} {}", self.timestamp, self.level, self.message)
        }
    }
}
