// LogTally - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogTally";

/// Application identifier used for the config directory.
pub const APP_ID: &str = "LogTally";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Input limits
// =============================================================================

/// Default maximum size of a log file that will be read into memory.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 512 * 1024 * 1024; // 512 MiB

/// Minimum user-configurable file size cap.
pub const MIN_MAX_FILE_SIZE: u64 = 1024; // 1 KiB

/// Hard upper bound on the file size cap (prevents configuration mistakes).
pub const ABSOLUTE_MAX_FILE_SIZE: u64 = 4 * 1024 * 1024 * 1024; // 4 GiB

// =============================================================================
// Table rendering
// =============================================================================

/// Width of the level column in the summary table.
pub const LEVEL_COLUMN_WIDTH: usize = 16;

/// Width of the count column separator run.
pub const COUNT_COLUMN_WIDTH: usize = 10;

/// Label of the final summary row.
pub const TOTAL_ROW_LABEL: &str = "Total";

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Kept at `warn` so stderr stays quiet on normal runs.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Maximum number of characters of a log line included in trace output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Process exit codes
// =============================================================================

/// Exit status for runtime failures (unreadable file, unknown level, ...).
/// Argument errors are reported by clap with its own status (2).
pub const EXIT_FAILURE: i32 = 1;
