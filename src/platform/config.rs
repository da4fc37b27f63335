// LogTally - platform/config.rs
//
// config.toml location and loading with validation against named constants.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::render::OutputFormat;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Platform default location of config.toml, if a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    let path = ProjectDirs::from("", "", constants::APP_ID)
        .map(|dirs| dirs.config_dir().join(constants::CONFIG_FILE_NAME));
    match path {
        Some(ref p) => tracing::debug!(path = %p.display(), "Default config path resolved"),
        None => tracing::debug!("Could not determine platform config directory"),
    }
    path
}

// =============================================================================
// config.toml shape
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[logging]` section.
    pub logging: LoggingSection,
    /// `[input]` section.
    pub input: InputSection,
    /// `[output]` section.
    pub output: OutputSection,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// `[input]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Largest log file that will be read, in bytes.
    pub max_file_size_bytes: Option<u64>,
}

/// `[output]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// "table" or "json".
    pub format: Option<String>,
}

/// Validated application configuration.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Largest log file that will be read, in bytes.
    pub max_file_size: u64,
    /// Default stdout format when `--format` is not given.
    pub output_format: OutputFormat,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_file_size: constants::DEFAULT_MAX_FILE_SIZE,
            output_format: OutputFormat::default(),
            log_level: None,
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Load config.toml.
///
/// With `explicit = Some(path)` (the `--config` flag) a missing, unreadable
/// or unparseable file is an error. Otherwise the platform default is used:
/// a missing file means defaults with no warnings, and an unreadable or
/// unparseable one means defaults plus a warning.
///
/// Returns the config and any non-fatal warnings. Called before logging is
/// initialised, so warnings are handed back rather than logged here.
pub fn load_config(explicit: Option<&Path>) -> Result<(AppConfig, Vec<String>), ConfigError> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        return parse_config(&content, path);
    }

    let Some(path) = default_config_path() else {
        return Ok((AppConfig::default(), Vec::new()));
    };
    if !path.exists() {
        return Ok((AppConfig::default(), Vec::new()));
    }

    let outcome = std::fs::read_to_string(&path)
        .map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })
        .and_then(|content| parse_config(&content, &path));

    match outcome {
        Ok(loaded) => Ok(loaded),
        Err(e) => Ok((AppConfig::default(), vec![format!("{e}. Using defaults.")])),
    }
}

/// Parse and validate config.toml content.
///
/// `path` is used for error messages only.
pub fn parse_config(content: &str, path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let raw: RawConfig = toml::from_str(content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(validate(raw))
}

/// Validate each field against named constants, accumulating all warnings.
fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings = Vec::new();

    // -- Input: max_file_size_bytes --
    if let Some(size) = raw.input.max_file_size_bytes {
        if (constants::MIN_MAX_FILE_SIZE..=constants::ABSOLUTE_MAX_FILE_SIZE).contains(&size) {
            config.max_file_size = size;
        } else {
            warnings.push(format!(
                "[input] max_file_size_bytes = {size} is out of range ({}-{}). Using default ({}).",
                constants::MIN_MAX_FILE_SIZE,
                constants::ABSOLUTE_MAX_FILE_SIZE,
                constants::DEFAULT_MAX_FILE_SIZE,
            ));
        }
    }

    // -- Output: format --
    if let Some(ref format) = raw.output.format {
        match format.parse::<OutputFormat>() {
            Ok(f) => config.output_format = f,
            Err(_) => warnings.push(format!(
                "[output] format = \"{format}\" is not recognised. \
                 Expected \"table\" or \"json\". Using default (table).",
            )),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    (config, warnings)
}
