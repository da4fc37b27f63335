// LogTally - platform/fs.rs
//
// Log file loading. The whole file is read in one call and the handle is
// released before any line is parsed.

use crate::util::error::LoadError;
use std::path::Path;

/// Read a log file into its lines, line endings (`\n` or `\r\n`) stripped.
///
/// Invalid UTF-8 is replaced rather than rejected. An empty file yields an
/// empty Vec. Regular files larger than `max_size` bytes are refused up
/// front; pipes and devices report no meaningful length and are read as-is.
pub fn read_lines(path: &Path, max_size: u64) -> Result<Vec<String>, LoadError> {
    let metadata =
        std::fs::metadata(path).map_err(|e| LoadError::from_io(path.to_path_buf(), e))?;

    if metadata.is_dir() {
        return Err(LoadError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    if metadata.is_file() && metadata.len() > max_size {
        return Err(LoadError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    let content = read_file_lossy(path).map_err(|e| LoadError::from_io(path.to_path_buf(), e))?;
    let lines: Vec<String> = content.lines().map(str::to_string).collect();

    tracing::info!(
        path = %path.display(),
        bytes = content.len(),
        lines = lines.len(),
        "Log file loaded"
    );

    Ok(lines)
}

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion.
fn read_file_lossy(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
