// LogTally - app/analyze.rs
//
// One analysis run: validate the requested level, load, parse, aggregate,
// filter, render, and optionally export.
//
// The whole stdout text is built before anything is printed, so a failure at
// any stage leaves stdout empty.

use crate::core::export::{self, ExportFormat};
use crate::core::filter;
use crate::core::model::{Level, LogRecord};
use crate::core::parser;
use crate::core::render::{self, Detail, OutputFormat, Report};
use crate::core::stats;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::{ExportError, Result};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Inputs for one run, already merged from CLI flags and config.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    /// Log file to analyse.
    pub path: PathBuf,
    /// Level for the detail listing; `None` selects summary mode.
    pub level: Option<String>,
    pub format: OutputFormat,
    pub max_file_size: u64,
    /// Write the listed records here as well (CSV or JSON by extension).
    pub export_path: Option<PathBuf>,
}

impl AnalyzeRequest {
    /// Summary-mode request with default limits.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            level: None,
            format: OutputFormat::default(),
            max_file_size: constants::DEFAULT_MAX_FILE_SIZE,
            export_path: None,
        }
    }

    /// Switch to detail mode for `level`.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }
}

/// Run the pipeline and return the text destined for stdout.
pub fn run(request: &AnalyzeRequest) -> Result<String> {
    // Reject an unknown level before touching the file.
    let level = request
        .level
        .as_deref()
        .map(str::parse::<Level>)
        .transpose()?;

    let lines = fs::read_lines(&request.path, request.max_file_size)?;
    let parsed = parser::parse_lines(&lines);
    drop(lines);

    let counts = stats::count_by_level(&parsed.records);
    let detail = level.map(|level| Detail {
        level,
        records: filter::filter_by_level(&parsed.records, level),
    });

    tracing::info!(
        path = %request.path.display(),
        records = parsed.records.len(),
        skipped = parsed.lines_skipped,
        level = ?level,
        "Analysis complete"
    );

    let report = Report {
        file: request.path.display().to_string(),
        counts,
        total: counts.total(),
        lines_processed: parsed.lines_processed,
        lines_skipped: parsed.lines_skipped,
        detail,
    };

    let output = render::render(&report, request.format)?;

    if let Some(ref export_path) = request.export_path {
        let records: Vec<&LogRecord> = match report.detail {
            Some(ref detail) => detail.records.clone(),
            None => parsed.records.iter().collect(),
        };
        export_to_file(&records, export_path)?;
    }

    Ok(output)
}

/// Create `path` and write `records` in the format its extension selects.
fn export_to_file(records: &[&LogRecord], path: &Path) -> Result<usize> {
    let format = ExportFormat::from_path(path);
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    let count = export::export(records, format, &mut writer, path)?;
    writer.flush().map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(
        path = %path.display(),
        format = ?format,
        records = count,
        "Export written"
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::{LevelError, LoadError, LogTallyError};

    const SAMPLE: &str = "2024-01-01 10:00:00 INFO Service started\n\
                          2024-01-01 10:00:05 ERROR Connection failed\n\
                          garbage line with no level\n\
                          2024-01-01 10:00:10 ERROR Retry failed\n";

    fn sample_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("app.log");
        std::fs::write(&path, SAMPLE).unwrap();
        path
    }

    #[test]
    fn test_summary_mode() {
        let dir = tempfile::tempdir().unwrap();
        let output = run(&AnalyzeRequest::new(sample_file(&dir))).unwrap();

        assert!(output.contains("INFO             | 1\n"));
        assert!(output.contains("DEBUG            | 0\n"));
        assert!(output.contains("ERROR            | 2\n"));
        assert!(output.contains("WARNING          | 0\n"));
        assert!(output.ends_with("Total            | 3\n"));
        assert!(!output.contains("Details"));
    }

    #[test]
    fn test_detail_mode_lists_matching_records() {
        let dir = tempfile::tempdir().unwrap();
        let output = run(&AnalyzeRequest::new(sample_file(&dir)).with_level("error")).unwrap();

        assert!(output.ends_with(
            "Details for log level 'ERROR':\n\
             2024-01-01 10:00:05 ERROR Connection failed\n\
             2024-01-01 10:00:10 ERROR Retry failed\n"
        ));
    }

    #[test]
    fn test_unknown_level_fails_before_loading() {
        // The file does not exist: the level error must win.
        let request = AnalyzeRequest::new("/nonexistent/logtally/app.log").with_level("critical");
        match run(&request) {
            Err(LogTallyError::Level(LevelError::Unknown { input })) => {
                assert_eq!(input, "critical")
            }
            other => panic!("expected UnknownLevel, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(&AnalyzeRequest::new(dir.path().join("absent.log")));
        assert!(matches!(
            result,
            Err(LogTallyError::Load(LoadError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_export_writes_detail_records() {
        let dir = tempfile::tempdir().unwrap();
        let export_path = dir.path().join("errors.csv");
        let mut request = AnalyzeRequest::new(sample_file(&dir)).with_level("ERROR");
        request.export_path = Some(export_path.clone());

        run(&request).unwrap();

        let csv = std::fs::read_to_string(&export_path).unwrap();
        assert_eq!(csv.lines().count(), 3, "header + two records: {csv}");
        assert!(csv.contains("2,2024-01-01 10:00:05,ERROR,Connection failed"));
    }

    #[test]
    fn test_export_in_summary_mode_writes_all_records() {
        let dir = tempfile::tempdir().unwrap();
        let export_path = dir.path().join("all.json");
        let mut request = AnalyzeRequest::new(sample_file(&dir));
        request.export_path = Some(export_path.clone());

        run(&request).unwrap();

        let text = std::fs::read_to_string(&export_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_export_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut request = AnalyzeRequest::new(sample_file(&dir));
        request.export_path = Some(dir.path().join("no-such-dir").join("out.csv"));

        assert!(matches!(
            run(&request),
            Err(LogTallyError::Export(ExportError::Io { .. }))
        ));
    }
}
