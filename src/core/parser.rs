// LogTally - core/parser.rs
//
// Best-effort line parser. Each line is an independent attempt that yields
// a record or nothing; malformed lines are dropped, never reported as errors.
// Core layer: works on already-loaded lines, never touches the filesystem.

use crate::core::model::{Level, LogRecord};
use crate::util::constants;
use regex::Regex;
use std::sync::OnceLock;

/// Result of parsing all lines of one file.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Successfully parsed records, in file order.
    pub records: Vec<LogRecord>,
    /// Total lines seen, blank ones included.
    pub lines_processed: u64,
    /// Lines that produced no record.
    pub lines_skipped: u64,
}

/// Line layout: `<YYYY-MM-DD HH:MM:SS[.fff]> <LEVEL> [message]`, anchored at
/// the start of the line. Digits are ASCII only (`\d` would accept any
/// Unicode decimal digit). The level is captured as a plain token here and
/// checked against the fixed set afterwards.
fn line_pattern() -> &'static Regex {
    static LINE: OnceLock<Regex> = OnceLock::new();
    LINE.get_or_init(|| {
        // Pattern is covered by the unit tests below.
        Regex::new(
            r"^(?P<timestamp>[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}(?:[.,][0-9]+)?)[ \t]+(?P<level>\S+)(?:[ \t]+(?P<message>.*))?$",
        )
        .expect("line_pattern: invalid regex")
    })
}

/// Parse a single raw line into a record.
///
/// Returns `None` for empty lines, lines without a leading timestamp, and
/// lines whose level token is not exactly one of INFO, DEBUG, ERROR, WARNING.
pub fn parse_line(line: &str, line_number: u64) -> Option<LogRecord> {
    let caps = line_pattern().captures(line)?;
    let level = Level::from_token(caps.name("level")?.as_str())?;
    let message = caps
        .name("message")
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    Some(LogRecord {
        line_number,
        timestamp: caps["timestamp"].to_string(),
        level,
        message,
    })
}

/// Parse every line, preserving order and dropping lines that do not match.
pub fn parse_lines(lines: &[String]) -> ParseResult {
    let mut records = Vec::with_capacity(lines.len());
    let mut lines_skipped: u64 = 0;

    for (idx, line) in lines.iter().enumerate() {
        let line_number = (idx as u64) + 1;
        match parse_line(line, line_number) {
            Some(record) => records.push(record),
            None => {
                lines_skipped += 1;
                tracing::trace!(
                    line_number,
                    preview = %preview(line),
                    "Skipping line that does not match the record layout"
                );
            }
        }
    }

    let result = ParseResult {
        records,
        lines_processed: lines.len() as u64,
        lines_skipped,
    };

    tracing::debug!(
        records = result.records.len(),
        skipped = result.lines_skipped,
        lines = result.lines_processed,
        "Parsing complete"
    );

    result
}

/// Truncated copy of a line for diagnostic output.
fn preview(line: &str) -> String {
    line.chars()
        .take(constants::DEBUG_MAX_LINE_PREVIEW)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_well_formed_line() {
        let record = parse_line("2024-01-01 10:00:05 ERROR Connection failed", 7).unwrap();
        assert_eq!(record.line_number, 7);
        assert_eq!(record.timestamp, "2024-01-01 10:00:05");
        assert_eq!(record.level, Level::Error);
        assert_eq!(record.message, "Connection failed");
    }

    #[test]
    fn test_message_is_trimmed() {
        let record = parse_line("2024-01-01 10:00:05 INFO    padded message   ", 1).unwrap();
        assert_eq!(record.message, "padded message");
    }

    #[test]
    fn test_empty_message_is_allowed() {
        let record = parse_line("2024-01-01 10:00:05 WARNING", 1).unwrap();
        assert_eq!(record.level, Level::Warning);
        assert_eq!(record.message, "");

        let record = parse_line("2024-01-01 10:00:05 DEBUG   ", 1).unwrap();
        assert_eq!(record.message, "");
    }

    #[test]
    fn test_fractional_seconds_kept_verbatim() {
        let record = parse_line("2024-01-01 10:00:05,123 INFO tick", 1).unwrap();
        assert_eq!(record.timestamp, "2024-01-01 10:00:05,123");
        let record = parse_line("2024-01-01 10:00:05.5 INFO tick", 1).unwrap();
        assert_eq!(record.timestamp, "2024-01-01 10:00:05.5");
    }

    #[test]
    fn test_timestamp_shape_is_not_validated() {
        // 99th month: shape matches, so the text is captured as-is.
        let record = parse_line("2024-99-99 99:99:99 INFO odd clock", 1).unwrap();
        assert_eq!(record.timestamp, "2024-99-99 99:99:99");
    }

    #[test]
    fn test_tab_separators_accepted() {
        let record = parse_line("2024-01-01 10:00:05\tINFO\tstarted", 1).unwrap();
        assert_eq!(record.level, Level::Info);
        assert_eq!(record.message, "started");
    }

    #[test]
    fn test_malformed_lines_are_dropped() {
        let rejects = [
            "",
            "   ",
            "garbage line with no level",
            "2024-01-01 10:00:05",
            "2024-01-01 10:00:05 TRACE too verbose",
            "2024-01-01 10:00:05 error lowercase level",
            "2024-01-01 10:00:05 WARN short form",
            "2024-01-01 10:00:05ERROR no separator",
            "2024-01-01T10:00:05 INFO iso T separator",
            " 2024-01-01 10:00:05 INFO leading space",
            "[2024-01-01 10:00:05] INFO bracketed",
            "INFO 2024-01-01 10:00:05 swapped",
            "\u{FF12}\u{FF10}\u{FF12}\u{FF14}-\u{FF10}\u{FF11}-\u{FF10}\u{FF11} \u{FF11}\u{FF10}:\u{FF10}\u{FF10}:\u{FF10}\u{FF10} INFO fullwidth digits",
            "\u{0662}\u{0660}\u{0662}\u{0664}-\u{0660}\u{0661}-\u{0660}\u{0661} \u{0661}\u{0660}:\u{0660}\u{0660}:\u{0660}\u{0660} ERROR arabic-indic digits",
        ];
        for line in rejects {
            assert!(parse_line(line, 1).is_none(), "{line:?} should not parse");
        }
    }

    #[test]
    fn test_level_must_be_whole_token() {
        assert!(parse_line("2024-01-01 10:00:05 INFOX message", 1).is_none());
        assert!(parse_line("2024-01-01 10:00:05 ERROR: message", 1).is_none());
    }

    #[test]
    fn test_reserialise_matches_input_modulo_whitespace() {
        let inputs = [
            "2024-01-01 10:00:00 INFO Service started",
            "2024-01-01 10:00:05 ERROR   Connection   failed ",
            "2024-01-01 10:00:10 DEBUG",
            "2024-02-29 23:59:59.999 WARNING Disk at 91%",
        ];
        let normalise = |s: &str| s.split_whitespace().collect::<Vec<_>>().join(" ");
        for input in inputs {
            let record = parse_line(input, 1).unwrap();
            assert_eq!(normalise(&record.to_line()), normalise(input));
        }
    }

    #[test]
    fn test_parse_lines_preserves_order_and_counts_skips() {
        let content = "2024-01-01 10:00:00 INFO Service started\n\
                       2024-01-01 10:00:05 ERROR Connection failed\n\
                       garbage line with no level\n\
                       \n\
                       2024-01-01 10:00:10 ERROR Retry failed\n";
        let result = parse_lines(&lines(content));

        assert_eq!(result.lines_processed, 5);
        assert_eq!(result.lines_skipped, 2);
        let messages: Vec<_> = result.records.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(
            messages,
            ["Service started", "Connection failed", "Retry failed"]
        );
        let numbers: Vec<_> = result.records.iter().map(|r| r.line_number).collect();
        assert_eq!(numbers, [1, 2, 5]);
    }

    #[test]
    fn test_parse_lines_empty_input() {
        let result = parse_lines(&[]);
        assert!(result.records.is_empty());
        assert_eq!(result.lines_processed, 0);
        assert_eq!(result.lines_skipped, 0);
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(constants::DEBUG_MAX_LINE_PREVIEW + 10);
        assert_eq!(
            preview(&long).chars().count(),
            constants::DEBUG_MAX_LINE_PREVIEW
        );
    }
}
