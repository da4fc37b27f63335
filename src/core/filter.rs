// LogTally - core/filter.rs
//
// Level filter for parsed records.
// Core layer: pure logic, no I/O.

use crate::core::model::{Level, LogRecord};

/// Records whose level equals `level`, in original file order.
///
/// Returns borrowed records; the parsed set is never copied or mutated.
pub fn filter_by_level(records: &[LogRecord], level: Level) -> Vec<&LogRecord> {
    records.iter().filter(|r| r.level == level).collect()
}
