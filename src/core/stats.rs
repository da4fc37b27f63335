// LogTally - core/stats.rs
//
// Per-level aggregation. Pure function of the parsed records.

use crate::core::model::{Level, LogRecord};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Number of records per level.
///
/// Every level has a counter, so a level that never occurred reports zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelCounts {
    counts: [usize; Level::COUNT],
}

impl LevelCounts {
    /// Count for one level.
    pub fn get(&self, level: Level) -> usize {
        self.counts[level.index()]
    }

    /// Add one record of `level`.
    pub fn increment(&mut self, level: Level) {
        self.counts[level.index()] += 1;
    }

    /// Sum of all per-level counts.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(level, count)` pairs in report order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (Level, usize)> + '_ {
        Level::all().iter().map(move |level| (*level, self.get(*level)))
    }
}

/// Serialised as a map in report order: `{"INFO": 1, "DEBUG": 0, ...}`.
impl Serialize for LevelCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Level::COUNT))?;
        for (level, count) in self.iter() {
            map.serialize_entry(level.as_str(), &count)?;
        }
        map.end()
    }
}

/// Count records per level.
pub fn count_by_level(records: &[LogRecord]) -> LevelCounts {
    let mut counts = LevelCounts::default();
    for record in records {
        counts.increment(record.level);
    }
    counts
}
