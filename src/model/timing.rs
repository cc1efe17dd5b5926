//! Verse timing tables and time-to-verse resolution

use serde::{Deserialize, Serialize};

/// Audio range of one verse, in milliseconds from the start of the chapter audio
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingEntry {
    pub verse_index: usize,
    pub timestamp_from_ms: u64,
    #[serde(default)]
    pub timestamp_to_ms: Option<u64>,
}

impl TimingEntry {
    pub fn start_secs(&self) -> f64 {
        self.timestamp_from_ms as f64 / 1000.0
    }
}

/// Returns the verse index active at `t_ms`: the verse of the last entry whose
/// start is at or before `t_ms`. Offsets before the first entry resolve to 0.
/// An empty table resolves to `None`.
///
/// `table` must be sorted ascending by `timestamp_from_ms`.
pub fn resolve(t_ms: u64, table: &[TimingEntry]) -> Option<usize> {
    if table.is_empty() {
        return None;
    }
    let after = table.partition_point(|entry| entry.timestamp_from_ms <= t_ms);
    match after {
        0 => Some(0),
        n => Some(table[n - 1].verse_index),
    }
}

/// A chapter's timing entries plus whether they can drive auto-highlighting
#[derive(Clone, Debug, Default)]
pub struct TimingTable {
    entries: Vec<TimingEntry>,
    well_formed: bool,
}

impl TimingTable {
    pub fn new(entries: Vec<TimingEntry>) -> Self {
        let well_formed = !entries.is_empty()
            && entries
                .windows(2)
                .all(|pair| pair[0].timestamp_from_ms <= pair[1].timestamp_from_ms);

        if !well_formed {
            tracing::warn!(entries = entries.len(), "Timing table is empty or unordered, verse highlighting disabled");
        }

        Self { entries, well_formed }
    }

    /// Whether time updates may move the verse cursor.
    pub fn drives_highlighting(&self) -> bool {
        self.well_formed
    }

    /// Verse at `t_ms`, or `None` when the table cannot be trusted.
    pub fn resolve(&self, t_ms: u64) -> Option<usize> {
        if !self.well_formed {
            return None;
        }
        resolve(t_ms, &self.entries)
    }

    pub fn entry_for(&self, verse_index: usize) -> Option<&TimingEntry> {
        self.entries.iter().find(|entry| entry.verse_index == verse_index)
    }
}
