//! Summary of a change list.

use std::fmt;

use super::Change;

/// Per-operation counts and byte totals of a change list.
///
/// # Example
///
/// ```
/// use rhdiff::{DeltaStats, calculate_delta, split};
/// use std::io::Cursor;
///
/// let chunks = split(&b"abcxyzfoo"[..], 3)?;
/// let changes = calculate_delta(chunks, &mut Cursor::new(b"abcfoo"), 3)?;
///
/// let stats = DeltaStats::from_changes(&changes);
/// assert_eq!(stats.matched_bytes, 6);
/// assert_eq!(stats.deleted_bytes, 3);
/// # Ok::<(), rhdiff::DeltaError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeltaStats {
    /// Number of `Equal` changes.
    pub equal: usize,
    /// Number of `Move` changes.
    pub moved: usize,
    /// Number of `Add` changes.
    pub added: usize,
    /// Number of `Delete` changes.
    pub deleted: usize,
    /// Destination bytes covered by `Equal` and `Move`.
    pub matched_bytes: u64,
    /// Destination bytes carried literally by `Add`.
    pub literal_bytes: u64,
    /// Source bytes reported by `Delete`.
    pub deleted_bytes: u64,
}

impl DeltaStats {
    /// Summarizes `changes`.
    pub fn from_changes(changes: &[Change]) -> Self {
        changes.iter().fold(Self::default(), |mut stats, change| {
            stats.record(change);
            stats
        })
    }

    /// Adds one change to the summary.
    pub fn record(&mut self, change: &Change) {
        let len = change.len() as u64;
        match change {
            Change::Equal { .. } => {
                self.equal += 1;
                self.matched_bytes += len;
            }
            Change::Move { .. } => {
                self.moved += 1;
                self.matched_bytes += len;
            }
            Change::Add { .. } => {
                self.added += 1;
                self.literal_bytes += len;
            }
            Change::Delete { .. } => {
                self.deleted += 1;
                self.deleted_bytes += len;
            }
        }
    }

    /// Total number of changes.
    pub fn total(&self) -> usize {
        self.equal + self.moved + self.added + self.deleted
    }

    /// Length of the destination the changes describe.
    pub fn destination_len(&self) -> u64 {
        self.matched_bytes + self.literal_bytes
    }
}

impl fmt::Display for DeltaStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} equal, {} moved, {} added, {} deleted; {} matched bytes, {} literal bytes, {} deleted bytes",
            self.equal,
            self.moved,
            self.added,
            self.deleted,
            self.matched_bytes,
            self.literal_bytes,
            self.deleted_bytes
        )
    }
}
