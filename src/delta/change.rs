//! Change records produced by the differ.

use std::fmt;

use bytes::Bytes;

/// The kind of a [`Change`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    /// Source content found at the same offset in the destination.
    Equal,
    /// Source content found at a different offset in the destination.
    Move,
    /// Destination bytes with no counterpart in the source.
    Add,
    /// Source content found nowhere in the destination.
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Equal => "EQUAL",
            Operation::Move => "MOVE",
            Operation::Add => "ADD",
            Operation::Delete => "DELETE",
        })
    }
}

/// One step of the edit script from source to destination.
///
/// `data` always holds the exact bytes at the location the change describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// `data` sits at the same offset in source and destination.
    Equal {
        /// Offset of the chunk in the source.
        src_offset: u64,
        /// Offset of the match in the destination (same as `src_offset`).
        dst_offset: u64,
        /// The matched bytes.
        data: Bytes,
    },

    /// `data` is a source chunk found at another destination offset.
    Move {
        /// Offset of the chunk in the source.
        src_offset: u64,
        /// Offset of the match in the destination.
        dst_offset: u64,
        /// The matched bytes.
        data: Bytes,
    },

    /// `data` is new and must be sent verbatim.
    Add {
        /// Offset of the literal run in the destination.
        dst_offset: u64,
        /// The literal bytes.
        data: Bytes,
    },

    /// The source chunk at `src_offset` was never matched.
    Delete {
        /// Offset of the chunk in the source.
        src_offset: u64,
        /// The chunk bytes.
        data: Bytes,
    },
}

impl Change {
    /// Returns the kind of this change.
    pub fn operation(&self) -> Operation {
        match self {
            Change::Equal { .. } => Operation::Equal,
            Change::Move { .. } => Operation::Move,
            Change::Add { .. } => Operation::Add,
            Change::Delete { .. } => Operation::Delete,
        }
    }

    /// Returns the source offset, or `None` for `Add`.
    pub fn src_offset(&self) -> Option<u64> {
        match *self {
            Change::Equal { src_offset, .. }
            | Change::Move { src_offset, .. }
            | Change::Delete { src_offset, .. } => Some(src_offset),
            Change::Add { .. } => None,
        }
    }

    /// Returns the destination offset, or `None` for `Delete`.
    pub fn dst_offset(&self) -> Option<u64> {
        match *self {
            Change::Equal { dst_offset, .. }
            | Change::Move { dst_offset, .. }
            | Change::Add { dst_offset, .. } => Some(dst_offset),
            Change::Delete { .. } => None,
        }
    }

    /// Returns the bytes this change carries.
    pub fn data(&self) -> &Bytes {
        match self {
            Change::Equal { data, .. }
            | Change::Move { data, .. }
            | Change::Add { data, .. }
            | Change::Delete { data, .. } => data,
        }
    }

    /// Returns the number of bytes this change carries.
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns true if the change carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.data().is_empty()
    }

    /// Returns true for changes that contribute to the destination
    /// (`Equal`, `Move`, `Add`).
    pub fn is_destination(&self) -> bool {
        !matches!(self, Change::Delete { .. })
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operation())?;
        if let Some(src) = self.src_offset() {
            write!(f, " src={}", src)?;
        }
        if let Some(dst) = self.dst_offset() {
            write!(f, " dst={}", dst)?;
        }
        write!(f, " len={}", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let change = Change::Move {
            src_offset: 3,
            dst_offset: 5,
            data: Bytes::from_static(b"xyz"),
        };
        assert_eq!(change.operation(), Operation::Move);
        assert_eq!(change.src_offset(), Some(3));
        assert_eq!(change.dst_offset(), Some(5));
        assert_eq!(change.len(), 3);
        assert!(change.is_destination());
    }

    #[test]
    fn test_add_has_no_source() {
        let change = Change::Add {
            dst_offset: 8,
            data: Bytes::from_static(b"fo"),
        };
        assert_eq!(change.src_offset(), None);
        assert_eq!(change.dst_offset(), Some(8));
    }

    #[test]
    fn test_delete_has_no_destination() {
        let change = Change::Delete {
            src_offset: 6,
            data: Bytes::from_static(b"foo"),
        };
        assert_eq!(change.dst_offset(), None);
        assert!(!change.is_destination());
    }

    #[test]
    fn test_display() {
        let change = Change::Move {
            src_offset: 3,
            dst_offset: 5,
            data: Bytes::from_static(b"xyz"),
        };
        assert_eq!(change.to_string(), "MOVE src=3 dst=5 len=3");

        let change = Change::Delete {
            src_offset: 6,
            data: Bytes::from_static(b"foo"),
        };
        assert_eq!(change.to_string(), "DELETE src=6 len=3");
    }
}
