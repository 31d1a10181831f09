//! The Chunk type - a fixed-size region of the source.

use bytes::Bytes;
use std::fmt;

use super::StrongSum;
use crate::hash::{Blake3Hasher, RollingChecksum};

/// A contiguous region of the source with its two checksums.
///
/// Chunks are produced once by the [`Chunker`](crate::Chunker) and are
/// immutable afterwards. All chunks of a source have the configured chunk
/// size except possibly the last one, which may be shorter.
///
/// # Example
///
/// ```
/// use rhdiff::Chunk;
///
/// let chunk = Chunk::new(&b"hello world"[..], 0);
///
/// assert_eq!(chunk.len(), 11);
/// assert_eq!(chunk.range(), 0..11);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk bytes.
    pub data: Bytes,

    /// Offset of the first byte within the source stream.
    pub offset: u64,

    /// Adler-32 weak sum of `data`.
    pub weak_sum: u32,

    /// BLAKE3 strong sum of `data`.
    pub strong_sum: StrongSum,
}

impl Chunk {
    /// Creates a chunk at `offset`, computing both checksums from `data`.
    pub fn new(data: impl Into<Bytes>, offset: u64) -> Self {
        let data = data.into();
        Self {
            weak_sum: RollingChecksum::checksum(&data),
            strong_sum: Blake3Hasher::hash(&data),
            data,
            offset,
        }
    }

    /// Returns the length of the chunk data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to the chunk data.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the chunk as a source range.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.offset..self.end()
    }

    /// Consumes the chunk and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chunk({} bytes @ {}, weak={:08x}, strong={})",
            self.len(),
            self.offset,
            self.weak_sum,
            self.strong_sum
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_computes_sums() {
        let chunk = Chunk::new(&b"abc"[..], 3);
        assert_eq!(chunk.weak_sum, RollingChecksum::checksum(b"abc"));
        assert_eq!(chunk.strong_sum, Blake3Hasher::hash(b"abc"));
        assert_eq!(chunk.offset, 3);
    }

    #[test]
    fn test_equal_content_equal_sums() {
        let a = Chunk::new(&b"same"[..], 0);
        let b = Chunk::new(b"same".to_vec(), 4);
        assert_eq!(a.weak_sum, b.weak_sum);
        assert_eq!(a.strong_sum, b.strong_sum);
        assert_ne!(a, b);
    }

    #[test]
    fn test_range() {
        let chunk = Chunk::new(&b"hello"[..], 100);
        assert_eq!(chunk.end(), 105);
        assert_eq!(chunk.range(), 100..105);
    }

    #[test]
    fn test_empty() {
        let chunk = Chunk::new(Bytes::new(), 0);
        assert!(chunk.is_empty());
        assert_eq!(chunk.weak_sum, 1);
    }

    #[test]
    fn test_display() {
        let s = Chunk::new(&b"hello"[..], 100).to_string();
        assert!(s.contains("5 bytes"));
        assert!(s.contains("@ 100"));
    }
}
