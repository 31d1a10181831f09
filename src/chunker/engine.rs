//! Core splitting engine - Chunker with pull and push APIs.
//!
//! Every entry point applies the same rule: cut the stream every
//! `chunk_size` bytes, emit the remainder as a final shorter chunk, never
//! emit an empty chunk.
//!
//! # Example
//!
//! ```
//! use rhdiff::{ChunkConfig, Chunker};
//! use bytes::Bytes;
//!
//! let mut chunker = Chunker::new(ChunkConfig::new(4)?)?;
//!
//! // Feed data in any size
//! let mut chunks = chunker.push(Bytes::from_static(b"first"));
//! chunks.extend(chunker.push(Bytes::from_static(b"second")));
//!
//! // When the stream ends, take the final short chunk
//! chunks.extend(chunker.finish());
//!
//! assert_eq!(chunks.len(), 3);
//! # Ok::<(), rhdiff::DeltaError>(())
//! ```

use std::io::Read;

use bytes::{Bytes, BytesMut};

use super::ChunkIter;
use crate::chunk::Chunk;
use crate::config::ChunkConfig;
use crate::error::DeltaError;

/// A chunker that splits byte streams into fixed-size chunks.
///
/// # Pull API
///
/// - [`chunk`](Self::chunk) wraps a [`std::io::Read`] into a lazy [`ChunkIter`]
/// - [`chunk_bytes`](Self::chunk_bytes) splits an in-memory buffer with
///   zero-copy slices
///
/// # Push API
///
/// - [`push`](Self::push) accepts data in any size and returns every chunk
///   completed by it
/// - [`finish`](Self::finish) emits the final short chunk when the stream ends
///
/// The push state (pending bytes, offset) is independent of the pull API.
///
/// # Determinism
///
/// Identical byte streams produce identical chunks, regardless of how many
/// bytes are pushed at once.
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkConfig,
    pending: Option<Bytes>,
    offset: u64,
}

impl Chunker {
    /// Creates a new chunker with the given configuration.
    ///
    /// Returns [`DeltaError::InvalidChunkSize`] if the configured chunk size
    /// is zero.
    pub fn new(config: ChunkConfig) -> Result<Self, DeltaError> {
        config.validate()?;
        Ok(Self {
            config,
            pending: None,
            offset: 0,
        })
    }

    /// Creates a chunking iterator from a reader.
    ///
    /// The iterator starts at offset 0 and reads lazily, one chunk at a time.
    pub fn chunk<R: Read>(&self, reader: R) -> ChunkIter<R> {
        ChunkIter::new(reader, self.config.chunk_size())
    }

    /// Splits an in-memory buffer.
    ///
    /// Chunk data are zero-copy slices of `data`.
    ///
    /// # Example
    ///
    /// ```
    /// use rhdiff::{ChunkConfig, Chunker};
    ///
    /// let chunker = Chunker::new(ChunkConfig::new(3)?)?;
    /// let chunks = chunker.chunk_bytes(&b"abcxyzfoo"[..]);
    ///
    /// assert_eq!(chunks.len(), 3);
    /// assert_eq!(chunks[1].offset, 3);
    /// # Ok::<(), rhdiff::DeltaError>(())
    /// ```
    pub fn chunk_bytes(&self, data: impl Into<Bytes>) -> Vec<Chunk> {
        let data = data.into();
        let size = self.config.chunk_size();

        (0..data.len())
            .step_by(size)
            .map(|start| {
                let end = (start + size).min(data.len());
                Chunk::new(data.slice(start..end), start as u64)
            })
            .collect()
    }

    /// Pushes data into the chunker and returns the chunks it completes.
    ///
    /// Bytes that do not yet fill a chunk are kept as pending and are
    /// prepended to the next push. Whole chunks inside `data` are zero-copy
    /// slices; only a chunk straddling two pushes is copied.
    pub fn push(&mut self, mut data: Bytes) -> Vec<Chunk> {
        let size = self.config.chunk_size();
        let mut chunks = Vec::new();

        if let Some(pending) = self.pending.take() {
            let needed = size - pending.len();
            if data.len() < needed {
                self.pending = Some(concat(&pending, &data));
                return chunks;
            }

            let head = data.split_to(needed);
            chunks.push(self.emit(concat(&pending, &head)));
        }

        while data.len() >= size {
            let piece = data.split_to(size);
            chunks.push(self.emit(piece));
        }

        if !data.is_empty() {
            self.pending = Some(data);
        }

        chunks
    }

    /// Finalizes the stream and returns the final chunk if any.
    ///
    /// After calling `finish()`, the chunker is reset and can be reused for
    /// a new stream.
    pub fn finish(&mut self) -> Option<Chunk> {
        let chunk = self
            .pending
            .take()
            .filter(|pending| !pending.is_empty())
            .map(|pending| self.emit(pending));

        self.offset = 0;
        chunk
    }

    /// Resets the push state for a new stream.
    pub fn reset(&mut self) {
        self.pending = None;
        self.offset = 0;
    }

    /// Returns the source offset of the next chunk the push API will emit.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the number of pending bytes waiting for more input.
    pub fn pending_len(&self) -> usize {
        self.pending.as_ref().map_or(0, Bytes::len)
    }

    /// Returns the configuration used by this chunker.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    fn emit(&mut self, data: Bytes) -> Chunk {
        let chunk = Chunk::new(data, self.offset);
        self.offset += chunk.len() as u64;
        chunk
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            config: ChunkConfig::default(),
            pending: None,
            offset: 0,
        }
    }
}

fn concat(a: &[u8], b: &[u8]) -> Bytes {
    let mut combined = BytesMut::with_capacity(a.len() + b.len());
    combined.extend_from_slice(a);
    combined.extend_from_slice(b);
    combined.freeze()
}
