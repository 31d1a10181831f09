//! Error types for rhdiff.

use std::io;

use thiserror::Error;

/// Errors that can occur while splitting a source or computing a delta.
///
/// Every variant is fatal for the call that produced it: no partial chunk
/// list or change list is ever returned alongside an error.
#[derive(Debug, Error)]
pub enum DeltaError {
    /// An I/O error other than end-of-stream occurred while reading the
    /// source or the destination.
    #[error("read failure: {0}")]
    ReadFailure(
        #[from]
        #[source]
        io::Error,
    ),

    /// The chunk size was zero.
    #[error("invalid chunk size: {size} (must be at least 1 byte)")]
    InvalidChunkSize {
        /// The rejected chunk size.
        size: usize,
    },

    /// A source chunk does not fit the chunk size the differ was given.
    #[error("chunk at offset {offset} is {len} bytes, inconsistent with chunk size {chunk_size}")]
    ChunkSizeMismatch {
        /// Source offset of the offending chunk.
        offset: u64,
        /// Length of the offending chunk.
        len: usize,
        /// Chunk size configured on the differ.
        chunk_size: usize,
    },

    /// The computation was cancelled through its cancellation flag.
    #[error("delta computation cancelled")]
    Cancelled,
}
