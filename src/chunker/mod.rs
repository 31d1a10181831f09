//! Fixed-size splitting of a source into chunks.
//!
//! - [`Chunker`] - Splitting engine with `chunk()`, `chunk_bytes()` and a
//!   streaming `push()`/`finish()` API
//! - [`ChunkIter`] - Iterator over chunks of a [`std::io::Read`] source
//! - [`split`] - Reads a whole source into its chunk sequence

mod engine;
mod iter;

pub use engine::Chunker;
pub use iter::ChunkIter;

use std::io::Read;

use crate::chunk::Chunk;
use crate::config::ChunkConfig;
use crate::error::DeltaError;
use crate::trace;

/// Splits `reader` into chunks of `chunk_size` bytes.
///
/// Reads to end-of-stream. Every chunk has exactly `chunk_size` bytes except
/// possibly the last, and no chunk is empty. An empty source yields an empty
/// sequence.
///
/// # Errors
///
/// - [`DeltaError::InvalidChunkSize`] if `chunk_size` is zero; nothing is read.
/// - [`DeltaError::ReadFailure`] if the reader fails with anything other than
///   end-of-stream.
///
/// # Example
///
/// ```
/// use rhdiff::split;
///
/// let chunks = split(&b"abcxyzfoo!"[..], 3)?;
/// let sizes: Vec<_> = chunks.iter().map(|c| c.len()).collect();
/// assert_eq!(sizes, [3, 3, 3, 1]);
/// # Ok::<(), rhdiff::DeltaError>(())
/// ```
pub fn split<R: Read>(reader: R, chunk_size: usize) -> Result<Vec<Chunk>, DeltaError> {
    let chunker = Chunker::new(ChunkConfig::new(chunk_size)?)?;
    let chunks = chunker.chunk(reader).collect::<Result<Vec<_>, _>>()?;

    trace::trace_split_end(chunks.len(), chunk_size);
    Ok(chunks)
}
