//! Chunk iterator over a blocking reader.

use std::io::{self, Read};

use bytes::Bytes;

use crate::chunk::Chunk;
use crate::config::READ_BUFFER_SIZE;
use crate::error::DeltaError;

/// An iterator that yields chunks from a reader.
///
/// `ChunkIter` reads one chunk at a time, retrying short and interrupted
/// reads, so chunk boundaries never depend on how the reader hands out its
/// bytes. Memory grows with the bytes actually read, not with the chunk size.
///
/// After an error the iterator is exhausted.
///
/// # Example
///
/// ```
/// use rhdiff::{ChunkConfig, Chunker};
/// use std::io::Cursor;
///
/// let chunker = Chunker::new(ChunkConfig::new(4)?)?;
/// let mut iter = chunker.chunk(Cursor::new(b"0123456789"));
///
/// while let Some(result) = iter.next() {
///     let chunk = result?;
///     println!("{}", chunk);
/// }
/// # Ok::<(), rhdiff::DeltaError>(())
/// ```
pub struct ChunkIter<R> {
    reader: R,
    chunk_size: usize,
    offset: u64,
    finished: bool,
}

impl<R: Read> ChunkIter<R> {
    pub(crate) fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            chunk_size,
            offset: 0,
            finished: false,
        }
    }

    /// Returns the source offset of the next chunk.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Reads until a chunk is full or the reader reports end-of-stream.
    fn fill(&mut self) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(self.chunk_size.min(READ_BUFFER_SIZE));
        self.reader
            .by_ref()
            .take(self.chunk_size as u64)
            .read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

impl<R: Read> Iterator for ChunkIter<R> {
    type Item = Result<Chunk, DeltaError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.fill() {
            Ok(buffer) if buffer.is_empty() => {
                self.finished = true;
                None
            }
            Ok(buffer) => {
                // A short fill only happens at end-of-stream.
                let n = buffer.len();
                if n < self.chunk_size {
                    self.finished = true;
                }
                let chunk = Chunk::new(Bytes::from(buffer), self.offset);
                self.offset += n as u64;
                Some(Ok(chunk))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e.into()))
            }
        }
    }
}
