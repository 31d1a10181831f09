//! Async stream adapter for splitting.
//!
//! The stream yields exactly the chunks [`split`](crate::split) would
//! produce for the same bytes, so a source can be chunked asynchronously and
//! diffed synchronously.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use rhdiff::{chunk_async, ChunkConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), rhdiff::DeltaError> {
//!     let mut stream = chunk_async(reader, ChunkConfig::default())?;
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("Chunk: {} bytes", chunk.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::chunk::Chunk;
use crate::config::{ChunkConfig, READ_BUFFER_SIZE};
use crate::error::DeltaError;

pin_project! {
    /// A stream that yields fixed-size chunks from an async reader.
    ///
    /// Short and interrupted reads are retried until a chunk is full or the
    /// reader reports end-of-stream. The buffer grows with the bytes read, at
    /// most [`READ_BUFFER_SIZE`] per read. After an error the stream ends.
    pub struct ChunkStream<R> {
        #[pin]
        reader: R,
        buffer: Vec<u8>,
        chunk_size: usize,
        offset: u64,
        finished: bool,
    }
}

impl<R> ChunkStream<R> {
    fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            chunk_size,
            offset: 0,
            finished: false,
        }
    }

    /// Returns the source offset of the next chunk.
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

impl<R: AsyncRead> Stream for ChunkStream<R> {
    type Item = Result<Chunk, DeltaError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        while this.buffer.len() < *this.chunk_size {
            let filled = this.buffer.len();
            let want = (*this.chunk_size - filled).min(READ_BUFFER_SIZE);
            this.buffer.resize(filled + want, 0);

            let polled = this.reader.as_mut().poll_read(cx, &mut this.buffer[filled..]);
            let n = match &polled {
                Poll::Ready(Ok(n)) => *n,
                _ => 0,
            };
            this.buffer.truncate(filled + n);

            match polled {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(0)) => {
                    *this.finished = true;
                    break;
                }
                Poll::Ready(Ok(_)) => {}
                Poll::Ready(Err(e)) if e.kind() == io::ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(e.into())));
                }
            }
        }

        let data = std::mem::take(this.buffer);
        if data.is_empty() {
            *this.finished = true;
            return Poll::Ready(None);
        }

        let len = data.len();
        let chunk = Chunk::new(Bytes::from(data), *this.offset);
        *this.offset += len as u64;
        Poll::Ready(Some(Ok(chunk)))
    }
}

/// Creates a chunk stream from an async reader.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O. Tokio users
/// can adapt their readers with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use rhdiff::{chunk_async, ChunkConfig};
///
/// let file = tokio::fs::File::open("file").await?;
/// let stream = chunk_async(file.compat(), ChunkConfig::default())?;
/// ```
///
/// # Errors
///
/// Returns [`DeltaError::InvalidChunkSize`] if the configured chunk size is
/// zero. Read failures surface as `Err` items of the stream.
pub fn chunk_async<R: AsyncRead>(
    reader: R,
    config: ChunkConfig,
) -> Result<ChunkStream<R>, DeltaError> {
    config.validate()?;
    Ok(ChunkStream::new(reader, config.chunk_size()))
}
