//! rhdiff
//!
//! Rolling-hash delta computation for Rust.
//!
//! `rhdiff` computes the ordered edit operations that turn a source byte
//! sequence into a destination, the way rsync-class tools do. It is a small
//! building block for:
//!
//! - delta synchronization
//! - backup systems
//! - bandwidth-saving transfers
//!
//! Two steps:
//!
//! 1. **Split** the source into fixed-size chunks, each carrying an Adler-32
//!    weak sum and a BLAKE3 strong sum.
//! 2. **Diff** the destination against those chunks with a sliding window,
//!    classifying every byte range as `Equal`, `Move`, `Add` or `Delete`.
//!
//! Only `Add` payloads are genuinely new; everything else refers back to the
//! source.
//!
//! The crate intentionally:
//! - does NOT apply changes to rebuild the destination
//! - does NOT persist chunk indexes
//! - does NOT transport or compress anything
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use rhdiff::{Change, DeltaError, calculate_delta, split};
//!
//! fn main() -> Result<(), DeltaError> {
//!     let chunks = split(&b"abcxyzfoo"[..], 3)?;
//!     let changes = calculate_delta(chunks, &mut Cursor::new(b"abc12xyzfo"), 3)?;
//!
//!     for change in &changes {
//!         println!("{}", change);
//!     }
//!     assert!(matches!(changes[0], Change::Equal { .. }));
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use rhdiff::{chunk_async, ChunkConfig};
//!
//! async fn demo<R: futures_io::AsyncRead>(reader: R) -> Result<(), rhdiff::DeltaError> {
//!     let mut stream = std::pin::pin!(chunk_async(reader, ChunkConfig::default())?);
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("chunk {}", chunk.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod chunker;
mod config;
mod delta;
mod error;
mod hash;
mod source;

mod trace; // internal tracing hooks

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use chunk::{Chunk, StrongSum};
pub use chunker::{ChunkIter, Chunker, split};
pub use config::{ChunkConfig, CollisionPolicy, DEFAULT_CHUNK_SIZE};
pub use delta::{Change, DeltaStats, Differ, Operation, calculate_delta};
pub use error::DeltaError;
pub use hash::{Blake3Hasher, RollingChecksum};
pub use source::ReadAt;

#[cfg(feature = "async-io")]
pub use async_stream::{ChunkStream, chunk_async};
