//! The sliding-window matcher.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::BytesMut;

use super::Change;
use super::index::ChunkIndex;
use super::window::Window;
use crate::chunk::Chunk;
use crate::config::ChunkConfig;
use crate::error::DeltaError;
use crate::source::ReadAt;
use crate::trace;

/// Computes the change list that turns a chunked source into a destination.
///
/// A `Differ` holds only configuration; the weak-sum index, window and
/// literal buffer live inside each [`diff`](Self::diff) call, so one differ
/// can serve any number of independent (source, destination) pairs,
/// including from several threads.
///
/// # Algorithm
///
/// 1. Index the source chunks by weak sum.
/// 2. Starting at destination offset 0, test a chunk-sized window: on a weak
///    hit confirmed by strong sum, emit `Equal` (same offset) or `Move`,
///    flush pending literals as an `Add`, and jump past the window.
/// 3. Otherwise move the window's first byte to the literal buffer and slide
///    by one byte. The weak sum is rolled, not recomputed.
/// 4. At end-of-stream flush the literal buffer, then emit a `Delete` for
///    every chunk still in the index, by descending weak sum.
///
/// # Example
///
/// ```
/// use rhdiff::{Change, ChunkConfig, Differ, split};
/// use std::io::Cursor;
///
/// let chunks = split(&b"abcxyzfoo"[..], 3)?;
/// let differ = Differ::new(ChunkConfig::new(3)?)?;
/// let changes = differ.diff(chunks, &mut Cursor::new(b"abcfoo"))?;
///
/// assert!(matches!(changes[0], Change::Equal { src_offset: 0, .. }));
/// assert!(matches!(changes[1], Change::Move { src_offset: 6, dst_offset: 3, .. }));
/// assert!(matches!(changes[2], Change::Delete { src_offset: 3, .. }));
/// # Ok::<(), rhdiff::DeltaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Differ {
    config: ChunkConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl Differ {
    /// Creates a differ for chunks produced with `config`'s chunk size.
    ///
    /// Returns [`DeltaError::InvalidChunkSize`] if the chunk size is zero.
    pub fn new(config: ChunkConfig) -> Result<Self, DeltaError> {
        config.validate()?;
        Ok(Self {
            config,
            cancel: None,
        })
    }

    /// Installs a cancellation flag, checked before every window test.
    ///
    /// Raising the flag makes a running [`diff`](Self::diff) return
    /// [`DeltaError::Cancelled`].
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Returns the configuration used by this differ.
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Computes the change list from `chunks` to `destination`.
    ///
    /// `chunks` must be the full chunk sequence of the source, split with
    /// this differ's chunk size.
    ///
    /// # Errors
    ///
    /// - [`DeltaError::ChunkSizeMismatch`] if a chunk is empty, longer than
    ///   the chunk size, or shorter without being the last one.
    /// - [`DeltaError::ReadFailure`] if reading the destination fails.
    /// - [`DeltaError::Cancelled`] if the cancellation flag was raised.
    pub fn diff<D: ReadAt + ?Sized>(
        &self,
        chunks: Vec<Chunk>,
        destination: &mut D,
    ) -> Result<Vec<Change>, DeltaError> {
        let chunk_size = self.config.chunk_size();
        check_chunks(&chunks, chunk_size)?;

        let chunk_count = chunks.len();
        let mut index = ChunkIndex::build(chunks, self.config.collision_policy());
        trace::trace_delta_start(chunk_count, index.len(), index.shadowed(), chunk_size);

        let mut window = Window::new(chunk_size);
        let mut literal = BytesMut::new();
        let mut changes = Vec::new();

        loop {
            if self.is_cancelled() {
                return Err(DeltaError::Cancelled);
            }

            window.fill(destination)?;
            if window.is_empty() {
                break;
            }

            let start = window.start();
            let weak = window.weak_sum();

            if let Some(chunk) = index.take(weak, start, || window.strong_sum()) {
                let data = window.consume();
                trace::trace_match_hit(chunk.offset, start, data.len(), weak);

                changes.push(if chunk.offset == start {
                    Change::Equal {
                        src_offset: chunk.offset,
                        dst_offset: start,
                        data,
                    }
                } else {
                    Change::Move {
                        src_offset: chunk.offset,
                        dst_offset: start,
                        data,
                    }
                });
                flush_literal(&mut literal, start, &mut changes);
            } else if let Some(byte) = window.slide() {
                literal.extend_from_slice(&[byte]);
            }
        }

        flush_literal(&mut literal, window.start(), &mut changes);

        changes.extend(
            index
                .into_unmatched()
                .into_iter()
                .map(|chunk| Change::Delete {
                    src_offset: chunk.offset,
                    data: chunk.data,
                }),
        );

        trace::trace_delta_end(&changes);
        Ok(changes)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Computes the change list from a chunked source to `destination`.
///
/// `chunk_size` must be the size `chunks` were split with. Uses the
/// last-write-wins index; build a [`Differ`] for other policies or for
/// cancellation.
///
/// # Example
///
/// ```
/// use rhdiff::{Change, calculate_delta, split};
/// use std::io::Cursor;
///
/// let chunks = split(&b""[..], 3)?;
/// let changes = calculate_delta(chunks, &mut Cursor::new(b"abc"), 3)?;
///
/// assert_eq!(changes.len(), 1);
/// assert!(matches!(changes[0], Change::Add { dst_offset: 0, .. }));
/// # Ok::<(), rhdiff::DeltaError>(())
/// ```
pub fn calculate_delta<D: ReadAt + ?Sized>(
    chunks: Vec<Chunk>,
    destination: &mut D,
    chunk_size: usize,
) -> Result<Vec<Change>, DeltaError> {
    Differ::new(ChunkConfig::new(chunk_size)?)?.diff(chunks, destination)
}

/// Emits the literal run ending at `end` as a single `Add`.
fn flush_literal(literal: &mut BytesMut, end: u64, changes: &mut Vec<Change>) {
    if literal.is_empty() {
        return;
    }

    let data = literal.split().freeze();
    let dst_offset = end - data.len() as u64;
    trace::trace_literal_flush(dst_offset, data.len());
    changes.push(Change::Add { dst_offset, data });
}

fn check_chunks(chunks: &[Chunk], chunk_size: usize) -> Result<(), DeltaError> {
    let last = chunks.len().saturating_sub(1);
    for (i, chunk) in chunks.iter().enumerate() {
        let fits = match chunk.len() {
            0 => false,
            len if i == last => len <= chunk_size,
            len => len == chunk_size,
        };
        if !fits {
            return Err(DeltaError::ChunkSizeMismatch {
                offset: chunk.offset,
                len: chunk.len(),
                chunk_size,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read, Seek, SeekFrom};

    use crate::chunker::split;
    use crate::config::CollisionPolicy;

    fn delta(src: &[u8], dst: &[u8], size: usize) -> Vec<Change> {
        let chunks = split(src, size).unwrap();
        calculate_delta(chunks, &mut Cursor::new(dst), size).unwrap()
    }

    #[test]
    fn test_identity_all_equal() {
        let changes = delta(b"abcdefgh", b"abcdefgh", 3);
        assert_eq!(changes.len(), 3);
        assert!(changes.iter().all(|c| matches!(c, Change::Equal { .. })));
    }

    #[test]
    fn test_both_empty() {
        assert!(delta(b"", b"", 4).is_empty());
    }

    #[test]
    fn test_short_final_chunk_matches_tail() {
        let changes = delta(b"abcdefgh", b"XXabcdefgh", 3);
        let kinds: Vec<_> = changes.iter().map(Change::to_string).collect();
        assert_eq!(
            kinds,
            [
                "MOVE src=0 dst=2 len=3",
                "ADD dst=0 len=2",
                "MOVE src=3 dst=5 len=3",
                "MOVE src=6 dst=8 len=2",
            ]
        );
    }

    #[test]
    fn test_repeated_content_matches_once() {
        let changes = delta(b"abc", b"abcabc", 3);
        assert_eq!(changes.len(), 2);
        assert!(matches!(changes[0], Change::Equal { .. }));
        assert!(matches!(
            &changes[1],
            Change::Add { dst_offset: 3, data } if data.as_ref() == b"abc"
        ));
    }

    #[test]
    fn test_last_write_wins_duplicate_source_chunks() {
        // Only the chunk at offset 3 survives indexing.
        let changes = delta(b"abcabc", b"abcabc", 3);
        assert!(matches!(changes[0], Change::Move { src_offset: 3, dst_offset: 0, .. }));
        assert!(matches!(changes[1], Change::Add { dst_offset: 3, .. }));
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn test_candidates_duplicate_source_chunks() {
        let config = ChunkConfig::new(3)
            .unwrap()
            .with_collision_policy(CollisionPolicy::Candidates);
        let chunks = split(&b"abcabc"[..], 3).unwrap();
        let changes = Differ::new(config)
            .unwrap()
            .diff(chunks, &mut Cursor::new(b"abcabc"))
            .unwrap();

        assert_eq!(changes.len(), 2);
        assert!(matches!(changes[0], Change::Equal { src_offset: 0, .. }));
        assert!(matches!(changes[1], Change::Equal { src_offset: 3, .. }));
    }

    #[test]
    fn test_rejects_mismatched_chunk_size() {
        let chunks = split(&b"abcdefgh"[..], 4).unwrap();
        let result = calculate_delta(chunks, &mut Cursor::new(b"abcdefgh"), 3);
        assert!(matches!(
            result,
            Err(DeltaError::ChunkSizeMismatch {
                offset: 0,
                len: 4,
                chunk_size: 3
            })
        ));
    }

    #[test]
    fn test_rejects_short_chunk_before_last() {
        let chunks = vec![Chunk::new(&b"ab"[..], 0), Chunk::new(&b"cde"[..], 2)];
        let result = calculate_delta(chunks, &mut Cursor::new(b"abcde"), 3);
        assert!(matches!(
            result,
            Err(DeltaError::ChunkSizeMismatch { offset: 0, len: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_zero_chunk_size() {
        let result = calculate_delta(Vec::new(), &mut Cursor::new(b"abc"), 0);
        assert!(matches!(result, Err(DeltaError::InvalidChunkSize { size: 0 })));
    }

    #[test]
    fn test_cancelled_before_scan() {
        let flag = Arc::new(AtomicBool::new(true));
        let differ = Differ::new(ChunkConfig::new(3).unwrap())
            .unwrap()
            .with_cancellation(flag);

        let result = differ.diff(Vec::new(), &mut Cursor::new(b"abc"));
        assert!(matches!(result, Err(DeltaError::Cancelled)));
    }

    #[test]
    fn test_cancellation_flag_left_down() {
        let flag = Arc::new(AtomicBool::new(false));
        let differ = Differ::new(ChunkConfig::new(3).unwrap())
            .unwrap()
            .with_cancellation(flag);

        let changes = differ.diff(Vec::new(), &mut Cursor::new(b"abc")).unwrap();
        assert_eq!(changes.len(), 1);
    }

    /// Fails every read after the first `ok_reads`.
    struct Flaky {
        inner: Cursor<Vec<u8>>,
        ok_reads: usize,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.ok_reads == 0 {
                return Err(io::Error::other("device went away"));
            }
            self.ok_reads -= 1;
            self.inner.read(buf)
        }
    }

    impl Seek for Flaky {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    #[test]
    fn test_read_failure_returns_no_partial_result() {
        let chunks = split(&b"abcxyz"[..], 3).unwrap();
        let mut dst = Flaky {
            inner: Cursor::new(b"abcxyz".to_vec()),
            ok_reads: 1,
        };

        let result = calculate_delta(chunks, &mut dst, 3);
        assert!(matches!(result, Err(DeltaError::ReadFailure(_))));
    }
}
