//! Weak-sum index over the source chunks.

use std::collections::HashMap;

use crate::chunk::{Chunk, StrongSum};
use crate::config::CollisionPolicy;
use crate::trace;

/// Source chunks keyed by weak sum, owned by a single delta computation.
///
/// A matched chunk is removed, so each source chunk satisfies at most one
/// `Equal`/`Move`. Candidate lists keep source order.
#[derive(Debug)]
pub(crate) struct ChunkIndex {
    slots: HashMap<u32, Vec<Chunk>>,
    policy: CollisionPolicy,
    shadowed: usize,
}

impl ChunkIndex {
    pub(crate) fn build(chunks: Vec<Chunk>, policy: CollisionPolicy) -> Self {
        let mut slots: HashMap<u32, Vec<Chunk>> = HashMap::with_capacity(chunks.len());
        let mut shadowed = 0;

        for chunk in chunks {
            match policy {
                CollisionPolicy::LastWriteWins => {
                    if slots.insert(chunk.weak_sum, vec![chunk]).is_some() {
                        shadowed += 1;
                    }
                }
                CollisionPolicy::Candidates => {
                    slots.entry(chunk.weak_sum).or_default().push(chunk);
                }
            }
        }

        Self {
            slots,
            policy,
            shadowed,
        }
    }

    /// Number of chunks still waiting for a match.
    pub(crate) fn len(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    /// Number of chunks overwritten by a later chunk with the same weak sum.
    pub(crate) fn shadowed(&self) -> usize {
        self.shadowed
    }

    /// Removes and returns the chunk matching the window at `window_start`,
    /// if any.
    ///
    /// `strong_sum` is only called when `weak` hits a slot. `window_start`
    /// breaks ties between equal-content candidates in favour of the one
    /// already at that offset.
    pub(crate) fn take<F>(&mut self, weak: u32, window_start: u64, strong_sum: F) -> Option<Chunk>
    where
        F: FnOnce() -> StrongSum,
    {
        let candidates = self.slots.get_mut(&weak)?;
        let strong = strong_sum();

        let position = match self.policy {
            CollisionPolicy::LastWriteWins => candidates.iter().position(|c| c.strong_sum == strong),
            CollisionPolicy::Candidates => candidates
                .iter()
                .position(|c| c.offset == window_start && c.strong_sum == strong)
                .or_else(|| candidates.iter().position(|c| c.strong_sum == strong)),
        };

        let Some(position) = position else {
            trace::trace_false_alarm(weak, window_start);
            return None;
        };

        let chunk = candidates.remove(position);
        if candidates.is_empty() {
            self.slots.remove(&weak);
        }
        Some(chunk)
    }

    /// Consumes the index and returns every unmatched chunk, ordered by
    /// descending weak sum, then ascending source offset.
    pub(crate) fn into_unmatched(self) -> Vec<Chunk> {
        let mut chunks: Vec<Chunk> = self.slots.into_values().flatten().collect();
        chunks.sort_by(|a, b| {
            b.weak_sum
                .cmp(&a.weak_sum)
                .then_with(|| a.offset.cmp(&b.offset))
        });
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Blake3Hasher;
    use bytes::Bytes;

    fn strong(data: &'static [u8]) -> impl FnOnce() -> StrongSum {
        move || Blake3Hasher::hash(data)
    }

    /// Builds a chunk whose weak sum is forced to `weak`.
    fn forged(data: &'static [u8], offset: u64, weak: u32) -> Chunk {
        let mut chunk = Chunk::new(Bytes::from_static(data), offset);
        chunk.weak_sum = weak;
        chunk
    }

    #[test]
    fn test_take_consumes() {
        let chunk = Chunk::new(&b"abc"[..], 0);
        let weak = chunk.weak_sum;
        let mut index = ChunkIndex::build(vec![chunk], CollisionPolicy::LastWriteWins);

        assert_eq!(index.take(weak, 0, strong(b"abc")).unwrap().offset, 0);
        assert!(index.take(weak, 3, strong(b"abc")).is_none());
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn test_miss_skips_strong_sum() {
        let mut index =
            ChunkIndex::build(vec![forged(b"abc", 0, 42)], CollisionPolicy::LastWriteWins);

        let taken = index.take(7, 0, || panic!("strong sum computed on a weak miss"));
        assert!(taken.is_none());
    }

    #[test]
    fn test_strong_sum_rejects_collision() {
        let mut index =
            ChunkIndex::build(vec![forged(b"abc", 0, 42)], CollisionPolicy::LastWriteWins);

        assert!(index.take(42, 0, strong(b"xyz")).is_none());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_last_write_wins_shadows_earlier_chunk() {
        let chunks = vec![forged(b"abc", 0, 7), forged(b"xyz", 3, 7)];
        let mut index = ChunkIndex::build(chunks, CollisionPolicy::LastWriteWins);

        assert_eq!(index.shadowed(), 1);
        assert!(index.take(7, 0, strong(b"abc")).is_none());
        assert_eq!(index.take(7, 0, strong(b"xyz")).unwrap().offset, 3);
        assert!(index.into_unmatched().is_empty());
    }

    #[test]
    fn test_candidates_keep_every_chunk() {
        let chunks = vec![forged(b"abc", 0, 7), forged(b"xyz", 3, 7)];
        let mut index = ChunkIndex::build(chunks, CollisionPolicy::Candidates);

        assert_eq!(index.shadowed(), 0);
        assert_eq!(index.len(), 2);
        assert_eq!(index.take(7, 9, strong(b"abc")).unwrap().offset, 0);

        let unmatched = index.into_unmatched();
        assert_eq!(unmatched.len(), 1);
        assert_eq!(unmatched[0].offset, 3);
    }

    #[test]
    fn test_candidates_prefer_aligned_offset() {
        let chunks = vec![Chunk::new(&b"abc"[..], 0), Chunk::new(&b"abc"[..], 3)];
        let weak = chunks[0].weak_sum;
        let mut index = ChunkIndex::build(chunks, CollisionPolicy::Candidates);

        assert_eq!(index.take(weak, 3, strong(b"abc")).unwrap().offset, 3);
        assert_eq!(index.take(weak, 9, strong(b"abc")).unwrap().offset, 0);
    }

    #[test]
    fn test_unmatched_order() {
        let chunks = vec![
            forged(b"aaa", 0, 10),
            forged(b"bbb", 3, 30),
            forged(b"ccc", 6, 20),
            forged(b"ddd", 9, 30),
        ];
        let index = ChunkIndex::build(chunks, CollisionPolicy::Candidates);

        let offsets: Vec<_> = index.into_unmatched().iter().map(|c| c.offset).collect();
        assert_eq!(offsets, [3, 9, 6, 0]);
    }
}
