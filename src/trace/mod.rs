//! Structured logging for splitting and delta computation.
//!
//! All events go through the `tracing` crate under the `rhdiff::delta` target and
//! are compiled in only with the `tracing` feature; without it every function
//! here is an empty inline no-op. The crate never installs a subscriber.

use crate::delta::Change;
#[cfg(feature = "tracing")]
use crate::delta::DeltaStats;

/// Target name for every event emitted by this crate.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) const TARGET: &str = "rhdiff::delta";

/// A source was split into `chunk_count` chunks.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_split_end(chunk_count: usize, chunk_size: usize) {
    tracing::debug!(target: TARGET, chunk_count, chunk_size, "source split");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_split_end(_chunk_count: usize, _chunk_size: usize) {}

/// The weak-sum index was built and the destination scan begins.
///
/// `shadowed` counts chunks lost to last-write-wins weak-sum collisions.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_delta_start(
    chunk_count: usize,
    indexed: usize,
    shadowed: usize,
    chunk_size: usize,
) {
    tracing::debug!(
        target: TARGET,
        chunk_count,
        indexed,
        shadowed,
        chunk_size,
        "delta scan started"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_delta_start(
    _chunk_count: usize,
    _indexed: usize,
    _shadowed: usize,
    _chunk_size: usize,
) {
}

/// A destination window was confirmed against a source chunk.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_match_hit(src_offset: u64, dst_offset: u64, len: usize, weak: u32) {
    tracing::trace!(
        target: TARGET,
        src_offset,
        dst_offset,
        len,
        weak = format!("{:08x}", weak),
        "match"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_match_hit(_src_offset: u64, _dst_offset: u64, _len: usize, _weak: u32) {}

/// A weak sum hit the index but no candidate's strong sum agreed.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_false_alarm(weak: u32, dst_offset: u64) {
    tracing::trace!(
        target: TARGET,
        weak = format!("{:08x}", weak),
        dst_offset,
        "weak sum false alarm"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_false_alarm(_weak: u32, _dst_offset: u64) {}

/// A literal run was flushed as an `Add`.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_literal_flush(dst_offset: u64, len: usize) {
    tracing::trace!(target: TARGET, dst_offset, len, "literal flush");
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_literal_flush(_dst_offset: u64, _len: usize) {}

/// The scan finished with `changes`.
#[cfg(feature = "tracing")]
#[inline]
pub(crate) fn trace_delta_end(changes: &[Change]) {
    let stats = DeltaStats::from_changes(changes);
    tracing::debug!(
        target: TARGET,
        equal = stats.equal,
        moved = stats.moved,
        added = stats.added,
        deleted = stats.deleted,
        matched_bytes = stats.matched_bytes,
        literal_bytes = stats.literal_bytes,
        deleted_bytes = stats.deleted_bytes,
        "delta scan finished"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn trace_delta_end(_changes: &[Change]) {}
