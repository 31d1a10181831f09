//! Configuration for splitting and delta computation.
//!
//! - [`ChunkConfig`] - Chunk size and weak-sum collision handling
//! - [`CollisionPolicy`] - What the differ's index does with colliding weak sums
//!
//! # Example
//!
//! ```
//! use rhdiff::{ChunkConfig, CollisionPolicy};
//!
//! let config = ChunkConfig::new(1024)?
//!     .with_collision_policy(CollisionPolicy::Candidates);
//! assert_eq!(config.chunk_size(), 1024);
//! # Ok::<(), rhdiff::DeltaError>(())
//! ```

use crate::error::DeltaError;

/// Default chunk size (4 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024;

/// Upper bound on any single read buffer, whatever the chunk size.
pub(crate) const READ_BUFFER_SIZE: usize = 64 * 1024;

/// How source chunks sharing a weak sum are kept in the differ's index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollisionPolicy {
    /// One slot per weak sum; a later chunk overwrites an earlier one.
    ///
    /// Overwritten chunks can never be matched and are not reported as
    /// deleted either.
    #[default]
    LastWriteWins,

    /// Every chunk is kept as a candidate under its weak sum and all
    /// candidates are checked by strong sum before a window is given up.
    ///
    /// Among equal-content candidates the one whose source offset equals the
    /// window start wins, otherwise the lowest source offset.
    Candidates,
}

/// Configuration shared by the chunker and the differ.
///
/// The same chunk size must be used to split the source and to scan the
/// destination; the differ rejects chunk lists that do not fit it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkConfig {
    chunk_size: usize,
    collision_policy: CollisionPolicy,
}

impl ChunkConfig {
    /// Creates a new configuration.
    ///
    /// Returns [`DeltaError::InvalidChunkSize`] if `chunk_size` is zero.
    pub fn new(chunk_size: usize) -> Result<Self, DeltaError> {
        if chunk_size == 0 {
            return Err(DeltaError::InvalidChunkSize { size: chunk_size });
        }

        Ok(Self {
            chunk_size,
            collision_policy: CollisionPolicy::default(),
        })
    }

    /// Sets the chunk size.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`ChunkConfig::validate`] to check it.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets the collision policy.
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Returns the chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the collision policy.
    pub fn collision_policy(&self) -> CollisionPolicy {
        self.collision_policy
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), DeltaError> {
        Self::new(self.chunk_size).map(|_| ())
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            collision_policy: CollisionPolicy::default(),
        }
    }
}
