//! Checksums for chunk identity.
//!
//! - [`RollingChecksum`] - Adler-32 weak sum with O(1) window updates
//! - [`Blake3Hasher`] - BLAKE3 strong sum confirming weak-sum hits

mod adler32;
mod blake3;

pub use adler32::RollingChecksum;
pub use self::blake3::Blake3Hasher;
