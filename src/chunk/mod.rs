//! Chunk types.
//!
//! - [`Chunk`] - Fixed-size source region with offset, weak sum and strong sum
//! - [`StrongSum`] - 32-byte cryptographic digest

mod data;
mod hash;

pub use data::Chunk;
pub use hash::StrongSum;
