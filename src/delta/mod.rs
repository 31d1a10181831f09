//! Delta computation between a chunked source and a destination.
//!
//! - [`Differ`] / [`calculate_delta`] - Sliding-window matcher
//! - [`Change`] / [`Operation`] - Change records it produces
//! - [`DeltaStats`] - Summary of a change list
//!
//! # Ordering
//!
//! `Equal`, `Move` and `Add` follow the destination scan; a literal run is
//! emitted right after the match that ends it. All `Delete`s come last,
//! ordered by descending weak sum of the unmatched chunk.

mod change;
mod differ;
mod index;
mod stats;
mod window;

pub use change::{Change, Operation};
pub use differ::{Differ, calculate_delta};
pub use stats::DeltaStats;
