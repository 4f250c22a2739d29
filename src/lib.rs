//! Workspace host crate. Re-exports [`geodash_core`] so demos and tooling
//! can depend on a single path.

pub use geodash_core::*;
