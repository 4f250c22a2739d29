// crates/geodash-core/src/metrics/mod.rs

//! Synthetic metrics: the per-feature bag store, its generator and the
//! exact-sum redistribution used for derived sub-regions.

mod bag;
pub mod distribute;
mod generator;

pub use bag::{MetricBag, MetricStore};
pub use distribute::distribute;
pub use generator::{all_keys, derive_children, generate, session_rng};
