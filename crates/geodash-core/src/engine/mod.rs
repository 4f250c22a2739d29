// crates/geodash-core/src/engine/mod.rs

//! Filter/Aggregation Engine: resolves the active key and derives colour
//! values, KPIs, pie buckets and the top-N ranking for the visible level.

mod aggregate;
pub mod brackets;

pub use aggregate::{
    legend_for, Aggregator, BucketCount, DerivedView, FeatureValue, Kpis, LegendEntry, TopPart,
    TopRow,
};
pub use brackets::{brackets_for, classify, Bracket};
