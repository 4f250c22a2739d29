// crates/geodash-core/src/lib.rs

pub mod catalog;
pub mod config;
pub mod dashboard; // Presentation shell
pub mod engine; // Filter/aggregation
pub mod error;
pub mod format;
pub mod geo; // Geography store
pub mod key;
pub mod metrics; // Synthetic generator + store
pub mod panel;
pub mod prelude;
pub mod state; // Session state + reducer
pub mod text;
pub mod view; // Map view

// Re-exports
pub use crate::config::{DashboardConfig, GeneratorConfig};
pub use crate::dashboard::{AppState, Dashboard};
pub use crate::error::{DashError, Result};
pub use crate::geo::{FeatureCollection, GeoFeature, GeoStats};
pub use crate::key::MetricKey;
pub use crate::metrics::{MetricBag, MetricStore};
pub use crate::state::{reduce, Action, FilterState, SessionState, ViewState};
