//! geodash prelude: bring common types and traits into scope for hosts and demos.

#![allow(unused_imports)]

pub use crate::catalog::{
    Breakdown, FinancialYear, Gender, Indicator, Level, Scheme, Sector, Unit, Year,
};
pub use crate::config::{DashboardConfig, GeneratorConfig};
pub use crate::dashboard::{AppState, Dashboard, DashboardStats, Header};
pub use crate::engine::{Aggregator, DerivedView, Kpis, LegendEntry, TopRow};
pub use crate::error::{DashError, Result};
pub use crate::geo::{BBox, FeatureCollection, GeoFeature, GeoStats};
pub use crate::key::{MetricKey, Period};
pub use crate::metrics::{MetricBag, MetricStore};
pub use crate::panel::{DetailPanel, PanelView};
pub use crate::state::{reduce, Action, FilterState, SessionState, Selection, ViewState};
pub use crate::text::{equals_folded, fold_key, NameMatch};
pub use crate::view::{CommandBuffer, MapCallbacks, MapSurface, SurfaceCommand};
