// crates/geodash-core/src/dashboard/mod.rs

//! Presentation Shell: owns the geography, the generated store and the
//! session, routes user input through the reducer and hands derived views
//! to whatever draws them.

mod debounce;

pub use debounce::Debouncer;

use crate::catalog::{FinancialYear, Level, Sector, Year};
use crate::config::DashboardConfig;
use crate::engine::{legend_for, Aggregator, DerivedView, LegendEntry};
use crate::error::Result;
use crate::geo::{FeatureCollection, GeoStats};
use crate::metrics::{generate, session_rng, MetricStore};
use crate::panel::{DetailPanel, PanelView};
use crate::state::{reduce, Action, FilterState, SessionState, ViewState};
use crate::view::{MapEvent, MapFrame, MapSurface, MapView};
use once_cell::unsync::OnceCell;
use serde::Serialize;
use std::cell::Cell;
use tracing::{debug, info, warn};

/// Application lifecycle. A failed load is terminal.
#[derive(Debug)]
pub enum AppState {
    Loading,
    Ready(Box<Dashboard>),
    Failed(String),
}

impl AppState {
    /// Moves out of `Loading` once the geography fetch has settled.
    pub fn boot(loaded: Result<FeatureCollection>, config: DashboardConfig) -> AppState {
        match loaded.and_then(|c| config.validate().map(|_| c)) {
            Ok(collection) => AppState::Ready(Box::new(Dashboard::new(collection, config))),
            Err(e) => {
                warn!(error = %e, "dashboard failed to start");
                AppState::Failed(e.to_string())
            }
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            AppState::Loading => "loading",
            AppState::Ready(_) => "ready",
            AppState::Failed(_) => "failed",
        }
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match self {
            AppState::Ready(d) => Some(d.as_ref()),
            _ => None,
        }
    }

    pub fn dashboard_mut(&mut self) -> Option<&mut Dashboard> {
        match self {
            AppState::Ready(d) => Some(d.as_mut()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AppState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Title-bar labels for the current filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub scheme: &'static str,
    pub indicator: &'static str,
    pub period: String,
    pub resolution: &'static str,
    pub focus: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardStats {
    pub geography: GeoStats,
    pub metric_features: usize,
    pub metric_bags: usize,
    /// How often the derived view has been computed this session.
    pub derivations: u64,
}

#[derive(Debug)]
pub struct Dashboard {
    collection: FeatureCollection,
    store: MetricStore,
    config: DashboardConfig,
    session: SessionState,
    pending: Debouncer<Action>,
    map: MapView,
    derived: OnceCell<DerivedView>,
    derivations: Cell<u64>,
}

impl Dashboard {
    /// Generates the session's metrics once; they are never regenerated.
    pub fn new(collection: FeatureCollection, config: DashboardConfig) -> Self {
        let mut rng = session_rng(config.seed);
        let store = generate(&collection, &config.generator, &mut rng);
        info!(
            features = collection.len(),
            seeded = config.seed.is_some(),
            "dashboard ready"
        );
        Dashboard {
            collection,
            store,
            pending: Debouncer::new(config.debounce_ms),
            config,
            session: SessionState::default(),
            map: MapView::new(),
            derived: OnceCell::new(),
            derivations: Cell::new(0),
        }
    }

    pub fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    pub fn store(&self) -> &MetricStore {
        &self.store
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn filters(&self) -> &FilterState {
        &self.session.filters
    }

    pub fn view(&self) -> &ViewState {
        &self.session.view
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Applies `action` now, or holds it in the debounce window for the
    /// year, financial-year and sector selectors. Returns whether the
    /// session changed.
    pub fn dispatch(&mut self, action: Action, now_ms: u64) -> bool {
        if action.is_debounced() {
            self.pending.push(action, now_ms);
            return false;
        }
        self.apply_now(action);
        true
    }

    /// Applies debounced actions whose window has elapsed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let due = self.pending.poll(now_ms);
        let changed = !due.is_empty();
        for action in due {
            self.apply(action);
        }
        changed
    }

    fn apply_now(&mut self, action: Action) {
        // Held selector changes happened first; keep that order.
        for held in self.pending.flush() {
            self.apply(held);
        }
        self.apply(action);
    }

    fn apply(&mut self, action: Action) {
        if let Action::DrillDown(name) = &action {
            if self.collection.find_named(Level::State, name).is_none() {
                warn!(state = %name, "drill-down target is not a loaded state");
                return;
            }
        }
        debug!(?action, "applying action");
        let next = reduce(&self.session, action);
        if next.filters != self.session.filters || next.view != self.session.view {
            self.derived = OnceCell::new();
        }
        self.session = next;
    }

    pub fn aggregator(&self) -> Aggregator<'_> {
        Aggregator::new(&self.collection, &self.store, &self.session.filters)
            .within(self.session.view.focus.as_deref())
    }

    /// Charts, KPIs and colour values for the current filters and view,
    /// recomputed only after either changed.
    pub fn derived(&self) -> &DerivedView {
        self.derived.get_or_init(|| {
            self.derivations.set(self.derivations.get() + 1);
            self.aggregator()
                .derive(self.session.view.resolution, self.config.top_n)
        })
    }

    pub fn render_map<S: MapSurface + ?Sized>(&mut self, surface: &mut S) {
        let aggregator = Aggregator::new(&self.collection, &self.store, &self.session.filters)
            .within(self.session.view.focus.as_deref());
        let frame = MapFrame::build(&self.collection, &self.session.view, &aggregator);
        self.map
            .sync(&frame, self.session.view.fit_generation, surface);
    }

    pub fn hover<S: MapSurface + ?Sized>(&mut self, id: Option<&str>, surface: &mut S) {
        let hit = id.and_then(|id| self.collection.find(id));
        let aggregator = Aggregator::new(&self.collection, &self.store, &self.session.filters)
            .within(self.session.view.focus.as_deref());
        self.map
            .pointer_move(self.session.view.resolution, hit, &aggregator, surface);
    }

    pub fn click(&mut self, id: Option<&str>) {
        let mut events = Vec::new();
        let hit = id.and_then(|id| self.collection.find(id));
        self.map
            .click(self.session.view.resolution, hit, &self.aggregator(), &mut events);
        self.apply_events(events);
    }

    pub fn double_click(&mut self, id: Option<&str>) -> bool {
        let mut events = Vec::new();
        let hit = id.and_then(|id| self.collection.find(id));
        let drilled = self
            .map
            .double_click(self.session.view.resolution, hit, &mut events);
        self.apply_events(events);
        drilled
    }

    fn apply_events(&mut self, events: Vec<MapEvent>) {
        for event in events {
            let action = match event {
                MapEvent::AreaSelected(selection) => Action::Select(selection),
                MapEvent::DrillDown(state) => Action::DrillDown(state),
            };
            self.apply_now(action);
        }
    }

    pub fn detail_panel(&self) -> PanelView {
        DetailPanel::render(self.session.selection.as_ref(), &self.session.filters)
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        legend_for(self.session.filters.indicator)
    }

    pub fn header(&self) -> Header {
        let f = &self.session.filters;
        let period = if f.scheme.is_fisheries() {
            format!(
                "{} · {}",
                financial_year_label(f.financial_year),
                sector_label(f.sector)
            )
        } else {
            year_label(f.year)
        };
        Header {
            scheme: f.scheme.label(),
            indicator: f.indicator.label(),
            period,
            resolution: self.session.view.resolution.label(),
            focus: self.session.view.focus.clone(),
        }
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            geography: self.collection.stats(),
            metric_features: self.store.feature_count(),
            metric_bags: self.store.bag_count(),
            derivations: self.derivations.get(),
        }
    }
}

fn year_label(year: Year) -> String {
    match year {
        Year::All => "All years".to_string(),
        y => y.as_str().to_string(),
    }
}

fn financial_year_label(fy: FinancialYear) -> String {
    match fy {
        FinancialYear::All => "All financial years".to_string(),
        fy => format!("FY {fy}"),
    }
}

fn sector_label(sector: Sector) -> String {
    match sector {
        Sector::All => "All sectors".to_string(),
        Sector::Inland => "Inland".to_string(),
        Sector::Marine => "Marine".to_string(),
    }
}
