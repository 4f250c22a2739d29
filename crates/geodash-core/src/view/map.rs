// crates/geodash-core/src/view/map.rs
use super::frame::MapFrame;
use super::surface::{MapSurface, Tooltip};
use crate::catalog::Level;
use crate::engine::Aggregator;
use crate::format::format_value;
use crate::geo::GeoFeature;
use crate::state::Selection;
use tracing::debug;

/// Receiver of the two user intents the map produces.
pub trait MapCallbacks {
    fn area_selected(&mut self, selection: Option<Selection>);
    fn drill_down(&mut self, state: &str);
}

/// Recorded callback, for hosts that apply intents after the fact.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    AreaSelected(Option<Selection>),
    DrillDown(String),
}

impl MapCallbacks for Vec<MapEvent> {
    fn area_selected(&mut self, selection: Option<Selection>) {
        self.push(MapEvent::AreaSelected(selection));
    }

    fn drill_down(&mut self, state: &str) {
        self.push(MapEvent::DrillDown(state.to_string()));
    }
}

/// Map View state machine: keeps the surface in step with the frame and
/// turns pointer input into tooltips and callbacks.
/// The active level is passed in by the caller on every input.
#[derive(Debug, Clone, Default)]
pub struct MapView {
    fitted: Option<u64>,
    hovered: Option<String>,
}

impl MapView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the feature whose tooltip is currently shown.
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Replaces everything on the surface with `frame`. Bounds are only
    /// re-fitted when `fit_generation` moved since the last sync.
    pub fn sync<S: MapSurface + ?Sized>(&mut self, frame: &MapFrame, fit_generation: u64, surface: &mut S) {
        surface.clear();
        surface.add_features(&frame.features);
        if self.fitted != Some(fit_generation) {
            if let Some(bounds) = frame.bounds {
                surface.fit_bounds(bounds);
            }
            self.fitted = Some(fit_generation);
        }
    }

    /// Tooltip for an active-level feature under the pointer; hidden
    /// otherwise.
    pub fn pointer_move<S: MapSurface + ?Sized>(
        &mut self,
        resolution: Level,
        hit: Option<&GeoFeature>,
        aggregator: &Aggregator<'_>,
        surface: &mut S,
    ) {
        match active_hit(resolution, hit) {
            Some(feature) => {
                let indicator = aggregator.indicator();
                let tooltip = Tooltip {
                    title: feature.name.clone(),
                    level: resolution.label(),
                    indicator: indicator.label(),
                    value: format_value(
                        indicator,
                        aggregator.value_at(feature, &aggregator.active_key()),
                    ),
                    officer: aggregator.officer(feature).map(str::to_string),
                };
                surface.show_tooltip(&tooltip);
                self.hovered = feature.id.clone();
            }
            None => {
                if self.hovered.take().is_some() {
                    surface.hide_tooltip();
                }
            }
        }
    }

    /// Selects the clicked active-level feature, or clears the selection.
    pub fn click<C: MapCallbacks + ?Sized>(
        &self,
        resolution: Level,
        hit: Option<&GeoFeature>,
        aggregator: &Aggregator<'_>,
        callbacks: &mut C,
    ) {
        let selection = active_hit(resolution, hit).and_then(|f| aggregator.selection_for(f));
        debug!(selected = ?selection.as_ref().map(|s| s.id.as_str()), "map click");
        callbacks.area_selected(selection);
    }

    /// Drills into a state when double-clicked at state resolution.
    /// Returns whether a drill-down was requested.
    pub fn double_click<C: MapCallbacks + ?Sized>(
        &self,
        resolution: Level,
        hit: Option<&GeoFeature>,
        callbacks: &mut C,
    ) -> bool {
        if resolution != Level::State {
            return false;
        }
        match active_hit(resolution, hit) {
            Some(state) => {
                callbacks.drill_down(&state.name);
                true
            }
            None => false,
        }
    }
}

fn active_hit(resolution: Level, hit: Option<&GeoFeature>) -> Option<&GeoFeature> {
    hit.filter(|f| f.is_level(resolution))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Indicator;
    use crate::geo::FeatureCollection;
    use crate::key::MetricKey;
    use crate::metrics::{MetricBag, MetricStore};
    use crate::state::{FilterState, ViewState};
    use crate::view::{CommandBuffer, FeatureRole, SurfaceCommand};

    const FIXTURE: &str = r#"{
      "type": "FeatureCollection",
      "features": [
        {"type":"Feature","properties":{"id":"KL","name":"Kerala","level":"state"},
         "geometry":{"type":"Polygon","coordinates":[[[76,8],[77,8],[77,12],[76,8]]]}},
        {"type":"Feature","properties":{"id":"GA","name":"Goa","level":"state"},
         "geometry":{"type":"Polygon","coordinates":[[[73,15],[74,15],[74,16],[73,15]]]}},
        {"type":"Feature","properties":{"id":"D1","name":"Kollam","state":"Kerala","level":"district"},
         "geometry":{"type":"Polygon","coordinates":[[[76,8],[77,8],[77,9],[76,8]]]}},
        {"type":"Feature","properties":{"id":"D2","name":"North Goa","state":"Goa","level":"district"},
         "geometry":{"type":"Polygon","coordinates":[[[73,15.5],[74,15.5],[74,16],[73,15.5]]]}},
        {"type":"Feature","properties":{"id":"S1","name":"Karunagappally","state":"Kerala","district":"Kollam","level":"sub-district"},
         "geometry":{"type":"Polygon","coordinates":[[[76.4,8.9],[76.6,8.9],[76.6,9.1],[76.4,8.9]]]}}
      ]
    }"#;

    fn setup() -> (FeatureCollection, MetricStore) {
        let fc = FeatureCollection::from_json_str(FIXTURE).unwrap();
        let mut store = MetricStore::new();
        store.insert(
            "KL",
            MetricKey::overall(),
            MetricBag::new().with(Indicator::Funds, 2.5e7),
        );
        store.set_officer("KL", "Priya Nair");
        (fc, store)
    }

    #[test]
    fn drill_down_frame_scopes_active_and_outline_features() {
        let (fc, store) = setup();
        let filters = FilterState::default();
        let view = ViewState {
            resolution: Level::SubDistrict,
            focus: Some("Kerala".into()),
            fit_generation: 1,
        };
        let agg = Aggregator::new(&fc, &store, &filters).within(view.focus.as_deref());
        let frame = MapFrame::build(&fc, &view, &agg);

        let active: Vec<&str> = frame.active().map(|f| f.id.as_str()).collect();
        let outlines: Vec<&str> = frame.outlines().map(|f| f.id.as_str()).collect();
        assert_eq!(active, vec!["S1"]);
        assert_eq!(outlines, vec!["D1", "KL"]);
        assert!(frame.outlines().all(|f| f.style.fill == "transparent"));
    }

    #[test]
    fn sync_fits_only_when_generation_changes() {
        let (fc, store) = setup();
        let filters = FilterState::default();
        let view = ViewState::default();
        let agg = Aggregator::new(&fc, &store, &filters);
        let frame = MapFrame::build(&fc, &view, &agg);

        let mut map = MapView::new();
        let mut surface = CommandBuffer::new();
        map.sync(&frame, 0, &mut surface);
        map.sync(&frame, 0, &mut surface);
        map.sync(&frame, 1, &mut surface);

        let fits = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, SurfaceCommand::FitBounds { .. }))
            .count();
        let clears = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, SurfaceCommand::Clear))
            .count();
        assert_eq!(fits, 2);
        assert_eq!(clears, 3);
        assert!(frame.features.iter().all(|f| f.role == FeatureRole::Active));
    }

    #[test]
    fn hover_shows_formatted_value_and_officer() {
        let (fc, store) = setup();
        let filters = FilterState::default();
        let agg = Aggregator::new(&fc, &store, &filters);
        let mut map = MapView::new();
        let mut surface = CommandBuffer::new();

        map.pointer_move(Level::State, fc.find("KL"), &agg, &mut surface);
        map.pointer_move(Level::State, fc.find("GA"), &agg, &mut surface);
        map.pointer_move(Level::State, fc.find("D1"), &agg, &mut surface);
        map.pointer_move(Level::State, None, &agg, &mut surface);

        let cmds = surface.take();
        match &cmds[0] {
            SurfaceCommand::ShowTooltip { tooltip } => {
                assert_eq!(tooltip.title, "Kerala");
                assert_eq!(tooltip.value, "₹2.50 Cr");
                assert_eq!(tooltip.officer.as_deref(), Some("Priya Nair"));
            }
            other => panic!("unexpected {other:?}"),
        }
        match &cmds[1] {
            SurfaceCommand::ShowTooltip { tooltip } => assert_eq!(tooltip.value, "N/A"),
            other => panic!("unexpected {other:?}"),
        }
        // A district at state resolution is not interactive.
        assert!(matches!(cmds[2], SurfaceCommand::HideTooltip));
        assert_eq!(cmds.len(), 3);
    }

    #[test]
    fn click_and_double_click_emit_callbacks() {
        let (fc, store) = setup();
        let filters = FilterState::default();
        let agg = Aggregator::new(&fc, &store, &filters);
        let map = MapView::new();
        let mut events: Vec<MapEvent> = Vec::new();

        map.click(Level::State, fc.find("KL"), &agg, &mut events);
        map.click(Level::State, None, &agg, &mut events);
        assert!(map.double_click(Level::State, fc.find("KL"), &mut events));
        assert!(!map.double_click(Level::State, fc.find("D1"), &mut events));

        match &events[0] {
            MapEvent::AreaSelected(Some(sel)) => {
                assert_eq!(sel.id, "KL");
                assert_eq!(sel.bag.as_ref().and_then(|b| b.get(Indicator::Funds)), Some(2.5e7));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(events[1], MapEvent::AreaSelected(None));
        assert_eq!(events[2], MapEvent::DrillDown("Kerala".into()));
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn tooltip_is_hidden_after_a_re_render() {
        let (fc, store) = setup();
        let filters = FilterState::default();
        let view = ViewState::default();
        let agg = Aggregator::new(&fc, &store, &filters);
        let frame = MapFrame::build(&fc, &view, &agg);
        let mut map = MapView::new();
        let mut surface = CommandBuffer::new();

        map.pointer_move(Level::State, fc.find("KL"), &agg, &mut surface);
        map.sync(&frame, 0, &mut surface);
        assert_eq!(map.hovered(), Some("KL"));
        surface.take();

        map.pointer_move(Level::State, None, &agg, &mut surface);
        let cmds = surface.take();
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0], SurfaceCommand::HideTooltip));
        assert_eq!(map.hovered(), None);
    }

    #[test]
    fn active_level_follows_the_given_resolution() {
        let (fc, store) = setup();
        let filters = FilterState::default();
        let agg = Aggregator::new(&fc, &store, &filters);
        let map = MapView::new();
        let mut events: Vec<MapEvent> = Vec::new();

        map.click(Level::District, fc.find("D1"), &agg, &mut events);
        map.click(Level::District, fc.find("KL"), &agg, &mut events);
        assert!(!map.double_click(Level::District, fc.find("GA"), &mut events));

        match &events[0] {
            MapEvent::AreaSelected(Some(sel)) => {
                assert_eq!(sel.id, "D1");
                assert_eq!(sel.level, Level::District);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(events[1], MapEvent::AreaSelected(None));
        assert_eq!(events.len(), 2);
    }
}
