// crates/geodash-core/src/state.rs

//! Session state and its single update function.
//!
//! All view state (filters, map resolution, drill-down focus, selection)
//! lives in one [`SessionState`] value. User input is expressed as an
//! [`Action`] and applied with [`reduce`]; nothing else mutates it.

use crate::catalog::{Breakdown, FinancialYear, Gender, Indicator, Level, Scheme, Sector, Year};
use crate::key::MetricKey;
use crate::metrics::MetricBag;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Current filter selections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    pub scheme: Scheme,
    pub gender: Gender,
    pub year: Year,
    pub financial_year: FinancialYear,
    pub sector: Sector,
    pub indicator: Indicator,
    /// Secondary category of the top-N chart.
    pub breakdown: Breakdown,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            scheme: Scheme::All,
            gender: Gender::All,
            year: Year::All,
            financial_year: FinancialYear::All,
            sector: Sector::All,
            indicator: Scheme::All.default_indicator(),
            breakdown: Breakdown::Gender,
        }
    }
}

impl FilterState {
    /// The lookup key the current selections resolve to. The fisheries
    /// scheme reads financial year + sector, every other scheme the
    /// calendar year.
    pub fn active_key(&self) -> MetricKey {
        MetricKey::for_scheme(
            self.scheme,
            self.gender,
            self.year,
            self.financial_year,
            self.sector,
        )
    }
}

/// Map resolution and drill-down focus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub resolution: Level,
    /// State the view is drilled into, if any.
    pub focus: Option<String>,
    /// Bumped whenever the map should re-fit its extent.
    pub fit_generation: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            resolution: Level::State,
            focus: None,
            fit_generation: 0,
        }
    }
}

impl ViewState {
    pub fn is_top_level(&self) -> bool {
        self.resolution == Level::State && self.focus.is_none()
    }
}

/// The last clicked feature, with the bag for the key active at click time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub id: String,
    pub name: String,
    pub level: Level,
    pub key: MetricKey,
    pub bag: Option<MetricBag>,
    pub officer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    pub filters: FilterState,
    pub view: ViewState,
    pub selection: Option<Selection>,
}

/// Everything a user can do to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Action {
    SetScheme(Scheme),
    SetGender(Gender),
    SetYear(Year),
    SetFinancialYear(FinancialYear),
    SetSector(Sector),
    SetIndicator(Indicator),
    SetBreakdown(Breakdown),
    SetResolution(Level),
    DrillDown(String),
    ResetView,
    Select(Option<Selection>),
}

impl Action {
    /// High-frequency selectors that feed the heavier aggregation and are
    /// debounced by the shell.
    pub fn is_debounced(&self) -> bool {
        matches!(
            self,
            Action::SetYear(_) | Action::SetFinancialYear(_) | Action::SetSector(_)
        )
    }
}

/// Applies one action. Pure: the previous state is left untouched.
pub fn reduce(state: &SessionState, action: Action) -> SessionState {
    let mut next = state.clone();
    match action {
        Action::SetScheme(scheme) => {
            next.filters.scheme = scheme;
            if !scheme.supports(next.filters.indicator) {
                next.filters.indicator = scheme.default_indicator();
            }
            next.selection = None;
        }
        Action::SetGender(gender) => {
            next.filters.gender = gender;
            next.selection = None;
        }
        Action::SetYear(year) => {
            next.filters.year = year;
            next.selection = None;
        }
        Action::SetFinancialYear(fy) => {
            next.filters.financial_year = fy;
            next.selection = None;
        }
        Action::SetSector(sector) => {
            next.filters.sector = sector;
            next.selection = None;
        }
        Action::SetIndicator(indicator) => {
            if next.filters.scheme.supports(indicator) {
                next.filters.indicator = indicator;
                next.selection = None;
            } else {
                debug!(%indicator, scheme = %next.filters.scheme, "indicator not offered by scheme");
            }
        }
        Action::SetBreakdown(breakdown) => {
            next.filters.breakdown = breakdown;
        }
        Action::SetResolution(Level::State) | Action::ResetView => {
            return_to_top(&mut next);
        }
        Action::SetResolution(level) => {
            next.view.resolution = level;
            next.selection = None;
        }
        Action::DrillDown(state_name) => {
            if next.view.resolution != Level::State {
                debug!(state = %state_name, resolution = %next.view.resolution, "drill-down only from state view");
                return next;
            }
            next.view.resolution = Level::District;
            next.view.focus = Some(state_name);
            next.view.fit_generation += 1;
            next.selection = None;
        }
        Action::Select(selection) => {
            next.selection = selection;
        }
    }
    next
}

fn return_to_top(next: &mut SessionState) {
    if next.view.is_top_level() {
        return;
    }
    next.view.resolution = Level::State;
    next.view.focus = None;
    next.view.fit_generation += 1;
    next.selection = None;
}
