// crates/geodash-core/src/panel.rs

//! Detail Panel: the selected feature's bag as labelled, formatted rows.

use crate::catalog::{Indicator, FISHERIES_INDICATORS, GENERIC_INDICATORS};
use crate::format::format_value;
use crate::state::{FilterState, Selection};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelVariant {
    Generic,
    Fisheries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelRow {
    pub label: &'static str,
    pub value: String,
    /// The row of the indicator currently shown on the map.
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum PanelView {
    Hidden,
    Visible {
        title: String,
        subtitle: String,
        variant: PanelVariant,
        rows: Vec<PanelRow>,
        officer: Option<String>,
    },
}

impl PanelView {
    pub fn is_visible(&self) -> bool {
        matches!(self, PanelView::Visible { .. })
    }

    pub fn rows(&self) -> &[PanelRow] {
        match self {
            PanelView::Visible { rows, .. } => rows,
            PanelView::Hidden => &[],
        }
    }
}

pub struct DetailPanel;

impl DetailPanel {
    pub fn render(selection: Option<&Selection>, filters: &FilterState) -> PanelView {
        let Some(sel) = selection else {
            return PanelView::Hidden;
        };

        let (variant, indicators): (PanelVariant, &[Indicator]) = if sel.key.is_fisheries() {
            (PanelVariant::Fisheries, FISHERIES_INDICATORS)
        } else {
            (PanelVariant::Generic, GENERIC_INDICATORS)
        };

        let rows = indicators
            .iter()
            .map(|&indicator| PanelRow {
                label: indicator.label(),
                value: format_value(indicator, sel.bag.as_ref().and_then(|b| b.get(indicator))),
                highlighted: indicator == filters.indicator,
            })
            .collect();

        let mut subtitle = format!(
            "{} · {} · {}",
            sel.level.label(),
            sel.key.scheme.label(),
            sel.key.period.as_str()
        );
        if let Some(sector) = sel.key.sector {
            subtitle.push_str(" · ");
            subtitle.push_str(sector.as_str());
        }

        PanelView::Visible {
            title: sel.name.clone(),
            subtitle,
            variant,
            rows,
            officer: sel.officer.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FinancialYear, Gender, Level, Scheme, Sector};
    use crate::key::MetricKey;
    use crate::metrics::MetricBag;

    fn selection(key: MetricKey, bag: Option<MetricBag>) -> Selection {
        Selection {
            id: "D1".into(),
            name: "Kollam".into(),
            level: Level::District,
            key,
            bag,
            officer: Some("Arjun Das".into()),
        }
    }

    #[test]
    fn no_selection_hides_the_panel() {
        assert_eq!(DetailPanel::render(None, &FilterState::default()), PanelView::Hidden);
    }

    #[test]
    fn generic_rows_with_missing_field() {
        let bag = MetricBag::new()
            .with(Indicator::Funds, 3_40_00_000.0)
            .with(Indicator::Beneficiaries, 12_345.0);
        let sel = selection(MetricKey::overall(), Some(bag));
        let view = DetailPanel::render(Some(&sel), &FilterState::default());

        let values: Vec<&str> = view.rows().iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["₹3.40 Cr", "12,345", "N/A"]);
        assert!(view.rows()[0].highlighted);
        match view {
            PanelView::Visible { title, subtitle, variant, .. } => {
                assert_eq!(title, "Kollam");
                assert_eq!(subtitle, "District · All Schemes · all");
                assert_eq!(variant, PanelVariant::Generic);
            }
            PanelView::Hidden => panic!("panel should be visible"),
        }
    }

    #[test]
    fn fisheries_selection_without_bag_renders_all_na() {
        let key = MetricKey::fisheries(Gender::Female, FinancialYear::Fy2022, Sector::Marine);
        let sel = selection(key, None);
        let filters = FilterState {
            scheme: Scheme::Pmmsy,
            indicator: Indicator::Employment,
            ..FilterState::default()
        };
        let view = DetailPanel::render(Some(&sel), &filters);
        assert_eq!(view.rows().len(), FISHERIES_INDICATORS.len());
        assert!(view.rows().iter().all(|r| r.value == "N/A"));
        let highlighted: Vec<&str> = view
            .rows()
            .iter()
            .filter(|r| r.highlighted)
            .map(|r| r.label)
            .collect();
        assert_eq!(highlighted, vec!["Employment Generated"]);
    }
}
