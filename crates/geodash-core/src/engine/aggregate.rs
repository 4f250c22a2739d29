// crates/geodash-core/src/engine/aggregate.rs
use super::brackets::{self, brackets_for, classify};
use crate::catalog::{Breakdown, FinancialYear, Gender, Indicator, Level, Scheme, Year};
use crate::geo::{FeatureCollection, GeoFeature};
use crate::key::{MetricKey, Period};
use crate::metrics::{MetricBag, MetricStore};
use crate::state::{FilterState, Selection};
use serde::Serialize;

/// Colour value of one feature at the current filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureValue {
    pub id: String,
    pub name: String,
    pub value: f64,
    pub color: &'static str,
}

/// Headline figures over the defined values of the visible level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Kpis {
    /// Floored arithmetic mean.
    pub average: f64,
    pub min: f64,
    pub max: f64,
    /// Number of features with a defined value.
    pub count: usize,
}

/// Pie-chart slice: features whose value falls in one bracket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketCount {
    pub label: &'static str,
    pub color: &'static str,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPart {
    pub label: &'static str,
    pub value: f64,
}

/// One bar of the top-N chart, stacked by the breakdown dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopRow {
    pub id: String,
    pub name: String,
    /// Value under the widened key, used for ranking.
    pub total: f64,
    pub parts: Vec<TopPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

/// Everything the charts and the map fill need for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedView {
    pub key: MetricKey,
    pub indicator: Indicator,
    pub level: Level,
    pub colors: Vec<FeatureValue>,
    pub kpis: Kpis,
    pub buckets: Vec<BucketCount>,
    pub top: Vec<TopRow>,
    pub legend: Vec<LegendEntry>,
}

/// Read-only view over the geography and the store at one filter state.
///
/// Cheap to build; construct a fresh one per filter change.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    collection: &'a FeatureCollection,
    store: &'a MetricStore,
    filters: &'a FilterState,
    scope: Option<&'a str>,
}

impl<'a> Aggregator<'a> {
    pub fn new(
        collection: &'a FeatureCollection,
        store: &'a MetricStore,
        filters: &'a FilterState,
    ) -> Self {
        Aggregator {
            collection,
            store,
            filters,
            scope: None,
        }
    }

    /// Restricts every level query to features lying in the named state.
    pub fn within(mut self, scope: Option<&'a str>) -> Self {
        self.scope = scope;
        self
    }

    pub fn collection(&self) -> &'a FeatureCollection {
        self.collection
    }

    pub fn active_key(&self) -> MetricKey {
        self.filters.active_key()
    }

    pub fn indicator(&self) -> Indicator {
        self.filters.indicator
    }

    /// Addressable features of `level` within the scope, in file order.
    pub fn features(&self, level: Level) -> impl Iterator<Item = &'a GeoFeature> + 'a {
        let scope = self.scope;
        self.collection
            .at_level(level)
            .filter(move |f| scope.map_or(true, |s| f.in_state(s)))
    }

    pub fn bag_at(&self, feature: &GeoFeature, key: &MetricKey) -> Option<&'a MetricBag> {
        feature.id.as_deref().and_then(|id| self.store.bag(id, key))
    }

    /// The current indicator under `key`; `None` when undefined or not finite.
    pub fn value_at(&self, feature: &GeoFeature, key: &MetricKey) -> Option<f64> {
        self.bag_at(feature, key)
            .and_then(|b| b.get(self.indicator()))
            .filter(|v| v.is_finite())
    }

    /// Value used to colour `feature`: never negative, zero when undefined.
    pub fn color_for(&self, feature: &GeoFeature) -> f64 {
        self.value_at(feature, &self.active_key())
            .filter(|v| *v >= 0.0)
            .unwrap_or(0.0)
    }

    pub fn officer(&self, feature: &GeoFeature) -> Option<&'a str> {
        feature.id.as_deref().and_then(|id| self.store.officer(id))
    }

    /// Selection record for a click on `feature`.
    pub fn selection_for(&self, feature: &GeoFeature) -> Option<Selection> {
        let (id, level) = (feature.id.clone()?, feature.level?);
        let key = self.active_key();
        Some(Selection {
            id,
            name: feature.name.clone(),
            level,
            key,
            bag: self.bag_at(feature, &key).cloned(),
            officer: self.officer(feature).map(str::to_string),
        })
    }

    pub fn colors(&self, level: Level) -> Vec<FeatureValue> {
        let indicator = self.indicator();
        self.features(level)
            .map(|f| {
                let value = self.color_for(f);
                FeatureValue {
                    id: f.id_str().to_string(),
                    name: f.name.clone(),
                    value,
                    color: brackets::color_for(indicator, value),
                }
            })
            .collect()
    }

    fn defined_values(&self, level: Level) -> Vec<f64> {
        let key = self.active_key();
        self.features(level)
            .filter_map(|f| self.value_at(f, &key))
            .collect()
    }

    pub fn kpis(&self, level: Level) -> Kpis {
        let values = self.defined_values(level);
        if values.is_empty() {
            return Kpis::default();
        }
        let sum: f64 = values.iter().sum();
        Kpis {
            average: (sum / values.len() as f64).floor(),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            count: values.len(),
        }
    }

    pub fn pie_buckets(&self, level: Level) -> Vec<BucketCount> {
        let table = brackets_for(self.indicator());
        let mut counts = vec![0usize; table.len()];
        for value in self.defined_values(level) {
            if let Some(i) = classify(value, table) {
                counts[i] += 1;
            }
        }
        table
            .iter()
            .zip(counts)
            .map(|(b, count)| BucketCount {
                label: b.label,
                color: b.color,
                min: b.min,
                max: b.max,
                count,
            })
            .collect()
    }

    /// The `n` largest features under the widened key, each split by the
    /// breakdown dimension. Ties keep file order.
    pub fn top_n(&self, level: Level, breakdown: Breakdown, n: usize) -> Vec<TopRow> {
        let overall = self.active_key().widened();
        let mut ranked: Vec<(&GeoFeature, f64)> = self
            .features(level)
            .map(|f| (f, self.value_at(f, &overall).unwrap_or(0.0)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);

        let members = breakdown_keys(overall, breakdown);
        ranked
            .into_iter()
            .map(|(f, total)| TopRow {
                id: f.id_str().to_string(),
                name: f.name.clone(),
                total,
                parts: members
                    .iter()
                    .map(|(label, key)| TopPart {
                        label: *label,
                        value: self.value_at(f, key).unwrap_or(0.0),
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn legend(&self) -> Vec<LegendEntry> {
        legend_for(self.indicator())
    }

    pub fn derive(&self, level: Level, n: usize) -> DerivedView {
        DerivedView {
            key: self.active_key(),
            indicator: self.indicator(),
            level,
            colors: self.colors(level),
            kpis: self.kpis(level),
            buckets: self.pie_buckets(level),
            top: self.top_n(level, self.filters.breakdown, n),
            legend: self.legend(),
        }
    }
}

pub fn legend_for(indicator: Indicator) -> Vec<LegendEntry> {
    brackets_for(indicator)
        .iter()
        .map(|b| LegendEntry {
            label: b.label,
            color: b.color,
        })
        .collect()
}

/// One key per concrete member of `breakdown`, swapping only that
/// dimension of `overall`.
fn breakdown_keys(overall: MetricKey, breakdown: Breakdown) -> Vec<(&'static str, MetricKey)> {
    match breakdown {
        Breakdown::Gender => Gender::members()
            .map(|g| (g.as_str(), overall.with_gender(g)))
            .collect(),
        Breakdown::Year if overall.is_fisheries() => FinancialYear::members()
            .map(|fy| (fy.as_str(), overall.with_period(Period::FinancialYear(fy))))
            .collect(),
        Breakdown::Year => Year::members()
            .map(|y| (y.as_str(), overall.with_period(Period::Year(y))))
            .collect(),
        Breakdown::Scheme => Scheme::members()
            .map(|s| (s.as_str(), overall.with_scheme(s)))
            .collect(),
    }
}
