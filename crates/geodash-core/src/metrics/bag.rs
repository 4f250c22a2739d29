// crates/geodash-core/src/metrics/bag.rs
use crate::catalog::Indicator;
use crate::key::MetricKey;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Indicator values of one feature under one [`MetricKey`].
///
/// An indicator that is absent is *undefined*, which is not the same as
/// zero: KPIs skip undefined values, map colouring reads them as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricBag(BTreeMap<Indicator, f64>);

impl MetricBag {
    pub fn new() -> Self {
        MetricBag(BTreeMap::new())
    }

    pub fn get(&self, indicator: Indicator) -> Option<f64> {
        self.0.get(&indicator).copied()
    }

    pub fn value_or_zero(&self, indicator: Indicator) -> f64 {
        self.get(indicator).unwrap_or(0.0)
    }

    pub fn set(&mut self, indicator: Indicator, value: f64) {
        self.0.insert(indicator, value);
    }

    pub fn with(mut self, indicator: Indicator, value: f64) -> Self {
        self.set(indicator, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Indicator, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Indicator, f64)> for MetricBag {
    fn from_iter<I: IntoIterator<Item = (Indicator, f64)>>(iter: I) -> Self {
        MetricBag(iter.into_iter().collect())
    }
}

/// Session-lifetime store of every generated or derived bag.
///
/// Lookups never fail: an unknown feature or key is simply `None`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricStore {
    bags: HashMap<String, HashMap<MetricKey, MetricBag>>,
    officers: HashMap<String, String>,
}

impl MetricStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, feature_id: impl Into<String>, key: MetricKey, bag: MetricBag) {
        self.bags
            .entry(feature_id.into())
            .or_default()
            .insert(key, bag);
    }

    pub fn bag(&self, feature_id: &str, key: &MetricKey) -> Option<&MetricBag> {
        self.bags.get(feature_id).and_then(|m| m.get(key))
    }

    pub fn value(&self, feature_id: &str, key: &MetricKey, indicator: Indicator) -> Option<f64> {
        self.bag(feature_id, key).and_then(|b| b.get(indicator))
    }

    /// Every bag of one feature, sorted by key.
    pub fn bags_for(&self, feature_id: &str) -> Vec<(MetricKey, &MetricBag)> {
        let mut out: Vec<_> = self
            .bags
            .get(feature_id)
            .map(|m| m.iter().map(|(k, b)| (*k, b)).collect())
            .unwrap_or_default();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    pub fn set_officer(&mut self, feature_id: impl Into<String>, name: impl Into<String>) {
        self.officers.insert(feature_id.into(), name.into());
    }

    pub fn officer(&self, feature_id: &str) -> Option<&str> {
        self.officers.get(feature_id).map(String::as_str)
    }

    pub fn feature_count(&self) -> usize {
        self.bags.len()
    }

    pub fn bag_count(&self) -> usize {
        self.bags.values().map(HashMap::len).sum()
    }
}
