// crates/geodash-core/src/metrics/generator.rs

//! Synthetic Metrics Generator.
//!
//! Every bag value is
//! `base(level, indicator) × regional bias × scheme × gender × period × sector × jitter`,
//! floored to a whole number. Modifiers are fixed per dimension value, so
//! the relative ordering of features is stable across filter changes in
//! expectation. `all` keys are drawn independently of their constituents:
//! an `all` bag is not the sum of the per-scheme or per-year bags.

use super::bag::{MetricBag, MetricStore};
use super::distribute::{random_weights, split_bag};
use crate::catalog::{FinancialYear, Gender, Indicator, Level, Scheme, Sector, Year};
use crate::config::GeneratorConfig;
use crate::geo::{FeatureCollection, GeoFeature};
use crate::key::{MetricKey, Period};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

#[cfg(not(feature = "os-rng"))]
/// Seed used when no seed is configured and OS entropy is unavailable.
const FALLBACK_SEED: u64 = 0x6765_6f64_6173_6821;

const OFFICERS: &[&str] = &[
    "Anita Sharma",
    "Rajesh Kumar",
    "Priya Nair",
    "Sandeep Reddy",
    "Meera Iyer",
    "Arjun Das",
    "Kavita Patil",
    "Vikram Singh",
    "Lakshmi Menon",
    "Imran Qureshi",
    "Sunita Yadav",
    "Deepak Joshi",
    "Farida Begum",
    "Harish Gowda",
    "Neha Banerjee",
    "Tenzing Bhutia",
];

/// Builds the session RNG: seeded when a seed is given, entropy otherwise.
pub fn session_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => entropy_rng(),
    }
}

#[cfg(feature = "os-rng")]
fn entropy_rng() -> StdRng {
    StdRng::from_os_rng()
}

#[cfg(not(feature = "os-rng"))]
fn entropy_rng() -> StdRng {
    warn!("no seed configured and os-rng is disabled; using the fallback seed");
    StdRng::seed_from_u64(FALLBACK_SEED)
}

/// Every key the generator populates, in a fixed order.
pub fn all_keys() -> Vec<MetricKey> {
    let mut keys = Vec::new();
    for scheme in Scheme::ALL.iter().filter(|s| !s.is_fisheries()) {
        for gender in Gender::ALL {
            for year in Year::ALL {
                keys.push(MetricKey::generic(*scheme, *gender, *year));
            }
        }
    }
    for gender in Gender::ALL {
        for fy in FinancialYear::ALL {
            for sector in Sector::ALL {
                keys.push(MetricKey::fisheries(*gender, *fy, *sector));
            }
        }
    }
    keys
}

/// Generates the metric store for a freshly loaded geography.
///
/// Call once per load and keep the result: regenerating makes every KPI
/// jump.
pub fn generate<R: Rng + ?Sized>(
    collection: &FeatureCollection,
    config: &GeneratorConfig,
    rng: &mut R,
) -> MetricStore {
    let mut store = MetricStore::new();
    let keys = all_keys();

    let groups = if config.derive_sub_districts {
        collection.child_groups(Level::District)
    } else {
        Vec::new()
    };
    let derived: std::collections::HashSet<&str> = groups
        .iter()
        .flat_map(|(_, children)| children.iter().map(|c| c.id_str()))
        .collect();

    for feature in collection.features().iter().filter(|f| f.is_addressable()) {
        let (Some(id), Some(level)) = (feature.id.as_deref(), feature.level) else {
            continue;
        };
        if let Some(officer) = OFFICERS.choose(rng) {
            store.set_officer(id, *officer);
        }
        if derived.contains(id) {
            continue;
        }
        let bias = rng.random_range(config.bias_min..=config.bias_max);
        for key in &keys {
            store.insert(id, *key, synth_bag(level, bias, key, config.jitter, rng));
        }
    }

    for (district, children) in &groups {
        derive_children(&mut store, district, children, rng);
    }

    info!(
        features = store.feature_count(),
        bags = store.bag_count(),
        derived = derived.len(),
        "synthetic metrics generated"
    );
    store
}

/// Distributes every bag of `parent` over `children` with one set of random
/// weights, so each child keeps the same share across keys.
pub fn derive_children<R: Rng + ?Sized>(
    store: &mut MetricStore,
    parent: &GeoFeature,
    children: &[&GeoFeature],
    rng: &mut R,
) {
    if children.is_empty() {
        return;
    }
    let weights = random_weights(children.len(), rng);
    let parent_bags: Vec<(MetricKey, MetricBag)> = store
        .bags_for(parent.id_str())
        .into_iter()
        .map(|(k, b)| (k, b.clone()))
        .collect();
    if parent_bags.is_empty() {
        warn!(parent = %parent.name, "parent has no bags to distribute");
    }
    for (key, bag) in parent_bags {
        for (child, part) in children.iter().zip(split_bag(&bag, &weights)) {
            store.insert(child.id_str(), key, part);
        }
    }
}

fn synth_bag<R: Rng + ?Sized>(
    level: Level,
    bias: f64,
    key: &MetricKey,
    jitter: f64,
    rng: &mut R,
) -> MetricBag {
    let scale = level_factor(level)
        * bias
        * scheme_factor(key.scheme)
        * gender_factor(key.gender)
        * period_factor(key.period)
        * sector_factor(key.sector);

    if key.is_fisheries() {
        let employment = draw(Indicator::Employment, scale, jitter, rng);
        let direct = whole(employment * rng.random_range(0.35..=0.55));
        MetricBag::new()
            .with(Indicator::TotalProjects, draw(Indicator::TotalProjects, scale, jitter, rng))
            .with(Indicator::Investment, draw(Indicator::Investment, scale, jitter, rng))
            .with(Indicator::FishProduction, draw(Indicator::FishProduction, scale, jitter, rng))
            .with(Indicator::Employment, employment)
            .with(Indicator::DirectEmployment, direct)
            .with(Indicator::IndirectEmployment, employment - direct)
    } else {
        let beneficiaries = draw(Indicator::Beneficiaries, scale, jitter, rng);
        let registrations = whole(beneficiaries * rng.random_range(1.1..=1.6));
        MetricBag::new()
            .with(Indicator::Funds, draw(Indicator::Funds, scale, jitter, rng))
            .with(Indicator::Beneficiaries, beneficiaries)
            .with(Indicator::Registrations, registrations)
    }
}

fn draw<R: Rng + ?Sized>(indicator: Indicator, scale: f64, jitter: f64, rng: &mut R) -> f64 {
    let noise = if jitter > 0.0 {
        rng.random_range((1.0 - jitter)..=(1.0 + jitter))
    } else {
        1.0
    };
    whole(state_base(indicator) * scale * noise)
}

fn whole(v: f64) -> f64 {
    if v.is_finite() {
        v.max(0.0).floor()
    } else {
        0.0
    }
}

/// Typical state-level magnitude of each indicator.
fn state_base(indicator: Indicator) -> f64 {
    match indicator {
        Indicator::Funds => 500_000_000.0,
        Indicator::Beneficiaries => 20_000.0,
        Indicator::Registrations => 30_000.0,
        Indicator::TotalProjects => 400.0,
        Indicator::Investment => 2_000_000_000.0,
        Indicator::FishProduction => 150_000.0,
        Indicator::Employment | Indicator::DirectEmployment | Indicator::IndirectEmployment => {
            25_000.0
        }
    }
}

fn level_factor(level: Level) -> f64 {
    match level {
        Level::State => 1.0,
        Level::District => 0.04,
        Level::SubDistrict => 0.006,
    }
}

fn scheme_factor(scheme: Scheme) -> f64 {
    match scheme {
        Scheme::All | Scheme::Pmmsy => 1.0,
        Scheme::Pmmkss => 0.35,
        Scheme::Kcc => 0.25,
        Scheme::Fidf => 0.4,
    }
}

fn gender_factor(gender: Gender) -> f64 {
    match gender {
        Gender::All => 1.0,
        Gender::Male => 0.62,
        Gender::Female => 0.35,
        Gender::Transgender => 0.03,
    }
}

fn period_factor(period: Period) -> f64 {
    match period {
        Period::Year(Year::All) | Period::FinancialYear(FinancialYear::All) => 1.0,
        Period::Year(Year::Y2020) | Period::FinancialYear(FinancialYear::Fy2020) => 0.14,
        Period::Year(Year::Y2021) | Period::FinancialYear(FinancialYear::Fy2021) => 0.17,
        Period::Year(Year::Y2022) | Period::FinancialYear(FinancialYear::Fy2022) => 0.2,
        Period::Year(Year::Y2023) | Period::FinancialYear(FinancialYear::Fy2023) => 0.23,
        Period::Year(Year::Y2024) | Period::FinancialYear(FinancialYear::Fy2024) => 0.26,
    }
}

fn sector_factor(sector: Option<Sector>) -> f64 {
    match sector {
        None | Some(Sector::All) => 1.0,
        Some(Sector::Inland) => 0.68,
        Some(Sector::Marine) => 0.32,
    }
}
