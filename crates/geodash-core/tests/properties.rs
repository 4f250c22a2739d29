use geodash_core::catalog::{Breakdown, Indicator, Level, Scheme};
use geodash_core::engine::{brackets_for, classify, Aggregator};
use geodash_core::metrics::{all_keys, generate, session_rng};
use geodash_core::prelude::{FeatureCollection, FilterState, GeneratorConfig, MetricStore};

const SAMPLE: &str = include_str!("../data/india_sample.geojson");
const SEEDS: [u64; 4] = [1, 17, 2024, 9_999_991];

fn generated(seed: u64) -> (FeatureCollection, MetricStore) {
    let fc = FeatureCollection::from_json_str(SAMPLE).unwrap();
    let mut rng = session_rng(Some(seed));
    let store = generate(&fc, &GeneratorConfig::default(), &mut rng);
    (fc, store)
}

/// Every filter combination the dashboard can reach.
fn all_filters() -> Vec<FilterState> {
    let mut out = Vec::new();
    for key in all_keys() {
        for &indicator in key.scheme.indicators() {
            let mut f = FilterState {
                scheme: key.scheme,
                gender: key.gender,
                indicator,
                ..FilterState::default()
            };
            match key.period {
                geodash_core::key::Period::Year(y) => f.year = y,
                geodash_core::key::Period::FinancialYear(fy) => f.financial_year = fy,
            }
            if let Some(sector) = key.sector {
                f.sector = sector;
            }
            out.push(f);
        }
    }
    out
}

#[test]
fn colour_values_are_finite_and_non_negative_everywhere() {
    let (fc, store) = generated(5);
    for filters in all_filters() {
        let agg = Aggregator::new(&fc, &store, &filters);
        for f in fc.features() {
            let v = agg.color_for(f);
            assert!(v.is_finite() && v >= 0.0, "{} under {}", f.name, filters.active_key());
        }
    }
}

#[test]
fn derived_sub_districts_sum_exactly_to_their_district() {
    for seed in SEEDS {
        let (fc, store) = generated(seed);
        for (district, children) in fc.child_groups(Level::District) {
            for (key, bag) in store.bags_for(district.id_str()) {
                for (indicator, value) in bag.iter() {
                    let sum: f64 = children
                        .iter()
                        .map(|c| store.value(c.id_str(), &key, indicator).unwrap())
                        .sum();
                    assert_eq!(sum, value, "{} {key} {indicator} (seed {seed})", district.name);
                }
            }
        }
    }
}

#[test]
fn kpis_are_floored_and_bounded_by_defined_values() {
    let (fc, store) = generated(11);
    for filters in all_filters().into_iter().step_by(7) {
        let agg = Aggregator::new(&fc, &store, &filters);
        for level in [Level::State, Level::District, Level::SubDistrict] {
            let k = agg.kpis(level);
            assert_eq!(k.average, k.average.floor());
            if k.count > 0 {
                assert!(k.min <= k.average + 1.0 && k.average <= k.max);
            } else {
                assert_eq!((k.average, k.min, k.max), (0.0, 0.0, 0.0));
            }
        }
    }
}

#[test]
fn top_ten_is_bounded_sorted_and_independent_of_narrow_filters() {
    let (fc, store) = generated(3);
    let base = FilterState::default();
    let narrow = FilterState {
        gender: geodash_core::catalog::Gender::Transgender,
        year: geodash_core::catalog::Year::Y2020,
        ..FilterState::default()
    };
    for breakdown in [Breakdown::Gender, Breakdown::Year, Breakdown::Scheme] {
        let wide = Aggregator::new(&fc, &store, &base).top_n(Level::SubDistrict, breakdown, 10);
        let tight = Aggregator::new(&fc, &store, &narrow).top_n(Level::SubDistrict, breakdown, 10);
        assert!(wide.len() <= 10);
        assert!(wide.windows(2).all(|w| w[0].total >= w[1].total));
        let ids = |rows: &[geodash_core::engine::TopRow]| rows.iter().map(|r| r.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(wide.as_slice()), ids(tight.as_slice()));
    }
}

#[test]
fn bracket_classification_is_total() {
    for indicator in Indicator::ALL {
        let table = brackets_for(*indicator);
        let mut v = 0.0_f64;
        while v < 1e12 {
            assert!(classify(v, table).is_some(), "{indicator} {v}");
            v = v * 1.7 + 3.0;
        }
        let last = table.last().unwrap();
        assert_eq!(classify(last.min * 1e6, table), Some(table.len() - 1));
    }
}

#[test]
fn fisheries_bags_split_employment() {
    let (fc, store) = generated(8);
    let key = geodash_core::key::MetricKey::fisheries(
        geodash_core::catalog::Gender::All,
        geodash_core::catalog::FinancialYear::All,
        geodash_core::catalog::Sector::All,
    );
    assert!(Scheme::Pmmsy.supports(Indicator::Employment));
    for f in fc.states() {
        let Some(id) = f.id.as_deref() else { continue };
        let bag = store.bag(id, &key).unwrap();
        assert_eq!(
            bag.value_or_zero(Indicator::DirectEmployment) + bag.value_or_zero(Indicator::IndirectEmployment),
            bag.value_or_zero(Indicator::Employment)
        );
    }
}
