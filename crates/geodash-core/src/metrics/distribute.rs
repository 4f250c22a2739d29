// crates/geodash-core/src/metrics/distribute.rs

//! Proportional redistribution of a parent bag over child regions.
//!
//! For every indicator the children's values sum exactly to the parent's.
//! Whole parts are apportioned with the largest-remainder method; a
//! fractional remainder goes to the heaviest child. Generated values are
//! whole numbers, so sums are exact in `f64`.

use super::bag::MetricBag;
use rand::Rng;

/// Draws `n` random weights normalised to sum to 1.
pub fn random_weights<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<f64> {
    let raw: Vec<f64> = (0..n).map(|_| rng.random_range(0.5..1.5)).collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}

/// Splits `total` over `weights` (which must sum to 1).
pub fn split_value(total: f64, weights: &[f64]) -> Vec<f64> {
    if weights.is_empty() {
        return Vec::new();
    }
    if !total.is_finite() {
        return vec![0.0; weights.len()];
    }

    let whole = total.floor();
    let fraction = total - whole;

    let raw: Vec<f64> = weights.iter().map(|w| whole * w).collect();
    let mut shares: Vec<f64> = raw.iter().map(|r| r.floor()).collect();
    let assigned: f64 = shares.iter().sum();
    let remainder = (whole - assigned).max(0.0) as usize;

    // Largest fractional part first; stable, so ties go to file order.
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = raw[a] - shares[a];
        let rb = raw[b] - shares[b];
        rb.total_cmp(&ra)
    });
    for &i in order.iter().cycle().take(remainder) {
        shares[i] += 1.0;
    }

    if fraction > 0.0 {
        let heaviest = heaviest(weights);
        shares[heaviest] += fraction;
    }
    shares
}

/// Splits every indicator of `parent` over `weights`.
pub fn split_bag(parent: &MetricBag, weights: &[f64]) -> Vec<MetricBag> {
    let mut children = vec![MetricBag::new(); weights.len()];
    for (indicator, value) in parent.iter() {
        for (child, share) in children.iter_mut().zip(split_value(value, weights)) {
            child.set(indicator, share);
        }
    }
    children
}

/// Random weights + [`split_bag`] in one step.
pub fn distribute<R: Rng + ?Sized>(parent: &MetricBag, n: usize, rng: &mut R) -> Vec<MetricBag> {
    let weights = random_weights(n, rng);
    split_bag(parent, &weights)
}

fn heaviest(weights: &[f64]) -> usize {
    let mut best = 0;
    for (i, w) in weights.iter().enumerate() {
        if *w > weights[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Indicator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn weights_are_normalised() {
        let mut rng = StdRng::seed_from_u64(1);
        let w = random_weights(7, &mut rng);
        let sum: f64 = w.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(w.iter().all(|x| *x > 0.0));
    }

    #[test]
    fn children_sum_exactly_to_parent() {
        let mut rng = StdRng::seed_from_u64(42);
        let parent = MetricBag::new()
            .with(Indicator::Funds, 123_456_789.0)
            .with(Indicator::Beneficiaries, 17.0)
            .with(Indicator::Registrations, 0.0);
        for n in 1..12 {
            let children = distribute(&parent, n, &mut rng);
            assert_eq!(children.len(), n);
            for (indicator, value) in parent.iter() {
                let sum: f64 = children.iter().map(|c| c.value_or_zero(indicator)).sum();
                assert_eq!(sum, value, "{indicator} over {n} children");
                assert!(children.iter().all(|c| c.value_or_zero(indicator) >= 0.0));
            }
        }
    }

    #[test]
    fn small_totals_over_many_children() {
        let weights = vec![0.25; 4];
        let shares = split_value(3.0, &weights);
        assert_eq!(shares.iter().sum::<f64>(), 3.0);
        assert_eq!(shares, vec![1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn fractional_total_goes_to_heaviest() {
        let shares = split_value(10.5, &[0.2, 0.8]);
        assert_eq!(shares, vec![2.0, 8.5]);
    }

    #[test]
    fn no_children_no_output() {
        let parent = MetricBag::new().with(Indicator::Funds, 1.0);
        assert!(split_bag(&parent, &[]).is_empty());
    }
}
