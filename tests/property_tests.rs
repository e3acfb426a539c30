use std::time::{Duration, Instant};

use hakari::heap::{MinHeap, WeightedEntry};
use hakari::{stats, ExpDecaySample, Histogram, Sample, Statistics, UniformSample};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

proptest! {
    #[test]
    fn prop_uniform_size_invariant(
        k in 0usize..20,
        items in prop::collection::vec(0u32..1000, 0..50)
    ) {
        let s = UniformSample::new(k);
        for &item in &items {
            s.update(f64::from(item));
        }

        let n = items.len();
        prop_assert_eq!(s.size(), std::cmp::min(n, k));
        prop_assert_eq!(s.count(), n as u64);
    }

    #[test]
    fn prop_uniform_no_loss_below_capacity(n in 0usize..64, extra in 0usize..64) {
        let s = UniformSample::new(n + extra);
        for i in 0..n {
            s.update(i as f64);
        }
        let mut values = s.values();
        values.sort_by(f64::total_cmp);
        let expected: Vec<f64> = (0..n).map(|i| i as f64).collect();
        prop_assert_eq!(values, expected);
    }

    #[test]
    fn prop_decay_size_invariant(
        k in 0usize..20,
        alpha in 1e-3f64..2.0,
        items in prop::collection::vec(0u32..1000, 0..50)
    ) {
        let s = ExpDecaySample::new(k, alpha).expect("alpha ok");
        for &item in &items {
            s.update(f64::from(item));
        }

        let n = items.len();
        prop_assert_eq!(s.size(), std::cmp::min(n, k));
        prop_assert_eq!(s.count(), n as u64);
    }

    #[test]
    fn prop_decay_keys_stay_positive_across_rescale(
        k in 1usize..32,
        alpha in 1e-3f64..1.0,
        burst in 1usize..64,
        gap_secs in 3_601u64..200_000,
        seed in any::<u64>(),
    ) {
        let s = ExpDecaySample::new(k, alpha).expect("alpha ok");
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let start = Instant::now();
        for i in 0..burst {
            s.update_at_with_rng(start + Duration::from_millis(i as u64), i as f64, &mut rng);
        }
        let later = start + Duration::from_secs(gap_secs);
        for i in 0..burst {
            s.update_at_with_rng(later + Duration::from_millis(i as u64), i as f64, &mut rng);
        }

        prop_assert!(s.size() <= k);
        prop_assert_eq!(s.count(), 2 * burst as u64);
        for key in s.keys() {
            prop_assert!(key > 0.0 && key.is_finite(), "bad key {}", key);
        }
    }

    #[test]
    fn prop_heap_pops_ascending(keys in prop::collection::vec(1e-300f64..1e300, 0..100)) {
        let mut heap = MinHeap::with_capacity(keys.len());
        for &key in &keys {
            heap.push(WeightedEntry { key, value: key });
        }
        prop_assert_eq!(heap.len(), keys.len());

        let mut popped = Vec::with_capacity(keys.len());
        while let Some(e) = heap.pop() {
            popped.push(e.key);
        }
        let mut sorted = keys.clone();
        sorted.sort_by(f64::total_cmp);
        prop_assert_eq!(popped, sorted);
    }

    #[test]
    fn prop_snapshot_is_immutable(
        first in prop::collection::vec(-1e6f64..1e6, 1..40),
        later in prop::collection::vec(-1e6f64..1e6, 1..40),
    ) {
        let s = UniformSample::new(16);
        for &v in &first {
            s.update(v);
        }
        let frozen = s.snapshot();
        let before = (frozen.count(), frozen.values(), frozen.mean(), frozen.percentiles(&[0.5, 0.99]));

        for &v in &later {
            s.update(v);
        }
        let after = (frozen.count(), frozen.values(), frozen.mean(), frozen.percentiles(&[0.5, 0.99]));
        prop_assert_eq!(before, after);
    }

    #[test]
    fn prop_clear_round_trip(
        k in 1usize..32,
        items in prop::collection::vec(-1e3f64..1e3, 0..100),
    ) {
        let h = Histogram::new(ExpDecaySample::new(k, 0.015).expect("alpha ok"));
        for &v in &items {
            h.update(v);
        }
        let live = (h.count(), h.size(), h.min(), h.max(), h.mean(), h.variance(), h.percentiles(&[0.5, 0.75, 0.99]));
        let frozen = h.clear();
        let cleared = (
            frozen.count(),
            frozen.size(),
            frozen.min(),
            frozen.max(),
            frozen.mean(),
            frozen.variance(),
            frozen.percentiles(&[0.5, 0.75, 0.99]),
        );
        prop_assert_eq!(live, cleared);
        prop_assert_eq!(h.count(), 0);
        prop_assert_eq!(h.size(), 0);
    }

    #[test]
    fn prop_percentiles_are_ordered_and_bounded(
        values in prop::collection::vec(-1e6f64..1e6, 1..200),
        mut ps in prop::collection::vec(0.0f64..=1.0, 1..10),
    ) {
        ps.sort_by(f64::total_cmp);
        let out = stats::percentiles(&values, &ps);
        let lo = stats::min(&values);
        let hi = stats::max(&values);
        // Interpolation may round by an ulp past a neighbouring rank.
        let eps = 1e-6;
        for w in out.windows(2) {
            prop_assert!(w[0] <= w[1] + eps);
        }
        for &q in &out {
            prop_assert!(q >= lo - eps && q <= hi + eps);
        }
    }
}

#[test]
fn empty_samples_read_zero() {
    let uniform = UniformSample::new(8);
    let decay = ExpDecaySample::default();
    for s in [&uniform as &dyn Statistics, &decay as &dyn Statistics] {
        assert_eq!(s.count(), 0);
        assert_eq!(s.size(), 0);
        assert_eq!(s.min(), 0.0);
        assert_eq!(s.max(), 0.0);
        assert_eq!(s.mean(), 0.0);
        assert_eq!(s.sum(), 0.0);
        assert_eq!(s.std_dev(), 0.0);
        assert_eq!(s.variance(), 0.0);
        for p in [0.0, 0.5, 0.99, 1.0] {
            assert_eq!(s.percentile(p), 0.0);
        }
    }
}

#[test]
fn seeded_uniform_sample_is_reproducible() {
    let run = |seed: u64| {
        let s = UniformSample::new(100);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for i in 1..=10_000 {
            s.update_with_rng(f64::from(i), &mut rng);
        }
        (s.values(), s.percentiles(&[0.5, 0.75, 0.99]))
    };
    let (values, ps) = run(42);
    assert_eq!(run(42), (values.clone(), ps.clone()));
    assert_eq!(ps, stats::percentiles(&values, &[0.5, 0.75, 0.99]));
    assert!(ps[0] <= ps[1] && ps[1] <= ps[2]);
    assert_eq!(ps, vec![5140.0, 7926.5, 9834.939999999999]);
}

#[test]
fn empty_sum_is_positive_zero() {
    let h = Histogram::new(ExpDecaySample::default());
    for s in [stats::sum(&[]), UniformSample::new(4).sum(), h.sum(), h.clear().sum()] {
        assert_eq!(s, 0.0);
        assert!(s.is_sign_positive(), "sum was {s:?}");
    }
}
