//! Shared samples under parallel writers and readers.

use std::sync::Arc;
use std::thread;

use hakari::{ExpDecaySample, Histogram, Sample, Statistics, UniformSample};

const WRITERS: usize = 8;
const PER_WRITER: usize = 5_000;

#[test]
fn uniform_counts_every_concurrent_update() {
    let s = UniformSample::new(100);
    thread::scope(|scope| {
        for w in 0..WRITERS {
            let s = &s;
            scope.spawn(move || {
                for i in 0..PER_WRITER {
                    s.update((w * PER_WRITER + i) as f64);
                }
            });
        }
        scope.spawn(|| {
            for _ in 0..1_000 {
                assert!(s.size() <= 100);
                let frozen = s.snapshot();
                assert!(frozen.size() as u64 <= frozen.count());
            }
        });
    });

    assert_eq!(s.count(), (WRITERS * PER_WRITER) as u64);
    assert_eq!(s.size(), 100);
}

#[test]
fn decay_counts_every_concurrent_update() {
    let s = Arc::new(ExpDecaySample::new(64, 0.015).expect("alpha ok"));
    let handles: Vec<_> = (0..WRITERS)
        .map(|_| {
            let s = Arc::clone(&s);
            thread::spawn(move || {
                for i in 0..PER_WRITER {
                    s.update(i as f64);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().expect("writer panicked");
    }

    assert_eq!(s.count(), (WRITERS * PER_WRITER) as u64);
    assert_eq!(s.size(), 64);
    assert!(s.keys().iter().all(|&k| k > 0.0 && k.is_finite()));
}

#[test]
fn concurrent_clears_partition_the_stream() {
    // Every update lands in exactly one cleared snapshot or the final state.
    let h = Histogram::new(UniformSample::new(1_000));
    let cleared = thread::scope(|scope| {
        for _ in 0..WRITERS {
            scope.spawn(|| {
                for _ in 0..PER_WRITER {
                    h.update(1.0);
                }
            });
        }
        let clearer = scope.spawn(|| {
            let mut total = 0u64;
            for _ in 0..200 {
                let frozen = h.clear();
                assert!(frozen.size() as u64 <= frozen.count());
                total += frozen.count();
                thread::yield_now();
            }
            total
        });
        clearer.join().expect("clearer panicked")
    });

    assert_eq!(cleared + h.count(), (WRITERS * PER_WRITER) as u64);
}
