//! Frozen and inert samples.

use std::sync::Arc;

use crate::sample::{Sample, Statistics};
use crate::stats;

/// Immutable copy of a sample at a point in time.
///
/// Cloning is cheap; clones share the values. Reads take no lock.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSnapshot {
    count: u64,
    values: Arc<[f64]>,
}

impl SampleSnapshot {
    /// Freeze `values`, recording `count` as the number of observations seen
    /// at capture time.
    pub fn new(count: u64, values: impl Into<Arc<[f64]>>) -> Self {
        Self {
            count,
            values: values.into(),
        }
    }

    /// Snapshot of nothing.
    pub fn empty() -> Self {
        Self::new(0, Vec::new())
    }

    /// Borrow the frozen values.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl Statistics for SampleSnapshot {
    fn count(&self) -> u64 {
        self.count
    }

    fn size(&self) -> usize {
        self.values.len()
    }

    fn values(&self) -> Vec<f64> {
        self.values.to_vec()
    }

    fn sum(&self) -> f64 {
        stats::sum(&self.values)
    }

    fn mean(&self) -> f64 {
        stats::mean(&self.values)
    }

    fn min(&self) -> f64 {
        stats::min(&self.values)
    }

    fn max(&self) -> f64 {
        stats::max(&self.values)
    }

    fn variance(&self) -> f64 {
        stats::variance(&self.values)
    }

    fn std_dev(&self) -> f64 {
        stats::std_dev(&self.values)
    }

    fn percentiles(&self, ps: &[f64]) -> Vec<f64> {
        stats::percentiles(&self.values, ps)
    }
}

/// No-op sample used when metrics are disabled.
///
/// Every read is zero or empty and `update` does nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullSample;

impl Statistics for NullSample {
    fn count(&self) -> u64 {
        0
    }

    fn size(&self) -> usize {
        0
    }

    fn values(&self) -> Vec<f64> {
        Vec::new()
    }

    fn sum(&self) -> f64 {
        0.0
    }

    fn mean(&self) -> f64 {
        0.0
    }

    fn min(&self) -> f64 {
        0.0
    }

    fn max(&self) -> f64 {
        0.0
    }

    fn variance(&self) -> f64 {
        0.0
    }

    fn std_dev(&self) -> f64 {
        0.0
    }

    fn percentile(&self, _p: f64) -> f64 {
        0.0
    }

    fn percentiles(&self, ps: &[f64]) -> Vec<f64> {
        vec![0.0; ps.len()]
    }
}

impl Sample for NullSample {
    type Snapshot = NullSample;

    #[inline]
    fn update(&self, _value: f64) {}

    fn snapshot(&self) -> NullSample {
        NullSample
    }

    fn clear(&self) -> NullSample {
        NullSample
    }
}
