//! Histograms: distribution statistics over a composed sample.
//!
//! A [`Histogram`] owns one [`Sample`] (uniform, forward-decay, null, or any
//! other implementor) and forwards updates and reads to it. The histogram
//! adds no state of its own, so its `clear` is exactly as atomic as the
//! sample's: one lock acquisition captures the snapshot and resets.

use crate::reservoir::Reservoir;
use crate::sample::{Sample, Statistics};
use crate::snapshot::NullSample;

/// Distribution statistics from a bounded sample of observations.
///
/// ```
/// use hakari::{ExpDecaySample, Histogram, Sample, Statistics};
///
/// let h = Histogram::new(ExpDecaySample::default());
/// for ms in [12.0, 15.0, 11.0, 40.0] {
///     h.update(ms);
/// }
/// let frozen = h.clear();
/// assert_eq!(frozen.count(), 4);
/// assert_eq!(frozen.max(), 40.0);
/// assert_eq!(h.count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct Histogram<S = Reservoir> {
    sample: S,
}

/// Read-only copy of a [`Histogram`], taken by [`Sample::snapshot`] or
/// returned by [`Sample::clear`].
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot<T> {
    sample: T,
}

impl<S: Sample> Histogram<S> {
    /// Wrap `sample`.
    pub fn new(sample: S) -> Self {
        Self { sample }
    }

    /// The sample backing this histogram.
    pub fn sample(&self) -> &S {
        &self.sample
    }

    /// Unwrap the backing sample.
    pub fn into_sample(self) -> S {
        self.sample
    }
}

impl Histogram<NullSample> {
    /// A histogram that records nothing.
    pub fn null() -> Self {
        Self::new(NullSample)
    }
}

impl<T: Statistics> HistogramSnapshot<T> {
    /// The frozen sample behind this snapshot.
    pub fn sample(&self) -> &T {
        &self.sample
    }
}

impl<S: Sample> Statistics for Histogram<S> {
    fn count(&self) -> u64 {
        self.sample.count()
    }
    fn size(&self) -> usize {
        self.sample.size()
    }
    fn values(&self) -> Vec<f64> {
        self.sample.values()
    }
    fn sum(&self) -> f64 {
        self.sample.sum()
    }
    fn mean(&self) -> f64 {
        self.sample.mean()
    }
    fn min(&self) -> f64 {
        self.sample.min()
    }
    fn max(&self) -> f64 {
        self.sample.max()
    }
    fn variance(&self) -> f64 {
        self.sample.variance()
    }
    fn std_dev(&self) -> f64 {
        self.sample.std_dev()
    }
    fn percentile(&self, p: f64) -> f64 {
        self.sample.percentile(p)
    }
    fn percentiles(&self, ps: &[f64]) -> Vec<f64> {
        self.sample.percentiles(ps)
    }
}

impl<S: Sample> Sample for Histogram<S> {
    type Snapshot = HistogramSnapshot<S::Snapshot>;

    fn update(&self, value: f64) {
        self.sample.update(value);
    }

    fn snapshot(&self) -> Self::Snapshot {
        HistogramSnapshot {
            sample: self.sample.snapshot(),
        }
    }

    fn clear(&self) -> Self::Snapshot {
        HistogramSnapshot {
            sample: self.sample.clear(),
        }
    }
}

impl<T: Statistics> Statistics for HistogramSnapshot<T> {
    fn count(&self) -> u64 {
        self.sample.count()
    }
    fn size(&self) -> usize {
        self.sample.size()
    }
    fn values(&self) -> Vec<f64> {
        self.sample.values()
    }
    fn sum(&self) -> f64 {
        self.sample.sum()
    }
    fn mean(&self) -> f64 {
        self.sample.mean()
    }
    fn min(&self) -> f64 {
        self.sample.min()
    }
    fn max(&self) -> f64 {
        self.sample.max()
    }
    fn variance(&self) -> f64 {
        self.sample.variance()
    }
    fn std_dev(&self) -> f64 {
        self.sample.std_dev()
    }
    fn percentile(&self, p: f64) -> f64 {
        self.sample.percentile(p)
    }
    fn percentiles(&self, ps: &[f64]) -> Vec<f64> {
        self.sample.percentiles(ps)
    }
}
