//! The read and write surfaces shared by every sampled metric.
//!
//! Capabilities are split across two traits:
//!
//! - [`Statistics`]: read-only statistics. Implemented by live samples,
//!   frozen snapshots, the null sample and histograms.
//! - [`Sample`]: adds mutation (`update`, `clear`) and snapshotting. Only
//!   live samples, the null sample and histograms implement it.
//!
//! A frozen snapshot therefore has no `update` method to misuse:
//!
//! ```compile_fail
//! use hakari::{Sample, SampleSnapshot};
//!
//! let frozen = SampleSnapshot::new(1, vec![1.0]);
//! frozen.update(2.0);
//! ```

use crate::stats;

/// Distribution statistics over the retained observations.
///
/// The provided methods work over [`Statistics::values`]; implementors that
/// can compute without a copy override them.
pub trait Statistics {
    /// Observations pushed since creation or the last clear. May exceed
    /// [`Statistics::size`].
    fn count(&self) -> u64;

    /// Observations currently retained.
    fn size(&self) -> usize;

    /// Copy of the retained observations, in no particular order.
    fn values(&self) -> Vec<f64>;

    fn sum(&self) -> f64 {
        stats::sum(&self.values())
    }

    fn mean(&self) -> f64 {
        stats::mean(&self.values())
    }

    /// Smallest retained value; not necessarily the smallest ever seen.
    fn min(&self) -> f64 {
        stats::min(&self.values())
    }

    /// Largest retained value; not necessarily the largest ever seen.
    fn max(&self) -> f64 {
        stats::max(&self.values())
    }

    fn variance(&self) -> f64 {
        stats::variance(&self.values())
    }

    fn std_dev(&self) -> f64 {
        stats::std_dev(&self.values())
    }

    /// Percentile `p` in `[0, 1]`; see [`stats::percentiles_sorted`].
    fn percentile(&self, p: f64) -> f64 {
        self.percentiles(&[p])[0]
    }

    /// Several percentiles, in the order requested, from one sort.
    fn percentiles(&self, ps: &[f64]) -> Vec<f64> {
        let mut values = self.values();
        stats::sort(&mut values);
        stats::percentiles_sorted(&values, ps)
    }
}

/// A mutable sampled metric.
pub trait Sample: Statistics + Send + Sync {
    /// Frozen, read-only view produced by [`Sample::snapshot`] and
    /// [`Sample::clear`].
    type Snapshot: Statistics + Clone + Send + Sync;

    /// Record one observation.
    fn update(&self, value: f64);

    /// Point-in-time copy; the sample is left untouched.
    fn snapshot(&self) -> Self::Snapshot;

    /// Atomically capture the current state and reset to empty.
    ///
    /// The returned snapshot holds exactly what was present immediately
    /// before the reset; no update can land between the two.
    fn clear(&self) -> Self::Snapshot;
}
