//! Live reservoirs.
//!
//! Two ways to keep a bounded sample of an unbounded stream of `f64`
//! observations:
//!
//! - [`UniformSample`]: Vitter's **Algorithm R**. Every observation seen so
//!   far is retained with equal probability.
//! - [`ExpDecaySample`]: a **forward-decay** priority reservoir. Each
//!   observation gets a key `exp(alpha * age) / u` against a moving
//!   landmark, the smallest key is evicted first, so recent observations
//!   are favoured while old ones keep a chance of survival.
//!
//! Both guard their whole state with one mutex; every operation takes it
//! once for its duration.
//!
//! ## References
//!
//! - Vitter (1985): *Random Sampling with a Reservoir* (Algorithm R).
//! - Cormode, Shkapenyuk, Srivastava, Xu (2009): *Forward Decay: A Practical
//!   Time Decay Model for Streaming Systems*.
//!
//! Notes:
//! - `*_with_rng` / `update_at*` entrypoints exist for deterministic
//!   testing and replay. `Sample::update` uses `rand::rng()` and the
//!   current `Instant`.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use rand::distr::Open01;
use rand::prelude::*;
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::heap::{MinHeap, WeightedEntry};
use crate::sample::{Sample, Statistics};
use crate::snapshot::{NullSample, SampleSnapshot};
use crate::stats;

/// Conventional reservoir size for forward-decay samples.
pub const DEFAULT_CAPACITY: usize = 1028;

/// Conventional decay constant; heavily biases towards the last five
/// minutes of data.
pub const DEFAULT_ALPHA: f64 = 0.015;

/// How long the forward-decay landmark may stay fixed before keys are
/// rescaled.
pub const RESCALE_THRESHOLD: Duration = Duration::from_secs(60 * 60);

// Every critical section leaves the state consistent, so a poisoned lock
// still guards valid data.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug)]
struct UniformState {
    count: u64,
    values: Vec<f64>,
}

/// A uniform sample using **Algorithm R** (Vitter, 1985).
///
/// Keeps at most `capacity` values. After `n` updates the retained set is a
/// uniform sample without replacement of all `n` values.
///
/// ```
/// use hakari::{Sample, Statistics, UniformSample};
///
/// let sample = UniformSample::new(100);
/// for i in 0..10_000 {
///     sample.update(f64::from(i));
/// }
/// assert_eq!(sample.count(), 10_000);
/// assert_eq!(sample.size(), 100);
/// ```
#[derive(Debug)]
pub struct UniformSample {
    capacity: usize,
    state: Mutex<UniformState>,
}

impl UniformSample {
    /// Create a sample that keeps at most `capacity` values.
    ///
    /// If `capacity == 0`, every value is discarded (the count still
    /// advances).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(UniformState {
                count: 0,
                values: Vec::with_capacity(capacity),
            }),
        }
    }

    /// Maximum number of retained values.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record a value using a caller-supplied RNG.
    pub fn update_with_rng<R: Rng + ?Sized>(&self, value: f64, rng: &mut R) {
        let mut state = lock(&self.state);
        state.count += 1;

        if state.values.len() < self.capacity {
            state.values.push(value);
            return;
        }
        if self.capacity == 0 {
            return;
        }

        // Algorithm R: replace with probability capacity / count.
        let j = rng.random_range(0..state.count);
        if j < self.capacity as u64 {
            state.values[j as usize] = value;
        }
    }
}

impl Statistics for UniformSample {
    fn count(&self) -> u64 {
        lock(&self.state).count
    }

    fn size(&self) -> usize {
        lock(&self.state).values.len()
    }

    fn values(&self) -> Vec<f64> {
        lock(&self.state).values.clone()
    }

    fn sum(&self) -> f64 {
        stats::sum(&lock(&self.state).values)
    }

    fn mean(&self) -> f64 {
        stats::mean(&lock(&self.state).values)
    }

    fn min(&self) -> f64 {
        stats::min(&lock(&self.state).values)
    }

    fn max(&self) -> f64 {
        stats::max(&lock(&self.state).values)
    }

    fn variance(&self) -> f64 {
        stats::variance(&lock(&self.state).values)
    }

    fn std_dev(&self) -> f64 {
        stats::std_dev(&lock(&self.state).values)
    }
}

impl Sample for UniformSample {
    type Snapshot = SampleSnapshot;

    fn update(&self, value: f64) {
        self.update_with_rng(value, &mut rand::rng());
    }

    fn snapshot(&self) -> SampleSnapshot {
        let state = lock(&self.state);
        SampleSnapshot::new(state.count, state.values.as_slice())
    }

    fn clear(&self) -> SampleSnapshot {
        let mut state = lock(&self.state);
        let values = std::mem::replace(&mut state.values, Vec::with_capacity(self.capacity));
        let count = std::mem::take(&mut state.count);
        trace!(count, size = values.len(), "cleared uniform sample");
        SampleSnapshot::new(count, values)
    }
}

#[derive(Debug)]
struct DecayState {
    count: u64,
    /// Landmark the ages are measured from.
    t0: Instant,
    /// Deadline after which the next update rescales.
    t1: Instant,
    heap: MinHeap,
}

impl DecayState {
    fn new(capacity: usize, now: Instant) -> Self {
        Self {
            count: 0,
            t0: now,
            t1: now + RESCALE_THRESHOLD,
            heap: MinHeap::with_capacity(capacity),
        }
    }

    /// `exp(alpha * age)` with the age in seconds. Sub-second resolution is
    /// kept as a fraction; measuring in nanoseconds would overflow the
    /// exponential almost immediately.
    fn weight(&self, now: Instant, alpha: f64) -> f64 {
        (alpha * now.saturating_duration_since(self.t0).as_secs_f64()).exp()
    }

    /// Move the landmark to `now`, discounting every key by the same factor.
    fn rescale(&mut self, now: Instant, alpha: f64) {
        let elapsed = now.saturating_duration_since(self.t0).as_secs_f64();
        let factor = (-alpha * elapsed).exp();
        self.t0 = now;
        self.t1 = now + RESCALE_THRESHOLD;

        for mut entry in self.heap.take_all() {
            // Long idle gaps would otherwise underflow keys to zero.
            entry.key = (entry.key * factor).max(f64::MIN_POSITIVE);
            self.heap.push(entry);
        }
        debug!(
            alpha,
            elapsed_secs = elapsed,
            entries = self.heap.len(),
            "rescaled forward-decay sample"
        );
    }

    fn snapshot(&self) -> SampleSnapshot {
        SampleSnapshot::new(self.count, self.heap.values().collect::<Vec<_>>())
    }
}

/// An exponentially-decaying sample using a forward-decay priority
/// reservoir.
///
/// Each update draws `u` from the open interval `(0, 1)` and is keyed
/// `exp(alpha * age_secs) / u`; when full, the smallest key is evicted
/// before the new entry is pushed. Higher `alpha` means stronger recency
/// bias. Every [`RESCALE_THRESHOLD`] the landmark moves forward and keys are
/// discounted so they stay bounded in long-running processes.
///
/// Discounted keys are floored at [`f64::MIN_POSITIVE`]. When `alpha` is
/// large enough that every gap between updates forces a rescale, all older
/// entries collapse onto that floor and tie; eviction among them follows
/// heap position rather than age, so an old value can outlive younger ones.
/// Only the newest entry keeps a distinguishable key in that regime.
#[derive(Debug)]
pub struct ExpDecaySample {
    capacity: usize,
    alpha: f64,
    state: Mutex<DecayState>,
}

impl ExpDecaySample {
    /// Create a sample keeping at most `capacity` values with decay
    /// constant `alpha`.
    pub fn new(capacity: usize, alpha: f64) -> Result<Self, ConfigError> {
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(ConfigError::InvalidAlpha(alpha));
        }
        Ok(Self::from_parts(capacity, alpha))
    }

    fn from_parts(capacity: usize, alpha: f64) -> Self {
        Self {
            capacity,
            alpha,
            state: Mutex::new(DecayState::new(capacity, Instant::now())),
        }
    }

    /// Maximum number of retained values.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Decay constant, per second.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Record a value observed at `now`.
    pub fn update_at(&self, now: Instant, value: f64) {
        self.update_at_with_rng(now, value, &mut rand::rng());
    }

    /// Record a value observed at `now`, using a caller-supplied RNG.
    pub fn update_at_with_rng<R: Rng + ?Sized>(&self, now: Instant, value: f64, rng: &mut R) {
        let mut state = lock(&self.state);
        state.count += 1;

        if self.capacity == 0 {
            return;
        }

        // Rescaling before keying the new entry yields the same relative
        // keys as keying first, without the new key passing through a
        // larger intermediate value.
        if now > state.t1 {
            state.rescale(now, self.alpha);
        }

        let u: f64 = Open01.sample(rng);
        let mut key = state.weight(now, self.alpha) / u;
        if !key.is_finite() {
            debug!(alpha = self.alpha, "forward-decay key overflowed; rescaling early");
            state.rescale(now, self.alpha);
            key = 1.0 / u;
        }

        if state.heap.len() >= self.capacity {
            state.heap.pop();
        }
        state.heap.push(WeightedEntry { key, value });
    }

    /// Empty the sample and restart the decay clock at `now`, returning the
    /// prior contents.
    pub fn clear_at(&self, now: Instant) -> SampleSnapshot {
        let mut state = lock(&self.state);
        let snapshot = state.snapshot();
        *state = DecayState::new(self.capacity, now);
        trace!(
            count = snapshot.count(),
            size = snapshot.size(),
            "cleared forward-decay sample"
        );
        snapshot
    }

    /// Current priority keys, in heap order. For diagnostics and tests.
    pub fn keys(&self) -> Vec<f64> {
        lock(&self.state).heap.entries().iter().map(|e| e.key).collect()
    }
}

impl Default for ExpDecaySample {
    /// [`DEFAULT_CAPACITY`] values, decaying with [`DEFAULT_ALPHA`].
    fn default() -> Self {
        Self::from_parts(DEFAULT_CAPACITY, DEFAULT_ALPHA)
    }
}

impl Statistics for ExpDecaySample {
    fn count(&self) -> u64 {
        lock(&self.state).count
    }

    fn size(&self) -> usize {
        lock(&self.state).heap.len()
    }

    fn values(&self) -> Vec<f64> {
        lock(&self.state).heap.values().collect()
    }
}

impl Sample for ExpDecaySample {
    type Snapshot = SampleSnapshot;

    fn update(&self, value: f64) {
        self.update_at(Instant::now(), value);
    }

    fn snapshot(&self) -> SampleSnapshot {
        lock(&self.state).snapshot()
    }

    fn clear(&self) -> SampleSnapshot {
        self.clear_at(Instant::now())
    }
}

/// A sample whose algorithm was picked at construction time.
///
/// This is what [`MetricsConfig`](crate::MetricsConfig) hands out: a live
/// reservoir when metrics are enabled, [`Reservoir::Null`] when they are
/// not.
#[derive(Debug)]
pub enum Reservoir {
    /// Algorithm R.
    Uniform(UniformSample),
    /// Forward decay.
    ExpDecay(ExpDecaySample),
    /// Records nothing.
    Null(NullSample),
}

/// Frozen counterpart of [`Reservoir`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReservoirSnapshot {
    /// Values captured from a live reservoir.
    Frozen(SampleSnapshot),
    /// Captured from [`Reservoir::Null`].
    Null(NullSample),
}

impl Reservoir {
    /// `true` for the inert variant.
    pub fn is_null(&self) -> bool {
        matches!(self, Reservoir::Null(_))
    }
}

impl From<UniformSample> for Reservoir {
    fn from(sample: UniformSample) -> Self {
        Reservoir::Uniform(sample)
    }
}

impl From<ExpDecaySample> for Reservoir {
    fn from(sample: ExpDecaySample) -> Self {
        Reservoir::ExpDecay(sample)
    }
}

impl From<NullSample> for Reservoir {
    fn from(sample: NullSample) -> Self {
        Reservoir::Null(sample)
    }
}

macro_rules! each_reservoir {
    ($self:ident, $s:ident => $body:expr) => {
        match $self {
            Reservoir::Uniform($s) => $body,
            Reservoir::ExpDecay($s) => $body,
            Reservoir::Null($s) => $body,
        }
    };
}

macro_rules! each_snapshot {
    ($self:ident, $s:ident => $body:expr) => {
        match $self {
            ReservoirSnapshot::Frozen($s) => $body,
            ReservoirSnapshot::Null($s) => $body,
        }
    };
}

impl Statistics for Reservoir {
    fn count(&self) -> u64 {
        each_reservoir!(self, s => s.count())
    }
    fn size(&self) -> usize {
        each_reservoir!(self, s => s.size())
    }
    fn values(&self) -> Vec<f64> {
        each_reservoir!(self, s => s.values())
    }
    fn sum(&self) -> f64 {
        each_reservoir!(self, s => s.sum())
    }
    fn mean(&self) -> f64 {
        each_reservoir!(self, s => s.mean())
    }
    fn min(&self) -> f64 {
        each_reservoir!(self, s => s.min())
    }
    fn max(&self) -> f64 {
        each_reservoir!(self, s => s.max())
    }
    fn variance(&self) -> f64 {
        each_reservoir!(self, s => s.variance())
    }
    fn std_dev(&self) -> f64 {
        each_reservoir!(self, s => s.std_dev())
    }
    fn percentile(&self, p: f64) -> f64 {
        each_reservoir!(self, s => s.percentile(p))
    }
    fn percentiles(&self, ps: &[f64]) -> Vec<f64> {
        each_reservoir!(self, s => s.percentiles(ps))
    }
}

impl Sample for Reservoir {
    type Snapshot = ReservoirSnapshot;

    fn update(&self, value: f64) {
        each_reservoir!(self, s => s.update(value))
    }

    fn snapshot(&self) -> ReservoirSnapshot {
        match self {
            Reservoir::Uniform(s) => ReservoirSnapshot::Frozen(s.snapshot()),
            Reservoir::ExpDecay(s) => ReservoirSnapshot::Frozen(s.snapshot()),
            Reservoir::Null(s) => ReservoirSnapshot::Null(s.snapshot()),
        }
    }

    fn clear(&self) -> ReservoirSnapshot {
        match self {
            Reservoir::Uniform(s) => ReservoirSnapshot::Frozen(s.clear()),
            Reservoir::ExpDecay(s) => ReservoirSnapshot::Frozen(s.clear()),
            Reservoir::Null(s) => ReservoirSnapshot::Null(s.clear()),
        }
    }
}

impl Statistics for ReservoirSnapshot {
    fn count(&self) -> u64 {
        each_snapshot!(self, s => s.count())
    }
    fn size(&self) -> usize {
        each_snapshot!(self, s => s.size())
    }
    fn values(&self) -> Vec<f64> {
        each_snapshot!(self, s => s.values())
    }
    fn sum(&self) -> f64 {
        each_snapshot!(self, s => s.sum())
    }
    fn mean(&self) -> f64 {
        each_snapshot!(self, s => s.mean())
    }
    fn min(&self) -> f64 {
        each_snapshot!(self, s => s.min())
    }
    fn max(&self) -> f64 {
        each_snapshot!(self, s => s.max())
    }
    fn variance(&self) -> f64 {
        each_snapshot!(self, s => s.variance())
    }
    fn std_dev(&self) -> f64 {
        each_snapshot!(self, s => s.std_dev())
    }
    fn percentile(&self, p: f64) -> f64 {
        each_snapshot!(self, s => s.percentile(p))
    }
    fn percentiles(&self, ps: &[f64]) -> Vec<f64> {
        each_snapshot!(self, s => s.percentiles(ps))
    }
}
