//! `hakari`: bounded-memory sampling metrics.
//!
//! Record an unbounded stream of `f64` observations into a fixed-size
//! reservoir and read distribution statistics (min, max, mean, variance,
//! standard deviation, percentiles) back out.
//!
//! Exposed modules:
//! - `stats`: pure statistics over a slice (zero for empty input).
//! - `heap`: array-backed min-heap used by the forward-decay reservoir.
//! - `reservoir`: uniform (Algorithm R) and forward-decay samples.
//! - `snapshot`: frozen snapshots and the inert null sample.
//! - `histogram`: a histogram composed over any sample.
//! - `config`: construction-time enable switch and sample parameters.
//!
//! Every metric is in one of three states. A live sample is mutable and
//! guarded by its own lock. A snapshot is frozen: its type has no mutating
//! methods. The null sample ignores everything and is handed out when
//! metrics are disabled.
//!
//! ```
//! use hakari::{MetricsConfig, SampleConfig, Sample, Statistics};
//!
//! let latency = MetricsConfig::default()
//!     .histogram(&SampleConfig::Uniform { capacity: 1028 })
//!     .unwrap();
//! for ms in 1..=100 {
//!     latency.update(f64::from(ms));
//! }
//! let report = latency.clear();
//! assert_eq!(report.count(), 100);
//! assert_eq!(report.percentile(0.5), 50.5);
//! assert_eq!(latency.count(), 0);
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod heap;
pub mod histogram;
pub mod reservoir;
pub mod sample;
pub mod snapshot;
pub mod stats;

pub use config::{MetricsConfig, SampleConfig};
pub use error::ConfigError;
pub use heap::{MinHeap, WeightedEntry};
pub use histogram::{Histogram, HistogramSnapshot};
pub use reservoir::{
    ExpDecaySample, Reservoir, ReservoirSnapshot, UniformSample, DEFAULT_ALPHA, DEFAULT_CAPACITY,
    RESCALE_THRESHOLD,
};
pub use sample::{Sample, Statistics};
pub use snapshot::{NullSample, SampleSnapshot};
