//! Construction-time configuration.
//!
//! Whether metrics are recorded at all is decided once, when a sample or
//! histogram is built from a [`MetricsConfig`]. A disabled config hands out
//! the null variants; nothing re-checks the switch on the hot path.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::histogram::Histogram;
use crate::reservoir::{ExpDecaySample, Reservoir, UniformSample, DEFAULT_ALPHA, DEFAULT_CAPACITY};
use crate::snapshot::NullSample;

/// Global enable/disable switch, passed explicitly to constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MetricsConfig {
    /// When `false`, every constructor returns an inert sample.
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Which reservoir to build, and its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SampleConfig {
    /// Algorithm R.
    Uniform { capacity: usize },
    /// Forward decay.
    ExpDecay { capacity: usize, alpha: f64 },
}

impl Default for SampleConfig {
    fn default() -> Self {
        SampleConfig::ExpDecay {
            capacity: DEFAULT_CAPACITY,
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl SampleConfig {
    /// Check parameters without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            SampleConfig::Uniform { .. } => Ok(()),
            SampleConfig::ExpDecay { alpha, .. } if alpha.is_finite() && alpha > 0.0 => Ok(()),
            SampleConfig::ExpDecay { alpha, .. } => Err(ConfigError::InvalidAlpha(alpha)),
        }
    }

    /// Reservoir size requested by either variant.
    pub fn capacity(&self) -> usize {
        match *self {
            SampleConfig::Uniform { capacity } | SampleConfig::ExpDecay { capacity, .. } => {
                capacity
            }
        }
    }
}

impl MetricsConfig {
    /// Metrics on: live samples are built.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Metrics off: every builder returns the null sample.
    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// A uniform sample, or the null sample when disabled.
    pub fn uniform_sample(&self, capacity: usize) -> Reservoir {
        if !self.enabled {
            return self.null("uniform");
        }
        Reservoir::Uniform(UniformSample::new(capacity))
    }

    /// A forward-decay sample, or the null sample when disabled.
    ///
    /// `alpha` is validated even when disabled, so a bad setting surfaces
    /// before metrics are switched on.
    pub fn exp_decay_sample(&self, capacity: usize, alpha: f64) -> Result<Reservoir, ConfigError> {
        SampleConfig::ExpDecay { capacity, alpha }.validate()?;
        if !self.enabled {
            return Ok(self.null("exp_decay"));
        }
        Ok(Reservoir::ExpDecay(ExpDecaySample::new(capacity, alpha)?))
    }

    /// Build the sample described by `sample`.
    pub fn sample(&self, sample: &SampleConfig) -> Result<Reservoir, ConfigError> {
        match *sample {
            SampleConfig::Uniform { capacity } => Ok(self.uniform_sample(capacity)),
            SampleConfig::ExpDecay { capacity, alpha } => self.exp_decay_sample(capacity, alpha),
        }
    }

    /// A histogram over the sample described by `sample`.
    pub fn histogram(&self, sample: &SampleConfig) -> Result<Histogram, ConfigError> {
        Ok(Histogram::new(self.sample(sample)?))
    }

    fn null(&self, kind: &'static str) -> Reservoir {
        debug!(kind, "metrics disabled; using null sample");
        Reservoir::Null(NullSample)
    }
}
