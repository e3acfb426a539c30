//! Errors.
//!
//! Sampling itself never fails; only construction parameters are checked.

use thiserror::Error;

/// Invalid sample parameters.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    /// Decay constant is not finite or not strictly positive.
    #[error("decay alpha must be finite and > 0 (got {0})")]
    InvalidAlpha(f64),
}
