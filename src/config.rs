/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::{Error, Result};

/// Default bit-vector length above which `freeze()` builds rank/select
/// acceleration structures, per the "~10^4 strings/bits" guidance for when
/// the linear-scan fallback stops paying for itself.
pub const DEFAULT_ACCEL_THRESHOLD: usize = 10_000;

/// Construction-time knobs for an LPRC or PSRC engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    /// Controls the anchor re-seeding threshold `c = 2 + 2/epsilon`: smaller
    /// values force more frequent anchors (faster retrieval, more memory).
    pub epsilon: f64,
    /// Bit-vector length above which `freeze()` builds Rank9-style
    /// acceleration instead of relying on a linear scan.
    pub accel_threshold: usize,
}

impl EngineOptions {
    /// Validates `epsilon > 0`. Earlier designs of this store panicked on a
    /// non-positive epsilon; panicking leaves populated engines half-built
    /// with no way for the caller to recover, so this returns an error
    /// instead.
    pub fn new(epsilon: f64) -> Result<Self> {
        if !(epsilon > 0.0) {
            return Err(Error::InvalidEpsilon(epsilon));
        }
        Ok(Self {
            epsilon,
            accel_threshold: DEFAULT_ACCEL_THRESHOLD,
        })
    }

    pub fn with_accel_threshold(mut self, accel_threshold: usize) -> Self {
        self.accel_threshold = accel_threshold;
        self
    }

    /// `c = 2 + 2/epsilon` from the anchor-placement rule.
    pub fn anchor_factor(&self) -> f64 {
        2.0 + 2.0 / self.epsilon
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self::new(1.0).expect("1.0 is a valid epsilon")
    }
}
