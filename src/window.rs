// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Tapering window.

use std::f64::consts::PI;

use crate::error::{ensure_dim, Result, VqError};

/// Squared half-sine envelope: `w[i] = sin(pi * i / (n - 1))^2`.
///
/// Zero at both ends, one (or close to it) in the middle. Multiplying every
/// segment by the same envelope lets overlapping segments be summed back
/// together without seams.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFunction {
    values: Vec<f64>,
}

impl WindowFunction {
    /// Generates the envelope for `window_len` samples. Requires `window_len >= 2`.
    pub fn generate(window_len: usize) -> Result<Self> {
        if window_len < 2 {
            return Err(VqError::InvalidParameter(format!(
                "window_len must be at least 2, got {window_len}"
            )));
        }

        let last = (window_len - 1) as f64;
        let values = (0..window_len)
            .map(|i| {
                let s = (PI * i as f64 / last).sin();
                s * s
            })
            .collect();

        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Elementwise product of `segment` and the envelope.
    pub fn apply(&self, segment: &[f64]) -> Result<Vec<f64>> {
        ensure_dim(self.len(), segment.len())?;
        Ok(segment.iter().zip(&self.values).map(|(s, w)| s * w).collect())
    }

    /// In-place variant of [`apply`](Self::apply).
    pub fn apply_in_place(&self, segment: &mut [f64]) -> Result<()> {
        ensure_dim(self.len(), segment.len())?;
        for (s, w) in segment.iter_mut().zip(&self.values) {
            *s *= w;
        }
        Ok(())
    }
}

impl AsRef<[f64]> for WindowFunction {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}
