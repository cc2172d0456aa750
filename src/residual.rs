// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Reconstruction error.

use serde::Serialize;

use crate::error::{ensure_dim, Result};

/// The error signal `reconstructed - original`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Residual {
    values: Vec<f64>,
}

/// Summary statistics over a stretch of the error signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResidualSummary {
    pub samples: usize,
    pub max_abs: f64,
    /// Index (into the full signal) of the largest absolute error.
    pub max_abs_at: usize,
    pub rms: f64,
}

impl Residual {
    pub fn between(original: &[f64], reconstructed: &[f64]) -> Result<Self> {
        ensure_dim(original.len(), reconstructed.len())?;
        Ok(Self {
            values: reconstructed.iter().zip(original).map(|(r, o)| r - o).collect(),
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn max_abs(&self) -> f64 {
        self.summary().max_abs
    }

    pub fn rms(&self) -> f64 {
        self.summary().rms
    }

    pub fn summary(&self) -> ResidualSummary {
        summarize(&self.values, 0)
    }

    /// Summary over `[margin, len - margin)`, skipping the tapered edges where
    /// only one window contributes. Empty when the margins overlap.
    pub fn interior(&self, margin: usize) -> ResidualSummary {
        let end = self.values.len().saturating_sub(margin);
        if margin >= end {
            return summarize(&[], margin);
        }
        summarize(&self.values[margin..end], margin)
    }
}

fn summarize(values: &[f64], base: usize) -> ResidualSummary {
    let mut max_abs = 0.0f64;
    let mut max_abs_at = base;
    let mut sum_sq = 0.0f64;
    for (i, v) in values.iter().enumerate() {
        let a = v.abs();
        if a > max_abs {
            max_abs = a;
            max_abs_at = base + i;
        }
        sum_sq += v * v;
    }
    let rms = if values.is_empty() {
        0.0
    } else {
        (sum_sq / values.len() as f64).sqrt()
    };
    ResidualSummary {
        samples: values.len(),
        max_abs,
        max_abs_at,
        rms,
    }
}
