// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VqError};
use crate::reconstruct::DEFAULT_SLIDE_RATIO;

/// Default window length in samples.
pub const WINDOW_LEN: usize = 32;

/// Default training stride. Small strides give the clusterer many slightly
/// shifted copies of each shape.
pub const TRAIN_SLIDE_LEN: usize = 2;

/// Default codebook size.
pub const CLUSTERS: usize = 30;

/// Default cap on k-means assignment rounds.
pub const MAX_ITERATIONS: usize = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub window_len: usize,
    /// Stride between training segments.
    pub train_slide_len: usize,
    /// Reconstruction stride as a fraction of `window_len`.
    pub slide_ratio: f64,
    /// Number of codebook entries.
    pub clusters: usize,
    pub max_iterations: usize,
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_len: WINDOW_LEN,
            train_slide_len: TRAIN_SLIDE_LEN,
            slide_ratio: DEFAULT_SLIDE_RATIO,
            clusters: CLUSTERS,
            max_iterations: MAX_ITERATIONS,
            seed: 0,
        }
    }
}

impl PipelineConfig {
    /// Checks everything that can be checked without a signal.
    /// `clusters` against the training-set size is checked at training time.
    pub fn validate(&self) -> Result<()> {
        if self.window_len < 2 {
            return Err(VqError::InvalidParameter(format!(
                "window_len must be at least 2, got {}",
                self.window_len
            )));
        }
        if self.train_slide_len == 0 {
            return Err(VqError::InvalidParameter(
                "train_slide_len must be at least 1".to_string(),
            ));
        }
        if !(self.slide_ratio > 0.0 && self.slide_ratio <= 1.0) {
            return Err(VqError::InvalidParameter(format!(
                "slide_ratio must be in (0, 1], got {}",
                self.slide_ratio
            )));
        }
        if (self.window_len as f64 * self.slide_ratio).floor() < 1.0 {
            return Err(VqError::InvalidParameter(format!(
                "slide_ratio {} gives a zero slide for window_len {}",
                self.slide_ratio, self.window_len
            )));
        }
        if self.clusters == 0 {
            return Err(VqError::InvalidParameter(
                "clusters must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
