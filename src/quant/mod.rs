// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod kmeans;

use crate::codebook::Codebook;
use crate::error::Result;

/// A trained set of representative vectors that can be queried for the
/// closest one.
///
/// Reconstruction is generic over this trait, so any vector-quantization
/// scheme can replace the k-means codebook without touching segmentation or
/// overlap-add.
pub trait VectorQuantizer: Send + Sync {
    /// Length of every representative vector.
    fn dim(&self) -> usize;

    /// Number of representatives.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Representative vector at `index`. Panics if out of range.
    fn centroid(&self, index: usize) -> &[f64];

    /// Index of the representative closest to `vector` (Euclidean).
    /// Must be deterministic; exact ties go to the lowest index.
    fn nearest(&self, vector: &[f64]) -> usize;
}

/// Learns a codebook of `k` representatives from training vectors.
pub trait CodebookTrainer {
    fn train(&self, vectors: &[Vec<f64>], k: usize) -> Result<Codebook>;
}
