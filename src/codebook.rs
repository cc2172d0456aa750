// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Trained codebook of segment shapes.

use serde::{Deserialize, Serialize};

use crate::dist::nearest;
use crate::error::{ensure_dim, Result, VqError};
use crate::quant::VectorQuantizer;

/// How training ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Assignment rounds performed.
    pub iterations: usize,
    /// False when the iteration cap was hit before assignments settled.
    pub converged: bool,
    /// Sum of squared distances from each training vector to its centroid.
    pub inertia: f64,
}

impl Default for TrainingSummary {
    fn default() -> Self {
        Self { iterations: 0, converged: true, inertia: 0.0 }
    }
}

/// An ordered set of equal-length centroid vectors. A centroid's identity is
/// its index. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Codebook {
    dim: usize,
    centroids: Vec<Vec<f64>>,
    summary: TrainingSummary,
}

impl Codebook {
    pub fn new(centroids: Vec<Vec<f64>>, summary: TrainingSummary) -> Result<Self> {
        let Some(first) = centroids.first() else {
            return Err(VqError::InvalidParameter(
                "codebook needs at least one centroid".to_string(),
            ));
        };
        let dim = first.len();
        if dim == 0 {
            return Err(VqError::InvalidParameter(
                "centroids must not be empty".to_string(),
            ));
        }
        for c in &centroids {
            ensure_dim(dim, c.len())?;
        }
        Ok(Self { dim, centroids, summary })
    }

    /// Wraps centroids produced elsewhere (another clusterer, a file).
    pub fn from_centroids(centroids: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(centroids, TrainingSummary::default())
    }

    pub fn centroids(&self) -> &[Vec<f64>] {
        &self.centroids
    }

    pub fn summary(&self) -> &TrainingSummary {
        &self.summary
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        #[derive(Serialize)]
        struct CodebookDump<'a> {
            dim: usize,
            centroids: &'a Vec<Vec<f64>>,
            summary: &'a TrainingSummary,
        }
        let dump = CodebookDump {
            dim: self.dim,
            centroids: &self.centroids,
            summary: &self.summary,
        };
        Ok(bincode::serde::encode_to_vec(&dump, bincode::config::standard())?)
    }

    /// Decodes bytes written by [`to_bytes`](Self::to_bytes) and re-checks
    /// every invariant.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        #[derive(Deserialize)]
        struct CodebookLoad {
            dim: usize,
            centroids: Vec<Vec<f64>>,
            summary: TrainingSummary,
        }
        let (load, read): (CodebookLoad, usize) =
            bincode::serde::decode_from_slice(data, bincode::config::standard())?;
        if read != data.len() {
            return Err(VqError::Snapshot(format!(
                "{} trailing bytes after codebook",
                data.len() - read
            )));
        }
        let codebook = Self::new(load.centroids, load.summary)?;
        ensure_dim(load.dim, codebook.dim)?;
        Ok(codebook)
    }

    /// BLAKE3 digest of the centroid bit patterns. Equal fingerprints mean
    /// bit-identical codebooks; the training summary is not covered.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.dim as u64).to_le_bytes());
        hasher.update(&(self.centroids.len() as u64).to_le_bytes());
        for c in &self.centroids {
            for v in c {
                hasher.update(&v.to_bits().to_le_bytes());
            }
        }
        hasher.finalize()
    }
}

impl VectorQuantizer for Codebook {
    fn dim(&self) -> usize {
        self.dim
    }

    fn len(&self) -> usize {
        self.centroids.len()
    }

    fn centroid(&self, index: usize) -> &[f64] {
        &self.centroids[index]
    }

    fn nearest(&self, vector: &[f64]) -> usize {
        debug_assert_eq!(vector.len(), self.dim);
        nearest(vector, self.centroids.iter().map(Vec::as_slice))
            .map(|(idx, _)| idx)
            .unwrap_or(0)
    }
}
