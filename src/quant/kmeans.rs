// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Seeded k-means clustering.
//!
//! Given the same vectors, `k`, iteration cap and seed, training produces
//! bit-identical centroids.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use super::CodebookTrainer;
use crate::codebook::{Codebook, TrainingSummary};
use crate::dist::{l2_sq, nearest};
use crate::error::{ensure_dim, Result, VqError};

/// Lloyd's algorithm with k-means++ seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KMeansTrainer {
    /// Upper bound on assignment rounds. Hitting it is not an error.
    pub max_iterations: usize,
    /// Seed for initial centroid placement.
    pub seed: u64,
}

impl Default for KMeansTrainer {
    fn default() -> Self {
        Self { max_iterations: 300, seed: 0 }
    }
}

impl KMeansTrainer {
    pub fn new(max_iterations: usize, seed: u64) -> Self {
        Self { max_iterations, seed }
    }
}

impl CodebookTrainer for KMeansTrainer {
    fn train(&self, vectors: &[Vec<f64>], k: usize) -> Result<Codebook> {
        validate(vectors, k)?;

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut centroids = seed_centroids(vectors, k, &mut rng);

        let mut assignments: Option<Vec<usize>> = None;
        let mut iterations = 0usize;
        let mut converged = false;

        while iterations < self.max_iterations {
            let next = assign(vectors, &centroids);
            iterations += 1;

            if assignments.as_ref() == Some(&next) {
                converged = true;
                break;
            }

            let moved = update_centroids(vectors, &next, &mut centroids);
            debug!(iteration = iterations, moved, "k-means round");
            assignments = Some(next);
        }

        let inertia = vectors
            .iter()
            .map(|v| {
                nearest(v, centroids.iter().map(Vec::as_slice))
                    .map(|(_, d)| d)
                    .unwrap_or(0.0)
            })
            .sum::<f64>();

        if !converged {
            warn!(
                max_iterations = self.max_iterations,
                "k-means stopped at the iteration cap before assignments settled"
            );
        }
        info!(k, n_vectors = vectors.len(), iterations, converged, inertia, "codebook trained");

        Codebook::new(
            centroids,
            TrainingSummary {
                iterations,
                converged,
                inertia,
            },
        )
    }
}

/// Trains a k-means codebook with the default trainer settings overridden by
/// `iteration_cap` and `seed`.
pub fn train_codebook(
    vectors: &[Vec<f64>],
    k: usize,
    iteration_cap: usize,
    seed: u64,
) -> Result<Codebook> {
    KMeansTrainer::new(iteration_cap, seed).train(vectors, k)
}

fn validate(vectors: &[Vec<f64>], k: usize) -> Result<()> {
    if vectors.is_empty() {
        return Err(VqError::InvalidParameter(
            "training set is empty".to_string(),
        ));
    }
    if k == 0 || k > vectors.len() {
        return Err(VqError::InvalidParameter(format!(
            "k must be in 1..={}, got {k}",
            vectors.len()
        )));
    }
    let dim = vectors[0].len();
    if dim == 0 {
        return Err(VqError::InvalidParameter(
            "training vectors must not be empty".to_string(),
        ));
    }
    for v in vectors {
        ensure_dim(dim, v.len())?;
    }
    Ok(())
}

/// k-means++: the first centroid is drawn uniformly, each following one with
/// probability proportional to its squared distance from the closest centroid
/// chosen so far. Falls back to a uniform draw once every vector coincides
/// with some centroid.
fn seed_centroids(vectors: &[Vec<f64>], k: usize, rng: &mut ChaCha8Rng) -> Vec<Vec<f64>> {
    let first = rng.gen_range(0..vectors.len());
    let mut centroids = Vec::with_capacity(k);
    centroids.push(vectors[first].clone());

    let mut closest: Vec<f64> = vectors.iter().map(|v| l2_sq(v, &centroids[0])).collect();

    while centroids.len() < k {
        let total: f64 = closest.iter().sum();
        let pick = if total > 0.0 && total.is_finite() {
            let target = rng.gen::<f64>() * total;
            let mut acc = 0.0;
            // Rounding can leave `target` just past the final sum
            let mut pick = closest.iter().rposition(|&d| d > 0.0).unwrap_or(0);
            for (i, &d) in closest.iter().enumerate() {
                acc += d;
                if target < acc {
                    pick = i;
                    break;
                }
            }
            pick
        } else {
            rng.gen_range(0..vectors.len())
        };

        let chosen = vectors[pick].clone();
        for (d, v) in closest.iter_mut().zip(vectors) {
            *d = d.min(l2_sq(v, &chosen));
        }
        centroids.push(chosen);
    }

    centroids
}

fn nearest_index(vector: &[f64], centroids: &[Vec<f64>]) -> usize {
    nearest(vector, centroids.iter().map(Vec::as_slice))
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

#[cfg(feature = "parallel")]
fn assign(vectors: &[Vec<f64>], centroids: &[Vec<f64>]) -> Vec<usize> {
    use rayon::prelude::*;
    vectors
        .par_iter()
        .map(|v| nearest_index(v, centroids))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn assign(vectors: &[Vec<f64>], centroids: &[Vec<f64>]) -> Vec<usize> {
    vectors.iter().map(|v| nearest_index(v, centroids)).collect()
}

/// Replaces every centroid with the mean of its members. Centroids with no
/// members keep their previous position. Returns how many centroids changed.
fn update_centroids(vectors: &[Vec<f64>], assignments: &[usize], centroids: &mut [Vec<f64>]) -> usize {
    let k = centroids.len();
    let dim = centroids[0].len();

    let mut sums = vec![vec![0.0f64; dim]; k];
    let mut counts = vec![0usize; k];

    for (vec, &c_idx) in vectors.iter().zip(assignments) {
        counts[c_idx] += 1;
        for (acc, &val) in sums[c_idx].iter_mut().zip(vec) {
            *acc += val;
        }
    }

    let mut moved = 0;
    for c_idx in 0..k {
        let count = counts[c_idx];
        if count == 0 {
            continue;
        }
        let mean: Vec<f64> = sums[c_idx].iter().map(|s| s / count as f64).collect();
        if mean != centroids[c_idx] {
            moved += 1;
            centroids[c_idx] = mean;
        }
    }
    moved
}
