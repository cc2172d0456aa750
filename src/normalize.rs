// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Unit-length direction plus magnitude.

use crate::dist::l2_norm;

/// A segment split into its shape (unit vector) and its size (L2 norm).
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub direction: Vec<f64>,
    pub magnitude: f64,
}

impl Normalized {
    pub fn denormalize(&self) -> Vec<f64> {
        denormalize(&self.direction, self.magnitude)
    }

    /// True for the all-zero segment, whose direction is the zero vector.
    pub fn is_degenerate(&self) -> bool {
        self.magnitude == 0.0
    }
}

/// Splits `segment` into `(segment / |segment|, |segment|)`.
///
/// A zero segment yields a zero direction and zero magnitude instead of
/// dividing by zero. Nearest-match search accepts that direction like any
/// other query.
pub fn normalize(segment: &[f64]) -> Normalized {
    let magnitude = l2_norm(segment);
    if magnitude == 0.0 {
        return Normalized {
            direction: vec![0.0; segment.len()],
            magnitude: 0.0,
        };
    }
    Normalized {
        direction: segment.iter().map(|x| x / magnitude).collect(),
        magnitude,
    }
}

pub fn denormalize(direction: &[f64], magnitude: f64) -> Vec<f64> {
    direction.iter().map(|x| x * magnitude).collect()
}
