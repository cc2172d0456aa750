// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Training-set preparation.

use crate::error::Result;
use crate::normalize::normalize;
use crate::segment::{Segment, Segmenter};
use crate::window::WindowFunction;

/// Segments `signal` every `slide_len` samples, windows each segment and
/// returns the unit-length directions in offset order.
///
/// Zero segments contribute zero vectors rather than being skipped, so the
/// training set lines up one-to-one with the segment offsets.
pub fn training_vectors(
    signal: &[f64],
    window: &WindowFunction,
    slide_len: usize,
) -> Result<Vec<Vec<f64>>> {
    let segmenter = Segmenter::new(window.len(), slide_len)?;
    let segments: Vec<Segment<'_>> = segmenter.segments(signal).collect();
    prepare(&segments, window)
}

fn direction(segment: &Segment<'_>, window: &WindowFunction) -> Result<Vec<f64>> {
    let mut windowed = segment.values.to_vec();
    window.apply_in_place(&mut windowed)?;
    Ok(normalize(&windowed).direction)
}

#[cfg(feature = "parallel")]
fn prepare(segments: &[Segment<'_>], window: &WindowFunction) -> Result<Vec<Vec<f64>>> {
    use rayon::prelude::*;
    segments.par_iter().map(|s| direction(s, window)).collect()
}

#[cfg(not(feature = "parallel"))]
fn prepare(segments: &[Segment<'_>], window: &WindowFunction) -> Result<Vec<Vec<f64>>> {
    segments.iter().map(|s| direction(s, window)).collect()
}
