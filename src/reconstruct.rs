// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Codebook-driven overlap-add reconstruction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codebook::Codebook;
use crate::error::{ensure_dim, Result, VqError};
use crate::normalize::normalize;
use crate::quant::VectorQuantizer;
use crate::segment::{Segment, Segmenter};
use crate::window::WindowFunction;

/// Default slide as a fraction of the window length. Half-window hops make
/// the squared half-sine tapers of neighbouring segments sum to roughly one.
pub const DEFAULT_SLIDE_RATIO: f64 = 0.5;

/// One segment, quantized: which centroid, scaled by how much, placed where.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentCode {
    pub offset: usize,
    pub index: usize,
    pub magnitude: f64,
}

/// A whole signal in quantized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedSignal {
    pub signal_len: usize,
    pub window_len: usize,
    pub slide_len: usize,
    pub codes: Vec<SegmentCode>,
}

/// Rebuilds signals from codebook entries.
///
/// Holds only shared references; one reconstructor can serve any number of
/// calls, each with its own output buffer.
#[derive(Debug, Clone)]
pub struct Reconstructor<'a, Q: VectorQuantizer> {
    window: &'a WindowFunction,
    quantizer: &'a Q,
    slide_len: usize,
}

impl<'a, Q: VectorQuantizer> Reconstructor<'a, Q> {
    /// Uses a slide of `window.len() / 2`.
    pub fn new(window: &'a WindowFunction, quantizer: &'a Q) -> Result<Self> {
        ensure_dim(window.len(), quantizer.dim())?;
        if quantizer.is_empty() {
            return Err(VqError::InvalidParameter(
                "quantizer has no centroids".to_string(),
            ));
        }
        Ok(Self {
            window,
            quantizer,
            slide_len: window.len() / 2,
        })
    }

    /// Sets the slide to `floor(window_len * ratio)`.
    /// Requires `0 < ratio <= 1` and a resulting slide of at least one sample.
    pub fn with_slide_ratio(self, ratio: f64) -> Result<Self> {
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(VqError::InvalidParameter(format!(
                "slide ratio must be in (0, 1], got {ratio}"
            )));
        }
        let slide_len = (self.window.len() as f64 * ratio).floor() as usize;
        self.with_slide_len(slide_len)
    }

    pub fn with_slide_len(mut self, slide_len: usize) -> Result<Self> {
        if slide_len == 0 {
            return Err(VqError::InvalidParameter(
                "slide_len must be at least 1".to_string(),
            ));
        }
        self.slide_len = slide_len;
        Ok(self)
    }

    pub fn slide_len(&self) -> usize {
        self.slide_len
    }

    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Matches every complete segment of `signal` to its nearest centroid.
    pub fn encode(&self, signal: &[f64]) -> Result<EncodedSignal> {
        let segmenter = Segmenter::new(self.window.len(), self.slide_len)?;
        let segments: Vec<Segment<'_>> = segmenter.segments(signal).collect();
        let codes = self.match_all(&segments)?;

        debug!(
            signal_len = signal.len(),
            segments = codes.len(),
            slide_len = self.slide_len,
            "signal encoded"
        );

        Ok(EncodedSignal {
            signal_len: signal.len(),
            window_len: self.window.len(),
            slide_len: self.slide_len,
            codes,
        })
    }

    /// Overlap-adds the rescaled centroids into a fresh zeroed buffer.
    ///
    /// Samples past the last complete segment stay zero.
    pub fn decode(&self, encoded: &EncodedSignal) -> Result<Vec<f64>> {
        ensure_dim(self.window.len(), encoded.window_len)?;

        let mut buffer = vec![0.0f64; encoded.signal_len];
        for code in &encoded.codes {
            if code.index >= self.quantizer.len() {
                return Err(VqError::InvalidParameter(format!(
                    "code refers to centroid {} of {}",
                    code.index,
                    self.quantizer.len()
                )));
            }
            let Some(end) = code
                .offset
                .checked_add(encoded.window_len)
                .filter(|&end| end <= buffer.len())
            else {
                return Err(VqError::InvalidParameter(format!(
                    "segment at {} overruns signal of {} samples",
                    code.offset,
                    buffer.len()
                )));
            };
            let centroid = self.quantizer.centroid(code.index);
            for (out, c) in buffer[code.offset..end].iter_mut().zip(centroid) {
                *out += c * code.magnitude;
            }
        }
        Ok(buffer)
    }

    /// Approximates `signal` from the codebook. Output has the same length.
    pub fn reconstruct(&self, signal: &[f64]) -> Result<Vec<f64>> {
        let encoded = self.encode(signal)?;
        self.decode(&encoded)
    }

    fn match_one(&self, segment: &Segment<'_>) -> Result<SegmentCode> {
        let normalized = normalize(&self.window.apply(segment.values)?);
        Ok(SegmentCode {
            offset: segment.offset,
            index: self.quantizer.nearest(&normalized.direction),
            magnitude: normalized.magnitude,
        })
    }

    #[cfg(feature = "parallel")]
    fn match_all(&self, segments: &[Segment<'_>]) -> Result<Vec<SegmentCode>> {
        use rayon::prelude::*;
        segments.par_iter().map(|s| self.match_one(s)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn match_all(&self, segments: &[Segment<'_>]) -> Result<Vec<SegmentCode>> {
        segments.iter().map(|s| self.match_one(s)).collect()
    }
}

/// Reconstructs `signal` with the default half-window slide.
pub fn reconstruct(signal: &[f64], window: &WindowFunction, codebook: &Codebook) -> Result<Vec<f64>> {
    Reconstructor::new(window, codebook)?.reconstruct(signal)
}
