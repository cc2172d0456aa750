// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Fixed-stride segmentation.

use crate::error::{Result, VqError};

/// A borrowed, fixed-length slice of a signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    /// Index of the first sample in the source signal.
    pub offset: usize,
    pub values: &'a [f64],
}

/// Cuts a signal into `window_len`-sample segments every `slide_len` samples.
///
/// A trailing remainder shorter than `window_len` is dropped, never padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segmenter {
    window_len: usize,
    slide_len: usize,
}

impl Segmenter {
    pub fn new(window_len: usize, slide_len: usize) -> Result<Self> {
        if window_len == 0 {
            return Err(VqError::InvalidParameter(
                "window_len must be at least 1".to_string(),
            ));
        }
        if slide_len == 0 {
            return Err(VqError::InvalidParameter(
                "slide_len must be at least 1".to_string(),
            ));
        }
        Ok(Self { window_len, slide_len })
    }

    pub fn window_len(&self) -> usize {
        self.window_len
    }

    pub fn slide_len(&self) -> usize {
        self.slide_len
    }

    /// Number of complete segments in a signal of `signal_len` samples.
    pub fn count(&self, signal_len: usize) -> usize {
        if signal_len < self.window_len {
            0
        } else {
            (signal_len - self.window_len) / self.slide_len + 1
        }
    }

    /// Lazily yields segments in offset order. Clone the iterator to restart it.
    pub fn segments<'a>(&self, signal: &'a [f64]) -> Segments<'a> {
        Segments {
            signal,
            window_len: self.window_len,
            slide_len: self.slide_len,
            next: 0,
            remaining: self.count(signal.len()),
        }
    }
}

/// Iterator returned by [`Segmenter::segments`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    signal: &'a [f64],
    window_len: usize,
    slide_len: usize,
    next: usize,
    remaining: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let offset = self.next;
        self.next += self.slide_len;
        self.remaining -= 1;
        Some(Segment {
            offset,
            values: &self.signal[offset..offset + self.window_len],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Segments<'_> {}

impl std::iter::FusedIterator for Segments<'_> {}

/// Eager form: every complete segment, copied out in offset order.
///
/// e.g. `segment(&[0., 1., 2., 3., 4., 5.], 3, 2)` gives `[[0, 1, 2], [2, 3, 4]]`.
pub fn segment(signal: &[f64], window_len: usize, slide_len: usize) -> Result<Vec<Vec<f64>>> {
    let segmenter = Segmenter::new(window_len, slide_len)?;
    Ok(segmenter
        .segments(signal)
        .map(|s| s.values.to_vec())
        .collect())
}
