// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! waveform-vq: windowed vector quantization of one-dimensional signals.
//!
//! A signal is cut into overlapping fixed-length segments, each segment is
//! tapered by a squared half-sine window and split into a unit-length shape
//! and a magnitude. A small codebook of shapes is learned with k-means, and
//! any signal is then approximated by replacing every segment with its
//! nearest codebook shape, rescaled, and overlap-added back together.

pub mod codebook;
pub mod config;
pub mod dist;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod quant;
pub mod reconstruct;
pub mod residual;
pub mod segment;
pub mod snapshot;
pub mod train;
pub mod window;

pub use codebook::{Codebook, TrainingSummary};
pub use config::PipelineConfig;
pub use error::{Result, VqError};
pub use normalize::{denormalize, normalize, Normalized};
pub use pipeline::Pipeline;
pub use quant::kmeans::{train_codebook, KMeansTrainer};
pub use quant::{CodebookTrainer, VectorQuantizer};
pub use reconstruct::{reconstruct, EncodedSignal, Reconstructor, SegmentCode};
pub use residual::{Residual, ResidualSummary};
pub use segment::{segment, Segment, Segmenter, Segments};
pub use train::training_vectors;
pub use window::WindowFunction;

#[cfg(test)]
pub mod tests;
