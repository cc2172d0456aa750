// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Train-then-reconstruct facade.

use tracing::info;

use crate::codebook::Codebook;
use crate::config::PipelineConfig;
use crate::error::{ensure_dim, Result};
use crate::quant::kmeans::KMeansTrainer;
use crate::quant::{CodebookTrainer, VectorQuantizer};
use crate::reconstruct::{EncodedSignal, Reconstructor};
use crate::train::training_vectors;
use crate::window::WindowFunction;

/// A window plus the codebook trained under it.
///
/// # Examples
///
/// ```
/// use waveform_vq::{Pipeline, PipelineConfig};
///
/// let signal: Vec<f64> = (0..400).map(|i| (i as f64 * 0.2).sin()).collect();
/// let config = PipelineConfig { window_len: 16, clusters: 4, ..Default::default() };
/// let pipeline = Pipeline::fit(&signal, config)?;
/// let approx = pipeline.reconstruct(&signal)?;
/// assert_eq!(approx.len(), signal.len());
/// # Ok::<(), waveform_vq::VqError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    window: WindowFunction,
    codebook: Codebook,
}

impl Pipeline {
    /// Trains a k-means codebook on `training_signal`.
    pub fn fit(training_signal: &[f64], config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        let window = WindowFunction::generate(config.window_len)?;
        let vectors = training_vectors(training_signal, &window, config.train_slide_len)?;
        info!(
            samples = training_signal.len(),
            segments = vectors.len(),
            window_len = config.window_len,
            "training set prepared"
        );

        let trainer = KMeansTrainer::new(config.max_iterations, config.seed);
        let codebook = trainer.train(&vectors, config.clusters)?;

        Ok(Self { config, window, codebook })
    }

    /// Rebuilds a pipeline around an existing codebook, e.g. one loaded from
    /// disk. `config.window_len` must match the codebook.
    pub fn from_parts(config: PipelineConfig, codebook: Codebook) -> Result<Self> {
        config.validate()?;
        ensure_dim(config.window_len, codebook.dim())?;
        let window = WindowFunction::generate(config.window_len)?;
        Ok(Self { config, window, codebook })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn window(&self) -> &WindowFunction {
        &self.window
    }

    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    pub fn into_codebook(self) -> Codebook {
        self.codebook
    }

    pub fn reconstructor(&self) -> Result<Reconstructor<'_, Codebook>> {
        Reconstructor::new(&self.window, &self.codebook)?.with_slide_ratio(self.config.slide_ratio)
    }

    pub fn encode(&self, signal: &[f64]) -> Result<EncodedSignal> {
        self.reconstructor()?.encode(signal)
    }

    pub fn reconstruct(&self, signal: &[f64]) -> Result<Vec<f64>> {
        self.reconstructor()?.reconstruct(signal)
    }
}
