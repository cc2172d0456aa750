pub mod inspect;
pub mod reconstruct;
pub mod run;
pub mod train;

use anyhow::Context;
use clap::Args;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::path::PathBuf;
use waveform_trace::{read_trace, Endianness, TraceFormat};
use waveform_vq::config::{CLUSTERS, MAX_ITERATIONS, TRAIN_SLIDE_LEN, WINDOW_LEN};
use waveform_vq::reconstruct::DEFAULT_SLIDE_RATIO;
use waveform_vq::{PipelineConfig, ResidualSummary};

/// Where the samples come from and how to decode them.
#[derive(Args, Debug, Clone)]
pub struct TraceArgs {
    /// Raw trace of 16-bit signed samples
    pub trace: PathBuf,

    /// Multiplier applied to every decoded sample
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Samples are big-endian (default little-endian)
    #[arg(long)]
    pub big_endian: bool,

    /// Use only the first N samples
    #[arg(long)]
    pub limit: Option<usize>,
}

impl TraceArgs {
    pub fn format(&self) -> TraceFormat {
        TraceFormat {
            endianness: if self.big_endian { Endianness::Big } else { Endianness::Little },
            scale: self.scale,
        }
    }

    pub fn load(&self) -> anyhow::Result<Vec<f64>> {
        let mut samples = read_trace(&self.trace, self.format())
            .with_context(|| format!("Failed to read trace {}", self.trace.display()))?;
        if let Some(limit) = self.limit {
            samples.truncate(limit);
        }
        tracing::info!(samples = samples.len(), path = %self.trace.display(), "trace loaded");
        Ok(samples)
    }
}

/// Codebook training parameters.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Segment length in samples
    #[arg(long, default_value_t = WINDOW_LEN)]
    pub window_len: usize,

    /// Stride between training segments
    #[arg(long, default_value_t = TRAIN_SLIDE_LEN)]
    pub train_slide: usize,

    /// Reconstruction stride as a fraction of the window length
    #[arg(long, default_value_t = DEFAULT_SLIDE_RATIO)]
    pub slide_ratio: f64,

    /// Number of codebook entries
    #[arg(long, short = 'k', default_value_t = CLUSTERS)]
    pub clusters: usize,

    /// Cap on k-means rounds
    #[arg(long, default_value_t = MAX_ITERATIONS)]
    pub max_iterations: usize,

    /// Seed for centroid placement
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

impl Default for ModelArgs {
    fn default() -> Self {
        let cfg = PipelineConfig::default();
        Self {
            window_len: cfg.window_len,
            train_slide: cfg.train_slide_len,
            slide_ratio: cfg.slide_ratio,
            clusters: cfg.clusters,
            max_iterations: cfg.max_iterations,
            seed: cfg.seed,
        }
    }
}

impl ModelArgs {
    pub fn config(&self) -> PipelineConfig {
        PipelineConfig {
            window_len: self.window_len,
            train_slide_len: self.train_slide,
            slide_ratio: self.slide_ratio,
            clusters: self.clusters,
            max_iterations: self.max_iterations,
            seed: self.seed,
        }
    }
}

pub(crate) fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub(crate) fn add_residual_rows(table: &mut Table, label: &str, s: &ResidualSummary) {
    table.add_row(vec![format!("{label} samples"), s.samples.to_string()]);
    table.add_row(vec![
        format!("{label} max |error|"),
        format!("{:.4} (at {})", s.max_abs, s.max_abs_at),
    ]);
    table.add_row(vec![format!("{label} RMS error"), format!("{:.4}", s.rms)]);
}
