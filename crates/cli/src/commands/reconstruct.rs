use super::{add_residual_rows, new_table, TraceArgs};
use anyhow::Context;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use waveform_trace::TraceFormat;
use waveform_vq::snapshot::load_codebook;
use waveform_vq::{Pipeline, PipelineConfig, Residual, ResidualSummary, VectorQuantizer};

/// JSON dump of one reconstruction, for diffing or plotting elsewhere.
#[derive(Serialize)]
pub struct ReconstructionReport<'a> {
    /// How the trace samples were decoded.
    pub format: TraceFormat,
    pub original: &'a [f64],
    pub reconstructed: &'a [f64],
    pub error: &'a [f64],
    pub summary: ResidualSummary,
    pub interior: ResidualSummary,
}

pub fn run(
    trace: &TraceArgs,
    codebook_path: &Path,
    slide_ratio: f64,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let (_, codebook) = load_codebook(codebook_path)
        .with_context(|| format!("Failed to load codebook {}", codebook_path.display()))?;
    let signal = trace.load()?;

    let config = PipelineConfig {
        window_len: codebook.dim(),
        slide_ratio,
        ..PipelineConfig::default()
    };
    let pipeline = Pipeline::from_parts(config, codebook)?;
    let reconstructed = pipeline.reconstruct(&signal)?;
    let residual = Residual::between(&signal, &reconstructed)?;

    let summary = residual.summary();
    let interior = residual.interior(pipeline.window().len() / 2);

    let mut table = new_table(vec!["Metric", "Value"]);
    add_residual_rows(&mut table, "Full", &summary);
    add_residual_rows(&mut table, "Interior", &interior);
    println!("\nReconstruction Report");
    println!("---------------------");
    println!("{table}\n");

    if let Some(path) = out {
        let report = ReconstructionReport {
            format: trace.format(),
            original: &signal,
            reconstructed: &reconstructed,
            error: residual.values(),
            summary,
            interior,
        };
        write_json(&path, &report)?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer(BufWriter::new(file), value)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
