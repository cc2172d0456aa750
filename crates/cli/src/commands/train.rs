use super::{new_table, ModelArgs, TraceArgs};
use anyhow::Context;
use std::path::Path;
use waveform_vq::snapshot::save_codebook;
use waveform_vq::{Pipeline, VectorQuantizer};

pub fn run(trace: &TraceArgs, model: &ModelArgs, out: &Path) -> anyhow::Result<()> {
    let signal = trace.load()?;
    let pipeline = Pipeline::fit(&signal, model.config()).context("Training failed")?;
    let codebook = pipeline.codebook();

    let header = save_codebook(out, codebook)
        .with_context(|| format!("Failed to write codebook {}", out.display()))?;

    let summary = codebook.summary();
    let mut table = new_table(vec!["Metric", "Value"]);
    table.add_row(vec!["Training samples".to_string(), signal.len().to_string()]);
    table.add_row(vec!["Window length".to_string(), codebook.dim().to_string()]);
    table.add_row(vec!["Clusters".to_string(), codebook.len().to_string()]);
    table.add_row(vec!["Iterations".to_string(), summary.iterations.to_string()]);
    table.add_row(vec![
        "Converged".to_string(),
        if summary.converged { "yes" } else { "NO (iteration cap)" }.to_string(),
    ]);
    table.add_row(vec!["Inertia".to_string(), format!("{:.6}", summary.inertia)]);
    table.add_row(vec!["Fingerprint".to_string(), codebook.fingerprint().to_hex().to_string()]);
    table.add_row(vec!["Checksum".to_string(), format!("{:016x}", header.checksum)]);
    table.add_row(vec!["Output".to_string(), out.display().to_string()]);

    println!("\nCodebook Trained");
    println!("----------------");
    println!("{table}\n");

    Ok(())
}
