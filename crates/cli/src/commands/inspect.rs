use super::new_table;
use anyhow::Context;
use serde::Serialize;
use std::path::Path;
use waveform_vq::snapshot::load_codebook;
use waveform_vq::{TrainingSummary, VectorQuantizer};

#[derive(Serialize)]
struct CodebookExport<'a> {
    dim: usize,
    summary: &'a TrainingSummary,
    centroids: &'a [Vec<f64>],
}

pub fn run(codebook_path: &Path, json: bool) -> anyhow::Result<()> {
    let (header, codebook) = load_codebook(codebook_path)
        .with_context(|| format!("Failed to load codebook {}", codebook_path.display()))?;

    if json {
        let export = CodebookExport {
            dim: codebook.dim(),
            summary: codebook.summary(),
            centroids: codebook.centroids(),
        };
        println!("{}", serde_json::to_string_pretty(&export)?);
        return Ok(());
    }

    let saved_at = chrono::DateTime::from_timestamp(header.timestamp as i64, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| header.timestamp.to_string());

    let mut table = new_table(vec!["Field", "Value"]);
    table.add_row(vec![
        "Magic".to_string(),
        String::from_utf8_lossy(&header.magic).into_owned(),
    ]);
    table.add_row(vec!["Version".to_string(), header.version.to_string()]);
    table.add_row(vec!["Saved".to_string(), saved_at]);
    table.add_row(vec!["Body bytes".to_string(), header.body_len.to_string()]);
    table.add_row(vec!["Checksum".to_string(), format!("{:016x}", header.checksum)]);
    table.add_row(vec!["Window length".to_string(), codebook.dim().to_string()]);
    table.add_row(vec!["Clusters".to_string(), codebook.len().to_string()]);
    table.add_row(vec![
        "Iterations".to_string(),
        codebook.summary().iterations.to_string(),
    ]);
    table.add_row(vec![
        "Converged".to_string(),
        codebook.summary().converged.to_string(),
    ]);
    table.add_row(vec![
        "Fingerprint".to_string(),
        codebook.fingerprint().to_hex().to_string(),
    ]);

    println!("\nCodebook {}", codebook_path.display());
    println!("{table}\n");

    Ok(())
}
