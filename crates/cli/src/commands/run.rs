use super::reconstruct::{write_json, ReconstructionReport};
use super::{add_residual_rows, new_table, ModelArgs, TraceArgs};
use anyhow::{bail, Context};
use std::path::PathBuf;
use waveform_vq::{Pipeline, Residual};

/// Trains on the first `train_samples` samples and reconstructs the next
/// `test_samples`. With `test_samples == 0` the training stretch itself is
/// reconstructed.
pub fn run(
    trace: &TraceArgs,
    model: &ModelArgs,
    train_samples: usize,
    test_samples: usize,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let signal = trace.load()?;
    if train_samples == 0 || train_samples > signal.len() {
        bail!(
            "--train-samples must be in 1..={}, got {}",
            signal.len(),
            train_samples
        );
    }

    let training = &signal[..train_samples];
    let test = if test_samples == 0 {
        training
    } else {
        let end = (train_samples + test_samples).min(signal.len());
        &signal[train_samples..end]
    };

    tracing::info!(train = training.len(), test = test.len(), "running train/reconstruct cycle");
    let pipeline = Pipeline::fit(training, model.config()).context("Training failed")?;
    let reconstructed = pipeline.reconstruct(test)?;
    let residual = Residual::between(test, &reconstructed)?;

    let summary = residual.summary();
    let interior = residual.interior(model.window_len / 2);

    let mut table = new_table(vec!["Metric", "Value"]);
    table.add_row(vec!["Training samples".to_string(), training.len().to_string()]);
    table.add_row(vec![
        "Converged".to_string(),
        pipeline.codebook().summary().converged.to_string(),
    ]);
    add_residual_rows(&mut table, "Full", &summary);
    add_residual_rows(&mut table, "Interior", &interior);
    println!("\nRun Report");
    println!("----------");
    println!("{table}\n");
    println!("Maximum reconstruction error is {:.1}", summary.max_abs);

    if let Some(path) = out {
        write_json(
            &path,
            &ReconstructionReport {
                format: trace.format(),
                original: test,
                reconstructed: &reconstructed,
                error: residual.values(),
                summary,
                interior,
            },
        )?;
    }

    Ok(())
}
