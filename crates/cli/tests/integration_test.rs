use clap::Parser;
use std::path::Path;
use tempfile::tempdir;
use waveform_trace::{write_trace, TraceFormat};
use waveform_vq::reconstruct::DEFAULT_SLIDE_RATIO;
use waveform_vq::snapshot::load_codebook;
use waveform_vq::VectorQuantizer;
use waveform_vq_cli::commands::{inspect, reconstruct, run, train, ModelArgs, TraceArgs};

fn write_sine_trace(path: &Path, len: usize) {
    let samples: Vec<f64> = (0..len)
        .map(|i| (2000.0 * (i as f64 * 0.05).sin()).round())
        .collect();
    write_trace(path, &samples, TraceFormat::default()).unwrap();
}

fn trace_args(path: &Path) -> TraceArgs {
    TraceArgs {
        trace: path.to_path_buf(),
        scale: 1.0,
        big_endian: false,
        limit: None,
    }
}

fn small_model() -> ModelArgs {
    ModelArgs {
        window_len: 16,
        train_slide: 2,
        clusters: 6,
        max_iterations: 50,
        seed: 7,
        ..ModelArgs::default()
    }
}

#[test]
fn test_train_inspect_reconstruct_workflow() {
    let dir = tempdir().unwrap();
    let trace = dir.path().join("signal.raw");
    let codebook = dir.path().join("signal.wvq");
    let report = dir.path().join("report.json");
    write_sine_trace(&trace, 2000);

    train::run(&trace_args(&trace), &small_model(), &codebook).unwrap();

    let (header, loaded) = load_codebook(&codebook).unwrap();
    assert_eq!(header.version, 1);
    assert_eq!(loaded.dim(), 16);
    assert_eq!(loaded.len(), 6);

    inspect::run(&codebook, false).unwrap();
    inspect::run(&codebook, true).unwrap();

    reconstruct::run(&trace_args(&trace), &codebook, 0.5, Some(report.clone())).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["original"].as_array().unwrap().len(), 2000);
    assert_eq!(json["reconstructed"].as_array().unwrap().len(), 2000);
    assert_eq!(json["error"].as_array().unwrap().len(), 2000);
    assert!(json["interior"]["rms"].as_f64().unwrap() < 2000.0);
    assert_eq!(json["format"]["endianness"], "Little");
    assert_eq!(json["format"]["scale"].as_f64(), Some(1.0));
}

#[derive(Parser)]
struct ModelOnly {
    #[command(flatten)]
    model: ModelArgs,
}

#[test]
fn test_model_flags_default_to_library_config() {
    let parsed = ModelOnly::parse_from(["wvq"]).model;
    assert_eq!(parsed.slide_ratio, DEFAULT_SLIDE_RATIO);
    assert_eq!(parsed.config(), ModelArgs::default().config());

    let parsed = ModelOnly::parse_from(["wvq", "--slide-ratio", "0.25", "-k", "8"]).model;
    assert_eq!(parsed.slide_ratio, 0.25);
    assert_eq!(parsed.clusters, 8);
}

#[test]
fn test_run_train_then_test_split() {
    let dir = tempdir().unwrap();
    let trace = dir.path().join("signal.raw");
    write_sine_trace(&trace, 3000);

    run::run(&trace_args(&trace), &small_model(), 2000, 500, None).unwrap();
    // Reconstruct the training stretch itself
    run::run(&trace_args(&trace), &small_model(), 2000, 0, None).unwrap();
}

#[test]
fn test_run_rejects_oversized_training_split() {
    let dir = tempdir().unwrap();
    let trace = dir.path().join("signal.raw");
    write_sine_trace(&trace, 500);

    assert!(run::run(&trace_args(&trace), &small_model(), 501, 100, None).is_err());
    assert!(run::run(&trace_args(&trace), &small_model(), 0, 100, None).is_err());
}

#[test]
fn test_limit_truncates_trace() {
    let dir = tempdir().unwrap();
    let trace = dir.path().join("signal.raw");
    write_sine_trace(&trace, 1000);

    let mut args = trace_args(&trace);
    args.limit = Some(300);
    assert_eq!(args.load().unwrap().len(), 300);
}

#[test]
fn test_reconstruct_with_corrupt_codebook_fails() {
    let dir = tempdir().unwrap();
    let trace = dir.path().join("signal.raw");
    let codebook = dir.path().join("signal.wvq");
    write_sine_trace(&trace, 1000);
    train::run(&trace_args(&trace), &small_model(), &codebook).unwrap();

    let mut bytes = std::fs::read(&codebook).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xff;
    std::fs::write(&codebook, bytes).unwrap();

    assert!(reconstruct::run(&trace_args(&trace), &codebook, 0.5, None).is_err());
    assert!(inspect::run(&codebook, false).is_err());
}
