use clap::{Parser, Subcommand};
use std::path::PathBuf;
use waveform_vq::reconstruct::DEFAULT_SLIDE_RATIO;
use waveform_vq_cli::commands::{inspect, reconstruct, run, train, ModelArgs, TraceArgs};
use waveform_vq_cli::telemetry;

#[derive(Parser)]
#[command(name = "wvq")]
#[command(about = "Windowed vector quantization of 16-bit sample traces", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Learn a codebook from a trace and save it
    Train {
        #[command(flatten)]
        trace: TraceArgs,

        #[command(flatten)]
        model: ModelArgs,

        /// Where to write the codebook
        #[arg(long, short)]
        out: PathBuf,
    },
    /// Approximate a trace with a saved codebook and report the error
    Reconstruct {
        #[command(flatten)]
        trace: TraceArgs,

        /// Codebook written by `train`
        #[arg(long, short)]
        codebook: PathBuf,

        /// Reconstruction stride as a fraction of the window length
        #[arg(long, default_value_t = DEFAULT_SLIDE_RATIO)]
        slide_ratio: f64,

        /// Optional JSON dump of original, reconstructed and error signals
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Train on the head of a trace and reconstruct the stretch after it
    Run {
        #[command(flatten)]
        trace: TraceArgs,

        #[command(flatten)]
        model: ModelArgs,

        /// Samples used for training
        #[arg(long, default_value_t = 10_000)]
        train_samples: usize,

        /// Samples reconstructed after the training stretch (0 = the training stretch itself)
        #[arg(long, default_value_t = 1_000)]
        test_samples: usize,

        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Show a codebook file's header and training summary
    Inspect {
        codebook: PathBuf,

        /// Dump the centroids as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    telemetry::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train { trace, model, out } => train::run(&trace, &model, &out),
        Commands::Reconstruct {
            trace,
            codebook,
            slide_ratio,
            json,
        } => reconstruct::run(&trace, &codebook, slide_ratio, json),
        Commands::Run {
            trace,
            model,
            train_samples,
            test_samples,
            json,
        } => run::run(&trace, &model, train_samples, test_samples, json),
        Commands::Inspect { codebook, json } => inspect::run(&codebook, json),
    }
}
