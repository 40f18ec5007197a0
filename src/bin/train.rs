use std::path::PathBuf;
use std::process::ExitCode;

use candle_sentiment::error::Result;
use candle_sentiment::logging;
use candle_sentiment::training::{load_tsv, train, TrainingOptions};
use clap::Parser;

/// Train the sentiment model from a `text<TAB>label` file.
#[derive(Parser)]
#[command(name = "sentiment-train")]
#[command(version)]
struct Cli {
    /// Training data (TSV: text<TAB>label)
    #[arg(long, value_name = "TSV")]
    train: PathBuf,

    /// Where to write the model artifact
    #[arg(long, value_name = "PATH", default_value = "models/sentiment.json")]
    out: PathBuf,

    /// Optimizer passes over the training set
    #[arg(long, default_value_t = 300)]
    epochs: usize,

    /// AdamW learning rate
    #[arg(long, default_value_t = 0.1)]
    learning_rate: f64,

    /// Vocabulary size cap
    #[arg(long, default_value_t = 5000)]
    max_features: usize,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose) {
        eprintln!("warning: {e}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    println!("Loading data from {}...", cli.train.display());
    let dataset = load_tsv(&cli.train)?;
    println!("Loaded {} samples", dataset.len());

    let mut options = TrainingOptions::default();
    options.logistic.epochs = cli.epochs;
    options.logistic.learning_rate = cli.learning_rate;
    options.vectorizer.max_features = cli.max_features;

    println!("Training model...");
    let (artifact, report) = train(&dataset, &options)?;
    println!("Train: {}, Val: {}", report.train_size, report.validation_size);
    println!("{report}");

    artifact.save(&cli.out)?;
    println!("Model saved to {}", cli.out.display());
    Ok(())
}
