use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use candle_sentiment::config::SentimentConfig;
use candle_sentiment::error::Result;
use candle_sentiment::sentiment::SentimentPipelineBuilder;
use candle_sentiment::{logging, server};
use clap::builder::FalseyValueParser;
use clap::{CommandFactory, Parser};

/// Sentiment analyzer: prints positive, negative or neutral.
#[derive(Parser)]
#[command(name = "sentiment")]
#[command(version)]
#[command(after_help = "Example: sentiment \"I love pizza!\"")]
struct Cli {
    /// Text to analyze
    text: Option<String>,

    /// Print the numeric score instead of the label
    #[arg(long)]
    score: bool,

    /// Path to the model artifact (default: models/sentiment.json)
    #[arg(long, value_name = "PATH")]
    model: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Serve GET /analyze over HTTP instead of analyzing TEXT
    #[arg(long, env = "ENABLE_HTTP", value_parser = FalseyValueParser::new())]
    serve: bool,

    /// Address to bind in --serve mode
    #[arg(long)]
    host: Option<String>,

    /// Port to bind in --serve mode
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose) {
        eprintln!("warning: {e}");
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => SentimentConfig::load_from_file(path)?,
        None => SentimentConfig::default(),
    };
    if let Some(model) = cli.model {
        config.model_path = model;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate()?;

    let pipeline = SentimentPipelineBuilder::from_config(&config).build()?;

    if cli.serve {
        server::start_server(config.server, Arc::new(pipeline)).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let text = match cli.text {
        Some(text) if !text.is_empty() => text,
        _ => {
            eprintln!("{}", Cli::command().render_help());
            return Ok(ExitCode::from(2));
        }
    };

    if cli.score {
        println!("{:.3}", pipeline.analyze_score(&text)?);
    } else {
        println!("{}", pipeline.analyze(&text)?);
    }
    Ok(ExitCode::SUCCESS)
}
