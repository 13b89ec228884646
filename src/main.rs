use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vocalevel::{AnalyzeError, Config, Engine};

#[derive(Parser, Debug)]
#[command(name = "vocalevel", about = "Classifies Japanese/Korean text by JLPT/TOPIK vocabulary level")]
struct Args {
    /// Text to analyze. Read from stdin when omitted.
    text: Option<String>,

    /// Language: auto, ja or ko.
    #[arg(short = 'l', long, default_value = "auto")]
    lang: String,

    /// Configuration file (defaults to ./vocalevel.toml, then the user config directory).
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(short = 'p', long)]
    pretty: bool,
}

fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path).with_context(|| format!("failed to load {}", path.display()))?,
        None => Config::load_from_default(),
    };
    config.apply_env(|name| std::env::var(name).ok());

    tracing::info!("Starting VocaLevel...");
    let engine = Engine::new(&config).context("failed to initialize analyzers")?;

    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let analysis = match engine.analyze(&text, &args.lang) {
        Ok(analysis) => analysis,
        Err(e @ (AnalyzeError::EmptyInput | AnalyzeError::UnsupportedLanguage)) => {
            eprintln!("{e}");
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e.into()),
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&analysis)?
    } else {
        serde_json::to_string(&analysis)?
    };
    println!("{json}");

    Ok(ExitCode::SUCCESS)
}
