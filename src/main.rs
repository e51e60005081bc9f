use std::path::PathBuf;

use anyhow::Context;
use aup::aup_core::{Config, FeedFormat};
use clap::Parser;

#[derive(Parser)]
#[command(name = "aup", about = "Build the restricted-airspace notice for today and tomorrow")]
struct Cli {
    /// Output path (overrides OUTPUT_FILE).
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Feed format: json, xml or auto (overrides FEED_FORMAT).
    #[arg(long)]
    format: Option<FeedFormat>,

    /// Do not print the document after writing it.
    #[arg(long, short)]
    quiet: bool,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long)]
    debug: bool,

    /// Write diagnostics to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let default_level = if cli.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .with_env_filter(filter)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .init();
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let mut config = Config::from_env().context("invalid configuration")?;
    if let Some(path) = cli.output {
        config.output.path = path;
    }
    if let Some(format) = cli.format {
        config.source.format = format;
    }
    config.output.echo = !cli.quiet;

    let rendered = aup::run(&config, chrono::Utc::now()).await?;
    if config.output.echo {
        println!("{rendered}");
    }
    Ok(())
}
