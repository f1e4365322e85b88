use anyhow::Result;
use clap::Parser;
use emotion_reflect::cli::{Cli, CliHandler};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so piped output stays clean
    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(log_level)
        .init();

    if cli.debug {
        tracing::debug!("Debug mode enabled - verbose logging active");
    }

    let config = cli.resolve_config().await?;
    tracing::debug!(
        "Using analysis service at {} (timeout {} ms)",
        config.base_url,
        config.timeout_ms
    );

    let handler = CliHandler::new(config)?;
    if let Err(e) = handler.handle_command(cli.command).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    Ok(())
}
