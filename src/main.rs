use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pulsefeed::app::AppContext;
use pulsefeed::cli::{commands, Cli, Commands};
use pulsefeed::watch::{WatchConfig, Watcher};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::new(cli.config.as_deref())?;

    let status = match cli.command {
        Commands::Headlines { limit, json } => {
            commands::show_headlines(&ctx, limit, json).await?
        }
        Commands::Open { index } => commands::open_article(&ctx, index).await?,
        Commands::Watch { interval, limit } => {
            let interval_secs = WatchConfig::parse_interval(&interval).map_err(anyhow::Error::msg)?;
            let watcher = Watcher::new(
                ctx.controller.clone(),
                WatchConfig {
                    interval_secs,
                    limit,
                },
            );
            watcher.run().await?;
            commands::Status::Success
        }
    };

    Ok(status.into())
}
