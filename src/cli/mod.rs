pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pulsefeed")]
#[command(about = "Health headlines in your terminal", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/pulsefeed/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the headlines once and print them
    Headlines {
        /// Show at most this many articles
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print articles as JSON
        #[arg(long)]
        json: bool,
    },
    /// Open an article's link in the browser
    Open {
        /// Position of the article in the headline list (starting at 1)
        index: usize,
    },
    /// Keep the headlines on screen, refreshing periodically
    Watch {
        /// Refresh interval (e.g., "30s", "15m", "1h")
        #[arg(short, long, default_value = "30m")]
        interval: String,

        /// Show at most this many articles
        #[arg(short, long)]
        limit: Option<usize>,
    },
}
