//! tickbar CLI - live OHLC bars from a streaming price feed.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tickbar_lib::{TimeAnchor, WindowSize};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

mod commands;
mod display;
mod pipeline;

use display::Format;

#[derive(Parser)]
#[command(name = "tickbar")]
#[command(about = "Chart a live price feed as fixed-size OHLC bars", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress status output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to a live price relay and render bars as ticks arrive
    Watch {
        /// WebSocket URL of the price relay
        #[arg(short, long, default_value = "ws://localhost:6789/")]
        url: String,

        /// Maximum connection retries
        #[arg(long, default_value = "5")]
        retries: u32,

        /// Connection timeout in seconds
        #[arg(long, default_value = "10")]
        connect_timeout: u64,

        /// Record every received event to this NDJSON file for later replay
        #[arg(long)]
        record: Option<PathBuf>,

        #[command(flatten)]
        chart: ChartArgs,
    },

    /// Replay a recorded feed (NDJSON, one message per line)
    Replay {
        /// Recorded feed file
        file: PathBuf,

        #[command(flatten)]
        chart: ChartArgs,
    },
}

/// Options shared by every command that renders bars.
#[derive(Args, Debug, Clone)]
struct ChartArgs {
    /// Ticks per bar
    #[arg(short, long, default_value_t = WindowSize::DEFAULT)]
    window: WindowSize,

    /// Bar timestamp: window-open or last-update
    #[arg(short, long, default_value_t = TimeAnchor::WindowOpen)]
    anchor: TimeAnchor,

    /// How to render bar updates
    #[arg(short, long, value_enum, default_value = "live")]
    format: Format,

    /// Write bar updates to this file instead of stdout (csv/ndjson only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the final bar history to this file when the feed ends
    /// (format chosen by extension: csv, json, ndjson)
    #[arg(long)]
    history: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Watch {
            url,
            retries,
            connect_timeout,
            record,
            chart,
        } => {
            commands::watch::watch(
                &url,
                retries,
                connect_timeout,
                record.as_deref(),
                &chart,
                cli.quiet,
            )
            .await
        }
        Commands::Replay { file, chart } => {
            commands::replay::replay(&file, &chart, cli.quiet).await
        }
    }
}

/// Installs a stderr `tracing` subscriber; `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::INFO,
        (false, 2) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}
