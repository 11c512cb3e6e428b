//! Display utilities and output sinks for the tickbar CLI.

use anyhow::{Context, Result};
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;
use tickbar_lib::prelude::*;
use tracing::warn;

/// How bar updates are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Single updating status line in the terminal
    Live,
    /// One CSV row per update
    Csv,
    /// One JSON object per update
    Ndjson,
}

/// Terminal surface: the in-progress bar on a spinner line, closed bars
/// printed above it.
pub(crate) struct LiveSink {
    progress: ProgressBar,
    window: WindowSize,
}

impl LiveSink {
    pub(crate) fn new(window: WindowSize, quiet: bool) -> Self {
        let progress = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.enable_steady_tick(Duration::from_millis(120));
            pb.set_message("waiting for ticks...");
            pb
        };
        Self { progress, window }
    }
}

impl BarSink for LiveSink {
    fn show_symbol(&mut self, symbol: &str) -> Result<(), SinkError> {
        self.progress.println(format!("Trading Symbol: {symbol}"));
        Ok(())
    }

    fn render(&mut self, bar: &BarSnapshot) -> Result<(), SinkError> {
        let line = bar_line(bar, self.window);
        if bar.closes_window {
            self.progress.println(&line);
        }
        self.progress.set_message(line);
        Ok(())
    }
}

impl Drop for LiveSink {
    fn drop(&mut self) {
        self.progress.finish_and_clear();
    }
}

/// Formats a bar as one terminal line.
pub(crate) fn bar_line(bar: &BarSnapshot, window: WindowSize) -> String {
    let direction = if bar.is_bullish() {
        "+"
    } else if bar.is_bearish() {
        "-"
    } else {
        "="
    };
    format!(
        "{} {direction} O {} H {} L {} C {} [{}/{}]",
        bar.time.format("%H:%M:%S%.3f"),
        bar.open,
        bar.high,
        bar.low,
        bar.close,
        bar.tick_count,
        window
    )
}

/// Opens the sink bar updates are rendered to.
pub(crate) fn open_sink(
    format: Format,
    output: Option<&Path>,
    window: WindowSize,
    quiet: bool,
) -> Result<Box<dyn BarSink>> {
    let writer: Box<dyn Write> = match (format, output) {
        (Format::Live, Some(path)) => {
            warn!(path = %path.display(), "live rendering ignores --output");
            return Ok(Box::new(LiveSink::new(window, quiet)));
        }
        (Format::Live, None) => return Ok(Box::new(LiveSink::new(window, quiet))),
        (_, Some(path)) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        (_, None) => Box::new(std::io::stdout().lock()),
    };

    Ok(match format {
        Format::Ndjson => Box::new(WriterSink::new(JsonFormatter::ndjson(), writer)),
        Format::Csv | Format::Live => Box::new(WriterSink::new(CsvFormatter::new(), writer)),
    })
}

/// Write a finished bar history; the format follows the file extension.
pub(crate) fn write_history(history: &BarHistory, path: &Path) -> Result<()> {
    let format = OutputFormat::from_path(path).unwrap_or_default();
    let file = File::create(path)
        .with_context(|| format!("Failed to create history file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    format.write_bars(history.bars(), &mut writer)?;
    writer.flush()?;
    Ok(())
}
