//! CLI command implementations.

pub(crate) mod replay;
pub(crate) mod watch;

use crate::ChartArgs;
use crate::display::{open_sink, write_history};
use crate::pipeline::{FeedRecorder, drive, report};
use anyhow::Result;
use tickbar_lib::prelude::*;
use tracing::info;

/// Charts `feed` with the bar settings in `chart` until it ends.
pub(crate) async fn chart_feed(
    feed: FeedStream,
    chart: &ChartArgs,
    recorder: Option<FeedRecorder>,
    quiet: bool,
) -> Result<()> {
    let sink = open_sink(chart.format, chart.output.as_deref(), chart.window, quiet)?;
    let history = chart.history.as_ref().map(|_| BarHistory::new());
    let aggregator = BarAggregator::new(chart.window).with_time_anchor(chart.anchor);
    let mut session = ChartSession::new(aggregator, (sink, history));

    let summary = drive(feed, &mut session, recorder).await;

    // Flushes file output and clears the live line before reporting.
    let (aggregator, context, (sink, history)) = session.into_parts();
    drop(sink);
    let summary = summary?;

    if let (Some(path), Some(history)) = (chart.history.as_deref(), history) {
        write_history(&history, path)?;
        info!(path = %path.display(), bars = history.len(), "wrote bar history");
    }

    if !quiet {
        report(&summary, &aggregator, &context);
    }
    Ok(())
}
