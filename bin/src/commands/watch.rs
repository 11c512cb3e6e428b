//! Watch command implementation.
//!
//! Connects to a live price relay and charts ticks as they arrive.

use super::chart_feed;
use crate::ChartArgs;
use crate::pipeline::FeedRecorder;
use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use tickbar_lib::prelude::*;
use tracing::info;

/// Chart a live feed.
pub(crate) async fn watch(
    url: &str,
    retries: u32,
    connect_timeout: u64,
    record: Option<&Path>,
    chart: &ChartArgs,
    quiet: bool,
) -> Result<()> {
    let config = FeedConfig {
        url: url.to_string(),
        connect_timeout: Duration::from_secs(connect_timeout),
        max_retries: retries,
        ..Default::default()
    };
    let client = FeedClient::new(config);

    let recorder = record.map(FeedRecorder::create).transpose()?;

    info!(%url, window = %chart.window, anchor = %chart.anchor, "connecting to price relay");
    let feed = client
        .connect()
        .await
        .with_context(|| format!("Failed to connect to {url}"))?;

    chart_feed(feed, chart, recorder, quiet).await
}
