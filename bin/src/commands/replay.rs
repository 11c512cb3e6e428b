//! Replay command implementation.

use super::chart_feed;
use crate::ChartArgs;
use anyhow::{Context, Result};
use std::path::Path;
use tickbar_lib::prelude::*;

/// Chart a recorded feed file.
pub(crate) async fn replay(file: &Path, chart: &ChartArgs, quiet: bool) -> Result<()> {
    let feed = replay_file(file)
        .await
        .with_context(|| format!("Failed to open recorded feed: {}", file.display()))?;

    chart_feed(feed, chart, None, quiet).await
}
