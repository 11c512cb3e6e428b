//! Event loop wiring a feed stream into a chart session.

use anyhow::{Context, Result};
use futures::StreamExt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tickbar_lib::prelude::*;
use tracing::{info, warn};

/// Counters reported once a feed ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub(crate) events: u64,
    pub(crate) skipped: u64,
    pub(crate) rejected: u64,
    pub(crate) interrupted: bool,
}

/// Appends every received event to an NDJSON file.
#[derive(Debug)]
pub(crate) struct FeedRecorder {
    writer: BufWriter<File>,
}

impl FeedRecorder {
    pub(crate) fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create record file: {}", path.display()))?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    fn record(&mut self, event: &FeedEvent) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Feeds every event into `session` until the feed ends or Ctrl-C.
///
/// Malformed messages are logged and skipped; transport errors end the run.
/// The recorder is flushed whether or not the run fails.
pub(crate) async fn drive<S: BarSink>(
    feed: FeedStream,
    session: &mut ChartSession<S>,
    mut recorder: Option<FeedRecorder>,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let outcome = pump(feed, session, recorder.as_mut(), &mut summary).await;
    let flushed = recorder.map_or(Ok(()), FeedRecorder::finish);

    outcome?;
    flushed?;
    summary.rejected = session.rejected_ticks();
    Ok(summary)
}

async fn pump<S: BarSink>(
    mut feed: FeedStream,
    session: &mut ChartSession<S>,
    mut recorder: Option<&mut FeedRecorder>,
    summary: &mut RunSummary,
) -> Result<()> {
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("interrupted, stopping feed");
                summary.interrupted = true;
                return Ok(());
            }
            next = feed.next() => match next {
                None => return Ok(()),
                Some(Ok(event)) => {
                    summary.events += 1;
                    if let Some(recorder) = recorder.as_deref_mut() {
                        recorder.record(&event)?;
                    }
                    session.handle(&event)?;
                }
                Some(Err(e)) if e.is_recoverable() => {
                    summary.skipped += 1;
                    warn!(error = %e, "skipping malformed feed message");
                }
                Some(Err(e)) => return Err(e).context("Price feed failed"),
            }
        }
    }
}

/// Prints the end-of-run report to stderr.
pub(crate) fn report(summary: &RunSummary, aggregator: &BarAggregator, context: &SessionContext) {
    let symbol = context.bound_symbol().unwrap_or("-");
    eprintln!(
        "{} events for {symbol}: {} bars closed, {} ticks in open bar, {} ticks rejected, {} messages skipped{}",
        summary.events,
        aggregator.completed_windows(),
        aggregator.ticks_in_window(),
        summary.rejected,
        summary.skipped,
        if summary.interrupted { " (interrupted)" } else { "" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDED: &str = r#"{"type":"message","content":"welcome"}
{"type":"price","symbol":"Crypto.BTC/USD","price":10.0}
{"type":"price","symbol":"Crypto.BTC/USD","price":12.0}
not json
{"type":"price","symbol":"Crypto.BTC/USD","price":8.0}
{"type":"price","symbol":"Crypto.BTC/USD","price":null}
{"type":"price","symbol":"Crypto.ETH/USD","price":20.0}
"#;

    #[tokio::test]
    async fn test_drive_replayed_feed() {
        let feed = tickbar_lib::replay_events(RECORDED.as_bytes());
        let aggregator = BarAggregator::new(WindowSize::new(3).unwrap());
        let mut session = ChartSession::new(aggregator, BarHistory::new());

        let summary = drive(feed, &mut session, None).await.unwrap();

        assert_eq!(summary.events, 6);
        assert_eq!(summary.skipped, 1);
        assert!(!summary.interrupted);
        assert_eq!(summary.rejected, 1);
        assert_eq!(session.aggregator().completed_windows(), 1);
        assert_eq!(session.context().bound_symbol(), Some("Crypto.BTC/USD"));

        let closes: Vec<_> = session.sink().bars().iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![8.0, 20.0]);
    }

    #[tokio::test]
    async fn test_recorded_feed_replays_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.ndjson");

        let feed = tickbar_lib::replay_events(RECORDED.as_bytes());
        let mut first = ChartSession::new(BarAggregator::default(), BarHistory::new());
        let recorder = FeedRecorder::create(&path).unwrap();
        drive(feed, &mut first, Some(recorder)).await.unwrap();

        let replay = tickbar_lib::replay_file(&path).await.unwrap();
        let mut second = ChartSession::new(BarAggregator::default(), BarHistory::new());
        let summary = drive(replay, &mut second, None).await.unwrap();

        assert_eq!(summary.skipped, 0);
        assert_eq!(first.sink().bars(), second.sink().bars());
    }

    /// Sink that fails once it has rendered `limit` bars.
    struct FailsAfter {
        limit: usize,
        rendered: usize,
    }

    impl BarSink for FailsAfter {
        fn render(&mut self, _bar: &BarSnapshot) -> Result<(), SinkError> {
            if self.rendered == self.limit {
                return Err(SinkError::Render("surface gone".into()));
            }
            self.rendered += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_recording_flushed_when_sink_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.ndjson");

        let feed = tickbar_lib::replay_events(RECORDED.as_bytes());
        let sink = FailsAfter { limit: 1, rendered: 0 };
        let mut session = ChartSession::new(BarAggregator::default(), sink);
        let recorder = FeedRecorder::create(&path).unwrap();

        let err = drive(feed, &mut session, Some(recorder)).await.unwrap_err();
        assert!(err.to_string().contains("surface gone"));

        // welcome, 10.0 rendered, 12.0 recorded before its render failed
        let recorded = std::fs::read_to_string(&path).unwrap();
        let events: Vec<FeedEvent> = recorded
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(events.len(), 3);
        assert_eq!(events[2].message, FeedMessage::price("Crypto.BTC/USD", 12.0));
    }
}
