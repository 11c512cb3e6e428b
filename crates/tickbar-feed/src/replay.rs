//! Replay of recorded feeds.

use futures::stream::{self, StreamExt};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::{FeedError, FeedStream, parse_recorded};

/// Creates a feed stream from a recorded feed.
///
/// The input holds one message per line, either a bare wire message or a
/// recorded event (see [`parse_recorded`]). Blank lines are skipped.
/// Malformed lines yield [`FeedError::Parse`] without ending the stream; a
/// read error ends it.
pub fn replay_events<R>(reader: R) -> FeedStream
where
    R: AsyncBufRead + Send + Unpin + 'static,
{
    stream::unfold(Some((reader.lines(), 0usize)), |state| async move {
        let (mut lines, mut line_no) = state?;
        loop {
            line_no += 1;
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => {
                    let event = parse_recorded(line.trim()).map_err(|e| {
                        debug!(line = line_no, error = %e, "skipping malformed feed line");
                        FeedError::from(e)
                    });
                    return Some((event, Some((lines, line_no))));
                }
                Ok(None) => return None,
                Err(e) => return Some((Err(FeedError::Io(e)), None)),
            }
        }
    })
    .boxed()
}

/// Opens a recorded feed file for replay.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub async fn replay_file(path: impl AsRef<Path>) -> Result<FeedStream, FeedError> {
    let file = File::open(path.as_ref()).await?;
    debug!(path = %path.as_ref().display(), "replaying recorded feed");
    Ok(replay_events(BufReader::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::io::Write;
    use tickbar_types::{FeedEvent, FeedMessage};

    const RECORDED: &str = r#"{"type":"message","content":"welcome"}

{"type":"price","symbol":"Crypto.BTC/USD","price":10.0}
garbage
{"type":"price","symbol":"Crypto.BTC/USD","price":12.0}
"#;

    #[tokio::test]
    async fn test_replay_skips_blank_lines() {
        let events: Vec<_> = replay_events(RECORDED.as_bytes()).collect().await;

        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0].as_ref().unwrap().message,
            FeedMessage::info("welcome")
        );
        assert!(matches!(events[2], Err(FeedError::Parse(_))));
        assert_eq!(
            events[3].as_ref().unwrap().message,
            FeedMessage::price("Crypto.BTC/USD", 12.0)
        );
    }

    #[tokio::test]
    async fn test_replay_file_keeps_recorded_times() {
        let time = Utc.with_ymd_and_hms(2024, 5, 2, 14, 0, 0).unwrap();
        let event = FeedEvent::new(time, FeedMessage::price("FX.EUR/USD", 1.07));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", serde_json::to_string(&event).unwrap()).unwrap();
        file.flush().unwrap();

        let events: Vec<_> = replay_file(file.path()).await.unwrap().collect().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].as_ref().unwrap(), &event);
    }

    #[tokio::test]
    async fn test_replay_missing_file() {
        let result = replay_file("/definitely/not/here.ndjson").await;
        assert!(matches!(result, Err(FeedError::Io(_))));
    }
}
