//! Wire message parsing.

use chrono::Utc;
use thiserror::Error;
use tickbar_types::{FeedEvent, FeedMessage};

/// Errors that can occur while parsing feed messages.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Payload is not a recognised feed message.
    #[error("Invalid feed message {payload:?}: {source}")]
    Json {
        /// The underlying JSON error.
        source: serde_json::Error,
        /// The offending payload.
        payload: String,
    },

    /// Binary frame is not valid UTF-8.
    #[error("Invalid UTF-8 in binary frame: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Parses a single wire message.
///
/// # Errors
///
/// Returns an error if `payload` is not a JSON object with a known `type`.
pub fn parse_message(payload: &str) -> Result<FeedMessage, ParseError> {
    serde_json::from_str(payload).map_err(|source| ParseError::Json {
        source,
        payload: payload.to_string(),
    })
}

/// Parses one line of a recorded feed.
///
/// A line is either a recorded [`FeedEvent`] (carrying its original
/// `received_at`) or a bare wire message, which is stamped with the current
/// time.
///
/// # Errors
///
/// Returns an error if the line is neither.
pub fn parse_recorded(line: &str) -> Result<FeedEvent, ParseError> {
    if let Ok(event) = serde_json::from_str::<FeedEvent>(line) {
        return Ok(event);
    }
    parse_message(line).map(|message| FeedEvent::new(Utc::now(), message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_price() {
        let msg = parse_message(
            r#"{"type":"price","symbol":"Crypto.BTC/USD","price_type":"price","status":"trading","price":42000.5,"confidence":12.5}"#,
        )
        .unwrap();
        assert_eq!(msg.symbol(), Some("Crypto.BTC/USD"));
    }

    #[test]
    fn test_parse_welcome() {
        let msg = parse_message(r#"{"type": "message", "content": "welcome"}"#).unwrap();
        assert_eq!(msg, FeedMessage::info("welcome"));
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_message("not json").unwrap_err();
        assert!(matches!(err, ParseError::Json { ref payload, .. } if payload == "not json"));
        assert!(err.to_string().contains("not json"));
    }

    #[test]
    fn test_parse_missing_symbol() {
        assert!(parse_message(r#"{"type":"price","price":1.0}"#).is_err());
    }

    #[test]
    fn test_recorded_event_keeps_time() {
        let time = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let event = FeedEvent::new(time, FeedMessage::price("FX.EUR/USD", 1.0845));
        let line = serde_json::to_string(&event).unwrap();

        assert_eq!(parse_recorded(&line).unwrap(), event);
    }

    #[test]
    fn test_recorded_bare_message() {
        let before = Utc::now();
        let event = parse_recorded(r#"{"type":"price","symbol":"X","price":2.0}"#).unwrap();
        assert!(event.received_at >= before);
        assert_eq!(event.message, FeedMessage::price("X", 2.0));
    }
}
