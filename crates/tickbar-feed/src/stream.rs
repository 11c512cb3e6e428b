//! Decoding of WebSocket frames into feed events.

use chrono::Utc;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use tickbar_types::FeedEvent;
use tracing::debug;

use crate::{FeedError, ParseError, parse_message};

/// Communicative type alias for a tungstenite WebSocket `Message`.
pub type WsMessage = tokio_tungstenite::tungstenite::Message;

/// Communicative type alias for a tungstenite WebSocket `Error`.
pub type WsError = tokio_tungstenite::tungstenite::Error;

/// Stream of feed events, in arrival order.
pub type FeedStream = BoxStream<'static, Result<FeedEvent, FeedError>>;

/// Outcome of decoding one WebSocket message.
#[derive(Debug)]
enum Decoded {
    Event(Result<FeedEvent, ParseError>),
    Skip,
    Closed,
}

/// Decodes a stream of WebSocket messages into feed events.
///
/// Text and binary frames are parsed as wire messages and stamped with their
/// arrival time. Control frames are skipped. The stream ends on a close
/// frame, or after yielding a transport error.
pub fn event_stream<S>(messages: S) -> FeedStream
where
    S: Stream<Item = Result<WsMessage, WsError>> + Send + Unpin + 'static,
{
    stream::unfold(Some(messages), |state| async move {
        let mut messages = state?;
        loop {
            match messages.next().await? {
                Ok(message) => match decode(message) {
                    Decoded::Event(event) => {
                        return Some((event.map_err(FeedError::from), Some(messages)));
                    }
                    Decoded::Skip => {}
                    Decoded::Closed => return None,
                },
                Err(err) => return Some((Err(FeedError::from(Box::new(err))), None)),
            }
        }
    })
    .boxed()
}

fn decode(message: WsMessage) -> Decoded {
    let received_at = Utc::now();
    match message {
        WsMessage::Text(text) => Decoded::Event(
            parse_message(text.as_str()).map(|message| FeedEvent::new(received_at, message)),
        ),
        WsMessage::Binary(data) => Decoded::Event(
            std::str::from_utf8(&data)
                .map_err(ParseError::from)
                .and_then(parse_message)
                .map(|message| FeedEvent::new(received_at, message)),
        ),
        WsMessage::Ping(payload) => {
            debug!(?payload, "received Ping WebSocket message");
            Decoded::Skip
        }
        WsMessage::Pong(payload) => {
            debug!(?payload, "received Pong WebSocket message");
            Decoded::Skip
        }
        WsMessage::Frame(frame) => {
            debug!(?frame, "received unexpected Frame WebSocket message");
            Decoded::Skip
        }
        WsMessage::Close(close_frame) => {
            debug!(?close_frame, "received CloseFrame WebSocket message");
            Decoded::Closed
        }
    }
}
