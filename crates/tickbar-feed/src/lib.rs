//! Price feed transports for tickbar.
//!
//! This crate turns inbound transport frames into [`FeedEvent`]s:
//!
//! - [`FeedClient`] - WebSocket client with connect retries
//! - [`parse_message`] - Wire message parsing
//! - [`event_stream`] - Decodes a WebSocket message stream into feed events
//! - [`replay_events`] / [`replay_file`] - Recorded NDJSON feeds
//!
//! [`FeedEvent`]: tickbar_types::FeedEvent

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod parse;
mod replay;
mod stream;

pub use client::{FeedClient, FeedConfig, FeedError};
pub use parse::{ParseError, parse_message, parse_recorded};
pub use replay::{replay_events, replay_file};
pub use stream::{FeedStream, WsError, WsMessage, event_stream};
