//! Live tick-to-OHLC bar aggregation for real-time charting.
//!
//! This is a facade crate that re-exports functionality from the tickbar
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```
//! use tickbar_lib::prelude::*;
//!
//! let window = WindowSize::new(3).unwrap();
//! let mut aggregator = BarAggregator::new(window);
//!
//! for price in [10.0, 12.0, 8.0] {
//!     let bar = aggregator.observe_price(price).unwrap();
//!     println!("{} {} {} {}", bar.open, bar.high, bar.low, bar.close);
//! }
//!
//! assert_eq!(aggregator.completed_windows(), 1);
//! assert!(aggregator.is_empty());
//! ```
//!
//! Driving a live relay into a sink:
//!
//! ```ignore
//! use futures::StreamExt;
//! use tickbar_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FeedClient::with_defaults();
//!     let mut session = ChartSession::new(BarAggregator::default(), BarHistory::new());
//!
//!     let mut feed = client.connect().await?;
//!     while let Some(event) = feed.next().await {
//!         session.handle(&event?)?;
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use tickbar_types::*;

// Re-export aggregation
pub use tickbar_aggregate::{
    BarAggregator, BarHistory, BarSink, ChartSession, SessionContext, SessionError, SinkError,
};

// Re-export feed transports
#[cfg(feature = "feed")]
pub use tickbar_feed::{
    FeedClient, FeedConfig, FeedError, FeedStream, ParseError, event_stream, parse_message,
    parse_recorded, replay_events, replay_file,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use tickbar_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat, WriterSink,
};

/// Prelude module for convenient imports.
///
/// ```
/// use tickbar_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickbar_types::{
        AggregateError, BarSnapshot, FeedEvent, FeedMessage, Tick, TimeAnchor, WindowSize,
    };

    pub use tickbar_aggregate::{
        BarAggregator, BarHistory, BarSink, ChartSession, SessionContext, SessionError, SinkError,
    };

    #[cfg(feature = "feed")]
    pub use tickbar_feed::{FeedClient, FeedConfig, FeedError, FeedStream, replay_file};

    #[cfg(feature = "format")]
    pub use tickbar_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat, WriterSink};
}
