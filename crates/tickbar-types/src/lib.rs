//! Core types for the tickbar live OHLC aggregator.
//!
//! This crate provides the fundamental data structures used throughout tickbar:
//!
//! - [`Tick`] - A single price observation with its arrival time
//! - [`BarSnapshot`] - Immutable copy of an OHLC bar as it stands after a tick
//! - [`WindowSize`] - Number of ticks aggregated into one bar
//! - [`TimeAnchor`] - Which timestamp a bar carries
//! - [`FeedMessage`] / [`FeedEvent`] - Messages delivered by a price feed

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod error;
mod feed;
mod tick;
mod window;

pub use bar::BarSnapshot;
pub use error::{AggregateError, Result, WindowSizeError};
pub use feed::{FeedEvent, FeedMessage};
pub use tick::Tick;
pub use window::{TimeAnchor, TimeAnchorParseError, WindowSize};
