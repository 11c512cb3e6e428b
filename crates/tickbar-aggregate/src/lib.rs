//! Count-based tick-to-OHLC aggregation for tickbar.
//!
//! This crate provides the aggregation core and the seams around it:
//!
//! - [`BarAggregator`] - Tick-count windowed OHLC state machine
//! - [`SessionContext`] - Per-session symbol binding
//! - [`BarSink`] - Receiver of live bar updates
//! - [`BarHistory`] - Sink that keeps one bar per window
//! - [`ChartSession`] - Wires feed events through the aggregator into a sink

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbar/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod history;
mod session;
mod sink;

pub use aggregator::BarAggregator;
pub use history::BarHistory;
pub use session::{ChartSession, SessionContext, SessionError};
pub use sink::{BarSink, SinkError};
