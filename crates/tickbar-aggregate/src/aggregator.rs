//! Streaming tick-count OHLC aggregation.

use chrono::{DateTime, Utc};
use tickbar_types::{
    AggregateError, BarSnapshot, FeedEvent, FeedMessage, Result, Tick, TimeAnchor, WindowSize,
};
use tracing::{debug, trace, warn};

/// Streaming tick aggregator.
///
/// Folds ticks into OHLC bars of exactly [`WindowSize`] ticks each. The
/// in-progress bar is updated in place on every tick and a snapshot of it is
/// returned; once the window's last tick has been folded in, the bar is
/// discarded and the next tick opens a fresh one. Closed bars are not kept.
#[derive(Debug)]
pub struct BarAggregator {
    window: WindowSize,
    anchor: TimeAnchor,
    current_bar: Option<BarBuilder>,
    completed_windows: u64,
}

impl BarAggregator {
    /// Creates a new aggregator with the given window size.
    #[must_use]
    pub const fn new(window: WindowSize) -> Self {
        Self {
            window,
            anchor: TimeAnchor::WindowOpen,
            current_bar: None,
            completed_windows: 0,
        }
    }

    /// Sets which timestamp bars carry.
    #[must_use]
    pub const fn with_time_anchor(mut self, anchor: TimeAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Returns the number of ticks per bar.
    #[must_use]
    pub const fn window(&self) -> WindowSize {
        self.window
    }

    /// Returns the timestamp policy.
    #[must_use]
    pub const fn time_anchor(&self) -> TimeAnchor {
        self.anchor
    }

    /// Returns the number of ticks folded into the current window.
    #[must_use]
    pub fn ticks_in_window(&self) -> u32 {
        self.current_bar.as_ref().map_or(0, |bar| bar.tick_count)
    }

    /// Returns the number of windows closed so far.
    #[must_use]
    pub const fn completed_windows(&self) -> u64 {
        self.completed_windows
    }

    /// Returns true if no tick has been folded into the current window.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.current_bar.is_none()
    }

    /// Returns the in-progress bar, or `None` while the window is empty.
    #[must_use]
    pub fn snapshot(&self) -> Option<BarSnapshot> {
        self.current_bar.as_ref().map(|bar| bar.snapshot(false))
    }

    /// Folds a price observed at `time` into the current bar.
    ///
    /// Returns the bar as it stands after this tick. If the tick completes
    /// the window the snapshot has `closes_window` set and the aggregator
    /// starts a new, empty bar.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::InvalidPrice`] if `price` is NaN or
    /// infinite. The current bar is left untouched.
    pub fn observe_tick(&mut self, price: f64, time: DateTime<Utc>) -> Result<BarSnapshot> {
        if !price.is_finite() {
            warn!(price, "rejecting non-finite tick price");
            return Err(AggregateError::InvalidPrice { price });
        }

        let bar = match self.current_bar.take() {
            Some(mut bar) => {
                bar.update(price, time, self.anchor);
                bar
            }
            None => BarBuilder::new(time, price),
        };

        let closes_window = bar.tick_count >= self.window.get();
        let snapshot = bar.snapshot(closes_window);
        trace!(price, tick_count = bar.tick_count, "folded tick into bar");

        if closes_window {
            self.completed_windows += 1;
            debug!(
                open = snapshot.open,
                high = snapshot.high,
                low = snapshot.low,
                close = snapshot.close,
                ticks = snapshot.tick_count,
                window = self.completed_windows,
                "bar window closed"
            );
        } else {
            self.current_bar = Some(bar);
        }

        Ok(snapshot)
    }

    /// Folds a [`Tick`] into the current bar.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::InvalidPrice`] if the tick's price is not finite.
    pub fn observe(&mut self, tick: Tick) -> Result<BarSnapshot> {
        self.observe_tick(tick.price, tick.time)
    }

    /// Folds a price stamped with the current time into the current bar.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::InvalidPrice`] if `price` is not finite.
    pub fn observe_price(&mut self, price: f64) -> Result<BarSnapshot> {
        self.observe_tick(price, Utc::now())
    }

    /// Processes a feed event.
    ///
    /// Informational messages are ignored and yield `Ok(None)`. Price
    /// messages are folded in using the event's receive time.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::InvalidPrice`] for a non-finite price and
    /// [`AggregateError::MissingPrice`] for a price message without a price.
    pub fn observe_event(&mut self, event: &FeedEvent) -> Result<Option<BarSnapshot>> {
        match &event.message {
            FeedMessage::Info { content } => {
                debug!(%content, "ignoring informational feed message");
                Ok(None)
            }
            FeedMessage::Price {
                price: Some(price), ..
            } => self.observe_tick(*price, event.received_at).map(Some),
            FeedMessage::Price {
                symbol,
                price: None,
                ..
            } => {
                warn!(%symbol, "rejecting price event without a price");
                Err(AggregateError::MissingPrice {
                    symbol: symbol.clone(),
                })
            }
        }
    }
}

impl Default for BarAggregator {
    fn default() -> Self {
        Self::new(WindowSize::default())
    }
}

/// Builder for the in-progress bar.
#[derive(Debug)]
struct BarBuilder {
    time: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    tick_count: u32,
}

impl BarBuilder {
    /// Creates a new builder from the window's first tick.
    const fn new(time: DateTime<Utc>, price: f64) -> Self {
        Self {
            time,
            open: price,
            high: price,
            low: price,
            close: price,
            tick_count: 1,
        }
    }

    /// Updates the builder with a subsequent tick.
    fn update(&mut self, price: f64, time: DateTime<Utc>, anchor: TimeAnchor) {
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.close = price;
        self.tick_count += 1;
        if anchor == TimeAnchor::LastUpdate {
            self.time = time;
        }
    }

    const fn snapshot(&self, closes_window: bool) -> BarSnapshot {
        BarSnapshot::new(
            self.time,
            self.open,
            self.high,
            self.low,
            self.close,
            self.tick_count,
            closes_window,
        )
    }
}
