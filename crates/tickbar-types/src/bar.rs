//! OHLC bar snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLC bar as it stood immediately after a tick was folded in.
///
/// Snapshots are plain values: the aggregator keeps mutating its own
/// in-progress bar, so a renderer may hold on to a snapshot indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarSnapshot {
    /// Bar timestamp (window open or last update, depending on the anchor).
    pub time: DateTime<Utc>,
    /// Price of the first tick in the window.
    pub open: f64,
    /// Highest price seen in the window.
    pub high: f64,
    /// Lowest price seen in the window.
    pub low: f64,
    /// Price of the most recent tick in the window.
    pub close: f64,
    /// Number of ticks folded into the bar so far.
    pub tick_count: u32,
    /// Whether this tick completed the window.
    pub closes_window: bool,
}

impl BarSnapshot {
    /// Creates a new snapshot.
    #[must_use]
    pub const fn new(
        time: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        tick_count: u32,
        closes_window: bool,
    ) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            tick_count,
            closes_window,
        }
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the body size (|close - open|).
    #[must_use]
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Returns true if this is a bullish (green) bar.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if this is a bearish (red) bar.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Returns true if `low <= open, close <= high`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.low <= self.open
            && self.low <= self.close
            && self.open <= self.high
            && self.close <= self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn create_test_bar() -> BarSnapshot {
        let time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        BarSnapshot::new(time, 100.0, 105.5, 98.0, 102.0, 30, true)
    }

    #[test]
    fn test_range() {
        let bar = create_test_bar();
        assert_relative_eq!(bar.range(), 7.5);
    }

    #[test]
    fn test_body() {
        let bar = create_test_bar();
        assert_relative_eq!(bar.body(), 2.0);
    }

    #[test]
    fn test_bullish() {
        let bar = create_test_bar();
        assert!(bar.is_bullish());
        assert!(!bar.is_bearish());
    }

    #[test]
    fn test_bearish() {
        let time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let bar = BarSnapshot::new(time, 102.0, 105.5, 98.0, 100.0, 4, false);
        assert!(!bar.is_bullish());
        assert!(bar.is_bearish());
    }

    #[test]
    fn test_consistency() {
        assert!(create_test_bar().is_consistent());

        let time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let broken = BarSnapshot::new(time, 110.0, 105.5, 98.0, 100.0, 2, false);
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_serializes_field_names() {
        let json = serde_json::to_string(&create_test_bar()).unwrap();
        assert!(json.contains("\"open\":100.0"));
        assert!(json.contains("\"closes_window\":true"));
    }
}
