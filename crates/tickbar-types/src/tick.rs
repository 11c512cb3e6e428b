//! Tick data representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Observed price.
    pub price: f64,
    /// Arrival time of the tick (UTC).
    pub time: DateTime<Utc>,
}

impl Tick {
    /// Creates a new tick.
    #[must_use]
    pub const fn new(price: f64, time: DateTime<Utc>) -> Self {
        Self { price, time }
    }

    /// Creates a tick stamped with the current time.
    #[must_use]
    pub fn now(price: f64) -> Self {
        Self::new(price, Utc::now())
    }

    /// Returns true if the price is a finite number.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.price.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_prices() {
        assert!(Tick::now(101.25).is_finite());
        assert!(Tick::now(-3.0).is_finite());
    }

    #[test]
    fn test_non_finite_prices() {
        assert!(!Tick::now(f64::NAN).is_finite());
        assert!(!Tick::now(f64::INFINITY).is_finite());
        assert!(!Tick::now(f64::NEG_INFINITY).is_finite());
    }
}
