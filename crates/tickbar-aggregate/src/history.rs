//! In-memory bar history.

use tickbar_types::BarSnapshot;

use crate::{BarSink, SinkError};

/// Bar history kept the way a candlestick chart keeps it.
///
/// A rendered bar replaces the last stored bar when both carry the same
/// `time`, and is appended otherwise. With [`tickbar_types::TimeAnchor::WindowOpen`]
/// this yields one entry per window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarHistory {
    symbol: Option<String>,
    bars: Vec<BarSnapshot>,
}

impl BarHistory {
    /// Creates an empty history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            symbol: None,
            bars: Vec::new(),
        }
    }

    /// Returns the symbol label shown for this history, if any.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// Returns the stored bars, oldest first.
    #[must_use]
    pub fn bars(&self) -> &[BarSnapshot] {
        &self.bars
    }

    /// Returns the most recent bar.
    #[must_use]
    pub fn last(&self) -> Option<&BarSnapshot> {
        self.bars.last()
    }

    /// Returns the number of stored bars.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true if no bar has been rendered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Consumes the history, returning the stored bars.
    #[must_use]
    pub fn into_bars(self) -> Vec<BarSnapshot> {
        self.bars
    }
}

impl BarSink for BarHistory {
    fn show_symbol(&mut self, symbol: &str) -> Result<(), SinkError> {
        self.symbol = Some(symbol.to_string());
        Ok(())
    }

    fn render(&mut self, bar: &BarSnapshot) -> Result<(), SinkError> {
        match self.bars.last_mut() {
            Some(last) if last.time == bar.time => *last = *bar,
            _ => self.bars.push(*bar),
        }
        Ok(())
    }
}
