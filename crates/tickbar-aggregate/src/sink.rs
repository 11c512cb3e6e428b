//! Receivers of live bar updates.

use thiserror::Error;
use tickbar_types::BarSnapshot;

/// Errors that can occur while rendering bars.
#[derive(Error, Debug)]
pub enum SinkError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other rendering failure.
    #[error("Render error: {0}")]
    Render(String),
}

/// A rendering surface for live bars.
///
/// `render` is called once per processed tick with the bar as it stands
/// after that tick. Surfaces that keep a bar history should update their
/// last bar in place while `time` is unchanged and append when it changes.
pub trait BarSink {
    /// Displays the symbol the session is bound to. Called at most once.
    ///
    /// # Errors
    ///
    /// Returns an error if the label cannot be displayed.
    fn show_symbol(&mut self, symbol: &str) -> Result<(), SinkError> {
        let _ = symbol;
        Ok(())
    }

    /// Renders the current bar.
    ///
    /// # Errors
    ///
    /// Returns an error if the bar cannot be rendered.
    fn render(&mut self, bar: &BarSnapshot) -> Result<(), SinkError>;
}

impl BarSink for Vec<BarSnapshot> {
    fn render(&mut self, bar: &BarSnapshot) -> Result<(), SinkError> {
        self.push(*bar);
        Ok(())
    }
}

impl<S: BarSink + ?Sized> BarSink for &mut S {
    fn show_symbol(&mut self, symbol: &str) -> Result<(), SinkError> {
        (**self).show_symbol(symbol)
    }

    fn render(&mut self, bar: &BarSnapshot) -> Result<(), SinkError> {
        (**self).render(bar)
    }
}

impl<S: BarSink + ?Sized> BarSink for Box<S> {
    fn show_symbol(&mut self, symbol: &str) -> Result<(), SinkError> {
        (**self).show_symbol(symbol)
    }

    fn render(&mut self, bar: &BarSnapshot) -> Result<(), SinkError> {
        (**self).render(bar)
    }
}

/// A disabled sink ignores every update.
impl<S: BarSink> BarSink for Option<S> {
    fn show_symbol(&mut self, symbol: &str) -> Result<(), SinkError> {
        self.as_mut().map_or(Ok(()), |sink| sink.show_symbol(symbol))
    }

    fn render(&mut self, bar: &BarSnapshot) -> Result<(), SinkError> {
        self.as_mut().map_or(Ok(()), |sink| sink.render(bar))
    }
}

/// Fans every update out to both sinks, first then second.
impl<A: BarSink, B: BarSink> BarSink for (A, B) {
    fn show_symbol(&mut self, symbol: &str) -> Result<(), SinkError> {
        self.0.show_symbol(symbol)?;
        self.1.show_symbol(symbol)
    }

    fn render(&mut self, bar: &BarSnapshot) -> Result<(), SinkError> {
        self.0.render(bar)?;
        self.1.render(bar)
    }
}
