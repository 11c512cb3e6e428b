//! Per-session state and event wiring.

use thiserror::Error;
use tickbar_types::{BarSnapshot, FeedEvent, FeedMessage};
use tracing::{info, warn};

use crate::{BarAggregator, BarSink, SinkError};

/// Errors that can occur while handling feed events.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The sink failed to render a bar or the symbol label.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Symbol binding for one charting session.
///
/// The first symbol seen wins. Later symbols are neither checked against
/// the bound one nor stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    bound_symbol: Option<String>,
}

impl SessionContext {
    /// Creates a context with no bound symbol.
    #[must_use]
    pub const fn new() -> Self {
        Self { bound_symbol: None }
    }

    /// Binds `symbol` if no symbol is bound yet.
    ///
    /// Returns `true` if this call performed the binding.
    pub fn bind_if_unset(&mut self, symbol: &str) -> bool {
        if self.bound_symbol.is_some() {
            return false;
        }
        self.bound_symbol = Some(symbol.to_string());
        true
    }

    /// Returns the bound symbol.
    #[must_use]
    pub fn bound_symbol(&self) -> Option<&str> {
        self.bound_symbol.as_deref()
    }
}

/// Drives feed events through a [`BarAggregator`] into a [`BarSink`].
///
/// `handle` is a plain synchronous call; whatever loop owns the transport
/// calls it once per received event, in arrival order.
#[derive(Debug)]
pub struct ChartSession<S> {
    aggregator: BarAggregator,
    context: SessionContext,
    sink: S,
    rejected_ticks: u64,
}

impl<S: BarSink> ChartSession<S> {
    /// Creates a session with a fresh [`SessionContext`].
    #[must_use]
    pub const fn new(aggregator: BarAggregator, sink: S) -> Self {
        Self {
            aggregator,
            context: SessionContext::new(),
            sink,
            rejected_ticks: 0,
        }
    }

    /// Handles one feed event.
    ///
    /// Returns the bar rendered for a price event, or `None` for
    /// informational events and rejected ticks. A rejected tick is dropped
    /// and logged; the current window is left as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails. If the sink fails to show the
    /// symbol label, the symbol stays bound and the label is not retried.
    pub fn handle(&mut self, event: &FeedEvent) -> Result<Option<BarSnapshot>, SessionError> {
        match &event.message {
            FeedMessage::Info { content } => {
                info!(%content, "feed message");
                return Ok(None);
            }
            FeedMessage::Price { symbol, .. } => {
                if self.context.bind_if_unset(symbol) {
                    info!(%symbol, "bound session symbol");
                    // Binding is kept even if the label cannot be shown.
                    self.sink.show_symbol(symbol)?;
                }
            }
        }

        match self.aggregator.observe_event(event) {
            Ok(Some(bar)) => {
                self.sink.render(&bar)?;
                Ok(Some(bar))
            }
            Ok(None) => Ok(None),
            Err(err) => {
                self.rejected_ticks += 1;
                warn!(error = %err, rejected = self.rejected_ticks, "dropping tick");
                Ok(None)
            }
        }
    }

    /// Returns the aggregator.
    #[must_use]
    pub const fn aggregator(&self) -> &BarAggregator {
        &self.aggregator
    }

    /// Returns the session context.
    #[must_use]
    pub const fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Returns the sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the number of ticks dropped for having no valid price.
    #[must_use]
    pub const fn rejected_ticks(&self) -> u64 {
        self.rejected_ticks
    }

    /// Consumes the session, returning its parts.
    #[must_use]
    pub fn into_parts(self) -> (BarAggregator, SessionContext, S) {
        (self.aggregator, self.context, self.sink)
    }
}
