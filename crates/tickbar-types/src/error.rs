//! Error types for tickbar.

use thiserror::Error;

/// Result type alias for aggregation operations.
pub type Result<T> = std::result::Result<T, AggregateError>;

/// Errors that can occur while folding ticks into bars.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregateError {
    /// Tick price is NaN or infinite.
    #[error("Invalid price: {price} is not a finite number")]
    InvalidPrice {
        /// The rejected price.
        price: f64,
    },

    /// Price event carried no price at all.
    #[error("Invalid price: no price for {symbol}")]
    MissingPrice {
        /// Symbol of the price-less event.
        symbol: String,
    },
}

/// Error for invalid window sizes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowSizeError {
    /// A window must hold at least one tick.
    #[error("Window size must be at least 1 tick")]
    Zero,

    /// Input is not an unsigned integer.
    #[error("Invalid window size: {0}")]
    Invalid(String),
}
