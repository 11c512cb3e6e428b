//! Bar window configuration.

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::WindowSizeError;

/// Number of consecutive ticks aggregated into one bar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WindowSize(NonZeroU32);

impl WindowSize {
    /// Window size used when none is configured.
    pub const DEFAULT: Self = match NonZeroU32::new(30) {
        Some(n) => Self(n),
        None => unreachable!(),
    };

    /// Creates a window size, returning `None` for zero.
    #[must_use]
    pub const fn new(ticks: u32) -> Option<Self> {
        match NonZeroU32::new(ticks) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Returns the number of ticks per window.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for WindowSize {
    type Error = WindowSizeError;

    fn try_from(ticks: u32) -> Result<Self, Self::Error> {
        Self::new(ticks).ok_or(WindowSizeError::Zero)
    }
}

impl FromStr for WindowSize {
    type Err = WindowSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ticks = s
            .trim()
            .parse::<u32>()
            .map_err(|_| WindowSizeError::Invalid(s.to_string()))?;
        Self::try_from(ticks)
    }
}

/// Timestamp carried by a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TimeAnchor {
    /// Arrival time of the window's first tick, fixed for the window's life.
    #[default]
    WindowOpen,
    /// Arrival time of the most recent tick in the window.
    LastUpdate,
}

impl TimeAnchor {
    /// Returns the anchor as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WindowOpen => "window-open",
            Self::LastUpdate => "last-update",
        }
    }
}

impl std::fmt::Display for TimeAnchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimeAnchor {
    type Err = TimeAnchorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "window-open" | "open" | "start" => Ok(Self::WindowOpen),
            "last-update" | "last" | "update" => Ok(Self::LastUpdate),
            _ => Err(TimeAnchorParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid time anchor string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeAnchorParseError(String);

impl std::fmt::Display for TimeAnchorParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid time anchor '{}', expected one of: window-open, last-update",
            self.0
        )
    }
}

impl std::error::Error for TimeAnchorParseError {}
