//! Output format abstraction.

use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tickbar_aggregate::SinkError;
use tickbar_types::BarSnapshot;

use crate::{CsvFormatter, JsonFormatter};

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Json, Self::Ndjson]
    }

    /// Infers the format from a file path's extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    /// Writes a finished bar history in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_bars<W: Write + Send>(
        &self,
        bars: &[BarSnapshot],
        writer: W,
    ) -> Result<(), FormatError> {
        match self {
            Self::Csv => CsvFormatter::new().write_bars(bars, writer),
            Self::Json => JsonFormatter::new().write_bars(bars, writer),
            Self::Ndjson => JsonFormatter::ndjson().write_bars(bars, writer),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<FormatError> for SinkError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::Io(e) => Self::Io(e),
            FormatError::Json(e) => Self::Json(e),
            other @ FormatError::UnknownFormat(_) => Self::Render(other.to_string()),
        }
    }
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes a complete set of bars to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_bars<W: Write + Send>(&self, bars: &[BarSnapshot], writer: W)
    -> Result<(), FormatError>;

    /// Writes the preamble of a bar stream, if the format has one.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_header<W: Write>(&self, writer: W) -> Result<(), FormatError> {
        let _ = writer;
        Ok(())
    }

    /// Writes a single bar as one streamed record.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_record<W: Write>(&self, bar: &BarSnapshot, writer: W) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Ndjson);
        assert!(matches!(
            "parquet".parse::<OutputFormat>(),
            Err(FormatError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/bars.json")),
            Some(OutputFormat::Json)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("bars.ndjson")),
            Some(OutputFormat::Ndjson)
        );
        assert_eq!(OutputFormat::from_path(Path::new("bars")), None);
        assert_eq!(OutputFormat::from_path(Path::new("bars.txt")), None);
    }

    #[test]
    fn test_display_matches_extension() {
        for format in OutputFormat::all() {
            assert_eq!(format.to_string(), format.extension());
        }
    }

    #[test]
    fn test_format_error_into_sink_error() {
        let io = std::io::Error::other("closed");
        assert!(matches!(
            SinkError::from(FormatError::Io(io)),
            SinkError::Io(_)
        ));
        assert!(matches!(
            SinkError::from(FormatError::UnknownFormat("xml".into())),
            SinkError::Render(_)
        ));
    }
}
