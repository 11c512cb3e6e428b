//! CSV output format.

use std::io::Write;
use tickbar_types::BarSnapshot;

use crate::{FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }
}

impl Formatter for CsvFormatter {
    fn write_bars<W: Write + Send>(
        &self,
        bars: &[BarSnapshot],
        mut writer: W,
    ) -> Result<(), FormatError> {
        self.write_header(&mut writer)?;
        for bar in bars {
            self.write_record(bar, &mut writer)?;
        }
        Ok(())
    }

    fn write_header<W: Write>(&self, mut writer: W) -> Result<(), FormatError> {
        let d = self.delimiter;
        if self.include_header {
            writeln!(
                writer,
                "time{d}open{d}high{d}low{d}close{d}tick_count{d}closes_window"
            )?;
        }
        Ok(())
    }

    fn write_record<W: Write>(&self, bar: &BarSnapshot, mut writer: W) -> Result<(), FormatError> {
        let d = self.delimiter;
        writeln!(
            writer,
            "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
            bar.time.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            bar.open,
            bar.high,
            bar.low,
            bar.close,
            bar.tick_count,
            bar.closes_window
        )?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::io::Cursor;

    fn create_test_bar() -> BarSnapshot {
        let time = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 45).unwrap();
        BarSnapshot::new(time, 10.0, 12.0, 8.0, 8.5, 3, true)
    }

    #[test]
    fn test_csv_bars() {
        let formatter = CsvFormatter::new();
        let bars = vec![create_test_bar()];
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&bars, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(
            lines[0],
            "time,open,high,low,close,tick_count,closes_window"
        );
        assert_eq!(lines[1], "2024-01-15T12:30:45.000Z,10,12,8,8.5,3,true");
    }

    #[test]
    fn test_csv_no_header() {
        let formatter = CsvFormatter::new().with_header(false);
        let bars = vec![create_test_bar()];
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&bars, &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(!result.contains("time,open"));
        assert_eq!(result.lines().count(), 1);
    }

    #[test]
    fn test_tsv() {
        let formatter = CsvFormatter::tsv();
        let mut output = Cursor::new(Vec::new());

        formatter.write_bars(&[create_test_bar()], &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains("time\topen\thigh"));
    }

    #[test]
    fn test_custom_delimiter() {
        let formatter = CsvFormatter::new().with_delimiter(';');
        let mut output = Cursor::new(Vec::new());

        formatter.write_record(&create_test_bar(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with("2024-01-15T12:30:45.000Z;10;12;8"));
    }
}
