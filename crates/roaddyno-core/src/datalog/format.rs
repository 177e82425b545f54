//! Log file format
//!
//! CSV with a wall-clock `Timestamp` first column followed by one column per
//! channel, millisecond-resolution timestamps:
//!
//! ```text
//! Timestamp,RPM,Speed_kmh,IAT_C,Fuel_LPH
//! 2025-08-28 14:03:07.120,3412.00,92.00,31.00,8.42
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Duration as ChronoDuration, Local, NaiveDateTime};
use thiserror::Error;

use super::LogEntry;

/// Timestamp format written to and expected in log files
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Errors that can occur reading a log file
#[derive(Error, Debug)]
pub enum DatalogError {
    #[error("Log file has no header row")]
    MissingHeader,

    #[error("First log column must be 'Timestamp', got '{0}'")]
    BadHeader(String),

    #[error("Log has no '{0}' channel")]
    MissingChannel(String),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Default log filename for a recording started at `now`
pub fn default_log_filename(now: DateTime<Local>) -> String {
    format!("datalog_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Write log entries to a CSV file
///
/// Entry offsets are anchored to `start` to reconstruct wall-clock
/// timestamps.
pub fn write_csv<P: AsRef<Path>>(
    path: P,
    channels: &[String],
    start: DateTime<Local>,
    entries: &[LogEntry],
) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write!(writer, "Timestamp")?;
    for channel in channels {
        write!(writer, ",{}", channel)?;
    }
    writeln!(writer)?;

    for entry in entries {
        let wall = start
            + ChronoDuration::from_std(entry.timestamp)
                .unwrap_or_else(|_| ChronoDuration::zero());
        write!(writer, "{}", wall.format(TIMESTAMP_FORMAT))?;
        for value in &entry.values {
            write!(writer, ",{:.2}", value)?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Parse CSV log text into channel names and timestamped rows
///
/// Rows with unparseable timestamps or values are dropped with a warning;
/// a malformed header is an error.
pub fn parse_csv(text: &str) -> Result<(Vec<String>, Vec<(NaiveDateTime, Vec<f64>)>), DatalogError> {
    let mut lines = text.lines();
    let header = lines.next().ok_or(DatalogError::MissingHeader)?;
    let mut columns = header.split(',');
    match columns.next() {
        Some("Timestamp") => {}
        Some(other) => return Err(DatalogError::BadHeader(other.to_string())),
        None => return Err(DatalogError::MissingHeader),
    }
    let channels: Vec<String> = columns.map(|c| c.trim().to_string()).collect();

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        match parse_row(line, channels.len()) {
            Some(row) => rows.push(row),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        tracing::warn!(dropped, "malformed log rows dropped");
    }
    Ok((channels, rows))
}

fn parse_row(line: &str, n_channels: usize) -> Option<(NaiveDateTime, Vec<f64>)> {
    let mut fields = line.split(',');
    let timestamp = NaiveDateTime::parse_from_str(fields.next()?, TIMESTAMP_FORMAT).ok()?;
    let values: Vec<f64> = fields
        .map(|f| f.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;
    if values.len() != n_channels {
        return None;
    }
    Some((timestamp, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LOG: &str = "\
Timestamp,RPM,Speed_kmh,IAT_C,Fuel_LPH
2025-08-28 14:03:07.000,2000.00,50.00,28.00,4.10
2025-08-28 14:03:07.150,2150.00,52.00,28.00,4.60
not-a-timestamp,9999.00,99.00,99.00,9.90
2025-08-28 14:03:07.300,2300.00,54.00,28.00,5.10
";

    #[test]
    fn test_parse_drops_bad_rows() {
        let (channels, rows) = parse_csv(SAMPLE_LOG).unwrap();
        assert_eq!(channels, super::super::obd_channels());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].1[0], 2150.0);
    }

    #[test]
    fn test_bad_header_is_error() {
        let result = parse_csv("Time,RPM\n");
        assert!(matches!(result, Err(DatalogError::BadHeader(_))));
        assert!(matches!(parse_csv(""), Err(DatalogError::MissingHeader)));
    }

    #[test]
    fn test_default_filename() {
        let start = DateTime::parse_from_rfc3339("2025-08-28T14:03:07+00:00")
            .unwrap()
            .with_timezone(&Local);
        let name = default_log_filename(start);
        assert!(name.starts_with("datalog_"));
        assert!(name.ends_with(".csv"));
    }

    #[test]
    fn test_write_then_parse_roundtrip() {
        use std::time::Duration;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pull.csv");
        let start = Local::now();
        let entries = vec![
            LogEntry::new(Duration::from_millis(0), vec![2000.0, 50.0, 28.0, 4.1]),
            LogEntry::new(Duration::from_millis(100), vec![2100.0, 51.0, 28.0, 4.4]),
        ];

        write_csv(&path, &super::super::obd_channels(), start, &entries).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let (channels, rows) = parse_csv(&text).unwrap();

        assert_eq!(channels.len(), 4);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].1, vec![2000.0, 50.0, 28.0, 4.1]);
        let dt = rows[1].0 - rows[0].0;
        assert_eq!(dt.num_milliseconds(), 100);
    }
}
