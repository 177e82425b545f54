//! Log playback
//!
//! Loads recorded logs back for analysis and feeds the estimation pipeline.
//! This is where log cleaning lives: unparseable rows are dropped at parse
//! time, rows are sorted by timestamp, and the pull window is cut by RPM
//! range — the estimator itself receives a clean, ordered sample sequence.

use std::path::Path;
use std::time::Duration;

use super::{format, DatalogError, LogEntry};
use crate::dyno::Sample;

/// Log file player for playback and analysis
pub struct LogPlayer {
    /// Log entries, ordered by timestamp
    entries: Vec<LogEntry>,
    /// Channel names
    channels: Vec<String>,
}

impl LogPlayer {
    /// Create a player from already-ordered entries
    pub fn new(channels: Vec<String>, entries: Vec<LogEntry>) -> Self {
        Self { entries, channels }
    }

    /// Load a player from CSV log text
    ///
    /// Rows are sorted by wall-clock timestamp and rebased so the first row
    /// is at offset zero.
    pub fn from_csv_str(text: &str) -> Result<Self, DatalogError> {
        let (channels, mut rows) = format::parse_csv(text)?;
        rows.sort_by_key(|(timestamp, _)| *timestamp);

        let entries = if rows.is_empty() {
            Vec::new()
        } else {
            let first = rows[0].0;
            rows.into_iter()
                .map(|(timestamp, values)| {
                    let offset = (timestamp - first).to_std().unwrap_or(Duration::ZERO);
                    LogEntry::new(offset, values)
                })
                .collect()
        };
        Ok(Self { entries, channels })
    }

    /// Load a player from a CSV log file
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self, DatalogError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_csv_str(&text)
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the channel names
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    /// Get the total duration
    pub fn duration(&self) -> Duration {
        self.entries.last().map(|e| e.timestamp).unwrap_or_default()
    }

    /// Get all entries
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Find the index of a channel by name
    pub fn channel_index(&self, name: &str) -> Option<usize> {
        self.channels.iter().position(|c| c == name)
    }

    /// Get values for a specific channel
    pub fn channel_values(&self, channel: &str) -> Vec<f64> {
        let idx = match self.channel_index(channel) {
            Some(i) => i,
            None => return Vec::new(),
        };

        self.entries
            .iter()
            .filter_map(|e| e.values.get(idx).copied())
            .collect()
    }

    /// Extract a pull as estimator input, windowed by RPM
    ///
    /// Keeps rows whose RPM lies in `[rpm_min, rpm_max]`; a single gear for
    /// the whole window is the caller's responsibility. Requires the `RPM`
    /// and `Speed_kmh` channels.
    pub fn pull_samples(&self, rpm_min: f64, rpm_max: f64) -> Result<Vec<Sample>, DatalogError> {
        let rpm_idx = self
            .channel_index("RPM")
            .ok_or_else(|| DatalogError::MissingChannel("RPM".to_string()))?;
        let speed_idx = self
            .channel_index("Speed_kmh")
            .ok_or_else(|| DatalogError::MissingChannel("Speed_kmh".to_string()))?;

        Ok(self
            .entries
            .iter()
            .filter_map(|entry| {
                let rpm = *entry.values.get(rpm_idx)?;
                let speed_kmh = *entry.values.get(speed_idx)?;
                if rpm < rpm_min || rpm > rpm_max {
                    return None;
                }
                Some(Sample::new(entry.timestamp.as_secs_f64(), speed_kmh, rpm))
            })
            .collect())
    }
}
