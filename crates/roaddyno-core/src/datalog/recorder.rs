//! Data logger / recorder
//!
//! Records rows snapshotted from the live telemetry session. Recording is
//! started and stopped by dash commands; rows arriving while stopped are
//! discarded.

use std::collections::VecDeque;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use super::{format, LogEntry};

/// Maximum entries to keep in memory before old rows roll off
const MAX_BUFFER_SIZE: usize = 10000;

/// Data logger state
pub struct DataLogger {
    /// Channel names
    channels: Vec<String>,
    /// In-memory log buffer
    buffer: VecDeque<LogEntry>,
    /// Monotonic start of logging, for row offsets
    start_time: Option<Instant>,
    /// Wall-clock start of logging, for file timestamps
    start_wall: Option<DateTime<Local>>,
    /// Whether logging is active
    is_recording: bool,
    /// Target sample rate in Hz
    sample_rate: f64,
    /// Last sample time
    last_sample: Option<Instant>,
}

impl DataLogger {
    /// Create a new data logger with the given channels
    pub fn new(channels: Vec<String>) -> Self {
        Self {
            channels,
            buffer: VecDeque::with_capacity(MAX_BUFFER_SIZE),
            start_time: None,
            start_wall: None,
            is_recording: false,
            sample_rate: 10.0, // Default 10 Hz
            last_sample: None,
        }
    }

    /// Create a logger for the standard OBD channel set
    pub fn for_obd() -> Self {
        Self::new(super::obd_channels())
    }

    /// Set the target sample rate in Hz
    pub fn set_sample_rate(&mut self, rate: f64) {
        self.sample_rate = rate.clamp(1.0, 200.0);
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Start recording; a no-op when already recording
    pub fn start(&mut self) {
        if self.is_recording {
            return;
        }
        self.start_time = Some(Instant::now());
        self.start_wall = Some(Local::now());
        self.is_recording = true;
        self.last_sample = None;
        self.buffer.clear();
        tracing::info!("datalog started");
    }

    /// Stop recording
    pub fn stop(&mut self) {
        if self.is_recording {
            tracing::info!(entries = self.buffer.len(), "datalog stopped");
        }
        self.is_recording = false;
    }

    /// Check if recording is active
    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    /// Record a row of channel values
    pub fn record(&mut self, values: Vec<f64>) {
        if !self.is_recording {
            return;
        }

        let now = Instant::now();

        // Honour the target sample rate
        let min_interval = Duration::from_secs_f64(1.0 / self.sample_rate);
        if let Some(last) = self.last_sample {
            if now.duration_since(last) < min_interval {
                return;
            }
        }

        let timestamp = self
            .start_time
            .map(|start| now.duration_since(start))
            .unwrap_or_default();

        let entry = LogEntry::new(timestamp, values);

        if self.buffer.len() >= MAX_BUFFER_SIZE {
            self.buffer.pop_front();
        }

        self.buffer.push_back(entry);
        self.last_sample = Some(now);
    }

    /// Get the number of recorded entries
    pub fn entry_count(&self) -> usize {
        self.buffer.len()
    }

    /// Get all entries
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.buffer.iter()
    }

    /// Get the channel names
    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    /// Clear all recorded data
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.start_time = None;
        self.start_wall = None;
    }

    /// Get the duration of the log
    pub fn duration(&self) -> Duration {
        self.buffer.back().map(|e| e.timestamp).unwrap_or_default()
    }

    /// Default filename for this recording
    pub fn default_filename(&self) -> String {
        format::default_log_filename(self.start_wall.unwrap_or_else(Local::now))
    }

    /// Flush the buffered entries to a CSV file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let start = self.start_wall.unwrap_or_else(Local::now);
        let entries: Vec<LogEntry> = self.buffer.iter().cloned().collect();
        format::write_csv(path, &self.channels, start, &entries)
    }
}

impl Default for DataLogger {
    fn default() -> Self {
        Self::for_obd()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_basic() {
        let mut logger = DataLogger::for_obd();

        assert!(!logger.is_recording());

        logger.start();
        assert!(logger.is_recording());

        logger.record(vec![1000.0, 30.0, 25.0, 2.0]);
        assert_eq!(logger.entry_count(), 1);

        logger.stop();
        assert!(!logger.is_recording());

        // rows while stopped are discarded
        logger.record(vec![2000.0, 40.0, 25.0, 3.0]);
        assert_eq!(logger.entry_count(), 1);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut logger = DataLogger::for_obd();
        logger.start();
        logger.record(vec![1000.0, 30.0, 25.0, 2.0]);
        logger.start();
        // second start while recording must not wipe the buffer
        assert_eq!(logger.entry_count(), 1);
    }

    #[test]
    fn test_save_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut logger = DataLogger::for_obd();
        logger.start();
        logger.record(vec![1500.0, 35.0, 26.0, 2.5]);
        logger.stop();
        logger.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Timestamp,RPM,Speed_kmh,IAT_C,Fuel_LPH"));
        assert!(text.contains("1500.00"));
    }
}
