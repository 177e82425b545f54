//! Data Logging
//!
//! Records live telemetry rows and plays recorded pulls back into the
//! estimation pipeline. The recorder side is fed by the OBD link; the
//! playback side is the "log source" collaborator of the dyno core — it owns
//! sorting and cleaning so the estimator never has to touch a file.

mod format;
mod playback;
mod recorder;

pub use format::{default_log_filename, parse_csv, write_csv, DatalogError};
pub use playback::LogPlayer;
pub use recorder::DataLogger;

use std::time::Duration;

/// A single log entry with timestamp and values
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Timestamp from start of logging
    pub timestamp: Duration,
    /// Channel values (in order of the channel list)
    pub values: Vec<f64>,
}

impl LogEntry {
    /// Create a new log entry
    pub fn new(timestamp: Duration, values: Vec<f64>) -> Self {
        Self { timestamp, values }
    }
}

/// Channel names recorded by the live OBD link, in column order
pub fn obd_channels() -> Vec<String> {
    vec![
        "RPM".to_string(),
        "Speed_kmh".to_string(),
        "IAT_C".to_string(),
        "Fuel_LPH".to_string(),
    ]
}
