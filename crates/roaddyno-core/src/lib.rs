//! # RoadDyno Core Library
//!
//! Core functionality for the RoadDyno virtual dynamometer.
//!
//! This library provides:
//! - Telemetry-to-dyno estimation: resampling, differentiation and a
//!   longitudinal force model turning a speed/RPM log into power and torque
//! - Dyno curve post-processing (plausibility filtering, smoothing, peaks)
//! - OBD-II mode 01 response parsing for the live telemetry link
//! - Data logging and playback of recorded pulls
//!
//! ## Example
//!
//! ```rust,ignore
//! use roaddyno_core::dyno::{estimate_pull, EstimatorSettings, Sample};
//! use roaddyno_core::vehicle::VehicleProfile;
//!
//! let profile = VehicleProfile::default(); // VW Up! TSI reference
//! let samples: Vec<Sample> = load_pull()?;
//! let derived = estimate_pull(&samples, &profile, 3, &EstimatorSettings::default())?;
//! ```

#![warn(missing_docs)]

pub mod curve;
pub mod datalog;
pub mod dyno;
pub mod obd;
pub mod units;
pub mod vehicle;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::curve::{CurveFilters, CurvePoint, CurveSummary};
    pub use crate::datalog::{DataLogger, LogEntry, LogPlayer};
    pub use crate::dyno::{estimate_pull, DerivedSample, DynoError, EstimatorSettings, Sample};
    pub use crate::obd::{ObdError, Pid, Reading, TelemetrySession};
    pub use crate::vehicle::VehicleProfile;
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
