//! Live OBD-II Telemetry Link
//!
//! Parses mode 01 sensor responses streamed from an ELM327-compatible BLE
//! adapter and maintains per-connection session state. The transport itself
//! (BLE discovery, serial forwarding to the dash microcontroller) lives
//! outside this crate; this module only sees response lines and produces
//! readings and datalog rows. It never feeds the estimation pipeline
//! directly — recorded logs do that through [`crate::datalog`].

mod error;
mod link;
mod parser;
mod pid;
mod session;

pub use error::ObdError;
pub use link::{supervise, ReconnectPolicy};
pub use parser::{parse_response, Reading};
pub use pid::{Pid, POLL_CYCLE};
pub use session::{EngineConfig, TelemetrySession};
