//! Live link errors

use thiserror::Error;

/// Errors that can occur on the live OBD-II link
#[derive(Error, Debug)]
pub enum ObdError {
    #[error("Unknown PID in response: '{0}'")]
    UnknownPid(String),

    #[error("Response for {pid} too short: {len} fields")]
    ShortResponse {
        /// Mode 01 PID the response claimed to answer
        pid: u8,
        /// Number of whitespace-separated fields received
        len: usize,
    },

    #[error("Invalid hex field '{0}' in response")]
    InvalidHex(String),

    #[error("Link lost: {0}")]
    LinkLost(String),

    #[error("Gave up reconnecting after {0} attempts")]
    RetriesExhausted(u32),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
