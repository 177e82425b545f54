//! Estimation errors

use thiserror::Error;

/// Errors that can occur during a dyno estimation run
#[derive(Error, Debug)]
pub enum DynoError {
    #[error("Fewer than two distinct-timestamp samples supplied")]
    EmptyInput,

    #[error("Gear {0} is not present in the gear ratio map")]
    InvalidGear(u8),

    #[error("Non-monotonic timestamp at sample {index}")]
    NonMonotonic { index: usize },
}
