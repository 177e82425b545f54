//! Unit Conversion Functions and Physical Constants
//!
//! Provides the conversions used across the estimation pipeline:
//! - Speed: km/h ↔ m/s
//! - Power: watts ↔ metric horsepower (cv)
//! - Temperature: °C → K

/// Air density at sea level, kg/m³
pub const AIR_DENSITY_KG_M3: f64 = 1.225;

/// Gravitational acceleration, m/s²
pub const GRAVITY_MS2: f64 = 9.81;

/// Watts per metric horsepower (cv / PS)
pub const WATTS_PER_METRIC_HP: f64 = 735.5;

/// Specific gas constant for dry air, J/(kg·K)
pub const R_DRY_AIR: f64 = 287.05;

/// Convert km/h to m/s
pub fn kmh_to_ms(kmh: f64) -> f64 {
    kmh / 3.6
}

/// Convert m/s to km/h
pub fn ms_to_kmh(ms: f64) -> f64 {
    ms * 3.6
}

/// Convert watts to metric horsepower (cv)
pub fn watts_to_cv(watts: f64) -> f64 {
    watts / WATTS_PER_METRIC_HP
}

/// Convert metric horsepower (cv) to watts
pub fn cv_to_watts(cv: f64) -> f64 {
    cv * WATTS_PER_METRIC_HP
}

/// Convert Celsius to Kelvin
pub fn celsius_to_kelvin(c: f64) -> f64 {
    c + 273.15
}
