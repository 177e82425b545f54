//! Vehicle Profile
//!
//! Immutable physical description of the vehicle under test. Supplied once per
//! estimation run; all force-model terms derive from it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dyno::DynoError;

/// Physical parameters of the vehicle under test
///
/// The default profile matches the reference VW Up! TSI used during
/// development (mass includes occupants and fuel).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleProfile {
    /// Total mass including occupants and fuel, kg
    pub mass_kg: f64,
    /// Frontal area, m²
    pub frontal_area_m2: f64,
    /// Aerodynamic drag coefficient (Cd)
    pub drag_coefficient: f64,
    /// Tyre rolling resistance coefficient
    pub rolling_resistance: f64,
    /// Loaded wheel radius, m
    pub wheel_radius_m: f64,
    /// Final drive (differential) ratio
    pub final_drive: f64,
    /// Gear number → gearbox ratio
    pub gear_ratios: BTreeMap<u8, f64>,
}

impl Default for VehicleProfile {
    fn default() -> Self {
        let gear_ratios = BTreeMap::from([
            (1, 3.77),
            (2, 2.12),
            (3, 1.36),
            (4, 1.03),
            (5, 0.81),
        ]);
        Self {
            mass_kg: 1060.0,
            frontal_area_m2: 2.08,
            drag_coefficient: 0.367,
            rolling_resistance: 0.015,
            wheel_radius_m: 0.301,
            final_drive: 3.625,
            gear_ratios,
        }
    }
}

impl VehicleProfile {
    /// Look up the gearbox ratio for a gear number
    pub fn gear_ratio(&self, gear: u8) -> Option<f64> {
        self.gear_ratios.get(&gear).copied()
    }

    /// Total drivetrain ratio (final drive × gearbox ratio) for a gear
    ///
    /// Fails with [`DynoError::InvalidGear`] when the gear is not present in
    /// the ratio map.
    pub fn total_ratio(&self, gear: u8) -> Result<f64, DynoError> {
        self.gear_ratio(gear)
            .map(|ratio| self.final_drive * ratio)
            .ok_or(DynoError::InvalidGear(gear))
    }

    /// Load a profile from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the profile to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
