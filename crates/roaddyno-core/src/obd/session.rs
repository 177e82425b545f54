//! Telemetry session state
//!
//! Holds the last-seen value of every polled channel so that derived
//! quantities (fuel flow needs RPM, IAT and MAP together) can combine
//! readings that arrive on different notifications. One session per link
//! connection; readings are applied in arrival order.

use serde::{Deserialize, Serialize};

use super::Reading;
use crate::units::{celsius_to_kelvin, R_DRY_AIR};

/// Engine parameters for speed-density fuel flow estimation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Displacement, litres
    pub displacement_l: f64,
    /// Estimated volumetric efficiency, 0..1
    pub volumetric_efficiency: f64,
    /// Stoichiometric air/fuel ratio of the fuel
    pub stoich_afr: f64,
    /// Fuel density, g/L
    pub fuel_density_g_per_l: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        // Reference 1.0 TSI engine on gasoline
        Self {
            displacement_l: 1.0,
            volumetric_efficiency: 0.90,
            stoich_afr: 14.7,
            fuel_density_g_per_l: 750.0,
        }
    }
}

/// Last-seen sensor values for one link connection
///
/// Replaces scattered globals with an explicit context object: every parsing
/// step applies its reading here, and the datalogger snapshots a row from
/// whatever the session currently holds.
#[derive(Debug, Clone)]
pub struct TelemetrySession {
    engine: EngineConfig,
    rpm: f64,
    speed_kmh: f64,
    intake_temp_c: f64,
    map_kpa: Option<f64>,
    coolant_temp_c: Option<f64>,
    timing_advance_deg: Option<f64>,
    commanded_afr: Option<f64>,
    fuel_lph: f64,
}

impl TelemetrySession {
    /// Create a session for the given engine
    pub fn new(engine: EngineConfig) -> Self {
        Self {
            engine,
            rpm: 0.0,
            speed_kmh: 0.0,
            // sane ambient default until the first IAT reading arrives
            intake_temp_c: 25.0,
            map_kpa: None,
            coolant_temp_c: None,
            timing_advance_deg: None,
            commanded_afr: None,
            fuel_lph: 0.0,
        }
    }

    /// Apply one decoded reading to the session
    pub fn apply(&mut self, reading: Reading) {
        match reading {
            Reading::EngineRpm(rpm) => self.rpm = rpm,
            Reading::VehicleSpeed(kmh) => self.speed_kmh = kmh,
            Reading::IntakeAirTemp(c) => self.intake_temp_c = c,
            Reading::CoolantTemp(c) => self.coolant_temp_c = Some(c),
            Reading::TimingAdvance(deg) => self.timing_advance_deg = Some(deg),
            Reading::CommandedAfr(afr) => self.commanded_afr = Some(afr),
            Reading::ManifoldPressure(kpa) => {
                self.map_kpa = Some(kpa);
                // MAP closes the speed-density triangle; refresh fuel flow
                self.fuel_lph = self.fuel_flow_lph(kpa);
            }
        }
    }

    /// Speed-density fuel flow estimate, L/h
    ///
    /// Air mass per intake cycle from the ideal gas law, scaled by RPM (two
    /// crank revolutions per cycle on a four-stroke), divided by the
    /// stoichiometric ratio and fuel density.
    fn fuel_flow_lph(&self, map_kpa: f64) -> f64 {
        let iat_k = celsius_to_kelvin(self.intake_temp_c);
        let displacement_m3 = self.engine.displacement_l / 1000.0;
        let air_mass_kg =
            (map_kpa * 1000.0 * displacement_m3 * self.engine.volumetric_efficiency)
                / (R_DRY_AIR * iat_k);
        let air_flow_g_per_s = air_mass_kg * 1000.0 * self.rpm / 120.0;
        let fuel_g_per_s = air_flow_g_per_s / self.engine.stoich_afr;
        fuel_g_per_s / self.engine.fuel_density_g_per_l * 3600.0
    }

    /// Last engine speed, RPM
    pub fn rpm(&self) -> f64 {
        self.rpm
    }

    /// Last vehicle speed, km/h
    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    /// Last intake air temperature, °C
    pub fn intake_temp_c(&self) -> f64 {
        self.intake_temp_c
    }

    /// Last manifold pressure, kPa, if any has arrived
    pub fn map_kpa(&self) -> Option<f64> {
        self.map_kpa
    }

    /// Last coolant temperature, °C, if any has arrived
    pub fn coolant_temp_c(&self) -> Option<f64> {
        self.coolant_temp_c
    }

    /// Last timing advance, degrees BTDC, if any has arrived
    pub fn timing_advance_deg(&self) -> Option<f64> {
        self.timing_advance_deg
    }

    /// Last commanded AFR, if any has arrived
    pub fn commanded_afr(&self) -> Option<f64> {
        self.commanded_afr
    }

    /// Current fuel flow estimate, L/h
    pub fn fuel_lph(&self) -> f64 {
        self.fuel_lph
    }

    /// Snapshot the datalog row: RPM, speed, IAT, fuel flow
    ///
    /// Column order matches [`crate::datalog::obd_channels`].
    pub fn snapshot_row(&self) -> Vec<f64> {
        vec![self.rpm, self.speed_kmh, self.intake_temp_c, self.fuel_lph]
    }
}

impl Default for TelemetrySession {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
