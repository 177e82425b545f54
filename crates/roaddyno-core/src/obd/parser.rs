//! Response parsing
//!
//! Decodes ELM327-style ASCII responses ("41 0C 1A F8") into engineering
//! units using the standard mode 01 formulas. Adapter chatter (prompts,
//! `SEARCHING...`, `STOPPED`) is ignored rather than treated as an error.

use super::{ObdError, Pid};

/// A decoded sensor reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// Engine speed, RPM
    EngineRpm(f64),
    /// Vehicle speed, km/h
    VehicleSpeed(f64),
    /// Intake air temperature, °C
    IntakeAirTemp(f64),
    /// Intake manifold absolute pressure, kPa
    ManifoldPressure(f64),
    /// Coolant temperature, °C
    CoolantTemp(f64),
    /// Ignition timing advance, degrees BTDC
    TimingAdvance(f64),
    /// Commanded air/fuel ratio (gasoline scale)
    CommandedAfr(f64),
}

/// Parse one notification payload
///
/// Returns `Ok(None)` for lines that carry no reading: prompts, adapter
/// status chatter, responses to unpolled PIDs. Malformed hex in a recognized
/// response is an error.
pub fn parse_response(line: &str) -> Result<Option<Reading>, ObdError> {
    let line = line.trim();
    if line.is_empty() || line.contains('>') || line.contains("STOPPED") || line.contains("SEARCHING")
    {
        return Ok(None);
    }

    let Some(pid) = Pid::from_response(line) else {
        if line.starts_with("41 ") {
            return Err(ObdError::UnknownPid(line.to_string()));
        }
        return Ok(None);
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    let reading = match pid {
        Pid::EngineRpm => {
            // ((A × 256) + B) / 4
            let [a, b] = data_bytes::<2>(pid, &fields)?;
            Reading::EngineRpm((a as f64 * 256.0 + b as f64) / 4.0)
        }
        Pid::VehicleSpeed => {
            let [a] = data_bytes::<1>(pid, &fields)?;
            Reading::VehicleSpeed(a as f64)
        }
        Pid::IntakeAirTemp => {
            // A − 40
            let [a] = data_bytes::<1>(pid, &fields)?;
            Reading::IntakeAirTemp(a as f64 - 40.0)
        }
        Pid::ManifoldPressure => {
            let [a] = data_bytes::<1>(pid, &fields)?;
            Reading::ManifoldPressure(a as f64)
        }
        Pid::CoolantTemp => {
            let [a] = data_bytes::<1>(pid, &fields)?;
            Reading::CoolantTemp(a as f64 - 40.0)
        }
        Pid::TimingAdvance => {
            // A/2 − 64
            let [a] = data_bytes::<1>(pid, &fields)?;
            Reading::TimingAdvance(a as f64 / 2.0 - 64.0)
        }
        Pid::CommandedAfr => {
            // equivalence ratio ((A × 256) + B) / 32768, gasoline stoich 14.7
            let [a, b] = data_bytes::<2>(pid, &fields)?;
            Reading::CommandedAfr((a as f64 * 256.0 + b as f64) / 32768.0 * 14.7)
        }
    };
    Ok(Some(reading))
}

/// Extract the first N data bytes after the `41 xx` header
fn data_bytes<const N: usize>(pid: Pid, fields: &[&str]) -> Result<[u8; N], ObdError> {
    if fields.len() < 2 + N {
        return Err(ObdError::ShortResponse {
            pid: pid.code(),
            len: fields.len(),
        });
    }
    let mut bytes = [0u8; N];
    for (i, byte) in bytes.iter_mut().enumerate() {
        let field = fields[2 + i];
        *byte = u8::from_str_radix(field, 16)
            .map_err(|_| ObdError::InvalidHex(field.to_string()))?;
    }
    Ok(bytes)
}
