//! Mode 01 PID table
//!
//! The adapter answers a `01xx` request with an ASCII line starting `41 xx`;
//! routing a notification payload to its parser is a lookup on that fixed
//! prefix.

/// OBD-II mode 01 PIDs polled by the live link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pid {
    /// 0x05 — engine coolant temperature
    CoolantTemp,
    /// 0x0B — intake manifold absolute pressure
    ManifoldPressure,
    /// 0x0C — engine RPM
    EngineRpm,
    /// 0x0D — vehicle speed
    VehicleSpeed,
    /// 0x0E — timing advance
    TimingAdvance,
    /// 0x0F — intake air temperature
    IntakeAirTemp,
    /// 0x44 — commanded equivalence ratio
    CommandedAfr,
}

/// Polling order used by the live link; RPM and speed are polled most often
/// by the caller, the rest ride along.
pub const POLL_CYCLE: [Pid; 7] = [
    Pid::EngineRpm,
    Pid::IntakeAirTemp,
    Pid::VehicleSpeed,
    Pid::ManifoldPressure,
    Pid::CoolantTemp,
    Pid::TimingAdvance,
    Pid::CommandedAfr,
];

impl Pid {
    /// Mode 01 PID code
    pub fn code(&self) -> u8 {
        match self {
            Pid::CoolantTemp => 0x05,
            Pid::ManifoldPressure => 0x0B,
            Pid::EngineRpm => 0x0C,
            Pid::VehicleSpeed => 0x0D,
            Pid::TimingAdvance => 0x0E,
            Pid::IntakeAirTemp => 0x0F,
            Pid::CommandedAfr => 0x44,
        }
    }

    /// Request string to send to the adapter, carriage-return terminated
    pub fn request(&self) -> String {
        format!("01{:02X}\r", self.code())
    }

    /// Dispatch a response line on its fixed `41 xx` prefix
    ///
    /// Returns `None` for responses to PIDs the link does not poll.
    pub fn from_response(line: &str) -> Option<Pid> {
        let rest = line.strip_prefix("41 ")?;
        let code = u8::from_str_radix(rest.get(..2)?, 16).ok()?;
        POLL_CYCLE.iter().copied().find(|pid| pid.code() == code)
    }
}

impl std::fmt::Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Pid::CoolantTemp => "coolant temperature",
            Pid::ManifoldPressure => "manifold pressure",
            Pid::EngineRpm => "engine RPM",
            Pid::VehicleSpeed => "vehicle speed",
            Pid::TimingAdvance => "timing advance",
            Pid::IntakeAirTemp => "intake air temperature",
            Pid::CommandedAfr => "commanded AFR",
        };
        write!(f, "{}", name)
    }
}
