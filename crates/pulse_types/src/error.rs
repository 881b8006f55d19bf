use serde::{Deserialize, Serialize};

/// Represents errors that can occur within a pulse-sensor driver's read path.
///
/// These errors are intended to be propagated to the daemon so it can report
/// the state of the hardware; the signal-processing core never sees them.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum SensorError {
    /// A hardware-related fault.
    #[error("Sensor hardware fault: {0}")]
    HardwareFault(String),
    /// The sensor was disconnected.
    #[error("Sensor disconnected")]
    Disconnected,
    /// A driver-level error.
    #[error("Driver error: {0}")]
    DriverError(String),
}
