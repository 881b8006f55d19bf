//! Configuration types shared across the pulse daemon system

use serde::{Deserialize, Serialize};

/// Types of supported pulse-sensor drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DriverType {
    /// MCP3008 SPI ADC front end
    Mcp3008,
    /// Mock driver producing a synthetic PPG waveform
    Mock,
}
