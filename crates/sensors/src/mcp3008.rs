//! MCP3008 SPI ADC driver
//!
//! The analog front end for a real PPG sensor on a Raspberry Pi: the
//! sensor's output feeds one single-ended channel of the 10-bit MCP3008,
//! read over SPI via `rppal`.

use log::{debug, info};
use rppal::spi::{Bus, Mode, SlaveSelect, Spi};

use pulse_types::SensorError;

use crate::types::{DriverError, DriverStatus, PulseDriver};

/// SPI clock for the MCP3008. The datasheet caps 10-bit conversions at
/// 1.35 MHz with a 2.7 V supply.
const SPI_CLOCK_HZ: u32 = 1_350_000;

pub struct Mcp3008Driver {
    spi: Spi,
    channel: u8,
    status: DriverStatus,
}

impl Mcp3008Driver {
    /// Open the SPI bus and prepare to read `channel` (0-7).
    pub fn new(spi_bus: u8, cs_pin: u8, channel: u8) -> Result<Self, DriverError> {
        if channel > 7 {
            return Err(DriverError::ConfigurationError(format!(
                "Invalid MCP3008 channel: {}. Valid channels are 0-7",
                channel
            )));
        }

        let bus = match spi_bus {
            0 => Bus::Spi0,
            1 => Bus::Spi1,
            other => {
                return Err(DriverError::ConfigurationError(format!(
                    "Unsupported SPI bus: {}",
                    other
                )))
            }
        };
        let slave = match cs_pin {
            0 => SlaveSelect::Ss0,
            1 => SlaveSelect::Ss1,
            2 => SlaveSelect::Ss2,
            other => {
                return Err(DriverError::ConfigurationError(format!(
                    "Unsupported chip select: {}",
                    other
                )))
            }
        };

        let spi = Spi::new(bus, slave, SPI_CLOCK_HZ, Mode::Mode0)?;
        info!(
            "Mcp3008Driver created on SPI{} CS{} channel {}",
            spi_bus, cs_pin, channel
        );

        Ok(Self {
            spi,
            channel,
            status: DriverStatus::NotInitialized,
        })
    }
}

impl PulseDriver for Mcp3008Driver {
    fn initialize(&mut self) -> Result<(), DriverError> {
        // The MCP3008 needs no register setup; a throwaway conversion
        // confirms the wiring responds.
        self.status = DriverStatus::NotInitialized;
        self.read_raw().map_err(DriverError::from)?;
        self.status = DriverStatus::Ok;
        Ok(())
    }

    fn read_raw(&mut self) -> Result<u16, SensorError> {
        // Start bit, single-ended mode + channel, then clocks for the result.
        let tx = [0x01, 0x80 | (self.channel << 4), 0x00];
        let mut rx = [0u8; 3];
        self.spi
            .transfer(&mut rx, &tx)
            .map_err(|e| SensorError::HardwareFault(e.to_string()))?;

        self.status = DriverStatus::Running;
        Ok((u16::from(rx[1] & 0x03) << 8) | u16::from(rx[2]))
    }

    fn get_status(&self) -> DriverStatus {
        self.status.clone()
    }

    fn shutdown(&mut self) -> Result<(), DriverError> {
        debug!("Shutting down Mcp3008Driver");
        self.status = DriverStatus::Stopped;
        Ok(())
    }
}
