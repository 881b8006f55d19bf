//! Common types and traits for pulse-sensor drivers

use pulse_types::SensorError;
use thiserror::Error;

/// Status of a sensor driver
#[derive(Debug, Clone, PartialEq)]
pub enum DriverStatus {
    /// Driver is not initialized
    NotInitialized,
    /// Driver is initialized and ready
    Ok,
    /// Driver is actively serving reads
    Running,
    /// Driver has been shut down
    Stopped,
}

/// Errors that can occur in sensor drivers
#[derive(Error, Debug, Clone)]
pub enum DriverError {
    /// A sensor-specific error.
    #[error("Sensor error: {0}")]
    SensorError(#[from] SensorError),
    /// SPI communication error
    #[error("SPI error: {0}")]
    SpiError(String),
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    /// Driver not initialized
    #[error("Driver not initialized")]
    NotInitialized,
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
    /// Generic error
    #[error("Error: {0}")]
    Other(String),
}

/// Trait that all pulse-sensor drivers must implement
pub trait PulseDriver: Send + 'static {
    /// Initialize the driver and underlying hardware.
    fn initialize(&mut self) -> Result<(), DriverError>;

    /// Read one raw ADC value from the sensor.
    ///
    /// Blocks for the duration of a single conversion. The read path is
    /// expected to succeed on healthy hardware; errors here mean the
    /// sensor is gone, not that the signal is noisy.
    fn read_raw(&mut self) -> Result<u16, SensorError>;

    /// Get current driver status
    fn get_status(&self) -> DriverStatus;

    /// Shutdown the driver and clean up resources
    fn shutdown(&mut self) -> Result<(), DriverError>;
}

#[cfg(feature = "mcp3008")]
impl From<rppal::spi::Error> for DriverError {
    fn from(err: rppal::spi::Error) -> Self {
        DriverError::SpiError(err.to_string())
    }
}

impl From<std::io::Error> for DriverError {
    fn from(err: std::io::Error) -> Self {
        DriverError::IoError(err.to_string())
    }
}
