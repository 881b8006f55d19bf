//! Pulse-sensor drivers and the oversampling front end
//!
//! The daemon talks to hardware exclusively through the [`PulseDriver`]
//! trait; [`Sampler`] sits on top of a driver and turns bursts of raw ADC
//! reads into one averaged sample per invocation.

pub mod mock;
pub mod sampler;
pub mod types;

#[cfg(feature = "mcp3008")]
pub mod mcp3008;

pub use mock::MockDriver;
pub use sampler::Sampler;
pub use types::{DriverError, DriverStatus, PulseDriver};
