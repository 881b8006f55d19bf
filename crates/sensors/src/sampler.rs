//! Oversampling front end
//!
//! One logical sample is the arithmetic mean of a short burst of raw ADC
//! reads; the averaging suppresses conversion noise before any filtering
//! downstream sees the value.

use std::thread;
use std::time::Duration;

use pulse_types::SensorError;

use crate::types::PulseDriver;

/// Raw reads averaged into one logical sample.
pub const OVERSAMPLE_READS: u32 = 20;

/// Pause between consecutive raw reads within a burst.
pub const READ_PAUSE: Duration = Duration::from_micros(50);

/// Turns bursts of raw driver reads into averaged samples.
///
/// Owns the driver; the burst loop is the only latency source inside a
/// processing tick.
pub struct Sampler {
    driver: Box<dyn PulseDriver>,
}

impl Sampler {
    pub fn new(driver: Box<dyn PulseDriver>) -> Self {
        Self { driver }
    }

    /// Read [`OVERSAMPLE_READS`] raw values and return their mean,
    /// truncated to integer.
    pub fn sample(&mut self) -> Result<i32, SensorError> {
        let mut sum: u32 = 0;
        for _ in 0..OVERSAMPLE_READS {
            sum += u32::from(self.driver.read_raw()?);
            thread::sleep(READ_PAUSE);
        }
        Ok((sum / OVERSAMPLE_READS) as i32)
    }

    /// Shut the underlying driver down.
    pub fn shutdown(&mut self) -> Result<(), crate::types::DriverError> {
        self.driver.shutdown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DriverError, DriverStatus};

    /// Driver that replays a scripted sequence of readings.
    struct ScriptedDriver {
        readings: Vec<u16>,
        cursor: usize,
        fail_at: Option<usize>,
    }

    impl ScriptedDriver {
        fn new(readings: Vec<u16>) -> Self {
            Self {
                readings,
                cursor: 0,
                fail_at: None,
            }
        }
    }

    impl PulseDriver for ScriptedDriver {
        fn initialize(&mut self) -> Result<(), DriverError> {
            Ok(())
        }

        fn read_raw(&mut self) -> Result<u16, SensorError> {
            if self.fail_at == Some(self.cursor) {
                return Err(SensorError::Disconnected);
            }
            let value = self.readings[self.cursor % self.readings.len()];
            self.cursor += 1;
            Ok(value)
        }

        fn get_status(&self) -> DriverStatus {
            DriverStatus::Ok
        }

        fn shutdown(&mut self) -> Result<(), DriverError> {
            Ok(())
        }
    }

    #[test]
    fn sample_averages_one_burst() {
        let mut sampler = Sampler::new(Box::new(ScriptedDriver::new(vec![2000])));
        assert_eq!(sampler.sample().unwrap(), 2000);
    }

    #[test]
    fn sample_truncates_toward_zero() {
        // 10 reads of 2000 and 10 of 2001: mean 2000.5, truncated to 2000.
        let mut readings = vec![2000u16; 10];
        readings.extend(vec![2001u16; 10]);
        let mut sampler = Sampler::new(Box::new(ScriptedDriver::new(readings)));
        assert_eq!(sampler.sample().unwrap(), 2000);
    }

    #[test]
    fn sample_propagates_read_errors() {
        let mut driver = ScriptedDriver::new(vec![2000]);
        driver.fail_at = Some(5);
        let mut sampler = Sampler::new(Box::new(driver));
        assert!(sampler.sample().is_err());
    }
}
