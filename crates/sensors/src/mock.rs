//! Mock pulse driver
//!
//! Produces a synthetic PPG-like waveform in real time: a resting ADC
//! level with a sharp systolic upstroke, a smaller dicrotic bump, slow
//! ambient drift, and conversion noise. Used with `--mock` and in tests
//! where no analog front end is present.

use std::time::Instant;

use log::{debug, info};
use rand::Rng;

use pulse_types::SensorError;

use crate::types::{DriverError, DriverStatus, PulseDriver};

/// Resting ADC level the waveform oscillates around.
const RESTING_LEVEL: f32 = 2000.0;
/// Peak height of the systolic upstroke above the resting level.
const SYSTOLIC_AMPLITUDE: f32 = 650.0;
/// Peak height of the dicrotic bump.
const DICROTIC_AMPLITUDE: f32 = 180.0;
/// Peak-to-peak conversion noise.
const NOISE_AMPLITUDE: f32 = 30.0;
/// Full-scale of the simulated 12-bit converter.
const ADC_FULL_SCALE: f32 = 4095.0;

/// A driver that synthesizes a pulse waveform instead of touching hardware.
pub struct MockDriver {
    started: Instant,
    beat_period_ms: f32,
    status: DriverStatus,
}

impl MockDriver {
    /// Create a mock driver beating at the default 72 BPM.
    pub fn new() -> Self {
        Self::with_bpm(72.0)
    }

    /// Create a mock driver beating at `bpm`.
    pub fn with_bpm(bpm: f32) -> Self {
        info!("MockDriver created, synthetic rate {} BPM", bpm);
        Self {
            started: Instant::now(),
            beat_period_ms: 60_000.0 / bpm,
            status: DriverStatus::NotInitialized,
        }
    }

    /// Noise-free waveform value at `t_ms` milliseconds since start.
    fn waveform_at(&self, t_ms: f32) -> f32 {
        // Normalized position within the current beat, [0, 1).
        let phase = (t_ms % self.beat_period_ms) / self.beat_period_ms;

        let systolic = gaussian_bump(phase, 0.12, 0.045) * SYSTOLIC_AMPLITUDE;
        let dicrotic = gaussian_bump(phase, 0.40, 0.080) * DICROTIC_AMPLITUDE;

        // Slow ambient drift the baseline filter is expected to absorb.
        let drift = 40.0 * (t_ms / 30_000.0 * std::f32::consts::TAU).sin();

        RESTING_LEVEL + systolic + dicrotic + drift
    }
}

fn gaussian_bump(phase: f32, center: f32, width: f32) -> f32 {
    let d = phase - center;
    (-d * d / (2.0 * width * width)).exp()
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseDriver for MockDriver {
    fn initialize(&mut self) -> Result<(), DriverError> {
        // No hardware to bring up.
        self.status = DriverStatus::Ok;
        Ok(())
    }

    fn read_raw(&mut self) -> Result<u16, SensorError> {
        self.status = DriverStatus::Running;

        let t_ms = self.started.elapsed().as_secs_f32() * 1000.0;
        let noise = (rand::thread_rng().gen::<f32>() - 0.5) * NOISE_AMPLITUDE;
        let value = (self.waveform_at(t_ms) + noise).clamp(0.0, ADC_FULL_SCALE);

        Ok(value as u16)
    }

    fn get_status(&self) -> DriverStatus {
        self.status.clone()
    }

    fn shutdown(&mut self) -> Result<(), DriverError> {
        debug!("Shutting down MockDriver");
        self.status = DriverStatus::Stopped;
        Ok(())
    }
}
