//! The per-tick processing chain
//!
//! One tick = condition the averaged sample, evaluate the detector, fold
//! any accepted beat into the smoother. The pipeline owns every piece of
//! mutable state; callers inject the monotonic clock reading, which keeps
//! the whole chain deterministic for a given input sequence.

use tracing::debug;

use crate::{BpmSmoother, PeakDetector, SignalConditioner};

#[derive(Debug, Clone)]
pub struct PulsePipeline {
    conditioner: SignalConditioner,
    detector: PeakDetector,
    smoother: BpmSmoother,
    current_bpm: u32,
}

impl PulsePipeline {
    pub fn new() -> Self {
        Self::with_conditioner(SignalConditioner::new())
    }

    /// Build a pipeline around a specific conditioning state, e.g. one
    /// already settled to a known resting level.
    pub fn with_conditioner(conditioner: SignalConditioner) -> Self {
        Self {
            conditioner,
            detector: PeakDetector::new(),
            smoother: BpmSmoother::new(),
            current_bpm: 0,
        }
    }

    /// Run one full pass and return the current estimate.
    ///
    /// The estimate only changes on ticks where a beat was accepted;
    /// every other tick returns the previous value.
    pub fn tick(&mut self, raw: i32, now_ms: u64) -> u32 {
        let relative = self.conditioner.update(raw);
        if let Some(instant_bpm) = self.detector.update(relative, now_ms) {
            self.current_bpm = self.smoother.record(instant_bpm);
            debug!(
                bpm = self.current_bpm,
                instant_bpm,
                signal = self.conditioner.filtered(),
                baseline = self.conditioner.baseline(),
                "beat accepted"
            );
        }
        self.current_bpm
    }

    /// The published estimate; zero until the window holds a beat.
    pub fn current_bpm(&self) -> u32 {
        self.current_bpm
    }
}

impl Default for PulsePipeline {
    fn default() -> Self {
        Self::new()
    }
}
