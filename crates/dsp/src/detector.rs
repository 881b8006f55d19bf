//! Threshold-crossing beat detection
//!
//! Not a morphological peak finder: "signal stops increasing while above
//! the rise floor, having peaked past the amplitude threshold" stands in
//! for the systolic peak. Candidates are then debounced against the
//! refractory window and the acceptance band; rejected candidates are
//! dropped silently, downstream consumers only ever see the estimate not
//! updating.

use crate::{BPM_MAX, BPM_MIN, PEAK_THRESHOLD, REFRACTORY_MS, RISE_THRESHOLD};

#[derive(Debug, Clone)]
pub struct PeakDetector {
    rising: bool,
    peak: f32,
    last_signal: f32,
    last_beat_ms: Option<u64>,
}

impl PeakDetector {
    pub fn new() -> Self {
        Self {
            rising: false,
            peak: 0.0,
            last_signal: 0.0,
            last_beat_ms: None,
        }
    }

    /// Evaluate one conditioned sample at monotonic time `now_ms`.
    ///
    /// Returns the instantaneous BPM of an accepted beat, `None` otherwise.
    pub fn update(&mut self, relative: f32, now_ms: u64) -> Option<u32> {
        let mut accepted = None;

        if relative > self.last_signal && relative > RISE_THRESHOLD {
            self.rising = true;
            if relative > self.peak {
                self.peak = relative;
            }
        } else if relative < self.last_signal && self.rising && self.peak > PEAK_THRESHOLD {
            accepted = self.evaluate_candidate(now_ms);
            // Rearm unconditionally, whether or not the candidate survived.
            self.rising = false;
            self.peak = 0.0;
        }

        self.last_signal = relative;
        accepted
    }

    fn evaluate_candidate(&mut self, now_ms: u64) -> Option<u32> {
        let prev = match self.last_beat_ms {
            Some(prev) => prev,
            None => {
                // The first beat only anchors the interval clock.
                self.last_beat_ms = Some(now_ms);
                return None;
            }
        };

        let interval = now_ms - prev;
        if interval <= REFRACTORY_MS {
            return None;
        }

        let bpm = (60_000 / interval) as u32;
        if (BPM_MIN..=BPM_MAX).contains(&bpm) {
            self.last_beat_ms = Some(now_ms);
            Some(bpm)
        } else {
            // Out-of-band candidates leave the anchor untouched.
            None
        }
    }
}

impl Default for PeakDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drive one rise-then-fall pulse whose falling edge lands at `at_ms`.
    fn pulse(detector: &mut PeakDetector, at_ms: u64) -> Option<u32> {
        assert_eq!(detector.update(200.0, at_ms.saturating_sub(2)), None);
        assert_eq!(detector.update(300.0, at_ms.saturating_sub(1)), None);
        let result = detector.update(100.0, at_ms);
        detector.update(0.0, at_ms + 1);
        result
    }

    #[test]
    fn first_beat_anchors_without_estimate() {
        let mut detector = PeakDetector::new();
        assert_eq!(pulse(&mut detector, 700), None);
        // The anchor is live: the next beat produces an interval from it.
        assert_eq!(pulse(&mut detector, 1400), Some(85));
    }

    #[test]
    fn refractory_rejects_close_beats() {
        let mut detector = PeakDetector::new();
        pulse(&mut detector, 700);
        // 500 ms after the anchor: inside the refractory window.
        assert_eq!(pulse(&mut detector, 1200), None);
        // The anchor did not move, so 1400 still reads as a 700 ms interval.
        assert_eq!(pulse(&mut detector, 1400), Some(85));
    }

    #[test]
    fn interval_at_refractory_boundary_is_rejected() {
        let mut detector = PeakDetector::new();
        pulse(&mut detector, 1000);
        assert_eq!(pulse(&mut detector, 1600), None);
    }

    #[test]
    fn out_of_band_candidate_leaves_anchor_untouched() {
        let mut detector = PeakDetector::new();
        pulse(&mut detector, 1000);
        // 650 ms interval: 92 BPM, above the band. Discarded.
        assert_eq!(pulse(&mut detector, 1650), None);
        // Interval still measured from 1000: 1000 ms, 60 BPM, in band.
        assert_eq!(pulse(&mut detector, 2000), Some(60));
    }

    #[test]
    fn band_edges_are_inclusive() {
        let mut detector = PeakDetector::new();
        pulse(&mut detector, 1000);
        // 1000 ms interval: exactly 60 BPM.
        assert_eq!(pulse(&mut detector, 2000), Some(60));
        // 674 ms interval: 60000 / 674 = 89.
        assert_eq!(pulse(&mut detector, 2674), Some(89));
    }

    #[test]
    fn rise_below_floor_never_arms() {
        let mut detector = PeakDetector::new();
        detector.update(50.0, 0);
        detector.update(70.0, 1);
        // Falling edge, but the detector never armed.
        assert_eq!(detector.update(10.0, 2), None);
    }

    #[test]
    fn small_peak_is_not_a_candidate() {
        let mut detector = PeakDetector::new();
        // Rises past the floor but peaks below the amplitude threshold.
        detector.update(100.0, 0);
        detector.update(120.0, 1);
        assert_eq!(detector.update(50.0, 2), None);
        // No anchor was set: a later full pulse is still the first beat.
        assert_eq!(pulse(&mut detector, 700), None);
    }

    #[test]
    fn state_resets_after_rejected_candidate() {
        let mut detector = PeakDetector::new();
        pulse(&mut detector, 700);
        pulse(&mut detector, 1200); // refractory reject
        assert!(!detector.rising);
        assert_eq!(detector.peak, 0.0);
    }

    #[test]
    fn flat_signal_updates_last_signal_only() {
        let mut detector = PeakDetector::new();
        detector.update(200.0, 0);
        assert!(detector.rising);
        // Equal to last_signal: neither rising nor falling branch runs.
        detector.update(200.0, 1);
        assert!(detector.rising);
        assert_eq!(detector.last_signal, 200.0);
    }
}
