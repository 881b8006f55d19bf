//! Signal-processing core for the pulse daemon
//!
//! Averaged ADC samples flow through a two-stage exponential filter that
//! zero-centers the waveform, a threshold-crossing peak detector with a
//! refractory debounce, and a fixed-window smoother whose running mean is
//! the published BPM estimate. All state is single-owner and mutated only
//! by [`PulsePipeline::tick`]; monotonic time is injected so the chain is
//! deterministic under test.

pub mod conditioner;
pub mod detector;
pub mod pipeline;
pub mod smoother;

pub use conditioner::SignalConditioner;
pub use detector::PeakDetector;
pub use pipeline::PulsePipeline;
pub use smoother::BpmSmoother;

/// Weight of the previous estimate in the fast signal filter
/// (effective window ~10 samples).
pub const FILTER_ALPHA: f32 = 0.9;

/// Weight of the previous estimate in the slow baseline filter
/// (effective window ~1000 samples).
pub const BASELINE_BETA: f32 = 0.999;

/// Nominal resting ADC level the baseline starts from.
pub const RESTING_LEVEL: f32 = 2000.0;

/// Relative-signal floor a sample must clear to count as rising.
pub const RISE_THRESHOLD: f32 = 80.0;

/// Minimum peak magnitude for a falling edge to become a candidate beat.
pub const PEAK_THRESHOLD: f32 = 150.0;

/// Minimum spacing between accepted beats; bounds the maximum detectable
/// rate and prevents double-counting one pulse edge.
pub const REFRACTORY_MS: u64 = 600;

/// Lowest instantaneous BPM accepted into the history window.
pub const BPM_MIN: u32 = 60;

/// Highest instantaneous BPM accepted into the history window.
pub const BPM_MAX: u32 = 89;

/// Accepted beats averaged into the published estimate.
pub const HISTORY_LEN: usize = 10;
