//! Acquisition loop
//!
//! A dedicated thread drives the sampler and the processing chain
//! back-to-back; the burst inside `Sampler::sample` is the only latency
//! source per tick. The thread is the sole owner of pipeline state, and
//! everything downstream observes it through the watch channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;

use pulse_dsp::PulsePipeline;
use sensors::Sampler;
use tokio::sync::watch;

/// Ticks run at startup to settle the filters before estimates are
/// published.
const WARMUP_TICKS: u32 = 50;

/// Spawn the acquisition thread.
///
/// The thread runs until `stop` is raised, every consumer of `bpm_tx`
/// is gone, or the sensor read path fails.
pub fn spawn(
    mut sampler: Sampler,
    bpm_tx: watch::Sender<u32>,
    stop: Arc<AtomicBool>,
) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("acquisition".into())
        .spawn(move || {
            let started = Instant::now();
            let mut pipeline = PulsePipeline::new();

            for _ in 0..WARMUP_TICKS {
                if stop.load(Ordering::Relaxed) {
                    return;
                }
                match sampler.sample() {
                    Ok(raw) => {
                        pipeline.tick(raw, started.elapsed().as_millis() as u64);
                    }
                    Err(e) => {
                        tracing::error!("Sensor read failed during warm-up: {}", e);
                        return;
                    }
                }
            }
            tracing::info!("Warm-up complete, publishing estimates");

            while !stop.load(Ordering::Relaxed) {
                let raw = match sampler.sample() {
                    Ok(raw) => raw,
                    Err(e) => {
                        tracing::error!("Sensor read failed, stopping acquisition: {}", e);
                        break;
                    }
                };
                let bpm = pipeline.tick(raw, started.elapsed().as_millis() as u64);
                if bpm_tx.send(bpm).is_err() {
                    // Every receiver dropped; no one is listening anymore.
                    break;
                }
            }

            if let Err(e) = sampler.shutdown() {
                tracing::warn!("Driver shutdown failed: {}", e);
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensors::MockDriver;

    #[test]
    fn stop_flag_terminates_the_loop() {
        let (tx, _rx) = watch::channel(0u32);
        let stop = Arc::new(AtomicBool::new(false));

        let sampler = Sampler::new(Box::new(MockDriver::new()));
        let handle = spawn(sampler, tx, stop.clone()).unwrap();

        std::thread::sleep(std::time::Duration::from_millis(100));
        stop.store(true, Ordering::Relaxed);
        handle.join().unwrap();
    }

    #[test]
    fn dropping_all_receivers_terminates_the_loop() {
        let (tx, rx) = watch::channel(0u32);
        let stop = Arc::new(AtomicBool::new(false));

        let sampler = Sampler::new(Box::new(MockDriver::new()));
        let handle = spawn(sampler, tx, stop).unwrap();

        drop(rx);
        handle.join().unwrap();
    }
}
