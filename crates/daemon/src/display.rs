//! Local display surface
//!
//! Purely presentational: a periodic task renders the latest estimate and
//! the service address through a [`DisplaySurface`]. Nothing here feeds
//! back into pipeline state.

use std::net::SocketAddr;
use tokio::sync::watch;
use tokio::time::{interval, Duration};

/// What the display shows on each refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFrame {
    /// Current estimate; zero means no stable estimate yet.
    pub bpm: u32,
    /// Address the query interface is reachable at.
    pub addr: SocketAddr,
}

/// Rendering seam for the local display hardware.
pub trait DisplaySurface: Send {
    fn render(&mut self, frame: &DisplayFrame);
}

/// Surface that writes frames through the logger; stands in where no
/// panel is attached.
pub struct ConsoleDisplay;

impl DisplaySurface for ConsoleDisplay {
    fn render(&mut self, frame: &DisplayFrame) {
        if frame.bpm > 0 {
            tracing::info!(addr = %frame.addr, bpm = frame.bpm, "display refresh");
        } else {
            tracing::info!(addr = %frame.addr, bpm = "---", "display refresh");
        }
    }
}

/// Refresh the surface every `refresh_ms` until the task is aborted.
pub async fn run(
    mut surface: Box<dyn DisplaySurface>,
    bpm_rx: watch::Receiver<u32>,
    addr: SocketAddr,
    refresh_ms: u64,
) {
    let mut ticker = interval(Duration::from_millis(refresh_ms));
    loop {
        ticker.tick().await;
        let frame = DisplayFrame {
            bpm: *bpm_rx.borrow(),
            addr,
        };
        surface.render(&frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Surface that records every frame it was asked to draw.
    struct RecordingSurface {
        frames: Arc<Mutex<Vec<DisplayFrame>>>,
    }

    impl DisplaySurface for RecordingSurface {
        fn render(&mut self, frame: &DisplayFrame) {
            self.frames.lock().unwrap().push(*frame);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_task_renders_latest_estimate() {
        let (tx, rx) = watch::channel(0u32);
        let frames = Arc::new(Mutex::new(Vec::new()));
        let surface = RecordingSurface {
            frames: frames.clone(),
        };
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();

        let task = tokio::spawn(run(Box::new(surface), rx, addr, 500));

        // First refresh fires immediately; the second sees the new value.
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(85).unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;
        task.abort();

        let frames = frames.lock().unwrap();
        assert!(frames.first().is_some_and(|f| f.bpm == 0));
        assert!(frames.last().is_some_and(|f| f.bpm == 85));
        assert!(frames.iter().all(|f| f.addr == addr));
    }
}
