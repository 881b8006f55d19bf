use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use clap::{Arg, Command};
use pulse_daemon::{
    api::AppState,
    config::{self, DaemonConfig},
    display::{self, ConsoleDisplay},
    runner, server,
};
use pulse_types::DriverType;
use sensors::{MockDriver, PulseDriver, Sampler};
use tokio::sync::{oneshot, watch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulse_daemon=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Pulse daemon starting...");

    // --- Argument Parsing ---
    let matches = Command::new("pulse_daemon")
        .about("PPG heart-rate acquisition daemon")
        .arg(
            Arg::new("mock")
                .long("mock")
                .action(clap::ArgAction::SetTrue)
                .help("Use a synthetic pulse waveform instead of real hardware"),
        )
        .get_matches();

    let config = config::load_config("./config.json");

    // --- Driver Initialization ---
    let use_mock = matches.get_flag("mock") || config.driver_type == DriverType::Mock;
    let driver: Box<dyn PulseDriver> = if use_mock {
        tracing::info!("Using mock pulse driver");
        let mut driver = MockDriver::new();
        driver.initialize()?;
        Box::new(driver)
    } else {
        tracing::info!("Using MCP3008 hardware driver");
        build_hardware_driver(&config)?
    };
    let sampler = Sampler::new(driver);

    // --- Acquisition Loop ---
    let (bpm_tx, bpm_rx) = watch::channel(0u32);
    let stop = Arc::new(AtomicBool::new(false));
    let acquisition_handle = runner::spawn(sampler, bpm_tx, stop.clone())?;

    // --- Server and Display ---
    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let display_handle = tokio::spawn(display::run(
        Box::new(ConsoleDisplay),
        bpm_rx.clone(),
        local_addr,
        config.display_refresh_ms,
    ));

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let server_handle = tokio::spawn(server::run(AppState { bpm_rx }, listener, shutdown_rx));

    // --- Graceful Shutdown ---
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received. Stopping services...");

    stop.store(true, Ordering::Relaxed);
    let _ = shutdown_tx.send(());
    display_handle.abort();
    server_handle.await??;
    if acquisition_handle.join().is_err() {
        tracing::error!("Acquisition thread panicked during shutdown");
    }

    tracing::info!("Pulse daemon stopped gracefully.");
    Ok(())
}

#[cfg(feature = "mcp3008")]
fn build_hardware_driver(_config: &DaemonConfig) -> anyhow::Result<Box<dyn PulseDriver>> {
    let mut driver = sensors::mcp3008::Mcp3008Driver::new(0, 0, 0)?;
    driver.initialize()?;
    Ok(Box::new(driver))
}

#[cfg(not(feature = "mcp3008"))]
fn build_hardware_driver(_config: &DaemonConfig) -> anyhow::Result<Box<dyn PulseDriver>> {
    anyhow::bail!("Hardware support was not compiled in; rebuild with --features mcp3008 or run with --mock")
}
