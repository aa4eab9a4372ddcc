//! Headless runner: ticks the world on a blocking thread and feeds contacts
//! to the reproduction coordinator.

mod contacts;
mod telemetry;

use anyhow::{Context, Result};
use gevo_core::SimulationConfig;
use gevo_world::{NullRegistry, Simulation, TileMap};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Contacts buffered between the tick thread and the coordinator
const CONTACT_CHANNEL_CAPACITY: usize = 4096;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let config = load_config()?;
    info!(
        seed = config.seed,
        num_ticks = config.num_ticks,
        min_population = config.population.min_population,
        "Starting gevo headless runner"
    );

    // Map layers get their own stream so they don't shift the population's
    let mut map_rng = ChaCha8Rng::seed_from_u64(config.seed ^ 0x5eed_0f_7113);
    let ponds = (config.world.width as usize * config.world.height as usize) / 256;
    let layers = TileMap::generate_layers(&config.world, &mut map_rng, ponds.max(1));
    let map = TileMap::from_layers(&config.world, &layers).context("failed to build tile map")?;

    let mut simulation = Simulation::new(config, Arc::new(map), Arc::new(NullRegistry))?;

    let (contact_tx, contact_rx) = mpsc::channel(CONTACT_CHANNEL_CAPACITY);
    let coordinator = tokio::spawn(simulation.reproduction_coordinator().run(contact_rx));

    let stop = Arc::new(AtomicBool::new(false));
    let mut ticks = {
        let stop = stop.clone();
        tokio::task::spawn_blocking(move || {
            simulation.run_with(&stop, |simulation, _| {
                for contact in contacts::detect(simulation.population()) {
                    if contact_tx.blocking_send(contact).is_err() {
                        warn!("Contact feed closed");
                        break;
                    }
                }
            })
        })
    };

    let result = tokio::select! {
        result = &mut ticks => result,
        _ = shutdown_signal() => {
            stop.store(true, Ordering::Relaxed);
            ticks.await
        }
    };
    let result = result.context("tick thread panicked")??;

    // The tick thread dropped its sender, so the coordinator drains and exits
    let handled = coordinator.await.context("coordinator task panicked")?;
    info!(contacts = handled, survivors = result.survivors.len(), "Runner finished");

    if let Ok(path) = std::env::var("GEVO_DUMP") {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(&path, json).with_context(|| format!("failed to write {}", path))?;
        info!(path = %path, "Wrote final population");
    }

    Ok(())
}

/// Config from the optional JSON path in the first argument, with
/// `GEVO_SEED` and `GEVO_TICKS` overrides on top.
fn load_config() -> Result<SimulationConfig> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_json_file(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => SimulationConfig::default(),
    };

    if let Ok(seed) = std::env::var("GEVO_SEED") {
        config.seed = seed.parse().context("GEVO_SEED must be an unsigned integer")?;
    }
    if let Ok(ticks) = std::env::var("GEVO_TICKS") {
        config.num_ticks = ticks.parse().context("GEVO_TICKS must be an unsigned integer")?;
    }

    config.validate()?;
    Ok(config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
