//! # homecam
//!
//! Smart-home camera accessory binary.
//!
//! ## Overview
//!
//! Builds the [`Camera`] delegate and holds it ready for the
//! accessory-hosting framework, which drives the streaming hooks:
//! - `start_stream` / `stop_stream` per negotiated session
//! - `snapshot` for still captures
//!
//! The process runs until SIGTERM or ctrl-c, then stops every live
//! pipeline before exiting so no process group is left behind.

use homecam::Camera;
use homecam_core::AccessoryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Optional config file path as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            AccessoryConfig::from_file(&path)?
        }
        None => AccessoryConfig::default(),
    };

    tracing::info!(
        "homecam accessory '{}' starting: {} resolutions advertised, srtp={}",
        config.accessory.name,
        config.video.resolutions.len(),
        config.video.srtp
    );

    let camera = Camera::new(config);

    // Run until the host asks us to stop
    wait_for_shutdown().await?;

    tracing::info!("Shutting down");
    camera.shutdown().await;
    tracing::info!("homecam accessory stopped");

    Ok(())
}

/// Wait for SIGTERM or ctrl-c.
async fn wait_for_shutdown() -> anyhow::Result<()> {
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received ctrl-c");
        }
        _ = sigterm.recv() => {
            tracing::info!("Received SIGTERM");
        }
    }

    Ok(())
}
