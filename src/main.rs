// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! NearBuy Agent daemon
//!
//! Headless location-reporting agent: reads fixes from gpsd, forwards
//! them to the NearBuy backend, and surfaces geo alerts as structured-log
//! notifications.

use nearbuy_agent::{
    config::Config,
    platform::{ConsoleDialogService, ConsoleNotificationService, DialogService,
        GpsdLocationService},
    services::BackendClient,
    store::SealedFileStore,
    Agent,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        api = %config.api_base_url,
        gpsd = %config.gpsd_addr,
        "Starting NearBuy agent"
    );

    // Open the sealed credential store
    let store = Arc::new(
        SealedFileStore::open(&config.store_path, &config.store_secret)
            .await
            .expect("Failed to open credential store"),
    );
    tracing::info!(path = %config.store_path.display(), "Credential store opened");

    // Platform services for a headless host
    let location = Arc::new(GpsdLocationService::new(
        &config.gpsd_addr,
        config.allow_background,
    ));
    let notifications = Arc::new(ConsoleNotificationService);
    let dialogs: Arc<ConsoleDialogService> = Arc::new(ConsoleDialogService);

    let backend = Arc::new(BackendClient::new(&config.api_base_url));

    let agent = Agent::new(
        config,
        location,
        notifications,
        Arc::clone(&dialogs) as Arc<dyn DialogService>,
        store,
        backend,
    );

    // The explanatory background-permission prompt is shown at most once
    // per install
    if !agent.negotiator.was_asked_for_background().await {
        dialogs.alert(
            "Background location",
            "NearBuy uses your location in the background to alert you near stores that carry your items.",
        );
        agent.negotiator.mark_asked_for_background().await;
    }

    agent
        .start()
        .await
        .expect("Failed to start location reporter");

    if agent.push.register().await.is_none() {
        tracing::debug!("Push registration skipped on this host");
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    if let Err(e) = agent.stop().await {
        tracing::warn!(error = %e, "Failed to stop location reporter");
    }
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nearbuy_agent=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
