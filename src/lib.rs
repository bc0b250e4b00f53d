// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! NearBuy Agent: background location reporting for geo alerts
//!
//! This crate implements the client-side pipeline that forwards location
//! fixes to the NearBuy backend: permission negotiation with an ask-once
//! policy, fix de-duplication, credential-gated reporting, push token
//! registration, and geo-alert notifications. Geofencing itself is
//! computed server-side.

pub mod config;
pub mod error;
pub mod models;
pub mod platform;
pub mod services;
pub mod store;

use config::Config;
use platform::{DialogService, LocationService, NotificationService};
use services::{Backend, LocationReporter, PermissionNegotiator, PushRegistrar};
use std::sync::Arc;
use store::CredentialStore;

/// Assembled agent: the reporting pipeline plus its collaborators.
pub struct Agent {
    pub config: Config,
    pub reporter: Arc<LocationReporter>,
    pub negotiator: PermissionNegotiator,
    pub push: PushRegistrar,
}

impl Agent {
    /// Wire the pipeline from a configuration and platform services.
    pub fn new(
        config: Config,
        location: Arc<dyn LocationService>,
        notifications: Arc<dyn NotificationService>,
        dialogs: Arc<dyn DialogService>,
        store: Arc<dyn CredentialStore>,
        backend: Arc<dyn Backend>,
    ) -> Self {
        let reporter = Arc::new(LocationReporter::new(
            &config,
            Arc::clone(&location),
            Arc::clone(&notifications),
            Arc::clone(&dialogs),
            Arc::clone(&store),
            Arc::clone(&backend),
        ));
        let negotiator = PermissionNegotiator::new(location, Arc::clone(&dialogs), Arc::clone(&store));
        let push = PushRegistrar::new(notifications, dialogs, store, backend);

        Self {
            config,
            reporter,
            negotiator,
            push,
        }
    }

    /// Start the background location reporter.
    pub async fn start(&self) -> error::Result<()> {
        Arc::clone(&self.reporter).start().await
    }

    /// Stop the background location reporter.
    pub async fn stop(&self) -> error::Result<()> {
        self.reporter.stop().await
    }
}
