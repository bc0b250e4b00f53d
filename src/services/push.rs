// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! Device push token registration.
//!
//! Safe to invoke repeatedly per session; the backend upsert is
//! idempotent, so no local persistence of the token is needed.

use crate::platform::{DialogService, NotificationChannel, NotificationService};
use crate::services::api::Backend;
use crate::store::{keys, CredentialStore};
use std::sync::Arc;

/// Registers the device push token with the backend.
pub struct PushRegistrar {
    notifications: Arc<dyn NotificationService>,
    dialogs: Arc<dyn DialogService>,
    store: Arc<dyn CredentialStore>,
    backend: Arc<dyn Backend>,
}

impl PushRegistrar {
    pub fn new(
        notifications: Arc<dyn NotificationService>,
        dialogs: Arc<dyn DialogService>,
        store: Arc<dyn CredentialStore>,
        backend: Arc<dyn Backend>,
    ) -> Self {
        Self {
            notifications,
            dialogs,
            store,
            backend,
        }
    }

    /// Register this device for push notifications.
    ///
    /// Returns the device push token, or `None` when permission is denied
    /// or no token could be obtained. Neither case schedules a retry.
    pub async fn register(&self) -> Option<String> {
        let mut status = self.notifications.permission().await;
        if !status.is_granted() {
            status = self.notifications.request_permission().await;
        }
        if !status.is_granted() {
            self.dialogs.alert(
                "Permission denied",
                "Enable push notifications in settings.",
            );
            return None;
        }

        let token = match self.notifications.device_push_token().await {
            Ok(token) => token,
            Err(e) => {
                tracing::debug!(error = %e, "No device push token available");
                return None;
            }
        };

        // Signed-out sessions keep the token local; registration happens
        // on the next signed-in attempt
        if let Some(access_token) = self.store.get(keys::ACCESS_TOKEN).await {
            if let Err(e) = self
                .backend
                .register_device_token(&access_token, &token)
                .await
            {
                tracing::warn!(error = %e, "Failed to register push token with backend");
            }
        }

        if let Err(e) = self
            .notifications
            .ensure_channel(NotificationChannel::default_channel())
            .await
        {
            tracing::warn!(error = %e, "Failed to ensure default notification channel");
        }

        Some(token)
    }
}
