// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! Location permission negotiation.
//!
//! Denial is not an error here: every path returns a boolean and surfaces
//! a one-time explanatory dialog. The persisted ask-once flag keeps the
//! background prompt from being re-issued automatically for an install.

use crate::platform::{DialogService, LocationService};
use crate::store::{keys, CredentialStore};
use std::sync::Arc;

/// Negotiates foreground and background location grants with the platform.
pub struct PermissionNegotiator {
    location: Arc<dyn LocationService>,
    dialogs: Arc<dyn DialogService>,
    store: Arc<dyn CredentialStore>,
}

impl PermissionNegotiator {
    pub fn new(
        location: Arc<dyn LocationService>,
        dialogs: Arc<dyn DialogService>,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            location,
            dialogs,
            store,
        }
    }

    /// Ensure foreground permission, requesting it at most once.
    pub async fn ensure_foreground(&self) -> bool {
        if self.location.foreground_permission().await.is_granted() {
            return true;
        }
        if self
            .location
            .request_foreground_permission()
            .await
            .is_granted()
        {
            return true;
        }

        self.dialogs.alert(
            "Permission required",
            "Location permission is required for geo alerts.",
        );
        false
    }

    /// Ensure background/"always" permission, requesting it at most once.
    ///
    /// Only meaningful once foreground permission is granted; most
    /// platforms reject a background request made before that.
    pub async fn ensure_background(&self) -> bool {
        let status = self.location.background_permission().await;
        tracing::debug!(?status, "Background location permission status");
        if status.is_granted() {
            return true;
        }
        if self
            .location
            .request_background_permission()
            .await
            .is_granted()
        {
            return true;
        }

        self.dialogs.alert(
            "Permission required",
            "Background location permission is required for geo alerts.",
        );
        false
    }

    /// Ensure both grants, foreground first.
    ///
    /// Short-circuits without prompting when both are already present.
    pub async fn ensure_full(&self) -> bool {
        if self.location.foreground_permission().await.is_granted()
            && self.location.background_permission().await.is_granted()
        {
            return true;
        }

        if !self.ensure_foreground().await {
            tracing::warn!("User denied foreground location permission");
            return false;
        }
        if !self.ensure_background().await {
            tracing::warn!("User denied background location permission");
            return false;
        }
        true
    }

    /// Whether the background prompt was already issued for this install.
    pub async fn was_asked_for_background(&self) -> bool {
        self.store.get(keys::ASKED_BG_PERM).await.as_deref() == Some("true")
    }

    /// Record that the background prompt has been issued.
    ///
    /// Once set, the prompt is never re-issued automatically.
    pub async fn mark_asked_for_background(&self) {
        if let Err(e) = self.store.save(keys::ASKED_BG_PERM, "true").await {
            tracing::warn!(error = %e, "Failed to persist ask-once flag");
        }
    }
}
