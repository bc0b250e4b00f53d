// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! Background location reporter.
//!
//! The reporter owns the de-duplication cursor and the report pipeline:
//! accept a fix, gate on stored credentials, submit it to the backend, and
//! fan returned geo alerts out as local notifications. Registration state
//! lives in the platform location service; `start` and `stop` are
//! idempotent.
//!
//! Nothing here is allowed to panic or propagate an error into the
//! platform callback: a crash would silently deregister all future
//! invocations.

use crate::config::{
    Config, LOCATION_TASK_NAME, TRACKING_NOTICE_BODY, TRACKING_NOTICE_COLOR,
    TRACKING_NOTICE_TITLE,
};
use crate::error::Result;
use crate::models::LocationFix;
use crate::platform::{
    Accuracy, DialogService, FixSink, ForegroundNotice, LocalNotification, LocationService,
    NotificationService, UpdateOptions,
};
use crate::services::api::{Backend, LocationUpdate};
use crate::services::permissions::PermissionNegotiator;
use crate::store::{keys, CredentialStore};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};

/// What a single batch invocation did.
///
/// The pipeline swallows all failures at its outer boundary; this enum
/// keeps the silent paths observable in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Report submitted; carries the number of alerts surfaced
    Reported { alerts: usize },
    /// Fix arrived inside the dedup window and was dropped
    DuplicateDropped,
    /// Platform delivered an empty batch
    EmptyBatch,
    /// Credentials missing; the user is signed out
    NotAuthenticated,
}

/// Decide whether a fix at `timestamp_ms` is accepted given the previous
/// accepted timestamp, advancing the cursor on accept.
///
/// The first fix is always accepted.
pub fn accept_fix(last_accepted_ms: &mut Option<i64>, timestamp_ms: i64, window_ms: i64) -> bool {
    if let Some(prev) = *last_accepted_ms {
        if timestamp_ms - prev < window_ms {
            return false;
        }
    }
    *last_accepted_ms = Some(timestamp_ms);
    true
}

/// The background location-reporting task.
pub struct LocationReporter {
    location: Arc<dyn LocationService>,
    notifications: Arc<dyn NotificationService>,
    backend: Arc<dyn Backend>,
    store: Arc<dyn CredentialStore>,
    negotiator: PermissionNegotiator,
    options: UpdateOptions,
    dedup_window_ms: i64,
    /// Timestamp of the last accepted fix. Per-instance so independent
    /// reporters and deterministic test resets work.
    last_accepted_ms: Mutex<Option<i64>>,
}

impl LocationReporter {
    pub fn new(
        config: &Config,
        location: Arc<dyn LocationService>,
        notifications: Arc<dyn NotificationService>,
        dialogs: Arc<dyn DialogService>,
        store: Arc<dyn CredentialStore>,
        backend: Arc<dyn Backend>,
    ) -> Self {
        let negotiator =
            PermissionNegotiator::new(Arc::clone(&location), dialogs, Arc::clone(&store));

        let options = UpdateOptions {
            task_name: LOCATION_TASK_NAME.to_string(),
            accuracy: Accuracy::Highest,
            time_interval_ms: config.report_interval_ms,
            distance_interval_m: 0,
            notice: ForegroundNotice {
                title: TRACKING_NOTICE_TITLE.to_string(),
                body: TRACKING_NOTICE_BODY.to_string(),
                color: TRACKING_NOTICE_COLOR.to_string(),
            },
        };

        Self {
            location,
            notifications,
            backend,
            store,
            negotiator,
            options,
            dedup_window_ms: config.dedup_window_ms,
            last_accepted_ms: Mutex::new(None),
        }
    }

    /// Register background updates.
    ///
    /// Permission denial is a valid terminal state and a silent no-op;
    /// the only observable signal is the absence of location reports.
    /// Already-registered updates are left alone.
    pub async fn start(self: Arc<Self>) -> Result<()> {
        if !self.negotiator.ensure_background().await {
            tracing::debug!("Background permission denied; reporter not registered");
            return Ok(());
        }

        if self.location.has_started().await {
            tracing::debug!("Background updates already registered");
            return Ok(());
        }

        self.location
            .start_updates(&self.options, Arc::clone(&self) as Arc<dyn FixSink>)
            .await?;
        tracing::info!(
            interval_ms = self.options.time_interval_ms,
            "Background location updates registered"
        );
        Ok(())
    }

    /// Unregister background updates. Idempotent.
    ///
    /// In-flight reports triggered by an already-delivered batch are not
    /// cancelled.
    pub async fn stop(&self) -> Result<()> {
        if self.location.has_started().await {
            self.location.stop_updates().await?;
            tracing::info!("Background location updates unregistered");
        }
        Ok(())
    }

    /// Process one platform delivery.
    ///
    /// Returns the outcome so the silent paths are testable; the
    /// `FixSink` adapter converts any `Err` into a logged no-op.
    pub async fn process_batch(
        &self,
        batch: Result<Vec<LocationFix>>,
    ) -> Result<ReportOutcome> {
        let fixes = batch?;

        // Batches are assumed chronological; only the first fix counts
        let Some(fix) = fixes.first().copied() else {
            return Ok(ReportOutcome::EmptyBatch);
        };

        {
            let mut last = self.last_accepted_ms.lock().expect("dedup cursor lock");
            if !accept_fix(&mut last, fix.timestamp_ms, self.dedup_window_ms) {
                return Ok(ReportOutcome::DuplicateDropped);
            }
        }

        // Credential gate: a signed-out user produces no network traffic.
        // The two reads are not atomic as a pair; a logout in between
        // still lands here safely.
        let Some(user_id) = self.store.get(keys::USER_ID).await else {
            return Ok(ReportOutcome::NotAuthenticated);
        };
        let Some(access_token) = self.store.get(keys::ACCESS_TOKEN).await else {
            return Ok(ReportOutcome::NotAuthenticated);
        };

        let update = LocationUpdate {
            user_id,
            latitude: fix.latitude,
            longitude: fix.longitude,
            timestamp: Utc::now(),
        };
        tracing::debug!(
            lat = fix.latitude,
            lon = fix.longitude,
            "Submitting location report"
        );

        let alerts = self
            .backend
            .post_location_update(&access_token, &update)
            .await?;

        for alert in &alerts {
            let notification = LocalNotification::immediate(
                alert.notification_title(),
                alert.notification_body(),
            );
            if let Err(e) = self.notifications.schedule(notification).await {
                tracing::warn!(
                    store = %alert.store_name,
                    error = %e,
                    "Failed to schedule alert notification"
                );
            }
        }

        Ok(ReportOutcome::Reported {
            alerts: alerts.len(),
        })
    }
}

#[async_trait]
impl FixSink for LocationReporter {
    /// Platform-facing adapter: absorbs every failure.
    async fn on_batch(&self, batch: Result<Vec<LocationFix>>) {
        match self.process_batch(batch).await {
            Ok(outcome) => tracing::debug!(?outcome, "Location batch handled"),
            Err(e) => tracing::warn!(error = %e, "Location batch failed"),
        }
    }
}
