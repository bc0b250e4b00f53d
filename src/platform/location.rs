// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! Platform location service interface.

use crate::error::Result;
use crate::models::LocationFix;
use crate::platform::PermissionStatus;
use async_trait::async_trait;
use std::sync::Arc;

/// Desired accuracy for location updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    Balanced,
    High,
    Highest,
}

/// Persistent notice the platform shows while background tracking runs.
///
/// Mobile platforms require this to keep continuous background tracking
/// alive.
#[derive(Debug, Clone)]
pub struct ForegroundNotice {
    pub title: String,
    pub body: String,
    /// Accent color as a hex string, e.g. "#007AFF"
    pub color: String,
}

/// Options for registering the background location task.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// Name the registration is keyed by
    pub task_name: String,
    pub accuracy: Accuracy,
    /// Minimum time between delivered fixes (ms); best-effort, the
    /// platform owns actual scheduling
    pub time_interval_ms: u64,
    /// Minimum distance between delivered fixes (meters); 0 means purely
    /// time-based triggering
    pub distance_interval_m: u32,
    pub notice: ForegroundNotice,
}

/// Receiver for fix batches delivered by the platform.
///
/// The platform serializes deliveries, but a new batch can arrive while
/// work triggered by a previous one is still in flight. A batch-level
/// platform failure arrives as `Err`.
#[async_trait]
pub trait FixSink: Send + Sync {
    async fn on_batch(&self, batch: Result<Vec<LocationFix>>);
}

/// Platform location service: permission state plus background updates.
#[async_trait]
pub trait LocationService: Send + Sync {
    async fn foreground_permission(&self) -> PermissionStatus;

    /// Request foreground permission. May show a platform dialog.
    async fn request_foreground_permission(&self) -> PermissionStatus;

    async fn background_permission(&self) -> PermissionStatus;

    /// Request background/"always" permission. Only valid once foreground
    /// permission is granted.
    async fn request_background_permission(&self) -> PermissionStatus;

    /// Whether background updates are currently registered.
    async fn has_started(&self) -> bool;

    /// Register background updates, delivering batches to `sink`.
    async fn start_updates(&self, options: &UpdateOptions, sink: Arc<dyn FixSink>) -> Result<()>;

    /// Unregister background updates. No-op when not registered.
    async fn stop_updates(&self) -> Result<()>;
}
