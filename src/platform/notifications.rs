// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! Platform notification service interface.

use crate::config::DEFAULT_CHANNEL_ID;
use crate::error::Result;
use crate::platform::PermissionStatus;
use async_trait::async_trait;
use std::time::Duration;

/// A local notification to present to the user.
#[derive(Debug, Clone)]
pub struct LocalNotification {
    pub title: String,
    pub body: String,
    pub sound: bool,
    /// Delay before presentation; platforms treat ~1 second as "now"
    pub delay: Duration,
}

impl LocalNotification {
    /// An immediate notification with the default sound.
    pub fn immediate(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            sound: true,
            delay: Duration::from_secs(1),
        }
    }
}

/// Android-style notification channel settings.
#[derive(Debug, Clone)]
pub struct NotificationChannel {
    pub id: String,
    pub name: String,
    /// Register at maximum importance so alerts heads-up
    pub max_importance: bool,
}

impl NotificationChannel {
    /// The default channel push and geo-alert notifications land in.
    pub fn default_channel() -> Self {
        Self {
            id: DEFAULT_CHANNEL_ID.to_string(),
            name: DEFAULT_CHANNEL_ID.to_string(),
            max_importance: true,
        }
    }
}

/// Platform notification service: permission, push token, local delivery.
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn permission(&self) -> PermissionStatus;

    /// Request notification permission. May show a platform dialog.
    async fn request_permission(&self) -> PermissionStatus;

    /// Platform push token targeting this device.
    async fn device_push_token(&self) -> Result<String>;

    /// Schedule a local notification.
    async fn schedule(&self, notification: LocalNotification) -> Result<()>;

    /// Ensure a notification channel exists. No-op where channels are not
    /// a platform concept.
    async fn ensure_channel(&self, channel: NotificationChannel) -> Result<()>;
}
