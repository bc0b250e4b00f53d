// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! Headless platform adapters that render to structured logs.

use crate::error::{AgentError, Result};
use crate::platform::dialogs::DialogService;
use crate::platform::notifications::{
    LocalNotification, NotificationChannel, NotificationService,
};
use crate::platform::PermissionStatus;
use async_trait::async_trait;

/// Notification service for hosts without a notification center.
///
/// Local notifications are rendered as log events. Device push tokens are
/// not available, which makes push registration a clean no-op on headless
/// hosts.
#[derive(Debug, Default)]
pub struct ConsoleNotificationService;

#[async_trait]
impl NotificationService for ConsoleNotificationService {
    async fn permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn device_push_token(&self) -> Result<String> {
        Err(AgentError::Platform(
            "device push tokens are not available on this host".to_string(),
        ))
    }

    async fn schedule(&self, notification: LocalNotification) -> Result<()> {
        tracing::info!(
            title = %notification.title,
            body = %notification.body,
            "Local notification"
        );
        Ok(())
    }

    async fn ensure_channel(&self, _channel: NotificationChannel) -> Result<()> {
        Ok(())
    }
}

/// Dialog surface for hosts without modal dialogs.
#[derive(Debug, Default)]
pub struct ConsoleDialogService;

impl DialogService for ConsoleDialogService {
    fn alert(&self, title: &str, message: &str) {
        tracing::warn!(title, message, "User alert");
    }
}
