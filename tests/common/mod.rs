// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! Shared mocks and builders for the integration suites.
//!
//! The platform seams are exercised by invoking the reporter's batch
//! handler directly with synthetic fixes; no real location service or
//! backend is involved.

use async_trait::async_trait;
use nearbuy_agent::config::Config;
use nearbuy_agent::error::{AgentError, Result};
use nearbuy_agent::models::{GeoAlert, LocationFix};
use nearbuy_agent::platform::{
    DialogService, FixSink, LocalNotification, LocationService, NotificationChannel,
    NotificationService, PermissionStatus, UpdateOptions,
};
use nearbuy_agent::services::api::{Backend, LocationUpdate};
use nearbuy_agent::services::LocationReporter;
use nearbuy_agent::store::{keys, CredentialStore, MemoryStore};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A fix at a fixed test position with the given capture timestamp.
#[allow(dead_code)]
pub fn fix(timestamp_ms: i64) -> LocationFix {
    LocationFix::new(37.402, -122.114, timestamp_ms)
}

/// Location service mock with scriptable permission state.
///
/// `request_*` transitions the current status to the scripted
/// post-request status, mirroring a user answering the platform dialog.
pub struct MockLocationService {
    foreground: Mutex<PermissionStatus>,
    foreground_on_request: PermissionStatus,
    background: Mutex<PermissionStatus>,
    background_on_request: PermissionStatus,
    pub foreground_requests: AtomicUsize,
    pub background_requests: AtomicUsize,
    /// Order of permission requests, for sequencing assertions
    pub request_log: Mutex<Vec<&'static str>>,
    started: AtomicBool,
    pub start_calls: AtomicUsize,
    pub stop_calls: AtomicUsize,
    pub last_options: Mutex<Option<UpdateOptions>>,
}

#[allow(dead_code)]
impl MockLocationService {
    pub fn new(
        foreground: PermissionStatus,
        foreground_on_request: PermissionStatus,
        background: PermissionStatus,
        background_on_request: PermissionStatus,
    ) -> Arc<Self> {
        Arc::new(Self {
            foreground: Mutex::new(foreground),
            foreground_on_request,
            background: Mutex::new(background),
            background_on_request,
            foreground_requests: AtomicUsize::new(0),
            background_requests: AtomicUsize::new(0),
            request_log: Mutex::new(Vec::new()),
            started: AtomicBool::new(false),
            start_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
            last_options: Mutex::new(None),
        })
    }

    /// Both grants already present.
    pub fn granted() -> Arc<Self> {
        Self::new(
            PermissionStatus::Granted,
            PermissionStatus::Granted,
            PermissionStatus::Granted,
            PermissionStatus::Granted,
        )
    }

    /// Foreground granted; background denied when requested.
    pub fn background_denied() -> Arc<Self> {
        Self::new(
            PermissionStatus::Granted,
            PermissionStatus::Granted,
            PermissionStatus::Undetermined,
            PermissionStatus::Denied,
        )
    }

    /// Nothing granted yet; user will accept both prompts.
    pub fn undetermined_then_granted() -> Arc<Self> {
        Self::new(
            PermissionStatus::Undetermined,
            PermissionStatus::Granted,
            PermissionStatus::Undetermined,
            PermissionStatus::Granted,
        )
    }

    /// Nothing granted; user will refuse both prompts.
    pub fn all_denied() -> Arc<Self> {
        Self::new(
            PermissionStatus::Undetermined,
            PermissionStatus::Denied,
            PermissionStatus::Undetermined,
            PermissionStatus::Denied,
        )
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationService for MockLocationService {
    async fn foreground_permission(&self) -> PermissionStatus {
        *self.foreground.lock().unwrap()
    }

    async fn request_foreground_permission(&self) -> PermissionStatus {
        self.foreground_requests.fetch_add(1, Ordering::SeqCst);
        self.request_log.lock().unwrap().push("foreground");
        *self.foreground.lock().unwrap() = self.foreground_on_request;
        self.foreground_on_request
    }

    async fn background_permission(&self) -> PermissionStatus {
        *self.background.lock().unwrap()
    }

    async fn request_background_permission(&self) -> PermissionStatus {
        self.background_requests.fetch_add(1, Ordering::SeqCst);
        self.request_log.lock().unwrap().push("background");
        *self.background.lock().unwrap() = self.background_on_request;
        self.background_on_request
    }

    async fn has_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    async fn start_updates(&self, options: &UpdateOptions, _sink: Arc<dyn FixSink>) -> Result<()> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.started.store(true, Ordering::SeqCst);
        *self.last_options.lock().unwrap() = Some(options.clone());
        Ok(())
    }

    async fn stop_updates(&self) -> Result<()> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.started.store(false, Ordering::SeqCst);
        Ok(())
    }
}

/// Notification service mock recording everything scheduled.
pub struct MockNotificationService {
    permission: Mutex<PermissionStatus>,
    permission_on_request: PermissionStatus,
    pub permission_requests: AtomicUsize,
    device_token: Option<String>,
    pub fail_schedule: AtomicBool,
    pub scheduled: Mutex<Vec<LocalNotification>>,
    pub channels: Mutex<Vec<NotificationChannel>>,
}

#[allow(dead_code)]
impl MockNotificationService {
    pub fn new(
        permission: PermissionStatus,
        permission_on_request: PermissionStatus,
        device_token: Option<&str>,
    ) -> Arc<Self> {
        Arc::new(Self {
            permission: Mutex::new(permission),
            permission_on_request,
            permission_requests: AtomicUsize::new(0),
            device_token: device_token.map(str::to_string),
            fail_schedule: AtomicBool::new(false),
            scheduled: Mutex::new(Vec::new()),
            channels: Mutex::new(Vec::new()),
        })
    }

    pub fn granted(device_token: &str) -> Arc<Self> {
        Self::new(
            PermissionStatus::Granted,
            PermissionStatus::Granted,
            Some(device_token),
        )
    }

    pub fn denied() -> Arc<Self> {
        Self::new(
            PermissionStatus::Undetermined,
            PermissionStatus::Denied,
            Some("unreachable-token"),
        )
    }

    pub fn granted_without_token() -> Arc<Self> {
        Self::new(PermissionStatus::Granted, PermissionStatus::Granted, None)
    }

    pub fn scheduled_count(&self) -> usize {
        self.scheduled.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationService for MockNotificationService {
    async fn permission(&self) -> PermissionStatus {
        *self.permission.lock().unwrap()
    }

    async fn request_permission(&self) -> PermissionStatus {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        *self.permission.lock().unwrap() = self.permission_on_request;
        self.permission_on_request
    }

    async fn device_push_token(&self) -> Result<String> {
        self.device_token
            .clone()
            .ok_or_else(|| AgentError::Platform("no device token".to_string()))
    }

    async fn schedule(&self, notification: LocalNotification) -> Result<()> {
        if self.fail_schedule.load(Ordering::SeqCst) {
            return Err(AgentError::Platform("notification center down".to_string()));
        }
        self.scheduled.lock().unwrap().push(notification);
        Ok(())
    }

    async fn ensure_channel(&self, channel: NotificationChannel) -> Result<()> {
        self.channels.lock().unwrap().push(channel);
        Ok(())
    }
}

/// Dialog mock recording every alert shown.
#[derive(Default)]
pub struct MockDialogs {
    pub alerts: Mutex<Vec<(String, String)>>,
}

#[allow(dead_code)]
impl MockDialogs {
    pub fn shown(&self) -> Vec<(String, String)> {
        self.alerts.lock().unwrap().clone()
    }
}

impl DialogService for MockDialogs {
    fn alert(&self, title: &str, message: &str) {
        self.alerts
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
    }
}

/// Backend mock with call counters and scriptable alerts/failures.
#[derive(Default)]
pub struct MockBackend {
    pub location_calls: AtomicUsize,
    pub updates: Mutex<Vec<(String, LocationUpdate)>>,
    pub alerts: Mutex<Vec<GeoAlert>>,
    pub fail_location: AtomicBool,
    pub device_tokens: Mutex<Vec<(String, String)>>,
    pub fail_device: AtomicBool,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn respond_with_alerts(&self, alerts: Vec<GeoAlert>) {
        *self.alerts.lock().unwrap() = alerts;
    }

    pub fn location_call_count(&self) -> usize {
        self.location_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn post_location_update(
        &self,
        access_token: &str,
        update: &LocationUpdate,
    ) -> Result<Vec<GeoAlert>> {
        if self.fail_location.load(Ordering::SeqCst) {
            return Err(AgentError::Api("HTTP 500: server exploded".to_string()));
        }
        self.location_calls.fetch_add(1, Ordering::SeqCst);
        self.updates
            .lock()
            .unwrap()
            .push((access_token.to_string(), update.clone()));
        Ok(self.alerts.lock().unwrap().clone())
    }

    async fn register_device_token(&self, access_token: &str, push_token: &str) -> Result<()> {
        if self.fail_device.load(Ordering::SeqCst) {
            return Err(AgentError::Api("HTTP 500: server exploded".to_string()));
        }
        self.device_tokens
            .lock()
            .unwrap()
            .push((access_token.to_string(), push_token.to_string()));
        Ok(())
    }
}

/// A reporter wired entirely to mocks.
pub struct TestAgent {
    pub reporter: Arc<LocationReporter>,
    pub location: Arc<MockLocationService>,
    pub notifications: Arc<MockNotificationService>,
    pub dialogs: Arc<MockDialogs>,
    pub backend: Arc<MockBackend>,
    pub store: MemoryStore,
}

#[allow(dead_code)]
impl TestAgent {
    /// Signed-in agent with all permissions granted.
    pub async fn signed_in() -> Self {
        Self::signed_in_with_config(&Config::default()).await
    }

    /// Agent with granted permissions and an empty credential store.
    pub fn signed_out() -> Self {
        Self::build(
            &Config::default(),
            MockLocationService::granted(),
            MemoryStore::new(),
        )
    }

    /// Signed-in agent with a custom config (for tunable-window tests).
    pub async fn signed_in_with_config(config: &Config) -> Self {
        let store = MemoryStore::new();
        store.save(keys::USER_ID, "u-1").await.unwrap();
        store.save(keys::ACCESS_TOKEN, "tok-1").await.unwrap();
        Self::build(config, MockLocationService::granted(), store)
    }

    pub fn build(
        config: &Config,
        location: Arc<MockLocationService>,
        store: MemoryStore,
    ) -> Self {
        let notifications = MockNotificationService::granted("ExponentPushToken[test]");
        let dialogs = Arc::new(MockDialogs::default());
        let backend = Arc::new(MockBackend::default());

        let reporter = Arc::new(LocationReporter::new(
            config,
            Arc::clone(&location) as Arc<dyn LocationService>,
            Arc::clone(&notifications) as Arc<dyn NotificationService>,
            Arc::clone(&dialogs) as Arc<dyn DialogService>,
            Arc::new(store.clone()) as Arc<dyn CredentialStore>,
            Arc::clone(&backend) as Arc<dyn Backend>,
        ));

        Self {
            reporter,
            location,
            notifications,
            dialogs,
            backend,
            store,
        }
    }
}
