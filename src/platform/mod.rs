// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! Platform service seams.
//!
//! The host location and notification services are external collaborators.
//! They are abstracted as traits so the reporting pipeline can be driven
//! with synthetic fix batches in tests and embedded on headless hosts.

pub mod console;
pub mod dialogs;
pub mod gpsd;
pub mod location;
pub mod notifications;

pub use console::{ConsoleDialogService, ConsoleNotificationService};
pub use dialogs::DialogService;
pub use gpsd::GpsdLocationService;
pub use location::{Accuracy, FixSink, ForegroundNotice, LocationService, UpdateOptions};
pub use notifications::{LocalNotification, NotificationChannel, NotificationService};

/// Tri-state permission status as reported by the platform.
///
/// The platform owns this state; the agent only reads it and requests
/// transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Undetermined,
    Denied,
    Granted,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}
