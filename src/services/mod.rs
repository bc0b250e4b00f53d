// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! Services module - the reporting pipeline.

pub mod api;
pub mod permissions;
pub mod push;
pub mod reporter;

pub use api::{Backend, BackendClient, LocationUpdate};
pub use permissions::PermissionNegotiator;
pub use push::PushRegistrar;
pub use reporter::{LocationReporter, ReportOutcome};
