// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! Data models for the agent.

pub mod alert;
pub mod fix;

pub use alert::GeoAlert;
pub use fix::LocationFix;
