// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! Geo alerts returned by the backend in response to a location update.

use serde::{Deserialize, Serialize};

/// Maximum number of item names spelled out in a notification body.
const MAX_BODY_ITEMS: usize = 3;

/// A store-proximity alert computed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoAlert {
    /// Name of the store carrying items from the user's lists
    pub store_name: String,
    /// Names of the matching items
    #[serde(default)]
    pub items: Vec<String>,
}

impl GeoAlert {
    /// Title of the local notification surfaced for this alert.
    pub fn notification_title(&self) -> String {
        format!("{} has your items!", self.store_name)
    }

    /// Body of the local notification: up to three item names comma-joined,
    /// with an "and more" suffix when the list is longer.
    pub fn notification_body(&self) -> String {
        let shown = self
            .items
            .iter()
            .take(MAX_BODY_ITEMS)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        if self.items.len() > MAX_BODY_ITEMS {
            format!("{} and more", shown)
        } else {
            shown
        }
    }
}
