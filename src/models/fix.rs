//! Location fix sample delivered by the platform location service.

use serde::{Deserialize, Serialize};

/// A single GPS/network-derived location sample.
///
/// Fixes are ephemeral: forwarded immediately or dropped, never persisted
/// by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Capture time in milliseconds since the Unix epoch
    pub timestamp_ms: i64,
}

impl LocationFix {
    pub fn new(latitude: f64, longitude: f64, timestamp_ms: i64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp_ms,
        }
    }
}
